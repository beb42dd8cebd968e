use super::transport::{SyncTransport, UreqTransport};
use crate::config::Settings;
use crate::error::{Result, TallyError};
use crate::model::{ContentEntry, RepositoryDescriptor};
use serde_json::Value;

pub const PAGE_SIZE: u32 = 100;
const AFFILIATION: &str = "owner,collaborator,organization_member";
const USER_AGENT: &str = concat!("repotally/", env!("CARGO_PKG_VERSION"));

/// Read-only GitHub REST client over a blocking transport.
pub struct GitHubClient<T: SyncTransport = UreqTransport> {
    transport: T,
    settings: Settings,
    auth_header: String,
}

impl GitHubClient<UreqTransport> {
    pub fn new(settings: Settings) -> Self {
        Self::with_transport(settings, UreqTransport::new())
    }
}

impl<T: SyncTransport> GitHubClient<T> {
    pub fn with_transport(settings: Settings, transport: T) -> Self {
        let auth_header = format!("token {}", settings.token);
        Self {
            transport,
            settings,
            auth_header,
        }
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    pub fn repositories_url(&self, page: u32) -> String {
        format!(
            "{}/user/repos?per_page={PAGE_SIZE}&page={page}&visibility=all&affiliation={AFFILIATION}",
            self.settings.api_url
        )
    }

    pub fn contents_url(&self, repo: &RepositoryDescriptor, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.settings.api_url,
            repo.owner,
            repo.name,
            encode_path(path)
        )
    }

    /// One page of `/user/repos`. An empty page means there are no more.
    pub fn list_repositories_page(&self, page: u32) -> Result<Vec<RepositoryDescriptor>> {
        let url = self.repositories_url(page);
        let body = self.get(&url)?;
        match serde_json::from_str::<Value>(&body)? {
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(TallyError::from))
                .collect(),
            _ => Err(TallyError::unexpected_format(url, &body)),
        }
    }

    /// Directory listing at `path` (empty string for the root).
    pub fn list_directory(&self, repo: &RepositoryDescriptor, path: &str) -> Result<Vec<ContentEntry>> {
        let url = self.contents_url(repo, path);
        let body = self.get(&url)?;
        match serde_json::from_str::<Value>(&body)? {
            Value::Array(_) => Ok(serde_json::from_str(&body)?),
            _ => Err(TallyError::unexpected_format(url, &body)),
        }
    }

    pub fn fetch_raw(&self, entry: &ContentEntry) -> Result<String> {
        let url = entry
            .download_url
            .as_deref()
            .ok_or_else(|| TallyError::MissingDownloadUrl(entry.path.clone()))?;
        self.get(url)
    }

    fn get(&self, url: &str) -> Result<String> {
        let headers = [
            ("Authorization", self.auth_header.as_str()),
            ("Accept", "application/vnd.github+json"),
            ("User-Agent", USER_AGENT),
        ];
        Ok(self.transport.get(url, &headers)?)
    }
}

// Only the characters that would end the path part of the URL need escaping.
fn encode_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    for c in path.chars() {
        match c {
            '%' => out.push_str("%25"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}
