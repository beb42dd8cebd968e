use crate::error::{Result, TallyError};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_SETTINGS_FILE: &str = ".env";
pub const DEFAULT_OUTPUT_FILE: &str = "repo_stats.txt";
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Credentials and endpoint, read once at startup.
#[derive(Clone)]
pub struct Settings {
    pub username: String,
    pub token: String,
    pub api_url: String,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Settings {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TallyError::SettingsFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_pairs(parse_key_values(&text), path)
    }

    fn from_pairs(mut pairs: HashMap<String, String>, path: &Path) -> Result<Self> {
        let mut take = |key: &'static str| {
            pairs
                .remove(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| TallyError::MissingSetting {
                    key,
                    path: PathBuf::from(path),
                })
        };
        let username = take("USERNAME")?;
        let token = take("TOKEN")?;
        let settings = Settings::new(username, token);
        Ok(match pairs.remove("API_URL").filter(|v| !v.is_empty()) {
            Some(url) => settings.with_api_url(url),
            None => settings,
        })
    }
}

/// Parses `KEY=VALUE` lines; blank lines and `#` comments are ignored.
pub fn parse_key_values(text: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        pairs.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }
    pairs
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Per-run knobs that are not credentials.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub year: Option<i32>,
    pub limit: Option<usize>,
    pub max_depth: usize,
    pub output: PathBuf,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            year: None,
            limit: None,
            max_depth: DEFAULT_MAX_DEPTH,
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}
