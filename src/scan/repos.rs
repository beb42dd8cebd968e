use crate::github::{GitHubClient, SyncTransport};
use crate::model::RepositoryDescriptor;
use crate::term::Console;

#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub year: Option<i32>,
    pub limit: Option<usize>,
}

/// Pages through every repository visible to the token.
///
/// Paging stops at the first empty page. Any failure ends paging early and
/// whatever was already collected is returned.
pub fn list_repositories<T: SyncTransport>(
    client: &GitHubClient<T>,
    options: ListOptions,
    console: &Console,
) -> Vec<RepositoryDescriptor> {
    let mut repos = Vec::new();
    let mut page = 1u32;

    loop {
        let items = match client.list_repositories_page(page) {
            Ok(items) => items,
            Err(e) => {
                console.error(&format!("Fetching repositories (page {page}): {e}"));
                break;
            }
        };
        tracing::debug!(page, count = items.len(), "repository page");
        if items.is_empty() {
            break;
        }

        repos.extend(
            items
                .into_iter()
                .filter(|repo| options.year.map_or(true, |year| repo.created_in(year))),
        );

        page += 1;
        if let Some(limit) = options.limit {
            if repos.len() >= limit {
                repos.truncate(limit);
                break;
            }
        }
    }

    repos
}
