use crate::classify::{classify, Category, Classification};
use crate::error::TallyError;
use crate::github::{GitHubClient, SyncTransport};
use crate::model::{AggregationResult, ContentEntry, FileMetrics, RepositoryDescriptor, LARGE_FILE_LINES};
use crate::term::Console;

/// Walks a repository's contents tree and folds per-file line counts.
pub struct Aggregator<'a, T: SyncTransport> {
    client: &'a GitHubClient<T>,
    console: &'a Console,
    max_depth: usize,
}

impl<'a, T: SyncTransport> Aggregator<'a, T> {
    pub fn new(client: &'a GitHubClient<T>, console: &'a Console, max_depth: usize) -> Self {
        Self {
            client,
            console,
            max_depth,
        }
    }

    pub fn aggregate_repository(&self, repo: &RepositoryDescriptor) -> AggregationResult {
        self.aggregate(repo, "")
    }

    /// Any failure below `path` is logged and contributes nothing.
    pub fn aggregate(&self, repo: &RepositoryDescriptor, path: &str) -> AggregationResult {
        self.walk(repo, path, 0)
    }

    fn walk(&self, repo: &RepositoryDescriptor, path: &str, depth: usize) -> AggregationResult {
        let location = format!("{}/{}", repo.full_name(), path);
        if depth > self.max_depth {
            let err = TallyError::DepthExceeded {
                path: location,
                limit: self.max_depth,
            };
            self.console.error(&err.to_string());
            return AggregationResult::empty();
        }
        tracing::debug!(repo = %repo.full_name(), path, depth, "listing directory");

        let entries = match self.client.list_directory(repo, path) {
            Ok(entries) => entries,
            Err(e) => {
                self.console
                    .error(&format!("Unable to fetch contents of {location}: {e}"));
                return AggregationResult::empty();
            }
        };

        let mut result = AggregationResult::empty();
        for entry in &entries {
            if entry.is_file() {
                self.count_file(repo, entry, &mut result);
            } else if entry.is_dir() {
                self.console.dir(&format!(
                    "Traversing directory: {}/{}",
                    repo.full_name(),
                    entry.path
                ));
                let sub = self.walk(repo, &entry.path, depth + 1);
                result.merge(&sub);
            } else {
                tracing::trace!(kind = %entry.kind, path = %entry.path, "ignoring entry");
            }
        }
        result
    }

    fn count_file(&self, repo: &RepositoryDescriptor, entry: &ContentEntry, result: &mut AggregationResult) {
        let shown = format!("{}/{}", repo.full_name(), entry.path);
        let (extension, category) = match classify(&entry.name) {
            Classification::Counted { extension, category } => (extension, category),
            Classification::Skipped { extension } => {
                self.console.skip(&format!(
                    "Ignoring file: {shown} (Extension: {})",
                    extension.as_deref().unwrap_or("none")
                ));
                return;
            }
        };

        self.console.file(&format!("Processing file: {shown}"));
        let content = match self.client.fetch_raw(entry) {
            Ok(content) => content,
            Err(e) => {
                self.console.error(&format!("Unable to fetch file: {shown}: {e}"));
                return;
            }
        };

        let metrics = FileMetrics::from_content(&content);
        result.add_file(&extension, metrics.lines);
        self.report_metrics(&metrics, category);
    }

    fn report_metrics(&self, metrics: &FileMetrics, category: Category) {
        self.console.metrics(
            &format!(
                "Lines: {}, Words: {}, Characters: {}",
                metrics.lines, metrics.words, metrics.characters
            ),
            category.color(),
        );
        if metrics.is_large() {
            self.console.warning(&format!(
                "This file has {} lines (>= {LARGE_FILE_LINES}) and may be generated or vendored.",
                metrics.lines
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::github::FakeTransport;
    use crate::model::ExtensionTally;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    const API: &str = "http://api.test";

    fn repo() -> RepositoryDescriptor {
        RepositoryDescriptor {
            name: "site".into(),
            owner: "octo".into(),
            created_at: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn contents(path: &str) -> String {
        format!("{API}/repos/octo/site/contents/{path}")
    }

    fn raw(path: &str) -> String {
        format!("http://raw.test/{path}")
    }

    fn file(path: &str) -> String {
        let name = path.rsplit('/').next().unwrap_or(path);
        format!(
            r#"{{"type":"file","name":"{name}","path":"{path}","download_url":"{}"}}"#,
            raw(path)
        )
    }

    fn dir(path: &str) -> String {
        let name = path.rsplit('/').next().unwrap_or(path);
        format!(r#"{{"type":"dir","name":"{name}","path":"{path}","download_url":null}}"#)
    }

    fn listing(entries: &[String]) -> String {
        format!("[{}]", entries.join(","))
    }

    fn lines(n: usize) -> String {
        "x = 1\n".repeat(n)
    }

    fn client(fake: FakeTransport) -> GitHubClient<FakeTransport> {
        GitHubClient::with_transport(Settings::new("octo", "t").with_api_url(API), fake)
    }

    fn run(client: &GitHubClient<FakeTransport>, max_depth: usize) -> AggregationResult {
        let console = Console::silent();
        Aggregator::new(client, &console, max_depth).aggregate_repository(&repo())
    }

    #[test]
    fn mixed_tree_counts_allowed_files_only() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[file("a.py"), file("b.png"), dir("lib")]))
            .respond(contents("lib"), listing(&[file("lib/c.js")]))
            .respond(raw("a.py"), lines(3))
            .respond(raw("b.png"), "\u{89}PNG\n\n\n\n")
            .respond(raw("lib/c.js"), lines(10));
        let client = client(fake);

        let result = run(&client, 64);

        let expected: ExtensionTally = [("py", 3), ("js", 10)].into_iter().collect();
        assert_eq!(result.total_lines, 13);
        assert_eq!(result.tally, expected);
        assert_eq!(result.tally.get("png"), None);
        assert!(!client.transport().was_requested(&raw("b.png")));
    }

    #[test]
    fn total_matches_tally_sum() {
        let fake = FakeTransport::new()
            .respond(
                contents(""),
                listing(&[file("index.html"), file("style.css"), dir("src"), file("Makefile")]),
            )
            .respond(contents("src"), listing(&[file("src/app.ts"), file("src/util.ts"), dir("src/deep")]))
            .respond(contents("src/deep"), listing(&[file("src/deep/run.sh")]))
            .respond(raw("index.html"), lines(7))
            .respond(raw("style.css"), lines(4))
            .respond(raw("src/app.ts"), lines(20))
            .respond(raw("src/util.ts"), lines(5))
            .respond(raw("src/deep/run.sh"), lines(2));
        let client = client(fake);

        let result = run(&client, 64);

        assert_eq!(result.total_lines, 38);
        assert_eq!(result.total_lines, result.tally.total());
        assert_eq!(result.tally.get("ts"), Some(25));
    }

    #[test]
    fn failed_sibling_directory_contributes_zero() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[dir("one"), dir("two"), dir("three")]))
            .respond(contents("one"), listing(&[file("one/a.py")]))
            .fail(contents("two"), 500)
            .respond(contents("three"), listing(&[file("three/b.py")]))
            .respond(raw("one/a.py"), lines(4))
            .respond(raw("three/b.py"), lines(6));
        let client = client(fake);

        let result = run(&client, 64);

        assert_eq!(result.total_lines, 10);
        assert_eq!(result.tally.get("py"), Some(10));
        assert!(client.transport().was_requested(&contents("three")));
    }

    #[test]
    fn failed_root_listing_is_empty() {
        let client = client(FakeTransport::new().fail(contents(""), 404));
        assert!(run(&client, 64).is_empty());
    }

    #[test]
    fn non_array_listing_is_empty() {
        let client = client(FakeTransport::new().respond(contents(""), r#"{"message":"This repository is empty."}"#));
        assert!(run(&client, 64).is_empty());
    }

    #[test]
    fn failed_raw_fetch_skips_only_that_file() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[file("a.py"), file("b.py")]))
            .fail(raw("a.py"), 502)
            .respond(raw("b.py"), lines(9));
        let client = client(fake);

        let result = run(&client, 64);

        assert_eq!(result.total_lines, 9);
        assert_eq!(result.tally.get("py"), Some(9));
    }

    #[test]
    fn large_files_are_counted_in_full() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[file("bundle.js")]))
            .respond(raw("bundle.js"), lines(2000));
        let client = client(fake);

        assert_eq!(run(&client, 64).tally.get("js"), Some(2000));
    }

    #[test]
    fn other_entry_types_are_ignored() {
        let fake = FakeTransport::new()
            .respond(
                contents(""),
                r#"[{"type":"submodule","name":"vendor","path":"vendor"},{"type":"symlink","name":"l.py","path":"l.py"}]"#,
            );
        let client = client(fake);

        assert!(run(&client, 64).is_empty());
        assert_eq!(client.transport().requests(), vec![contents("")]);
    }

    #[test]
    fn depth_guard_stops_descent() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[file("top.py"), dir("a")]))
            .respond(contents("a"), listing(&[file("a/mid.py"), dir("a/b")]))
            .respond(contents("a/b"), listing(&[file("a/b/low.py")]))
            .respond(raw("top.py"), lines(1))
            .respond(raw("a/mid.py"), lines(2))
            .respond(raw("a/b/low.py"), lines(4));
        let client = client(fake);

        let result = run(&client, 1);

        assert_eq!(result.total_lines, 3);
        assert!(!client.transport().was_requested(&contents("a/b")));
    }

    #[test]
    fn extension_case_is_folded() {
        let fake = FakeTransport::new()
            .respond(contents(""), listing(&[file("A.PY"), file("b.py")]))
            .respond(raw("A.PY"), lines(2))
            .respond(raw("b.py"), lines(3));
        let client = client(fake);

        let result = run(&client, 64);

        assert_eq!(result.tally.len(), 1);
        assert_eq!(result.tally.get("py"), Some(5));
    }
}
