use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_VERSION: u32 = 1;

/// Files at or above this many lines get a warning in the log.
pub const LARGE_FILE_LINES: u64 = 1500;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryDescriptor {
    pub name: String,
    #[serde(deserialize_with = "owner_login")]
    pub owner: String,
    pub created_at: DateTime<Utc>,
}

impl RepositoryDescriptor {
    pub fn created_in(&self, year: i32) -> bool {
        self.created_at.year() == year
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

// The API nests the owner as `{"login": ...}`; our own JSON stores a plain string.
fn owner_login<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Owner {
        Login { login: String },
        Plain(String),
    }

    Ok(match Owner::deserialize(deserializer)? {
        Owner::Login { login } => login,
        Owner::Plain(login) => login,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl ContentEntry {
    pub fn is_file(&self) -> bool {
        self.kind == "file"
    }

    pub fn is_dir(&self) -> bool {
        self.kind == "dir"
    }
}

/// Line counts keyed by lower-case extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtensionTally(BTreeMap<String, u64>);

impl ExtensionTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, extension: &str, lines: u64) {
        *self.0.entry(extension.to_string()).or_insert(0) += lines;
    }

    pub fn merge(&mut self, other: &ExtensionTally) {
        for (ext, count) in &other.0 {
            self.add(ext, *count);
        }
    }

    pub fn get(&self, extension: &str) -> Option<u64> {
        self.0.get(extension).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(ext, count)| (ext.as_str(), *count))
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for ExtensionTally {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = ExtensionTally::new();
        for (ext, count) in iter {
            tally.add(&ext.into(), count);
        }
        tally
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationResult {
    pub total_lines: u64,
    pub tally: ExtensionTally,
}

impl AggregationResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, extension: &str, lines: u64) {
        self.total_lines += lines;
        self.tally.add(extension, lines);
    }

    pub fn merge(&mut self, other: &AggregationResult) {
        self.total_lines += other.total_lines;
        self.tally.merge(&other.tally);
    }

    pub fn is_empty(&self) -> bool {
        self.total_lines == 0 && self.tally.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetrics {
    pub lines: u64,
    pub words: u64,
    pub characters: u64,
}

impl FileMetrics {
    pub fn from_content(content: &str) -> Self {
        let mut lines = 0u64;
        let mut words = 0u64;
        for line in split_lines(content) {
            lines += 1;
            words += line.split_whitespace().count() as u64;
        }
        Self {
            lines,
            words,
            characters: content.chars().count() as u64,
        }
    }

    pub fn is_large(&self) -> bool {
        self.lines >= LARGE_FILE_LINES
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every line boundary, including bare `\r`; `\r\n` is one break.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let Some(at) = rest.find(is_line_break) else {
            return Some(std::mem::take(&mut rest));
        };
        let line = &rest[..at];
        let skip = if rest[at..].starts_with("\r\n") {
            2
        } else {
            rest[at..].chars().next().map_or(1, char::len_utf8)
        };
        rest = &rest[at + skip..];
        Some(line)
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryReport {
    pub name: String,
    pub owner: String,
    pub total_lines: u64,
    pub tally: ExtensionTally,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub year: Option<i32>,
    pub repository_count: usize,
    pub repositories: Vec<RepositoryReport>,
    pub overall: ExtensionTally,
}
