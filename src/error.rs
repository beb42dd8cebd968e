use crate::github::TransportError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TallyError>;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings file '{}' could not be read: {source}", path.display())]
    SettingsFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Missing required setting '{key}' in '{}'", path.display())]
    MissingSetting { key: &'static str, path: PathBuf },
    #[error("Unexpected response format from {url}: {snippet}")]
    UnexpectedFormat { url: String, snippet: String },
    #[error("Missing download URL for '{0}'")]
    MissingDownloadUrl(String),
    #[error("Maximum directory depth {limit} exceeded at '{path}'")]
    DepthExceeded { path: String, limit: usize },
}

impl TallyError {
    pub fn unexpected_format(url: impl Into<String>, body: &str) -> Self {
        let snippet: String = body.chars().take(200).collect();
        TallyError::UnexpectedFormat {
            url: url.into(),
            snippet,
        }
    }
}
