use std::path::PathBuf;

/// Failure of a source reader. Nothing is retried past the reader itself.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Fetch from '{url}' failed with status {status}")]
    Fetch { url: String, status: u16 },
    #[error("Request to '{url}' failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to read '{}': {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid source configuration: {0}")]
    Config(String),
}

impl SourceError {
    /// Network failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Request { .. })
    }
}
