use thiserror::Error;

/// Errors produced while mirroring a page or one of its resources
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The input could not be parsed as an absolute URL
    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed but has no host to derive a folder from
    #[error("URL has no host: {0}")]
    MissingHost(String),

    /// Network or body failure from the reqwest client
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// The shared cancellation token fired
    #[error("operation cancelled")]
    Cancelled,

    /// Filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The HTML rewriter rejected the document
    #[error("failed to rewrite HTML: {0}")]
    Rewrite(#[from] lol_html::errors::RewritingError),

    /// Configuration could not be loaded
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl MirrorError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, MirrorError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, MirrorError>;
