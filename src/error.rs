//! Error types for changelist.

use thiserror::Error;

/// Main error type for changelist operations.
#[derive(Error, Debug)]
pub enum ChangelistError {
    // Resolution errors
    #[error("Could not determine current GitHub repo. Use the --repo argument")]
    UnresolvedRepo,

    #[error("Could not find last tag. Use the --tag argument")]
    UnresolvedTag,

    #[error("Invalid repository \"{0}\": expected OWNER/REPO")]
    InvalidRepo(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Not a git repository: {}", .0.display())]
    NotARepository(std::path::PathBuf),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    // Forge errors
    #[error("GitHub request {url} failed with status {status}: {body}")]
    Api {
        url: String,
        status: u16,
        body: String,
    },

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Network request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    // Formatting errors
    #[error("Column width {0} is too narrow to wrap list items")]
    InvalidWidth(usize),

    // Library errors - automatic conversions via #[from]
    #[error("Git operation failed: {0}")]
    GitError(#[from] git2::Error),

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Regular expression error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using ChangelistError
pub type Result<T> = std::result::Result<T, ChangelistError>;

impl ChangelistError {
    /// Create an API error from a failed response
    pub fn api(
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        Self::Api {
            url: url.into(),
            status,
            body: body.into(),
        }
    }
}
