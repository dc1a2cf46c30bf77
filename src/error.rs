//! Error types for jira-pr-sync.
//!
//! Every failure short-circuits the run and is reported verbatim as the
//! action's terminal failure message, so variants carry human-readable
//! context rather than structured recovery data.

use thiserror::Error;

/// Reasons a pull request is refused before any mutation is sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "wrong base branch: pull request targets '{actual}' but the intended base is '{intended}'"
    )]
    WrongBaseBranch { actual: String, intended: String },

    #[error(
        "stale branch, update required: pull request base '{branch}' is at {recorded} but origin is at {latest}"
    )]
    StaleBranch {
        branch: String,
        recorded: String,
        latest: String,
    },
}

/// Main error type for jira-pr-sync operations.
#[derive(Error, Debug)]
pub enum SyncError {
    // Inputs and event payload
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    // Remote API errors
    #[error("API authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network request failed: {0}")]
    Network(String),

    #[error("GitHub API error: {0}")]
    Forge(String),

    // Pull request checks
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // Local repository state
    #[error("Repository command failed: {0}")]
    CommandExecution(String),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("Logger initialization error: {0}")]
    Logger(#[from] log::SetLoggerError),

    // Generic wrapper for other errors
    #[error(transparent)]
    Other(#[from] color_eyre::Report),
}

/// Result type alias using SyncError
pub type Result<T> = std::result::Result<T, SyncError>;

impl SyncError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a repository command error
    pub fn command(msg: impl Into<String>) -> Self {
        Self::CommandExecution(msg.into())
    }

    /// Map an HTTP status from either API onto the error taxonomy.
    pub fn from_status(status: u16, context: impl Into<String>) -> Self {
        let context = context.into();
        match status {
            401 | 403 => Self::Authentication(format!("{context} ({status})")),
            404 => Self::NotFound(context),
            _ => Self::Network(format!("{context} ({status})")),
        }
    }
}

impl From<std::io::Error> for SyncError {
    fn from(err: std::io::Error) -> Self {
        Self::Other(color_eyre::Report::from(err))
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_status(status.as_u16(), err.to_string());
        }
        Self::Network(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for SyncError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::Authentication(format!("Invalid header value: {}", err))
    }
}

impl From<octocrab::Error> for SyncError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                let status = source.status_code.as_u16();
                match status {
                    401 | 403 | 404 => {
                        Self::from_status(status, source.message.clone())
                    }
                    _ => Self::Forge(format!("{} ({status})", source.message)),
                }
            }
            octocrab::Error::Hyper { .. }
            | octocrab::Error::Http { .. }
            | octocrab::Error::Service { .. } => Self::Network(err.to_string()),
            _ => Self::Forge(err.to_string()),
        }
    }
}

impl From<git2::Error> for SyncError {
    fn from(err: git2::Error) -> Self {
        Self::CommandExecution(err.message().to_string())
    }
}
