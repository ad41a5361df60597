use std::fmt;
use std::path::PathBuf;

/// Result type alias for SnippetKit CLI operations
pub type SnippetResult<T> = Result<T, SnippetError>;

/// Main error type for the SnippetKit CLI
#[derive(Debug)]
pub enum SnippetError {
    /// No API key is stored
    NotAuthenticated,
    /// The API key was rejected by the service
    InvalidToken,
    /// Transport-level failures (connect, timeout, TLS)
    Network(String),
    /// The server answered with something other than a successful envelope
    Protocol(String),
    /// Snippet missing or empty
    NotFound(String),
    /// User-supplied install path is unusable
    PathInvalid(String),
    /// Install target exists and overwrite was not requested
    AlreadyExists(PathBuf),
    /// Directory or file write failures
    FileSystem(String),
    /// Interactive prompt aborted
    UserCancelled,
    /// Configuration errors
    Config(String),
    /// IO-related errors
    Io(std::io::Error),
    /// JSON serialization/deserialization errors
    Json(serde_json::Error),
    /// YAML parsing errors
    Yaml(serde_yaml::Error),
}

impl SnippetError {
    /// A soft stop is reported as a warning and does not fail the process.
    pub fn is_soft_stop(&self) -> bool {
        matches!(self, SnippetError::AlreadyExists(_))
    }

    /// Remediation text shown under the error message, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            SnippetError::NotAuthenticated => {
                Some("Run 'snippetkit login' to store an API key.")
            }
            SnippetError::InvalidToken => {
                Some("Your API key is invalid or expired. Run 'snippetkit login' again.")
            }
            SnippetError::AlreadyExists(_) => Some("Use --force to overwrite."),
            _ => None,
        }
    }
}

impl fmt::Display for SnippetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetError::NotAuthenticated => write!(f, "Not authenticated: API key is missing"),
            SnippetError::InvalidToken => write!(f, "API key is invalid or expired"),
            SnippetError::Network(msg) => write!(f, "Network error: {}", msg),
            SnippetError::Protocol(msg) => write!(f, "Unexpected API response: {}", msg),
            SnippetError::NotFound(id) => write!(f, "Snippet '{}' not found", id),
            SnippetError::PathInvalid(msg) => write!(f, "Invalid path: {}", msg),
            SnippetError::AlreadyExists(path) => {
                write!(f, "File '{}' already exists", path.display())
            }
            SnippetError::FileSystem(msg) => write!(f, "File system error: {}", msg),
            SnippetError::UserCancelled => write!(f, "Operation cancelled by user"),
            SnippetError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SnippetError::Io(e) => write!(f, "IO error: {}", e),
            SnippetError::Json(e) => write!(f, "JSON error: {}", e),
            SnippetError::Yaml(e) => write!(f, "YAML error: {}", e),
        }
    }
}

impl std::error::Error for SnippetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnippetError::Io(e) => Some(e),
            SnippetError::Json(e) => Some(e),
            SnippetError::Yaml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SnippetError {
    fn from(err: std::io::Error) -> Self {
        SnippetError::Io(err)
    }
}

impl From<reqwest::Error> for SnippetError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SnippetError::Protocol(err.to_string())
        } else {
            SnippetError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SnippetError {
    fn from(err: serde_json::Error) -> Self {
        SnippetError::Json(err)
    }
}

impl From<serde_yaml::Error> for SnippetError {
    fn from(err: serde_yaml::Error) -> Self {
        SnippetError::Yaml(err)
    }
}

impl From<inquire::InquireError> for SnippetError {
    fn from(err: inquire::InquireError) -> Self {
        match err {
            inquire::InquireError::OperationCanceled
            | inquire::InquireError::OperationInterrupted => SnippetError::UserCancelled,
            other => SnippetError::Io(std::io::Error::other(other.to_string())),
        }
    }
}
