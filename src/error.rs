/// Error types for portfolio-term
///
/// This module defines all possible errors that can occur in the application.
/// Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Main error type for portfolio-term operations
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O errors (terminal, config file, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pattern compilation error
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed profile file
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with message
    #[error("{0}")]
    Generic(String),
}

/// Result type alias for portfolio-term operations
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Convert PortfolioError to a user-friendly error message
impl PortfolioError {
    pub fn user_message(&self) -> String {
        match self {
            PortfolioError::Database(e) => {
                format!("Database error occurred. Please try again. Details: {}", e)
            }
            PortfolioError::Io(e) => {
                format!("File system error. Check permissions. Details: {}", e)
            }
            PortfolioError::Http(e) => {
                format!("Network request failed. Details: {}", e)
            }
            PortfolioError::Regex(e) => format!("Internal pattern error: {}", e),
            PortfolioError::Serialization(e) => {
                format!("Data format error: {}", e)
            }
            PortfolioError::ConfigParse(e) => {
                format!("Could not read profile file: {}", e)
            }
            PortfolioError::Config(msg) => {
                format!("Configuration issue: {}", msg)
            }
            PortfolioError::NotFound(what) => format!("'{}' does not exist", what),
            PortfolioError::InvalidInput(reason) => {
                format!("Invalid input: {}", reason)
            }
            PortfolioError::Generic(msg) => msg.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_user_messages() {
        let err = PortfolioError::NotFound("hello-world".to_string());
        assert!(err.user_message().contains("hello-world"));

        let err = PortfolioError::Config("no home directory".to_string());
        assert!(err.user_message().contains("Configuration"));
    }

    #[test]
    fn test_error_display() {
        let err = PortfolioError::InvalidInput("empty message".to_string());
        let display = format!("{}", err);
        assert!(display.contains("Invalid input"));
    }

    #[test]
    fn test_toml_error_converts() {
        let parsed: std::result::Result<toml::Table, _> = toml::from_str("name = ");
        let err: PortfolioError = parsed.unwrap_err().into();
        assert!(matches!(err, PortfolioError::ConfigParse(_)));
    }
}
