//! Error types for the GA4 MCP server

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single violated constraint on an input parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    /// Dotted path to the offending field, e.g. `filter.dimension[0].name`
    pub path: String,
    /// Description of the expected shape
    pub expected: String,
}

impl FieldViolation {
    pub fn new(path: impl Into<String>, expected: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.expected)
    }
}

/// Every constraint violated by one set of tool arguments
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("Invalid parameters: {}", summarize(.details))]
pub struct ValidationError {
    pub details: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(details: Vec<FieldViolation>) -> Self {
        Self { details }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

fn summarize(details: &[FieldViolation]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure reported by the remote reporting service
#[derive(Error, Debug)]
pub enum RemoteQueryError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GA4 API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Malformed response: {0}")]
    Decode(String),
}

/// Failure loading server configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Failed to read credentials file '{path}': {source}")]
    CredentialsFile {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

/// Failure of a single report operation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Remote(#[from] RemoteQueryError),
}

/// Main error type for the GA4 MCP server
#[derive(Error, Debug)]
pub enum Ga4Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Remote(#[from] RemoteQueryError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the GA4 MCP server
pub type Result<T> = std::result::Result<T, Ga4Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_every_violation() {
        let err = ValidationError::new(vec![
            FieldViolation::new("startDate", "Date must be in YYYY-MM-DD format"),
            FieldViolation::new("limit", "integer between 1 and 1000"),
        ]);

        let message = err.message();
        assert!(message.starts_with("Invalid parameters: "));
        assert!(message.contains("startDate: Date must be in YYYY-MM-DD format"));
        assert!(message.contains("limit: integer between 1 and 1000"));
    }

    #[test]
    fn test_missing_variables_message() {
        let err = ConfigError::MissingVariables(vec![
            "GA_PROPERTY_ID".to_string(),
            "GOOGLE_PROJECT_ID".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: GA_PROPERTY_ID, GOOGLE_PROJECT_ID"
        );
    }

    #[test]
    fn test_report_error_is_transparent() {
        let err: ReportError = RemoteQueryError::Api {
            status: 403,
            body: "PERMISSION_DENIED".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "GA4 API returned 403: PERMISSION_DENIED");
    }
}
