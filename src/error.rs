//! Error types for Flair API operations.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during Flair API operations.
#[derive(Debug, Error)]
pub enum FlairError {
    /// Configuration is missing or incomplete.
    #[error("Flair configuration required: {0}")]
    ConfigMissing(String),

    /// The server answered with a success status but `data` was null.
    #[error("EmptyBodyError<HTTP Response: {status_code}>")]
    EmptyBody { status_code: u16 },

    /// The server answered with status >= 400.
    ///
    /// `json` holds the parsed body when it was valid JSON.
    #[error("ApiError<HTTP Response: {status_code}>")]
    Api {
        status_code: u16,
        body: String,
        json: Option<Value>,
    },

    /// An instance operation was attempted without a bound client or an id.
    #[error("Cannot {operation}: missing client or ID")]
    MissingClientOrId { operation: &'static str },

    /// A relationship reference was requested for an unsaved resource.
    #[error("Cannot create relationship without ID")]
    MissingId,

    /// The resource was deleted and can no longer be mutated.
    #[error("{resource_type} '{id}' has been deleted")]
    ResourceDeleted { resource_type: String, id: String },

    /// The OAuth token endpoint did not hand out a usable token.
    #[error("Getting access token failed: {0}")]
    Authentication(String),

    /// A success response did not carry a JSON-API document.
    #[error("Invalid JSON-API document: {0}")]
    InvalidDocument(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FlairError {
    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::EmptyBody { status_code } | Self::Api { status_code, .. } => Some(*status_code),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the error was raised locally before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingClientOrId { .. } | Self::MissingId | Self::ResourceDeleted { .. }
        )
    }

    /// Build an API error from a raw body, parsing it as JSON when possible.
    pub(crate) fn api(status_code: u16, body: String) -> Self {
        let json = serde_json::from_str(&body).ok();
        Self::Api {
            status_code,
            body,
            json,
        }
    }
}

/// Result type alias for Flair operations.
pub type Result<T> = core::result::Result<T, FlairError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_parsed_body() {
        let err = FlairError::api(422, r#"{"errors":[{"detail":"bad"}]}"#.to_string());
        match err {
            FlairError::Api { status_code, json, .. } => {
                assert_eq!(status_code, 422);
                assert_eq!(json.unwrap()["errors"][0]["detail"], "bad");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn api_error_with_unparseable_body_has_no_json() {
        let err = FlairError::api(500, "<html>oops</html>".to_string());
        assert_eq!(err.status_code(), Some(500));
        match err {
            FlairError::Api { body, json, .. } => {
                assert_eq!(body, "<html>oops</html>");
                assert!(json.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn precondition_errors_are_local() {
        assert!(FlairError::MissingId.is_precondition());
        assert!(FlairError::MissingClientOrId { operation: "refresh" }.is_precondition());
        assert!(!FlairError::EmptyBody { status_code: 200 }.is_precondition());
    }

    #[test]
    fn messages_name_the_operation() {
        let err = FlairError::MissingClientOrId { operation: "update" };
        assert_eq!(err.to_string(), "Cannot update: missing client or ID");
        let err = FlairError::EmptyBody { status_code: 200 };
        assert_eq!(err.to_string(), "EmptyBodyError<HTTP Response: 200>");
    }
}
