//! Response classification.
//!
//! Every call against `/api/...` runs its status and body through
//! [`classify`], which decides between a document, an empty success, or one of
//! the two server-side error kinds.

use serde_json::Value;

use crate::document::PrimaryData;
use crate::error::{FlairError, Result};

const NO_CONTENT: u16 = 204;

/// The classified result of an HTTP exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A success response carrying a non-null `data` member.
    Document(Value),
    /// `204 No Content`, or any other success status with an empty body.
    NoContent,
    /// A status outside both the success and error ranges, passed through raw.
    Unclassified { status: u16, body: String },
}

impl Outcome {
    /// Turn the outcome into JSON-API primary data.
    ///
    /// # Errors
    ///
    /// Returns [`FlairError::InvalidDocument`] when there is no document to
    /// read, or a parse error for a pass-through body that is not JSON.
    pub fn into_primary(self) -> Result<PrimaryData> {
        match self {
            Self::Document(document) => PrimaryData::from_document(document),
            Self::NoContent => Err(FlairError::InvalidDocument(
                "response had no content".to_string(),
            )),
            Self::Unclassified { body, .. } => {
                PrimaryData::from_document(serde_json::from_str(&body)?)
            }
        }
    }
}

/// Classify a response by status code and raw body.
///
/// # Errors
///
/// - [`FlairError::EmptyBody`] for a success status whose `data` is `null`
/// - [`FlairError::Api`] for any status >= 400
/// - a parse error for a success status whose body is not JSON
pub fn classify(status: u16, body: String) -> Result<Outcome> {
    if (200..300).contains(&status) && status != NO_CONTENT {
        if body.trim().is_empty() {
            tracing::debug!(status, "success response without a body");
            return Ok(Outcome::NoContent);
        }
        let document: Value = serde_json::from_str(&body)?;
        if matches!(document.get("data"), Some(Value::Null)) {
            tracing::debug!(status, "success response with null data");
            return Err(FlairError::EmptyBody {
                status_code: status,
            });
        }
        return Ok(Outcome::Document(document));
    }

    if status == NO_CONTENT {
        return Ok(Outcome::NoContent);
    }

    if status >= 400 {
        tracing::debug!(status, "error response");
        return Err(FlairError::api(status, body));
    }

    Ok(Outcome::Unclassified { status, body })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_with_data_is_a_document() {
        let outcome = classify(200, r#"{"data": {"id": "1", "type": "vents"}}"#.into()).unwrap();
        assert!(matches!(outcome, Outcome::Document(_)));
        let primary = outcome.into_primary().unwrap();
        assert_eq!(primary.into_one().unwrap().id.as_deref(), Some("1"));
    }

    #[test]
    fn created_with_data_is_a_document() {
        let outcome = classify(201, r#"{"data": []}"#.into()).unwrap();
        assert_eq!(outcome, Outcome::Document(json!({"data": []})));
    }

    #[test]
    fn null_data_is_empty_body_with_status() {
        let err = classify(200, r#"{"data": null}"#.into()).unwrap_err();
        assert!(matches!(err, FlairError::EmptyBody { status_code: 200 }));

        let err = classify(201, r#"{"data": null}"#.into()).unwrap_err();
        assert_eq!(err.status_code(), Some(201));
    }

    #[test]
    fn no_content_is_success_without_body() {
        assert_eq!(classify(204, String::new()).unwrap(), Outcome::NoContent);
    }

    #[test]
    fn client_and_server_errors_carry_status_and_body() {
        let body = r#"{"errors": [{"detail": "Resource not found"}]}"#;
        match classify(404, body.into()).unwrap_err() {
            FlairError::Api {
                status_code,
                body: raw,
                json,
            } => {
                assert_eq!(status_code, 404);
                assert_eq!(raw, body);
                assert_eq!(json.unwrap()["errors"][0]["detail"], "Resource not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }

        match classify(502, "Bad Gateway".into()).unwrap_err() {
            FlairError::Api { json, .. } => assert!(json.is_none()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn other_statuses_pass_through() {
        let outcome = classify(304, r#"{"data": {"id": "9"}}"#.into()).unwrap();
        assert!(matches!(outcome, Outcome::Unclassified { status: 304, .. }));
        let object = outcome.into_primary().unwrap().into_one().unwrap();
        assert_eq!(object.id.as_deref(), Some("9"));
    }

    #[test]
    fn success_without_body_is_no_content() {
        assert_eq!(classify(200, String::new()).unwrap(), Outcome::NoContent);
        assert_eq!(classify(202, "  \n".into()).unwrap(), Outcome::NoContent);

        let err = classify(200, String::new())
            .unwrap()
            .into_primary()
            .unwrap_err();
        assert!(matches!(err, FlairError::InvalidDocument(_)));
    }
}
