//! OAuth token endpoint and bearer-token checks.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::error_response;
use crate::mock_server::state::MockState;

/// Body of a client-credentials token request.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub grant_type: String,
}

/// POST /oauth/token
pub async fn issue_token(
    State(state): State<Arc<RwLock<MockState>>>,
    Json(request): Json<TokenRequest>,
) -> Response {
    let mut state = state.write().await;
    state.token_requests += 1;

    if request.grant_type != "client_credentials" {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "unsupported_grant_type" })),
        )
            .into_response();
    }
    if !state.accepts(&request.client_id, &request.client_secret) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": "invalid_client" })),
        )
            .into_response();
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "access_token": state.access_token,
            "token_type": "Bearer",
            "expires_in": 3600,
            "scope": "structures.view structures.edit vents.view vents.edit"
        })),
    )
        .into_response()
}

/// Reject a request unless it carries the issued bearer token.
pub(crate) fn authorize(state: &MockState, headers: &HeaderMap) -> Result<(), Response> {
    let expected = format!("Bearer {}", state.access_token);
    let given = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    match given {
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "The access token is invalid".to_string(),
        )),
        None => Err(error_response(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Missing Authorization header".to_string(),
        )),
    }
}
