//! Generic JSON-API resource handlers.
//!
//! One set of handlers serves every resource type, mirroring the single
//! generic implementation on the client side.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::auth::authorize;
use super::error_response;
use crate::mock_server::state::MockState;
use crate::{ResourceObject, ResourceType};

/// A request document: `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct RequestDocument {
    pub data: ResourceObject,
}

fn not_found(resource_type: &str, id: &str) -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "Not Found",
        format!("No {resource_type} found with id: {id}"),
    )
}

fn document(status: StatusCode, data: serde_json::Value) -> Response {
    (status, Json(serde_json::json!({ "data": data }))).into_response()
}

/// Blank names are rejected the way the live API rejects invalid attributes.
fn validate(object: &ResourceObject) -> Result<(), Response> {
    match object.attributes.get("name").and_then(|n| n.as_str()) {
        Some(name) if name.trim().is_empty() => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(serde_json::json!({
                "errors": [{
                    "status": "422",
                    "title": "Invalid Attribute",
                    "detail": "name must not be blank",
                    "source": { "pointer": "/data/attributes/name" }
                }]
            })),
        )
            .into_response()),
        _ => Ok(()),
    }
}

/// GET /api/{type}
pub async fn list_resources(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(resource_type): Path<String>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let objects: Vec<&ResourceObject> = state.list(&resource_type);
    document(StatusCode::OK, serde_json::json!(objects))
}

/// GET /api/{type}/{id}
pub async fn get_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.get(&resource_type, &id) {
        Some(object) => document(StatusCode::OK, serde_json::json!(object)),
        None => not_found(&resource_type, &id),
    }
}

/// POST /api/{type}
pub async fn create_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    Path(resource_type): Path<String>,
    headers: HeaderMap,
    Json(request): Json<RequestDocument>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    let mut object = request.data;
    let expected = ResourceType::from(resource_type.as_str());
    if object.resource_type.as_ref() != Some(&expected) {
        return error_response(
            StatusCode::CONFLICT,
            "Type Mismatch",
            format!("document type does not match endpoint '{resource_type}'"),
        );
    }
    if let Err(response) = validate(&object) {
        return response;
    }

    object.id = None;
    let created = state.insert(object);
    document(StatusCode::CREATED, serde_json::json!(created))
}

/// PATCH /api/{type}/{id}
pub async fn update_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(request): Json<RequestDocument>,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }
    if let Err(response) = validate(&request.data) {
        return response;
    }

    let RequestDocument { data } = request;
    match state.update(&resource_type, &id, data.attributes, data.relationships) {
        Some(object) => document(StatusCode::OK, serde_json::json!(object)),
        None => not_found(&resource_type, &id),
    }
}

/// DELETE /api/{type}/{id}
pub async fn delete_resource(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.remove(&resource_type, &id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&resource_type, &id),
    }
}

/// GET /api/{type}/{id}/current-reading
pub async fn current_reading(
    State(state): State<Arc<RwLock<MockState>>>,
    Path((resource_type, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Err(response) = authorize(&state, &headers) {
        return response;
    }

    match state.reading(&resource_type, &id) {
        Some(reading) => document(
            StatusCode::OK,
            serde_json::json!({
                "id": format!("{id}-reading"),
                "type": "sensor-readings",
                "attributes": reading
            }),
        ),
        None => not_found(&resource_type, &id),
    }
}
