//! Tests for the MCP server implementation.

use flair_api::mcp::{CreateParams, DeleteParams, FlairServer, GetParams};
use flair_api::FlairClient;
use rmcp::handler::server::ServerHandler;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn server_for(mock: &MockServer) -> FlairServer {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "token_type": "Bearer"
        })))
        .mount(mock)
        .await;
    FlairServer::new(FlairClient::new("id", "secret", &mock.uri()).unwrap())
}

fn text(result: &rmcp::model::CallToolResult) -> serde_json::Value {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(t) => serde_json::from_str(&t.text).unwrap(),
        _ => panic!("Expected text content"),
    }
}

#[test]
fn flair_server_implements_handler() {
    fn assert_server_handler<T: ServerHandler>() {}
    assert_server_handler::<FlairServer>();
}

#[test]
fn flair_server_is_clone_send_sync() {
    fn assert_bounds<T: Clone + Send + Sync>() {}
    assert_bounds::<FlairServer>();
}

#[tokio::test]
async fn get_info_names_the_server() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    let info = server.get_info();

    assert_eq!(info.server_info.name, "flair");
    assert!(info.capabilities.tools.is_some());
}

#[tokio::test]
async fn get_tool_fetches_single_resource() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    Mock::given(method("GET"))
        .and(path("/api/structures/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "1", "type": "structures", "attributes": {"name": "Home"}}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server
        .handle_get(GetParams {
            resource_type: "structure".into(),
            id: Some("1".into()),
        })
        .await
        .unwrap();

    let structure = text(&result);
    assert_eq!(structure["type"], "structures");
    assert_eq!(structure["attributes"]["name"], "Home");
}

#[tokio::test]
async fn create_tool_encodes_relationships() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    Mock::given(method("POST"))
        .and(path("/api/rooms"))
        .and(body_json(json!({
            "data": {
                "type": "rooms",
                "attributes": {"name": "Office"},
                "relationships": {
                    "structure": {"data": {"id": "1", "type": "structures"}}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "12", "type": "rooms", "attributes": {"name": "Office"}}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let params: CreateParams = serde_json::from_value(json!({
        "resource_type": "rooms",
        "attributes": {"name": "Office"},
        "relationships": {"structure": {"type": "structures", "id": "1"}}
    }))
    .unwrap();

    let room = text(&server.handle_create(params).await.unwrap());
    assert_eq!(room["id"], "12");
}

#[tokio::test]
async fn create_tool_keeps_one_element_array_as_list() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    Mock::given(method("POST"))
        .and(path("/api/structures"))
        .and(body_json(json!({
            "data": {
                "type": "structures",
                "attributes": {"name": "Cabin"},
                "relationships": {
                    "rooms": {"data": [{"id": "10", "type": "rooms"}]}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": "2", "type": "structures", "attributes": {"name": "Cabin"}}
        })))
        .expect(1)
        .mount(&mock)
        .await;

    let params: CreateParams = serde_json::from_value(json!({
        "resource_type": "structures",
        "attributes": {"name": "Cabin"},
        "relationships": {"rooms": [{"type": "rooms", "id": "10"}]}
    }))
    .unwrap();

    let structure = text(&server.handle_create(params).await.unwrap());
    assert_eq!(structure["id"], "2");
}

#[tokio::test]
async fn delete_tool_reports_deleted_resource() {
    let mock = MockServer::start().await;
    let server = server_for(&mock).await;

    Mock::given(method("DELETE"))
        .and(path("/api/vents/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock)
        .await;

    let result = server
        .handle_delete(DeleteParams {
            resource_type: "vents".into(),
            id: "42".into(),
        })
        .await
        .unwrap();

    assert_eq!(text(&result), json!({"deleted": {"type": "vents", "id": "42"}}));
}
