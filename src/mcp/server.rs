//! MCP Server handler for the Flair API.

use rmcp::{
    handler::server::ServerHandler,
    model::{
        CallToolRequestParam, CallToolResult, Content, ErrorData as McpError, Implementation,
        ListToolsResult, PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
        ToolsCapability,
    },
    service::RequestContext,
    RoleServer,
};
use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

use crate::{
    mcp::{params::relationship_map, CreateParams, DeleteParams, GetParams, UpdateParams},
    FlairClient, FlairError, ResourceType,
};

/// Flair MCP Server.
///
/// Implements the MCP ServerHandler trait on top of the generic client verbs.
///
/// # Tools
///
/// - `get` - Fetch one resource, or a whole collection when no id is given
/// - `create` - Create a resource from attributes and relationships
/// - `update` - Patch a resource
/// - `delete` - Delete a resource
#[derive(Clone)]
pub struct FlairServer {
    client: Arc<FlairClient>,
}

impl FlairServer {
    /// Build a server around [`FlairClient::from_env`].
    ///
    /// Fails with [`FlairError::ConfigMissing`] when a credential variable is unset.
    pub fn from_env() -> crate::Result<Self> {
        let client = FlairClient::from_env()?;
        Ok(Self::new(client))
    }

    /// Serve tools through an existing client.
    pub fn new(client: FlairClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Tool input schema derived from a parameter type.
    fn schema<T: JsonSchema>() -> Arc<serde_json::Map<String, serde_json::Value>> {
        match serde_json::to_value(schemars::schema_for!(T)) {
            Ok(serde_json::Value::Object(map)) => Arc::new(map),
            _ => Arc::default(),
        }
    }

    /// Decode tool arguments into a parameter type.
    fn arguments<T: DeserializeOwned>(args: serde_json::Value) -> Result<T, McpError> {
        serde_json::from_value(args)
            .map_err(|e| McpError::invalid_params(format!("invalid arguments: {e}"), None))
    }

    /// Convert FlairError to McpError.
    fn to_mcp_error(err: FlairError) -> McpError {
        match &err {
            FlairError::Api {
                status_code: 404, ..
            } => McpError::resource_not_found(err.to_string(), None),
            FlairError::Api {
                status_code, json, ..
            } if (400..500).contains(status_code) => {
                McpError::invalid_params(err.to_string(), json.clone())
            }
            FlairError::ConfigMissing(msg) => McpError::invalid_params(msg.clone(), None),
            e if e.is_precondition() => McpError::invalid_params(err.to_string(), None),
            _ => McpError::internal_error(err.to_string(), None),
        }
    }

    fn resource_type(value: &str) -> Result<ResourceType, McpError> {
        crate::cli::parse_resource_type(value).map_err(|e| McpError::invalid_params(e, None))
    }

    fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// `get`: the resource, or the collection when `id` is omitted, as
    /// pretty-printed JSON.
    pub async fn handle_get(&self, params: GetParams) -> Result<CallToolResult, McpError> {
        let resource_type = Self::resource_type(&params.resource_type)?;
        let fetched = self
            .client
            .get(&resource_type, params.id.as_deref())
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&fetched)
    }

    pub async fn handle_create(&self, params: CreateParams) -> Result<CallToolResult, McpError> {
        let resource_type = Self::resource_type(&params.resource_type)?;
        let created = self
            .client
            .create(
                &resource_type,
                &params.attributes,
                &relationship_map(&params.relationships),
            )
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&created)
    }

    pub async fn handle_update(&self, params: UpdateParams) -> Result<CallToolResult, McpError> {
        let resource_type = Self::resource_type(&params.resource_type)?;
        let updated = self
            .client
            .update(
                &resource_type,
                &params.id,
                &params.attributes,
                &relationship_map(&params.relationships),
            )
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&updated)
    }

    /// `delete`: reports the removed resource's type and id.
    pub async fn handle_delete(&self, params: DeleteParams) -> Result<CallToolResult, McpError> {
        let resource_type = Self::resource_type(&params.resource_type)?;
        self.client
            .delete(&resource_type, &params.id)
            .await
            .map_err(Self::to_mcp_error)?;
        Self::json_result(&serde_json::json!({
            "deleted": { "type": resource_type, "id": params.id }
        }))
    }
}

impl ServerHandler for FlairServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                ..Default::default()
            },
            server_info: Implementation {
                name: "flair".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(
                "Flair API MCP Server - Read and control structures, rooms, vents, pucks and other Flair devices."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: PaginatedRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![
            Tool::new(
                "get",
                "Fetch a Flair resource by type and id, or the whole collection when id is omitted. \
                 Types: structures, rooms, vents, hvac-units, thermostats, bridges, \
                 remote-sensors, users, pucks.",
                Self::schema::<GetParams>(),
            ),
            Tool::new(
                "create",
                "Create a Flair resource. Attributes use kebab-case names; \
                 relationships map a name to one {type, id} reference (to-one) \
                 or an array of them (to-many).",
                Self::schema::<CreateParams>(),
            ),
            Tool::new(
                "update",
                "Patch a Flair resource, e.g. set percent-open on a vent or \
                 set-point-temperature-c on a structure.",
                Self::schema::<UpdateParams>(),
            ),
            Tool::new(
                "delete",
                "Delete a Flair resource by type and id.",
                Self::schema::<DeleteParams>(),
            ),
        ];

        Ok(ListToolsResult {
            tools,
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = serde_json::Value::Object(request.arguments.unwrap_or_default());

        match request.name.as_ref() {
            "get" => self.handle_get(Self::arguments(args)?).await,
            "create" => self.handle_create(Self::arguments(args)?).await,
            "update" => self.handle_update(Self::arguments(args)?).await,
            "delete" => self.handle_delete(Self::arguments(args)?).await,
            other => Err(McpError::invalid_params(
                format!("no tool named '{other}'"),
                None,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with_token(mock_server: &MockServer) -> FlairServer {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "test-token",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .mount(mock_server)
            .await;

        let client = FlairClient::new("id", "secret", &mock_server.uri()).unwrap();
        FlairServer::new(client)
    }

    fn text_of(result: &CallToolResult) -> &str {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => &t.text,
            _ => panic!("Expected text content"),
        }
    }

    #[test]
    fn schema_generates_for_all_params() {
        assert!(!FlairServer::schema::<GetParams>().is_empty());
        assert!(!FlairServer::schema::<CreateParams>().is_empty());
        assert!(!FlairServer::schema::<UpdateParams>().is_empty());
        assert!(!FlairServer::schema::<DeleteParams>().is_empty());
    }

    #[test]
    fn server_implements_handler() {
        fn assert_server_handler<T: ServerHandler>() {}
        assert_server_handler::<FlairServer>();
    }

    #[test]
    fn not_found_maps_to_resource_not_found() {
        let err = FlairServer::to_mcp_error(FlairError::api(404, "{}".to_string()));
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[test]
    fn precondition_maps_to_invalid_params() {
        let err = FlairServer::to_mcp_error(FlairError::MissingId);
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn handle_get_collection_returns_list() {
        let mock_server = MockServer::start().await;
        let server = server_with_token(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/vents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [
                    {"id": "1", "type": "vents", "attributes": {"name": "Den"}},
                    {"id": "2", "type": "vents", "attributes": {"name": "Hall"}}
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let result = server
            .handle_get(GetParams {
                resource_type: "vent".to_string(),
                id: None,
            })
            .await
            .unwrap();

        assert!(!result.is_error.unwrap_or(false));
        let list: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(list.as_array().unwrap().len(), 2);
        assert_eq!(list[1]["attributes"]["name"], "Hall");
    }

    #[tokio::test]
    async fn handle_update_sends_patch_document() {
        let mock_server = MockServer::start().await;
        let server = server_with_token(&mock_server).await;

        Mock::given(method("PATCH"))
            .and(path("/api/vents/42"))
            .and(body_json(serde_json::json!({
                "data": {
                    "id": "42",
                    "type": "vents",
                    "attributes": {"percent-open": 50},
                    "relationships": {}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {"id": "42", "type": "vents", "attributes": {"percent-open": 50}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let params: UpdateParams = serde_json::from_value(serde_json::json!({
            "resource_type": "vents",
            "id": "42",
            "attributes": {"percent-open": 50}
        }))
        .unwrap();

        let result = server.handle_update(params).await.unwrap();
        let vent: serde_json::Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(vent["attributes"]["percent-open"], serde_json::json!(50));
    }

    #[tokio::test]
    async fn handle_get_missing_resource_is_not_found() {
        let mock_server = MockServer::start().await;
        let server = server_with_token(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/rooms/nope"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errors": [{"status": "404", "title": "Not Found"}]
            })))
            .mount(&mock_server)
            .await;

        let err = server
            .handle_get(GetParams {
                resource_type: "rooms".to_string(),
                id: Some("nope".to_string()),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::RESOURCE_NOT_FOUND);
    }

    #[tokio::test]
    async fn empty_resource_type_is_rejected_without_request() {
        let mock_server = MockServer::start().await;
        let client = FlairClient::new("id", "secret", &mock_server.uri()).unwrap();
        let server = FlairServer::new(client);

        let err = server
            .handle_delete(DeleteParams {
                resource_type: String::new(),
                id: "1".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }
}
