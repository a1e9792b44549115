//! Flair API client.
//!
//! Owns authentication state and the HTTP transport, builds resource URLs and
//! runs the generic JSON-API verbs. Typed access lives on the model types via
//! the [`Get`](crate::Get), [`List`](crate::List), [`Create`](crate::Create)
//! and [`Update`](crate::Update) traits.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use crate::document::{AttributeMap, PrimaryData, RequestData, RequestDocument, ResourceObject};
use crate::error::{FlairError, Result};
use crate::models::{AnyResource, Fetched};
use crate::relationships::RelationshipMap;
use crate::resource_type::ResourceType;
use crate::response::{classify, Outcome};

const DEFAULT_API_URL: &str = "https://api.flair.co";
const USER_AGENT: &str = concat!("flair-api/", env!("CARGO_PKG_VERSION"));
const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";
const TOKEN_PATH: &str = "oauth/token";
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";

/// An OAuth2 access token handed out by `/oauth/token`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl Token {
    /// Value of the `Authorization` header for this token.
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'a str,
}

struct Credentials {
    client_id: String,
    client_secret: String,
}

/// Flair API client.
///
/// Authenticates lazily with the client-credentials grant: the first request
/// fetches a token and every later request reuses it. The token is never
/// refreshed on expiry; call [`FlairClient::clear_token`] to force a new one.
///
/// This struct is cheaply cloneable; clones share the connection pool and the
/// token slot.
///
/// # Example
///
/// ```no_run
/// use flair_api::FlairClient;
///
/// # fn example() -> flair_api::Result<()> {
/// // Create from environment variables
/// let client = FlairClient::from_env()?;
///
/// // Or configure manually
/// let client = FlairClient::new("client-id", "client-secret", "https://api.flair.co")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FlairClient {
    http: Client,
    base_url: Arc<Url>,
    credentials: Arc<Credentials>,
    token: Arc<RwLock<Option<Token>>>,
}

impl std::fmt::Debug for FlairClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlairClient")
            .field("base_url", &self.base_url.as_str())
            .field("client_id", &self.credentials.client_id)
            .finish_non_exhaustive()
    }
}

impl FlairClient {
    /// Create a client from environment variables.
    ///
    /// Uses `FLAIR_CLIENT_ID` and `FLAIR_CLIENT_SECRET` for authentication and
    /// optionally `FLAIR_API_URL` for the base URL (defaults to
    /// `https://api.flair.co`).
    ///
    /// # Errors
    ///
    /// Returns an error if either credential variable is not set.
    pub fn from_env() -> Result<Self> {
        let client_id = env::var("FLAIR_CLIENT_ID").map_err(|_| {
            FlairError::ConfigMissing("FLAIR_CLIENT_ID environment variable not set".to_string())
        })?;
        let client_secret = env::var("FLAIR_CLIENT_SECRET").map_err(|_| {
            FlairError::ConfigMissing(
                "FLAIR_CLIENT_SECRET environment variable not set".to_string(),
            )
        })?;

        let base_url = env::var("FLAIR_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::new(&client_id, &client_secret, &base_url)
    }

    /// Create a new client with explicit credentials and base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(client_id: &str, client_secret: &str, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON_API_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(FlairError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            credentials: Arc::new(Credentials {
                client_id: client_id.to_string(),
                client_secret: client_secret.to_string(),
            }),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether an access token is currently held.
    pub async fn has_token(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Drop the memoized token so the next request authenticates again.
    pub async fn clear_token(&self) {
        self.token.write().await.take();
    }

    /// Path of a resource or resource collection, e.g. `/api/vents/42`.
    pub fn resource_url(resource_type: &ResourceType, id: Option<&str>) -> String {
        let mut path = format!("/api/{}", resource_type.as_str());
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            path.push('/');
            path.push_str(&urlencoding::encode(id));
        }
        path
    }

    // =========================================================================
    // Generic operations
    // =========================================================================

    /// Fetch a single resource or a whole collection.
    ///
    /// A collection response yields [`Fetched::Many`] in server order; a
    /// singular response yields [`Fetched::One`].
    ///
    /// # Errors
    ///
    /// Returns [`FlairError::EmptyBody`] when the server answers with
    /// `data: null` and [`FlairError::Api`] for error statuses.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, resource_type: &ResourceType, id: Option<&str>) -> Result<Fetched> {
        let primary = self.get_document(resource_type, id).await?;
        Ok(match primary {
            PrimaryData::Many(objects) => Fetched::Many(
                objects
                    .into_iter()
                    .map(|object| AnyResource::from_object(object, resource_type, Some(self)))
                    .collect::<Result<Vec<_>>>()?,
            ),
            PrimaryData::One(object) => Fetched::One(AnyResource::from_object(
                *object,
                resource_type,
                Some(self),
            )?),
        })
    }

    /// Fetch one resource by id.
    pub async fn find(&self, resource_type: &ResourceType, id: &str) -> Result<AnyResource> {
        let object = self.get_object(resource_type, id).await?;
        AnyResource::from_object(object, resource_type, Some(self))
    }

    /// Fetch every resource of a type.
    pub async fn list(&self, resource_type: &ResourceType) -> Result<Vec<AnyResource>> {
        Ok(self.get(resource_type, None).await?.into_vec())
    }

    /// Create a resource and return what the server stored.
    #[tracing::instrument(skip(self, attributes, relationships))]
    pub async fn create(
        &self,
        resource_type: &ResourceType,
        attributes: &AttributeMap,
        relationships: &RelationshipMap,
    ) -> Result<AnyResource> {
        let object = self
            .create_object(resource_type, attributes, relationships)
            .await?;
        AnyResource::from_object(object, resource_type, Some(self))
    }

    /// Apply a partial update to a resource and return the server's copy.
    #[tracing::instrument(skip(self, attributes, relationships))]
    pub async fn update(
        &self,
        resource_type: &ResourceType,
        id: &str,
        attributes: &AttributeMap,
        relationships: &RelationshipMap,
    ) -> Result<AnyResource> {
        let object = self
            .update_object(resource_type, id, attributes, relationships)
            .await?;
        AnyResource::from_object(object, resource_type, Some(self))
    }

    /// Delete a resource. The server is expected to answer `204 No Content`.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, resource_type: &ResourceType, id: &str) -> Result<()> {
        let path = Self::resource_url(resource_type, Some(id));
        self.send(Method::DELETE, &path, None).await?;
        Ok(())
    }

    /// Fetch the current telemetry reading of a device.
    #[tracing::instrument(skip(self))]
    pub async fn current_reading(
        &self,
        resource_type: &ResourceType,
        id: &str,
    ) -> Result<ResourceObject> {
        let path = format!(
            "{}/current-reading",
            Self::resource_url(resource_type, Some(id))
        );
        self.send(Method::GET, &path, None)
            .await?
            .into_primary()?
            .into_one()
    }

    // =========================================================================
    // Document-level operations used by the typed models
    // =========================================================================

    pub(crate) async fn get_document(
        &self,
        resource_type: &ResourceType,
        id: Option<&str>,
    ) -> Result<PrimaryData> {
        let path = Self::resource_url(resource_type, id);
        self.send(Method::GET, &path, None).await?.into_primary()
    }

    pub(crate) async fn get_object(
        &self,
        resource_type: &ResourceType,
        id: &str,
    ) -> Result<ResourceObject> {
        self.get_document(resource_type, Some(id)).await?.into_one()
    }

    pub(crate) async fn create_object(
        &self,
        resource_type: &ResourceType,
        attributes: &AttributeMap,
        relationships: &RelationshipMap,
    ) -> Result<ResourceObject> {
        let body = RequestDocument {
            data: RequestData {
                id: None,
                resource_type: resource_type.as_str(),
                attributes,
                relationships: relationships.encode(),
            },
        };
        let path = Self::resource_url(resource_type, None);
        self.send(Method::POST, &path, Some(serde_json::to_value(&body)?))
            .await?
            .into_primary()?
            .into_one()
    }

    pub(crate) async fn update_object(
        &self,
        resource_type: &ResourceType,
        id: &str,
        attributes: &AttributeMap,
        relationships: &RelationshipMap,
    ) -> Result<ResourceObject> {
        let body = RequestDocument {
            data: RequestData {
                id: Some(id),
                resource_type: resource_type.as_str(),
                attributes,
                relationships: relationships.encode(),
            },
        };
        let path = Self::resource_url(resource_type, Some(id));
        self.send(Method::PATCH, &path, Some(serde_json::to_value(&body)?))
            .await?
            .into_primary()?
            .into_one()
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Send an authenticated request and classify the response.
    ///
    /// Every status code reaches [`classify`]; only failures that never
    /// produced a response (connect, TLS, body read) surface as
    /// [`FlairError::Http`].
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Outcome> {
        let authorization = self.authorization().await?;
        let url = self.base_url.join(path.trim_start_matches('/'))?;

        tracing::debug!(%method, %url, "sending request");

        let mut request = self
            .http
            .request(method, url)
            .header(AUTHORIZATION, authorization);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(FlairError::Http)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(FlairError::Http)?;

        classify(status, text)
    }

    /// `Authorization` header value, fetching a token first if none is held.
    async fn authorization(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.as_ref() {
            return Ok(token.authorization());
        }

        // Concurrent first calls may both get here; the last token wins.
        let token = self.fetch_token().await?;
        let authorization = token.authorization();
        *self.token.write().await = Some(token);
        Ok(authorization)
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_token(&self) -> Result<Token> {
        let url = self.base_url.join(TOKEN_PATH)?;
        let request = TokenRequest {
            client_id: &self.credentials.client_id,
            client_secret: &self.credentials.client_secret,
            grant_type: CLIENT_CREDENTIALS_GRANT_TYPE,
        };

        let response = self
            .http
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(FlairError::Http)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(FlairError::Http)?;

        if status >= 400 {
            return Err(FlairError::api(status, body));
        }
        if status != 200 {
            return Err(FlairError::Authentication(format!(
                "token endpoint answered HTTP {status}"
            )));
        }

        let token: Token = serde_json::from_str(&body)
            .map_err(|e| FlairError::Authentication(format!("invalid token response: {e}")))?;
        tracing::debug!(token_type = %token.token_type, expires_in = ?token.expires_in, "obtained access token");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = FlairClient::new("id", "top-secret", "https://api.flair.co").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("FlairClient"));
        assert!(debug.contains("base_url"));
        // Secret should not be in debug output
        assert!(!debug.contains("top-secret"));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = FlairClient::new("id", "secret", "https://api.flair.co").unwrap();
        let client2 = FlairClient::new("id", "secret", "https://api.flair.co/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn resource_url_with_and_without_id() {
        assert_eq!(
            FlairClient::resource_url(&ResourceType::Vents, None),
            "/api/vents"
        );
        assert_eq!(
            FlairClient::resource_url(&ResourceType::HvacUnits, Some("42")),
            "/api/hvac-units/42"
        );
        assert_eq!(
            FlairClient::resource_url(&ResourceType::from("test-resources"), Some("")),
            "/api/test-resources"
        );
    }

    #[test]
    fn resource_url_escapes_ids() {
        assert_eq!(
            FlairClient::resource_url(&ResourceType::Users, Some("a/b")),
            "/api/users/a%2Fb"
        );
    }

    #[test]
    fn token_debug_hides_access_token() {
        let token = Token {
            access_token: "abc123".to_string(),
            token_type: "Bearer".to_string(),
            expires_in: Some(3600),
        };
        assert_eq!(token.authorization(), "Bearer abc123");
        assert!(!format!("{token:?}").contains("abc123"));
    }

    #[test]
    fn test_new_client_holds_no_token() {
        let client = FlairClient::new("id", "secret", "https://api.flair.co").unwrap();
        assert!(!tokio_test::block_on(client.has_token()));
    }
}
