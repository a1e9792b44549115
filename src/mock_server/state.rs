//! Mock server state management.
//!
//! Provides the in-memory resource store for the mock Flair API server.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::{AttributeMap, Relationship, ResourceObject, ResourceType};

/// Shared state for the mock server.
///
/// Resources are stored as JSON-API resource objects, grouped by type and
/// keyed by id. It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Resource objects by type string, then id.
    pub resources: HashMap<String, BTreeMap<String, ResourceObject>>,

    /// Current-reading attributes by `(type, id)`.
    pub readings: HashMap<(String, String), AttributeMap>,

    /// Credentials the token endpoint accepts. `None` accepts any pair.
    pub credentials: Option<(String, String)>,

    /// The access token handed out and required on every API request.
    pub access_token: String,

    /// Number of requests the token endpoint has answered.
    pub token_requests: usize,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            resources: HashMap::new(),
            readings: HashMap::new(),
            credentials: None,
            access_token: "mock-access-token".to_string(),
            token_requests: 0,
            next_id: 1000,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a resource to the state. Objects without an id get one assigned.
    pub fn with_resource(mut self, object: ResourceObject) -> Self {
        self.insert(object);
        self
    }

    /// Set the current reading of a device.
    pub fn with_reading(mut self, resource_type: &ResourceType, id: &str, reading: AttributeMap) -> Self {
        self.readings
            .insert((resource_type.to_string(), id.to_string()), reading);
        self
    }

    /// Only hand out tokens for this client id and secret.
    pub fn with_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.credentials = Some((client_id.to_string(), client_secret.to_string()));
        self
    }

    /// Whether the token endpoint should accept this client.
    pub fn accepts(&self, client_id: &str, client_secret: &str) -> bool {
        self.credentials
            .as_ref()
            .map(|(id, secret)| id == client_id && secret == client_secret)
            .unwrap_or(true)
    }

    /// Get a resource by type and id.
    pub fn get(&self, resource_type: &str, id: &str) -> Option<&ResourceObject> {
        self.resources.get(resource_type)?.get(id)
    }

    /// List all resources of a type in id order.
    pub fn list(&self, resource_type: &str) -> Vec<&ResourceObject> {
        self.resources
            .get(resource_type)
            .map(|objects| objects.values().collect())
            .unwrap_or_default()
    }

    /// Store a resource, assigning the next free id when it has none.
    pub fn insert(&mut self, mut object: ResourceObject) -> ResourceObject {
        let id = match object.id.clone() {
            Some(id) => id,
            None => {
                self.next_id += 1;
                self.next_id.to_string()
            }
        };
        object.id = Some(id.clone());
        let resource_type = object
            .resource_type
            .get_or_insert(ResourceType::Unknown)
            .to_string();
        self.resources
            .entry(resource_type)
            .or_default()
            .insert(id, object.clone());
        object
    }

    /// Merge attributes and replace the named relationships of a resource.
    pub fn update(
        &mut self,
        resource_type: &str,
        id: &str,
        attributes: AttributeMap,
        relationships: BTreeMap<String, Relationship>,
    ) -> Option<&ResourceObject> {
        let object = self.resources.get_mut(resource_type)?.get_mut(id)?;
        object.attributes.extend(attributes);
        object.relationships.extend(relationships);
        Some(object)
    }

    /// Remove a resource, returning it if it existed.
    pub fn remove(&mut self, resource_type: &str, id: &str) -> Option<ResourceObject> {
        self.readings
            .remove(&(resource_type.to_string(), id.to_string()));
        self.resources.get_mut(resource_type)?.remove(id)
    }

    /// Get the current reading of a device.
    pub fn reading(&self, resource_type: &str, id: &str) -> Option<&AttributeMap> {
        self.readings
            .get(&(resource_type.to_string(), id.to_string()))
    }
}
