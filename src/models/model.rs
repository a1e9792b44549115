//! Generic resource model.
//!
//! [`Model<A>`] is one server-side resource: identity, attributes,
//! relationship linkage and lifecycle. The JSON attribute bag returned by
//! [`Model::attributes`] holds the values exactly as the server sent them.
//! The typed struct `A` is a view derived from that bag; keys that don't fit
//! `A` stay in the bag and are skipped by the view.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::client::FlairClient;
use crate::document::{
    attribute_map, AttributeMap, Relationship, ResourceIdentifier, ResourceObject,
};
use crate::error::{FlairError, Result};
use crate::relationships::RelationshipMap;
use crate::resource_type::ResourceType;

/// Typed attribute set of one resource type.
pub trait Attributes:
    Serialize + DeserializeOwned + Clone + Default + Debug + Send + Sync + 'static
{
    /// The JSON-API type these attributes belong to.
    fn resource_type() -> ResourceType;
}

/// Attributes of a resource without a registered model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Untyped(pub AttributeMap);

impl Attributes for Untyped {
    fn resource_type() -> ResourceType {
        ResourceType::Unknown
    }
}

/// Telemetry projection for devices with a `current-reading` sub-resource.
///
/// A reading is not merged into the general attributes; each device copies
/// only the fields it knows about.
pub trait ReadingProjection: Attributes {
    fn apply_reading(&mut self, reading: &AttributeMap);
}

/// Where a model is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceState {
    /// No id yet; the server has never seen it.
    Transient,
    /// Has an id.
    Persisted,
    /// Deleted on the server. Terminal.
    Deleted,
}

/// A resource fetched from or destined for the Flair API.
#[derive(Debug, Clone)]
pub struct Model<A> {
    id: Option<String>,
    resource_type: ResourceType,
    bag: AttributeMap,
    attributes: A,
    relationships: BTreeMap<String, Relationship>,
    deleted: bool,
    client: Option<FlairClient>,
}

impl<A: Attributes> Default for Model<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Attributes> Model<A> {
    /// An empty, unsaved model.
    pub fn new() -> Self {
        Self::from_attributes(A::default())
    }

    /// An unsaved model with the given attributes.
    pub fn from_attributes(attributes: A) -> Self {
        Self {
            id: None,
            resource_type: A::resource_type(),
            bag: attribute_map(&attributes).unwrap_or_default(),
            attributes,
            relationships: BTreeMap::new(),
            deleted: false,
            client: None,
        }
    }

    /// An empty model with an explicit type, for [`Untyped`] resources.
    pub fn with_type(resource_type: ResourceType) -> Self {
        let mut model = Self::new();
        model.resource_type = resource_type;
        model
    }

    /// Build a model from a JSON-API resource object.
    ///
    /// Typed models keep their own discriminator; [`Untyped`] models take the
    /// one the document carries. Attributes that don't fit `A` are kept in the
    /// bag and left out of the typed view.
    ///
    /// # Errors
    ///
    /// Currently infallible.
    pub fn from_object(object: ResourceObject, client: Option<&FlairClient>) -> Result<Self> {
        let resource_type = match A::resource_type() {
            ResourceType::Unknown => object.resource_type.unwrap_or(ResourceType::Unknown),
            own => own,
        };
        let attributes = typed_view(&resource_type, &object.attributes);
        Ok(Self {
            id: object.id,
            resource_type,
            bag: object.attributes,
            attributes,
            relationships: object.relationships,
            deleted: false,
            client: client.cloned(),
        })
    }

    /// Bind the client used by [`refresh`](Self::refresh),
    /// [`update`](Self::update) and [`delete`](Self::delete).
    pub fn set_client(&mut self, client: &FlairClient) -> &mut Self {
        self.client = Some(client.clone());
        self
    }

    /// Builder form of [`set_client`](Self::set_client).
    #[must_use]
    pub fn with_client(mut self, client: &FlairClient) -> Self {
        self.set_client(client);
        self
    }

    /// The bound client, if any.
    pub fn client(&self) -> Option<&FlairClient> {
        self.client.as_ref()
    }

    /// Server-assigned id. `None` until the resource is saved.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Point this model at an existing server resource.
    pub fn set_id(&mut self, id: impl Into<String>) -> &mut Self {
        self.id = Some(id.into());
        self
    }

    /// The type discriminator, used for URLs and relationship documents.
    pub fn get_type(&self) -> &ResourceType {
        &self.resource_type
    }

    /// Whether [`delete`](Self::delete) has succeeded for this model.
    pub fn deleted(&self) -> bool {
        self.deleted
    }

    /// Lifecycle state derived from the id and the deleted flag.
    pub fn state(&self) -> ResourceState {
        if self.deleted {
            ResourceState::Deleted
        } else if self.id.is_some() {
            ResourceState::Persisted
        } else {
            ResourceState::Transient
        }
    }

    /// Typed attribute fields.
    pub fn attrs(&self) -> &A {
        &self.attributes
    }

    /// Change typed fields in place.
    ///
    /// Only the keys whose serialized value changed are written back to the
    /// bag, so untouched wire values keep their exact form.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the attributes do not serialize to an object;
    /// the model is left unchanged in that case.
    pub fn edit_attrs<F: FnOnce(&mut A)>(&mut self, edit: F) -> Result<()> {
        let before = attribute_map(&self.attributes)?;
        let mut edited = self.attributes.clone();
        edit(&mut edited);
        let after = attribute_map(&edited)?;

        for key in before.keys() {
            if !after.contains_key(key) {
                self.bag.remove(key);
            }
        }
        for (key, value) in after {
            if before.get(&key) != Some(&value) {
                self.bag.insert(key, value);
            }
        }
        self.attributes = edited;
        Ok(())
    }

    /// The attribute bag, exactly as last received or set.
    pub fn attributes(&self) -> &AttributeMap {
        &self.bag
    }

    /// A single attribute by its wire name.
    pub fn attribute(&self, key: &str) -> Option<Value> {
        self.bag.get(key).cloned()
    }

    /// Set an attribute by its wire name, writing through to the typed field.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the value does not fit the typed field; the
    /// model is left unchanged in that case.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let mut single = AttributeMap::new();
        single.insert(key.into(), value);
        serde_json::from_value::<A>(Value::Object(single.clone()))?;
        self.bag.extend(single);
        self.attributes = typed_view(&self.resource_type, &self.bag);
        Ok(())
    }

    /// Relationship linkage by name, as the server sent it.
    pub fn relationships(&self) -> &BTreeMap<String, Relationship> {
        &self.relationships
    }

    /// Id of a to-one related resource.
    pub fn related_id(&self, name: &str) -> Option<&str> {
        self.relationships
            .get(name)
            .and_then(|r| r.data.as_one())
            .map(|identifier| identifier.id.as_str())
    }

    /// Every resource linked under `name`, in server order.
    pub fn related(&self, name: &str) -> Vec<&ResourceIdentifier> {
        self.relationships
            .get(name)
            .map(|r| r.data.identifiers())
            .unwrap_or_default()
    }

    /// This resource as a `{id, type}` reference.
    ///
    /// # Errors
    ///
    /// Returns [`FlairError::MissingId`] if the model has not been saved.
    pub fn to_relationship(&self) -> Result<ResourceIdentifier> {
        let id = self.id.clone().ok_or(FlairError::MissingId)?;
        Ok(ResourceIdentifier {
            id,
            resource_type: self.resource_type.clone(),
        })
    }

    /// Same type and same id. Models without an id are never equal, not even
    /// to themselves.
    pub fn equals<B: Attributes>(&self, other: &Model<B>) -> bool {
        self.id.is_some() && self.id == other.id && self.resource_type == other.resource_type
    }

    /// Overlay a server response onto this model.
    ///
    /// Keys present in the response replace local values; local keys the
    /// response does not mention are kept.
    ///
    /// # Errors
    ///
    /// Currently infallible; see [`from_object`](Self::from_object).
    pub fn merge_object(&mut self, object: ResourceObject) -> Result<()> {
        self.bag.extend(object.attributes);
        self.attributes = typed_view(&self.resource_type, &self.bag);
        self.relationships.extend(object.relationships);
        if let Some(id) = object.id {
            self.id = Some(id);
        }
        Ok(())
    }

    /// Re-read this resource from the server and merge the result in.
    ///
    /// # Errors
    ///
    /// Fails without sending a request if no client is bound, the id is
    /// unset, or the model was deleted.
    #[tracing::instrument(skip(self), fields(resource_type = %self.resource_type, id = ?self.id))]
    pub async fn refresh(&mut self) -> Result<&mut Self> {
        let (client, id) = self.bound("refresh")?;
        let object = client.get_object(&self.resource_type, &id).await?;
        self.merge_object(object)?;
        Ok(self)
    }

    /// Send a partial update and merge the server's answer in.
    ///
    /// # Errors
    ///
    /// Fails without sending a request if no client is bound, the id is
    /// unset, or the model was deleted.
    #[tracing::instrument(skip(self, attributes, relationships), fields(resource_type = %self.resource_type, id = ?self.id))]
    pub async fn update(
        &mut self,
        attributes: &AttributeMap,
        relationships: &RelationshipMap,
    ) -> Result<&mut Self> {
        let (client, id) = self.bound("update")?;
        let object = client
            .update_object(&self.resource_type, &id, attributes, relationships)
            .await?;
        self.merge_object(object)?;
        Ok(self)
    }

    /// Delete this resource on the server and mark the model deleted.
    ///
    /// # Errors
    ///
    /// Fails without sending a request if no client is bound, the id is
    /// unset, or the model was already deleted.
    #[tracing::instrument(skip(self), fields(resource_type = %self.resource_type, id = ?self.id))]
    pub async fn delete(&mut self) -> Result<()> {
        let (client, id) = self.bound("delete")?;
        client.delete(&self.resource_type, &id).await?;
        self.deleted = true;
        Ok(())
    }

    /// Drop the typed view and keep the raw attribute bag.
    ///
    /// # Errors
    ///
    /// Currently infallible.
    pub fn into_untyped(self) -> Result<Model<Untyped>> {
        Ok(Model {
            attributes: Untyped(self.bag.clone()),
            bag: self.bag,
            id: self.id,
            resource_type: self.resource_type,
            relationships: self.relationships,
            deleted: self.deleted,
            client: self.client,
        })
    }

    /// Client and id for an instance operation, or the local error explaining
    /// why none can be sent.
    fn bound(&self, operation: &'static str) -> Result<(FlairClient, String)> {
        let (Some(client), Some(id)) = (self.client.as_ref(), self.id.as_ref()) else {
            return Err(FlairError::MissingClientOrId { operation });
        };
        if self.deleted {
            return Err(FlairError::ResourceDeleted {
                resource_type: self.resource_type.to_string(),
                id: id.clone(),
            });
        }
        Ok((client.clone(), id.clone()))
    }
}

impl<A: ReadingProjection> Model<A> {
    /// Apply a `current-reading` document to the typed fields.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the projected fields do not serialize.
    pub fn set_current_reading(&mut self, reading: &ResourceObject) -> Result<()> {
        self.edit_attrs(|attributes| attributes.apply_reading(&reading.attributes))
    }

    /// Fetch the device's current reading and project it onto this model.
    ///
    /// # Errors
    ///
    /// Same preconditions as [`refresh`](Self::refresh).
    #[tracing::instrument(skip(self), fields(resource_type = %self.resource_type, id = ?self.id))]
    pub async fn refresh_reading(&mut self) -> Result<&mut Self> {
        let (client, id) = self.bound("read current reading")?;
        let reading = client.current_reading(&self.resource_type, &id).await?;
        self.set_current_reading(&reading)?;
        Ok(self)
    }
}

impl<A: Attributes, B: Attributes> PartialEq<Model<B>> for Model<A> {
    fn eq(&self, other: &Model<B>) -> bool {
        self.equals(other)
    }
}

impl<A: Attributes> Serialize for Model<A> {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<&'a str>,
            #[serde(rename = "type")]
            resource_type: &'a ResourceType,
            attributes: &'a AttributeMap,
            relationships: &'a BTreeMap<String, Relationship>,
        }

        Wire {
            id: self.id.as_deref(),
            resource_type: &self.resource_type,
            attributes: &self.bag,
            relationships: &self.relationships,
        }
        .serialize(serializer)
    }
}

/// Typed view of an attribute bag.
///
/// Keys whose value doesn't fit `A` are left out of the view and logged; the
/// caller keeps them in the bag.
fn typed_view<A: Attributes>(resource_type: &ResourceType, bag: &AttributeMap) -> A {
    if let Ok(attributes) = serde_json::from_value(Value::Object(bag.clone())) {
        return attributes;
    }

    let (fitting, rejected): (Vec<_>, Vec<_>) = bag.iter().partition(|(key, value)| {
        let mut single = AttributeMap::new();
        single.insert((*key).clone(), (*value).clone());
        serde_json::from_value::<A>(Value::Object(single)).is_ok()
    });
    let rejected: Vec<&String> = rejected.into_iter().map(|(key, _)| key).collect();
    tracing::warn!(%resource_type, ?rejected, "attributes do not fit the typed model");

    let fitting: AttributeMap = fitting
        .into_iter()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    serde_json::from_value(Value::Object(fitting)).unwrap_or_default()
}

/// Copy a number out of a reading document.
pub(crate) fn reading_f64(reading: &AttributeMap, key: &str) -> Option<f64> {
    reading.get(key).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    #[serde(rename_all = "kebab-case")]
    struct TestAttributes {
        #[serde(skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        active: Option<bool>,
    }

    impl Attributes for TestAttributes {
        fn resource_type() -> ResourceType {
            ResourceType::from("test-resources")
        }
    }

    type TestResource = Model<TestAttributes>;

    fn object(value: Value) -> ResourceObject {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn typed_model_reports_its_type() {
        let resource = TestResource::new();
        assert_eq!(resource.get_type().as_str(), "test-resources");
        assert_eq!(Model::<Untyped>::new().get_type(), &ResourceType::Unknown);
    }

    #[test]
    fn to_relationship_requires_id() {
        let mut resource = TestResource::new();
        assert!(matches!(
            resource.to_relationship(),
            Err(FlairError::MissingId)
        ));

        resource.set_id("123");
        assert_eq!(
            serde_json::to_value(resource.to_relationship().unwrap()).unwrap(),
            json!({"id": "123", "type": "test-resources"})
        );
    }

    #[test]
    fn equality_is_type_and_id() {
        let mut a = Model::<Untyped>::with_type(ResourceType::Users);
        let mut b = Model::<Untyped>::with_type(ResourceType::Users);
        let mut c = Model::<Untyped>::with_type(ResourceType::Users);
        a.set_id("1");
        b.set_id("1");
        c.set_id("2");

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut vent = Model::<Untyped>::with_type(ResourceType::Vents);
        vent.set_id("1");
        assert_ne!(a, vent);
    }

    #[test]
    fn id_less_models_are_never_equal() {
        let a = TestResource::new();
        let b = TestResource::new();
        assert!(!a.equals(&b));
        assert!(!a.equals(&a));
    }

    #[test]
    fn from_object_fills_typed_fields_and_bag() {
        let model = TestResource::from_object(
            object(json!({
                "id": "7",
                "type": "test-resources",
                "attributes": {"email": "a@example.com", "active": true},
                "relationships": {}
            })),
            None,
        )
        .unwrap();

        assert_eq!(model.id(), Some("7"));
        assert_eq!(model.attrs().email.as_deref(), Some("a@example.com"));
        assert_eq!(model.attribute("email"), Some(json!("a@example.com")));
        assert_eq!(model.attribute("active"), Some(json!(true)));
        assert_eq!(model.state(), ResourceState::Persisted);
    }

    #[test]
    fn untyped_model_takes_document_type() {
        let model = Model::<Untyped>::from_object(
            object(json!({"id": "1", "type": "widgets", "attributes": {"x": 1}})),
            None,
        )
        .unwrap();
        assert_eq!(model.get_type().as_str(), "widgets");
        assert_eq!(model.attrs().0["x"], 1);
    }

    #[test]
    fn set_attribute_keeps_both_views_in_sync() {
        let mut model = TestResource::new();
        model.set_attribute("email", json!("new@example.com")).unwrap();
        assert_eq!(model.attrs().email.as_deref(), Some("new@example.com"));

        model.edit_attrs(|a| a.active = Some(false)).unwrap();
        assert_eq!(model.attributes()["active"], json!(false));

        model.edit_attrs(|a| a.email = None).unwrap();
        assert!(!model.attributes().contains_key("email"));
    }

    #[test]
    fn bag_keeps_wire_values_the_typed_view_normalizes() {
        let mut model = Model::<crate::VentAttributes>::from_object(
            object(json!({
                "id": "1",
                "type": "vents",
                "attributes": {
                    "percent-open": 100,
                    "duct-pressure": null,
                    "created-at": "2023-02-01T10:00:00+00:00"
                }
            })),
            None,
        )
        .unwrap();

        assert_eq!(model.attrs().percent_open, Some(100.0));
        assert_eq!(model.attribute("percent-open"), Some(json!(100)));
        assert_eq!(model.attribute("duct-pressure"), Some(Value::Null));

        model.edit_attrs(|a| a.name = Some("Den".into())).unwrap();
        assert_eq!(
            model.attribute("created-at"),
            Some(json!("2023-02-01T10:00:00+00:00"))
        );
        assert_eq!(model.attribute("percent-open"), Some(json!(100)));
        assert_eq!(model.attribute("name"), Some(json!("Den")));
    }

    #[test]
    fn misfit_attribute_stays_in_bag_only() {
        let mut model = TestResource::from_object(
            object(json!({
                "id": "2",
                "type": "test-resources",
                "attributes": {"email": "a@example.com", "active": "yes"}
            })),
            None,
        )
        .unwrap();

        assert_eq!(model.attrs().email.as_deref(), Some("a@example.com"));
        assert_eq!(model.attrs().active, None);
        assert_eq!(model.attribute("active"), Some(json!("yes")));

        model.set_attribute("email", json!("b@example.com")).unwrap();
        assert_eq!(model.attrs().email.as_deref(), Some("b@example.com"));
        assert_eq!(model.attribute("active"), Some(json!("yes")));
    }

    #[test]
    fn set_attribute_rejects_mistyped_value() {
        let mut model = TestResource::new();
        model.set_attribute("email", json!("keep@example.com")).unwrap();
        assert!(model.set_attribute("active", json!("yes")).is_err());
        assert_eq!(model.attrs().email.as_deref(), Some("keep@example.com"));
        assert_eq!(model.attrs().active, None);
    }

    #[test]
    fn merge_overwrites_present_and_keeps_absent_fields() {
        let mut model = TestResource::new();
        model.set_id("1");
        model
            .edit_attrs(|a| {
                a.email = Some("old@example.com".to_string());
                a.active = Some(true);
            })
            .unwrap();

        model
            .merge_object(object(json!({
                "id": "1",
                "type": "test-resources",
                "attributes": {"email": "new@example.com"},
                "relationships": {"parent": {"data": {"id": "9", "type": "test-resources"}}}
            })))
            .unwrap();

        assert_eq!(model.attrs().email.as_deref(), Some("new@example.com"));
        assert_eq!(model.attrs().active, Some(true));
        assert_eq!(model.related_id("parent"), Some("9"));
    }

    #[tokio::test]
    async fn instance_operations_require_client_and_id() {
        let mut no_client = TestResource::new();
        no_client.set_id("123");
        let err = no_client.refresh().await.unwrap_err();
        assert_eq!(err.to_string(), "Cannot refresh: missing client or ID");

        let client = FlairClient::new("id", "secret", "http://127.0.0.1:9").unwrap();
        let mut no_id = TestResource::new().with_client(&client);
        let err = no_id
            .update(&AttributeMap::new(), &RelationshipMap::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Cannot update: missing client or ID");

        let err = no_id.delete().await.unwrap_err();
        assert!(err.is_precondition());
        assert!(!no_id.deleted());
        assert!(!client.has_token().await);
    }

    #[test]
    fn serializes_as_resource_object() {
        let mut model = TestResource::new();
        model.set_id("5");
        model
            .edit_attrs(|a| a.email = Some("x@example.com".to_string()))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&model).unwrap(),
            json!({
                "id": "5",
                "type": "test-resources",
                "attributes": {"email": "x@example.com"},
                "relationships": {}
            })
        );
    }

    #[test]
    fn into_untyped_keeps_identity_and_attributes() {
        let mut model = TestResource::new();
        model.set_id("5");
        model.edit_attrs(|a| a.active = Some(true)).unwrap();

        let untyped = model.into_untyped().unwrap();
        assert_eq!(untyped.id(), Some("5"));
        assert_eq!(untyped.get_type().as_str(), "test-resources");
        assert_eq!(untyped.attrs().0["active"], json!(true));
    }
}
