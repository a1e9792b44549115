//! Runtime dispatch from a document's `type` to its concrete model.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::client::FlairClient;
use crate::document::{AttributeMap, Relationship, ResourceIdentifier, ResourceObject};
use crate::error::Result;
use crate::models::{
    Bridge, HvacUnit, Model, Puck, RemoteSensor, Room, Structure, Thermostat, Untyped, User, Vent,
};
use crate::resource_type::ResourceType;

/// A resource of any type, resolved to its concrete model where one exists.
#[derive(Debug, Clone)]
pub enum AnyResource {
    Structure(Structure),
    Room(Room),
    Vent(Vent),
    HvacUnit(HvacUnit),
    Thermostat(Thermostat),
    Bridge(Bridge),
    RemoteSensor(RemoteSensor),
    User(User),
    Puck(Puck),
    /// A type without a registered model.
    Other(Model<Untyped>),
}

macro_rules! dispatch {
    ($value:expr, $model:ident => $body:expr) => {
        match $value {
            AnyResource::Structure($model) => $body,
            AnyResource::Room($model) => $body,
            AnyResource::Vent($model) => $body,
            AnyResource::HvacUnit($model) => $body,
            AnyResource::Thermostat($model) => $body,
            AnyResource::Bridge($model) => $body,
            AnyResource::RemoteSensor($model) => $body,
            AnyResource::User($model) => $body,
            AnyResource::Puck($model) => $body,
            AnyResource::Other($model) => $body,
        }
    };
}

impl AnyResource {
    /// Instantiate the model registered for the object's type.
    ///
    /// `requested` stands in when the object does not name its own type.
    ///
    /// # Errors
    ///
    /// Returns a parse error if the attributes don't fit the typed model.
    pub fn from_object(
        mut object: ResourceObject,
        requested: &ResourceType,
        client: Option<&FlairClient>,
    ) -> Result<Self> {
        let resource_type = object
            .resource_type
            .get_or_insert_with(|| requested.clone())
            .clone();

        Ok(match resource_type {
            ResourceType::Structures => Self::Structure(Model::from_object(object, client)?),
            ResourceType::Rooms => Self::Room(Model::from_object(object, client)?),
            ResourceType::Vents => Self::Vent(Model::from_object(object, client)?),
            ResourceType::HvacUnits => Self::HvacUnit(Model::from_object(object, client)?),
            ResourceType::Thermostats => Self::Thermostat(Model::from_object(object, client)?),
            ResourceType::Bridges => Self::Bridge(Model::from_object(object, client)?),
            ResourceType::RemoteSensors => Self::RemoteSensor(Model::from_object(object, client)?),
            ResourceType::Users => Self::User(Model::from_object(object, client)?),
            ResourceType::Pucks => Self::Puck(Model::from_object(object, client)?),
            ResourceType::Unregistered(_) | ResourceType::Unknown => {
                Self::Other(Model::from_object(object, client)?)
            }
        })
    }

    pub fn id(&self) -> Option<&str> {
        dispatch!(self, m => m.id())
    }

    pub fn resource_type(&self) -> &ResourceType {
        dispatch!(self, m => m.get_type())
    }

    /// The attribute bag as JSON.
    pub fn attributes(&self) -> &AttributeMap {
        dispatch!(self, m => m.attributes())
    }

    pub fn attribute(&self, key: &str) -> Option<Value> {
        dispatch!(self, m => m.attribute(key))
    }

    /// The `name` attribute, which nearly every Flair resource has.
    pub fn name(&self) -> Option<String> {
        self.attribute("name")
            .and_then(|v| v.as_str().map(str::to_string))
    }

    pub fn relationships(&self) -> &BTreeMap<String, Relationship> {
        dispatch!(self, m => m.relationships())
    }

    pub fn to_relationship(&self) -> Result<ResourceIdentifier> {
        dispatch!(self, m => m.to_relationship())
    }

    pub fn deleted(&self) -> bool {
        dispatch!(self, m => m.deleted())
    }

    /// Drop the typed view.
    pub fn into_untyped(self) -> Result<Model<Untyped>> {
        dispatch!(self, m => m.into_untyped())
    }

    /// Re-read from the server, see [`Model::refresh`].
    pub async fn refresh(&mut self) -> Result<()> {
        dispatch!(self, m => m.refresh().await.map(|_| ()))
    }

    /// Partial update, see [`Model::update`].
    pub async fn update(
        &mut self,
        attributes: &AttributeMap,
        relationships: &crate::relationships::RelationshipMap,
    ) -> Result<()> {
        dispatch!(self, m => m.update(attributes, relationships).await.map(|_| ()))
    }

    /// Delete on the server, see [`Model::delete`].
    pub async fn delete(&mut self) -> Result<()> {
        dispatch!(self, m => m.delete().await)
    }
}

impl PartialEq for AnyResource {
    fn eq(&self, other: &Self) -> bool {
        self.id().is_some() && self.id() == other.id() && self.resource_type() == other.resource_type()
    }
}

impl Serialize for AnyResource {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        dispatch!(self, m => m.serialize(serializer))
    }
}

macro_rules! typed_conversions {
    ($($variant:ident => $model:ty),* $(,)?) => {
        $(
            impl From<$model> for AnyResource {
                fn from(model: $model) -> Self {
                    Self::$variant(model)
                }
            }

            impl TryFrom<AnyResource> for $model {
                type Error = AnyResource;

                fn try_from(resource: AnyResource) -> core::result::Result<Self, AnyResource> {
                    match resource {
                        AnyResource::$variant(model) => Ok(model),
                        other => Err(other),
                    }
                }
            }
        )*
    };
}

typed_conversions! {
    Structure => Structure,
    Room => Room,
    Vent => Vent,
    HvacUnit => HvacUnit,
    Thermostat => Thermostat,
    Bridge => Bridge,
    RemoteSensor => RemoteSensor,
    User => User,
    Puck => Puck,
    Other => Model<Untyped>,
}

/// Result of a generic GET: one resource or a collection.
#[derive(Debug, Clone)]
pub enum Fetched {
    One(AnyResource),
    Many(Vec<AnyResource>),
}

impl Fetched {
    /// Every fetched resource; a single resource becomes a one-item list.
    pub fn into_vec(self) -> Vec<AnyResource> {
        match self {
            Self::One(resource) => vec![resource],
            Self::Many(resources) => resources,
        }
    }

    /// The single resource, or `None` for a collection.
    pub fn into_one(self) -> Option<AnyResource> {
        match self {
            Self::One(resource) => Some(resource),
            Self::Many(_) => None,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl Serialize for Fetched {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        match self {
            Self::One(resource) => resource.serialize(serializer),
            Self::Many(resources) => resources.serialize(serializer),
        }
    }
}
