//! JSON-API wire types.
//!
//! Only the subset of JSON-API the Flair service speaks: resource objects with
//! `attributes` and `relationships`, relationship linkage, and the `data`
//! envelope used for both requests and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::{FlairError, Result};
use crate::resource_type::ResourceType;

/// Attribute bag of a resource object.
pub type AttributeMap = Map<String, Value>;

/// A minimal `{id, type}` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<ResourceType>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            resource_type: resource_type.into(),
        }
    }
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    Many(Vec<ResourceIdentifier>),
    One(ResourceIdentifier),
    #[default]
    Null,
}

impl Linkage {
    /// The single linked resource, if this is a to-one relationship.
    pub fn as_one(&self) -> Option<&ResourceIdentifier> {
        match self {
            Self::One(identifier) => Some(identifier),
            _ => None,
        }
    }

    /// All linked resources in server order.
    pub fn identifiers(&self) -> Vec<&ResourceIdentifier> {
        match self {
            Self::Many(items) => items.iter().collect(),
            Self::One(identifier) => vec![identifier],
            Self::Null => Vec::new(),
        }
    }
}

/// A relationship object as returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Linkage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

impl Relationship {
    pub fn new(data: Linkage) -> Self {
        Self { data, links: None }
    }
}

/// A resource object inside a `data` member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<ResourceType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attributes: AttributeMap,
    #[serde(default, deserialize_with = "null_as_default")]
    pub relationships: BTreeMap<String, Relationship>,
}

/// Primary data of a response document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    Many(Vec<ResourceObject>),
    One(Box<ResourceObject>),
}

impl PrimaryData {
    /// Extract the primary data from a parsed response body.
    ///
    /// The caller has already rejected `data: null`, so a missing member here
    /// means the body was not a JSON-API document at all.
    pub fn from_document(document: Value) -> Result<Self> {
        let Value::Object(mut envelope) = document else {
            return Err(FlairError::InvalidDocument(
                "response body is not an object".to_string(),
            ));
        };
        let data = envelope
            .remove("data")
            .ok_or_else(|| FlairError::InvalidDocument("missing `data` member".to_string()))?;
        Ok(serde_json::from_value(data)?)
    }

    /// The single resource object, or an error for collections.
    pub fn into_one(self) -> Result<ResourceObject> {
        match self {
            Self::One(object) => Ok(*object),
            Self::Many(_) => Err(FlairError::InvalidDocument(
                "expected a single resource, got a collection".to_string(),
            )),
        }
    }

    /// Every resource object, a singular document yielding one item.
    pub fn into_many(self) -> Vec<ResourceObject> {
        match self {
            Self::One(object) => vec![*object],
            Self::Many(objects) => objects,
        }
    }
}

/// Serialize any value into an attribute bag.
///
/// `null` becomes an empty bag.
///
/// # Errors
///
/// Returns an error if `value` does not serialize to a JSON object.
pub fn attribute_map<T: Serialize + ?Sized>(value: &T) -> Result<AttributeMap> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(AttributeMap::new()),
        other => Err(FlairError::InvalidDocument(format!(
            "attributes serialized to {other}, expected an object"
        ))),
    }
}

/// Request body for create and update calls.
#[derive(Debug, Serialize)]
pub(crate) struct RequestDocument<'a> {
    pub data: RequestData<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequestData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<&'a str>,
    #[serde(rename = "type")]
    pub resource_type: &'a str,
    pub attributes: &'a AttributeMap,
    pub relationships: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> core::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
