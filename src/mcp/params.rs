//! MCP tool parameter types with JSON Schema support.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::Deserialize;

use crate::document::{AttributeMap, ResourceIdentifier};
use crate::relationships::{Related, RelationshipMap};
use crate::resource_type::ResourceType;

/// A reference to another resource.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReferenceParam {
    /// Resource type of the target, e.g. `rooms`.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// Id of the target.
    pub id: String,
}

/// Linkage for one relationship name.
///
/// A single object is a to-one relationship. An array is always a to-many
/// list, even with one element or none.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RelationshipParam {
    Many(Vec<ReferenceParam>),
    One(ReferenceParam),
}

/// Parameters for the `get` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetParams {
    /// Resource type, e.g. `structures`, `vents`, `pucks`.
    pub resource_type: String,
    /// Resource id. Omit to list the whole collection.
    #[serde(default)]
    pub id: Option<String>,
}

/// Parameters for the `create` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateParams {
    /// Resource type to create.
    pub resource_type: String,
    /// Attribute values keyed by their kebab-case names.
    #[serde(default)]
    pub attributes: AttributeMap,
    /// Relationships by name: a `{type, id}` object for to-one, an array for to-many.
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipParam>,
}

/// Parameters for the `update` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateParams {
    /// Resource type to update.
    pub resource_type: String,
    /// Resource id.
    pub id: String,
    /// Attribute values to change.
    #[serde(default)]
    pub attributes: AttributeMap,
    /// Relationships to replace. An empty array clears a to-many relationship.
    #[serde(default)]
    pub relationships: BTreeMap<String, RelationshipParam>,
}

/// Parameters for the `delete` MCP tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteParams {
    /// Resource type to delete.
    pub resource_type: String,
    /// Resource id.
    pub id: String,
}

impl ReferenceParam {
    fn identifier(&self) -> ResourceIdentifier {
        ResourceIdentifier::new(parse_type(&self.resource_type), self.id.clone())
    }
}

/// Resolve a tool's type argument, accepting the singular form.
pub(crate) fn parse_type(value: &str) -> ResourceType {
    crate::cli::parse_resource_type(value).unwrap_or(ResourceType::Unknown)
}

pub(crate) fn relationship_map(params: &BTreeMap<String, RelationshipParam>) -> RelationshipMap {
    params
        .iter()
        .map(|(name, param)| {
            let related = match param {
                RelationshipParam::One(reference) => Related::One(reference.identifier()),
                RelationshipParam::Many(references) => {
                    Related::Many(references.iter().map(ReferenceParam::identifier).collect())
                }
            };
            (name.clone(), related)
        })
        .collect()
}
