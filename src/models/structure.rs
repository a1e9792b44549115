//! Structure model.
//!
//! A structure is a home: the top-level container for rooms and devices.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{AttributeMap, ResourceIdentifier};
use crate::models::model::{Attributes, Model};
use crate::resource_type::ResourceType;

/// Heating/cooling mode of a structure.
///
/// Flair reports "off" as `float`. Values this crate does not know are kept
/// verbatim in [`StructureHeatCoolMode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StructureHeatCoolMode {
    Off,
    Cool,
    Heat,
    Auto,
    Other(String),
}

impl From<String> for StructureHeatCoolMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "float" => Self::Off,
            "cool" => Self::Cool,
            "heat" => Self::Heat,
            "auto" => Self::Auto,
            _ => Self::Other(value),
        }
    }
}

impl From<StructureHeatCoolMode> for String {
    fn from(mode: StructureHeatCoolMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for StructureHeatCoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "float",
            Self::Cool => "cool",
            Self::Heat => "heat",
            Self::Auto => "auto",
            Self::Other(value) => value,
        })
    }
}

/// Whether Flair runs the structure automatically or the user does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FlairMode {
    Manual,
    Auto,
    Other(String),
}

impl From<String> for FlairMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Self::Manual,
            "auto" => Self::Auto,
            _ => Self::Other(value),
        }
    }
}

impl From<FlairMode> for String {
    fn from(mode: FlairMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for FlairMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "manual",
            Self::Auto => "auto",
            Self::Other(value) => value,
        })
    }
}

/// Attributes of a structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StructureAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    /// Whether this is the account's primary home.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_heat_cool_mode: Option<StructureHeatCoolMode>,
    /// Mode Flair settled on when `structure-heat-cool-mode` is `auto`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_heat_cool_mode_calculated: Option<StructureHeatCoolMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_point_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<FlairMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_point_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home_away_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Attributes without a typed field.
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for StructureAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Structures
    }
}

/// A Flair structure (home).
pub type Structure = Model<StructureAttributes>;

impl Model<StructureAttributes> {
    pub fn is_primary_home(&self) -> bool {
        self.attrs().home.unwrap_or(false)
    }

    pub fn rooms(&self) -> Vec<&ResourceIdentifier> {
        self.related("rooms")
    }

    pub fn vents(&self) -> Vec<&ResourceIdentifier> {
        self.related("vents")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResourceObject;
    use serde_json::json;

    fn structure() -> Structure {
        let object: ResourceObject = serde_json::from_value(json!({
            "id": "1",
            "type": "structures",
            "attributes": {
                "name": "Home",
                "is-active": true,
                "home": true,
                "structure-heat-cool-mode": "float",
                "structure-heat-cool-mode-calculated": null,
                "set-point-temperature-c": 21.5,
                "mode": "manual",
                "created-at": "2023-01-19T22:38:02.961Z",
                "updated-at": "2023-02-01T10:00:00+00:00",
                "frozen-pipe-pet-protect": true
            },
            "relationships": {
                "rooms": {"data": [{"id": "10", "type": "rooms"}, {"id": "11", "type": "rooms"}]}
            }
        }))
        .unwrap();
        Structure::from_object(object, None).unwrap()
    }

    #[test]
    fn maps_kebab_case_attributes() {
        let s = structure();
        let attrs = s.attrs();
        assert_eq!(attrs.name.as_deref(), Some("Home"));
        assert_eq!(attrs.is_active, Some(true));
        assert_eq!(attrs.structure_heat_cool_mode, Some(StructureHeatCoolMode::Off));
        assert_eq!(attrs.structure_heat_cool_mode_calculated, None);
        assert_eq!(attrs.set_point_temperature_c, Some(21.5));
        assert_eq!(attrs.mode, Some(FlairMode::Manual));
        assert!(attrs.created_at.is_some());
        assert!(s.is_primary_home());
        assert_eq!(s.rooms().len(), 2);
    }

    #[test]
    fn unknown_attributes_survive_in_the_bag() {
        let s = structure();
        assert_eq!(s.attribute("frozen-pipe-pet-protect"), Some(json!(true)));
        assert_eq!(s.attribute("structure-heat-cool-mode"), Some(json!("float")));
    }

    #[test]
    fn unknown_modes_round_trip() {
        let mode: StructureHeatCoolMode = serde_json::from_value(json!("eco")).unwrap();
        assert_eq!(mode, StructureHeatCoolMode::Other("eco".to_string()));
        assert_eq!(serde_json::to_value(&mode).unwrap(), json!("eco"));
    }
}
