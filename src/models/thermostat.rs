//! Thermostat model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{Attributes, Model};
use crate::resource_type::ResourceType;

/// Attributes of a thermostat linked to a structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThermostatAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Number of non-Flair vents on the same system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_vents: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for ThermostatAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Thermostats
    }
}

pub type Thermostat = Model<ThermostatAttributes>;

impl Model<ThermostatAttributes> {
    pub fn structure_id(&self) -> Option<&str> {
        self.related_id("structure")
    }

    pub fn room_id(&self) -> Option<&str> {
        self.related_id("room")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResourceObject;
    use serde_json::json;

    #[test]
    fn relationship_ids_come_from_linkage() {
        let object: ResourceObject = serde_json::from_value(json!({
            "id": "t1",
            "type": "thermostats",
            "attributes": {"name": "Hall", "static-vents": 3, "make-model": "ecobee3"},
            "relationships": {
                "structure": {"data": {"id": "s1", "type": "structures"}},
                "room": {"data": null}
            }
        }))
        .unwrap();

        let thermostat = Thermostat::from_object(object, None).unwrap();
        assert_eq!(thermostat.attrs().static_vents, Some(3));
        assert_eq!(thermostat.attrs().make_model.as_deref(), Some("ecobee3"));
        assert_eq!(thermostat.structure_id(), Some("s1"));
        assert_eq!(thermostat.room_id(), None);
    }
}
