//! HVAC unit model: an IR-controlled mini-split or window unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{Attributes, Model};
use crate::resource_type::ResourceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct HvacUnitAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ir_setup_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make_model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fan_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_point_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for HvacUnitAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::HvacUnits
    }
}

pub type HvacUnit = Model<HvacUnitAttributes>;

impl Model<HvacUnitAttributes> {
    pub fn room_id(&self) -> Option<&str> {
        self.related_id("room")
    }

    pub fn structure_id(&self) -> Option<&str> {
        self.related_id("structure")
    }
}
