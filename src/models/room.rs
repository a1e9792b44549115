//! Room model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::{AttributeMap, ResourceIdentifier};
use crate::models::model::{Attributes, Model};
use crate::resource_type::ResourceType;

/// Attributes of a room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoomAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub set_point_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pucks_inactive: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for RoomAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Rooms
    }
}

/// A room inside a structure.
pub type Room = Model<RoomAttributes>;

impl Model<RoomAttributes> {
    pub fn structure_id(&self) -> Option<&str> {
        self.related_id("structure")
    }

    pub fn vents(&self) -> Vec<&ResourceIdentifier> {
        self.related("vents")
    }

    pub fn pucks(&self) -> Vec<&ResourceIdentifier> {
        self.related("pucks")
    }
}
