//! Remote sensor model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{reading_f64, Attributes, Model, ReadingProjection};
use crate::resource_type::ResourceType;

/// Attributes of a third-party remote sensor (e.g. an ecobee room sensor).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RemoteSensorAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub battery_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_offset_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for RemoteSensorAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::RemoteSensors
    }
}

impl ReadingProjection for RemoteSensorAttributes {
    fn apply_reading(&mut self, reading: &AttributeMap) {
        if let Some(v) = reading_f64(reading, "room-temperature-c") {
            self.current_temperature_c = Some(v);
        }
        if let Some(v) = reading_f64(reading, "humidity") {
            self.current_humidity = Some(v);
        }
        if let Some(v) = reading_f64(reading, "rssi") {
            self.rssi = Some(v);
        }
        if let Some(v) = reading_f64(reading, "system-voltage") {
            self.system_voltage = Some(v);
        }
        if let Some(v) = reading_f64(reading, "battery-level") {
            self.battery_level = Some(v);
        }
        if let Some(at) = reading
            .get("created-at")
            .and_then(|v| v.as_str())
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
        {
            self.last_reading = Some(at);
        }
    }
}

pub type RemoteSensor = Model<RemoteSensorAttributes>;

impl Model<RemoteSensorAttributes> {
    pub fn room_id(&self) -> Option<&str> {
        self.related_id("room")
    }
}
