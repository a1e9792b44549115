//! Puck model.
//!
//! Pucks are the room sensors (temperature, humidity, light) that can also
//! act as the wireless gateway for vents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{reading_f64, Attributes, Model, ReadingProjection};
use crate::resource_type::ResourceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PuckAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gateway: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for PuckAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Pucks
    }
}

impl ReadingProjection for PuckAttributes {
    fn apply_reading(&mut self, reading: &AttributeMap) {
        if let Some(v) = reading_f64(reading, "room-temperature-c") {
            self.current_temperature_c = Some(v);
        }
        if let Some(v) = reading_f64(reading, "humidity") {
            self.current_humidity = Some(v);
        }
        if let Some(v) = reading_f64(reading, "rssi") {
            self.current_rssi = Some(v);
        }
        if let Some(v) = reading_f64(reading, "system-voltage") {
            self.voltage = Some(v);
        }
    }
}

pub type Puck = Model<PuckAttributes>;

impl Model<PuckAttributes> {
    pub fn room_id(&self) -> Option<&str> {
        self.related_id("room")
    }

    pub fn structure_id(&self) -> Option<&str> {
        self.related_id("structure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reading_maps_sensor_names_onto_puck_fields() {
        let mut attrs = PuckAttributes::default();
        let reading = json!({
            "room-temperature-c": 22.4,
            "humidity": 41,
            "rssi": -70,
            "system-voltage": 2.9,
            "light": 300
        });

        attrs.apply_reading(reading.as_object().unwrap());

        assert_eq!(attrs.current_temperature_c, Some(22.4));
        assert_eq!(attrs.current_humidity, Some(41.0));
        assert_eq!(attrs.current_rssi, Some(-70.0));
        assert_eq!(attrs.voltage, Some(2.9));
    }
}
