//! Vent model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{reading_f64, Attributes, Model, ReadingProjection};
use crate::resource_type::ResourceType;

/// Attributes of a smart vent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VentAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Damper opening, 0 to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_open: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duct_pressure: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duct_temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_voltage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for VentAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Vents
    }
}

impl ReadingProjection for VentAttributes {
    fn apply_reading(&mut self, reading: &AttributeMap) {
        if let Some(v) = reading_f64(reading, "percent-open") {
            self.percent_open = Some(v);
        }
        if let Some(v) = reading_f64(reading, "duct-pressure") {
            self.duct_pressure = Some(v);
        }
        if let Some(v) = reading_f64(reading, "duct-temperature-c") {
            self.duct_temperature_c = Some(v);
        }
        if let Some(v) = reading_f64(reading, "system-voltage") {
            self.system_voltage = Some(v);
        }
        if let Some(v) = reading_f64(reading, "rssi") {
            self.rssi = Some(v);
        }
    }
}

/// A Flair smart vent.
pub type Vent = Model<VentAttributes>;

impl Model<VentAttributes> {
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
    fn reading_projects_only_known_fields() {
        let mut attrs = VentAttributes {
            name: Some("Den".to_string()),
            percent_open: Some(100.0),
            ..Default::default()
        };
        let reading = json!({
            "percent-open": 50,
            "duct-temperature-c": 18.25,
            "name": "not a vent field here"
        });

        attrs.apply_reading(reading.as_object().unwrap());

        assert_eq!(attrs.percent_open, Some(50.0));
        assert_eq!(attrs.duct_temperature_c, Some(18.25));
        assert_eq!(attrs.name.as_deref(), Some("Den"));
        assert!(attrs.extra.is_empty());
    }
}
