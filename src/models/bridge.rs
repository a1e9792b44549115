//! Bridge model.
//!
//! A bridge links pucks and vents to the cloud when no puck acts as gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::AttributeMap;
use crate::models::model::{reading_f64, Attributes, Model, ReadingProjection};
use crate::resource_type::ResourceType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BridgeAttributes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub led_brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_rssi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: AttributeMap,
}

impl Attributes for BridgeAttributes {
    fn resource_type() -> ResourceType {
        ResourceType::Bridges
    }
}

impl ReadingProjection for BridgeAttributes {
    fn apply_reading(&mut self, reading: &AttributeMap) {
        // The reading calls it `rssi`; the bridge itself says `current-rssi`.
        if let Some(rssi) = reading_f64(reading, "rssi") {
            self.current_rssi = Some(rssi);
        }
        if let Some(number) = reading.get("display-number").and_then(|v| v.as_str()) {
            self.display_number = Some(number.to_string());
        }
        if let Some(brightness) = reading_f64(reading, "led-brightness") {
            self.led_brightness = Some(brightness);
        }
    }
}

pub type Bridge = Model<BridgeAttributes>;

impl Model<BridgeAttributes> {
    pub fn structure_id(&self) -> Option<&str> {
        self.related_id("structure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResourceObject;
    use serde_json::json;

    #[test]
    fn current_reading_updates_signal_fields() {
        let mut bridge = Bridge::new();
        bridge
            .edit_attrs(|a| a.name = Some("Basement".to_string()))
            .unwrap();

        let reading: ResourceObject = serde_json::from_value(json!({
            "id": "r1",
            "type": "bridge-readings",
            "attributes": {"rssi": -61, "display-number": "B-12", "led-brightness": 40}
        }))
        .unwrap();
        bridge.set_current_reading(&reading).unwrap();

        assert_eq!(bridge.attrs().current_rssi, Some(-61.0));
        assert_eq!(bridge.attrs().display_number.as_deref(), Some("B-12"));
        assert_eq!(bridge.attrs().led_brightness, Some(40.0));
        assert_eq!(bridge.attribute("current-rssi"), Some(json!(-61.0)));
        assert_eq!(bridge.attrs().name.as_deref(), Some("Basement"));
    }
}
