//! Test data fixtures for the mock server.
//!
//! Provides factory functions for realistic Flair resource objects.

use serde_json::{json, Value};

use crate::{AttributeMap, Linkage, Relationship, ResourceIdentifier, ResourceObject, ResourceType};

/// Collection of fixture factories for test data.
pub struct Fixtures;

/// A small home: one structure, two rooms, three vents, a puck and a user.
pub struct DefaultScenario {
    pub resources: Vec<ResourceObject>,
    pub readings: Vec<(ResourceType, String, AttributeMap)>,
}

impl Fixtures {
    /// Build a resource object from a type, id, attribute JSON and relationships.
    pub fn object(
        resource_type: ResourceType,
        id: &str,
        attributes: Value,
        relationships: Vec<(&str, Linkage)>,
    ) -> ResourceObject {
        ResourceObject {
            id: Some(id.to_string()),
            resource_type: Some(resource_type),
            attributes: Self::attributes(attributes),
            relationships: relationships
                .into_iter()
                .map(|(name, data)| (name.to_string(), Relationship::new(data)))
                .collect(),
        }
    }

    fn attributes(value: Value) -> AttributeMap {
        match value {
            Value::Object(map) => map,
            _ => AttributeMap::new(),
        }
    }

    fn link(resource_type: ResourceType, id: &str) -> Linkage {
        Linkage::One(ResourceIdentifier::new(resource_type, id))
    }

    // =========================================================================
    // Resource Fixtures
    // =========================================================================

    pub fn structure(id: &str, name: &str) -> ResourceObject {
        Self::object(
            ResourceType::Structures,
            id,
            json!({
                "name": name,
                "is-active": true,
                "home": true,
                "structure-heat-cool-mode": "auto",
                "set-point-temperature-c": 21.5,
                "mode": "auto",
                "home-away-mode": "Home",
                "time-zone": "America/Denver",
                "created-at": "2024-01-15T08:00:00Z"
            }),
            Vec::new(),
        )
    }

    pub fn room(id: &str, name: &str, structure_id: &str) -> ResourceObject {
        Self::object(
            ResourceType::Rooms,
            id,
            json!({
                "name": name,
                "active": true,
                "set-point-c": 21.0,
                "current-temperature-c": 20.4,
                "current-humidity": 41.0
            }),
            vec![("structure", Self::link(ResourceType::Structures, structure_id))],
        )
    }

    pub fn vent(id: &str, name: &str, room_id: &str, percent_open: f64) -> ResourceObject {
        Self::object(
            ResourceType::Vents,
            id,
            json!({
                "name": name,
                "percent-open": percent_open,
                "inactive": false
            }),
            vec![("room", Self::link(ResourceType::Rooms, room_id))],
        )
    }

    pub fn puck(id: &str, name: &str, room_id: &str) -> ResourceObject {
        Self::object(
            ResourceType::Pucks,
            id,
            json!({
                "name": name,
                "display-number": "0042",
                "inactive": false
            }),
            vec![("room", Self::link(ResourceType::Rooms, room_id))],
        )
    }

    pub fn user(id: &str, name: &str, structure_ids: &[&str]) -> ResourceObject {
        Self::object(
            ResourceType::Users,
            id,
            json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
                "units": "C"
            }),
            vec![(
                "structures",
                Linkage::Many(
                    structure_ids
                        .iter()
                        .map(|id| ResourceIdentifier::new(ResourceType::Structures, *id))
                        .collect(),
                ),
            )],
        )
    }

    pub fn vent_reading(percent_open: f64, duct_temperature_c: f64) -> AttributeMap {
        Self::attributes(json!({
            "percent-open": percent_open,
            "duct-pressure": 99.8,
            "duct-temperature-c": duct_temperature_c,
            "system-voltage": 3.1,
            "rssi": -61.0
        }))
    }

    pub fn puck_reading(room_temperature_c: f64, humidity: f64) -> AttributeMap {
        Self::attributes(json!({
            "room-temperature-c": room_temperature_c,
            "humidity": humidity,
            "rssi": -55.0,
            "system-voltage": 2.9
        }))
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario {
            resources: vec![
                Self::structure("1", "Home"),
                Self::room("10", "Living Room", "1"),
                Self::room("11", "Bedroom", "1"),
                Self::vent("100", "Living Room East", "10", 100.0),
                Self::vent("101", "Living Room West", "10", 50.0),
                Self::vent("102", "Bedroom", "11", 0.0),
                Self::puck("200", "Living Room Puck", "10"),
                Self::user("u1", "Test User", &["1"]),
            ],
            readings: vec![
                (ResourceType::Vents, "100".to_string(), Self::vent_reading(100.0, 24.5)),
                (ResourceType::Pucks, "200".to_string(), Self::puck_reading(20.4, 41.0)),
            ],
        }
    }
}
