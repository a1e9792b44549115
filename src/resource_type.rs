//! Resource type discriminators.
//!
//! Every JSON-API document carries a `type` string. Known Flair types map to
//! dedicated variants; anything else is kept verbatim as
//! [`ResourceType::Unregistered`] so callers can tell a typo from a real type.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The JSON-API `type` of a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Structures,
    Rooms,
    Vents,
    HvacUnits,
    Thermostats,
    Bridges,
    RemoteSensors,
    Users,
    Pucks,
    /// A type string that has no registered model.
    Unregistered(String),
    /// An untyped resource that was never given a type.
    Unknown,
}

impl ResourceType {
    /// All registered resource types.
    pub const ALL: [ResourceType; 9] = [
        ResourceType::Structures,
        ResourceType::Rooms,
        ResourceType::Vents,
        ResourceType::HvacUnits,
        ResourceType::Thermostats,
        ResourceType::Bridges,
        ResourceType::RemoteSensors,
        ResourceType::Users,
        ResourceType::Pucks,
    ];

    /// The wire string used in URLs and documents.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Structures => "structures",
            Self::Rooms => "rooms",
            Self::Vents => "vents",
            Self::HvacUnits => "hvac-units",
            Self::Thermostats => "thermostats",
            Self::Bridges => "bridges",
            Self::RemoteSensors => "remote-sensors",
            Self::Users => "users",
            Self::Pucks => "pucks",
            Self::Unregistered(name) => name,
            Self::Unknown => "unknown",
        }
    }

    /// Whether a typed model exists for this type.
    pub fn is_registered(&self) -> bool {
        !matches!(self, Self::Unregistered(_) | Self::Unknown)
    }
}

impl From<&str> for ResourceType {
    fn from(value: &str) -> Self {
        match value {
            "structures" => Self::Structures,
            "rooms" => Self::Rooms,
            "vents" => Self::Vents,
            "hvac-units" => Self::HvacUnits,
            "thermostats" => Self::Thermostats,
            "bridges" => Self::Bridges,
            "remote-sensors" => Self::RemoteSensors,
            "users" => Self::Users,
            "pucks" => Self::Pucks,
            "unknown" => Self::Unknown,
            other => Self::Unregistered(other.to_string()),
        }
    }
}

impl From<String> for ResourceType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResourceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from(s))
    }
}
