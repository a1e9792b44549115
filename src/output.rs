//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use serde_json::Value;

use crate::document::Linkage;
use crate::models::{AnyResource, Attributes, Model};

/// Trait for human-readable key-value output.
///
/// Implemented by resource types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl<A: Attributes> PrettyPrint for Model<A> {
    fn pretty_print(&self) -> String {
        let header = format!(
            "{}: {}",
            self.get_type(),
            self.id().unwrap_or("(unsaved)")
        );
        let divider = "─".repeat(header.chars().count().max(30));

        let mut lines = vec![header, divider];

        // Attributes are a serde_json::Map, already sorted by key.
        for (key, value) in self.attributes() {
            lines.push(format!("{:<28}{}", format!("{key}:"), display_value(value)));
        }

        for (name, relationship) in self.relationships() {
            let linked = match &relationship.data {
                Linkage::Null => continue,
                Linkage::One(identifier) => {
                    format!("{} {}", identifier.resource_type, identifier.id)
                }
                Linkage::Many(identifiers) => format!("{} linked", identifiers.len()),
            };
            lines.push(format!("{:<28}{}", format!("→ {name}:"), linked));
        }

        if self.deleted() {
            lines.push("(deleted)".to_string());
        }

        lines.join("\n")
    }
}

impl PrettyPrint for AnyResource {
    fn pretty_print(&self) -> String {
        match self {
            AnyResource::Structure(m) => m.pretty_print(),
            AnyResource::Room(m) => m.pretty_print(),
            AnyResource::Vent(m) => m.pretty_print(),
            AnyResource::HvacUnit(m) => m.pretty_print(),
            AnyResource::Thermostat(m) => m.pretty_print(),
            AnyResource::Bridge(m) => m.pretty_print(),
            AnyResource::RemoteSensor(m) => m.pretty_print(),
            AnyResource::User(m) => m.pretty_print(),
            AnyResource::Puck(m) => m.pretty_print(),
            AnyResource::Other(m) => m.pretty_print(),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
