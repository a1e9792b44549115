//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the `flair` binary.

use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::document::{AttributeMap, ResourceIdentifier};
use crate::relationships::{Related, RelationshipMap};
use crate::resource_type::ResourceType;

/// Flair API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "flair", about = "Flair API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get one resource by id, or the whole collection when no id is given.
    Get {
        /// Resource type, e.g. `vents` or `vent`.
        #[arg(value_parser = parse_resource_type)]
        resource_type: ResourceType,

        /// Resource id.
        id: Option<String>,
    },

    /// Create a resource.
    Create {
        #[arg(value_parser = parse_resource_type)]
        resource_type: ResourceType,

        /// Attribute as `key=value`; values that parse as JSON are sent as JSON.
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, Value)>,

        /// To-one relationship as `name=type:id`.
        #[arg(long = "rel", value_parser = parse_relationship)]
        relationships: Vec<(String, ResourceIdentifier)>,

        /// To-many relationship as `name=type:id,type:id`. Always sent as a
        /// list; `name=` sends an empty list.
        #[arg(long = "rels", value_parser = parse_relationship_list)]
        relationship_lists: Vec<(String, Vec<ResourceIdentifier>)>,
    },

    /// Apply a partial update to a resource.
    Update {
        #[arg(value_parser = parse_resource_type)]
        resource_type: ResourceType,

        id: String,

        /// Attribute as `key=value`; values that parse as JSON are sent as JSON.
        #[arg(long = "attr", value_parser = parse_attribute)]
        attributes: Vec<(String, Value)>,

        /// To-one relationship as `name=type:id`.
        #[arg(long = "rel", value_parser = parse_relationship)]
        relationships: Vec<(String, ResourceIdentifier)>,

        /// To-many relationship as `name=type:id,type:id`. Always sent as a
        /// list; `name=` sends an empty list.
        #[arg(long = "rels", value_parser = parse_relationship_list)]
        relationship_lists: Vec<(String, Vec<ResourceIdentifier>)>,
    },

    /// Delete a resource.
    Delete {
        #[arg(value_parser = parse_resource_type)]
        resource_type: ResourceType,

        id: String,
    },

    /// Show a device's current sensor reading.
    Reading {
        #[arg(value_parser = parse_resource_type)]
        resource_type: ResourceType,

        id: String,
    },
}

/// Parse a resource type, accepting singular names for registered types.
pub fn parse_resource_type(value: &str) -> Result<ResourceType, String> {
    if value.is_empty() {
        return Err("resource type must not be empty".to_string());
    }
    let plural = match value {
        "structure" => "structures",
        "room" => "rooms",
        "vent" => "vents",
        "hvac-unit" => "hvac-units",
        "thermostat" => "thermostats",
        "bridge" => "bridges",
        "remote-sensor" => "remote-sensors",
        "user" => "users",
        "puck" => "pucks",
        other => other,
    };
    Ok(ResourceType::from(plural))
}

/// Parse `key=value`. The value is JSON if it parses as JSON, else a string.
pub fn parse_attribute(value: &str) -> Result<(String, Value), String> {
    let (key, raw) = value
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{value}'"))?;
    if key.is_empty() {
        return Err(format!("missing attribute name in '{value}'"));
    }
    let parsed = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((key.to_string(), parsed))
}

/// Parse `name=type:id`.
pub fn parse_relationship(value: &str) -> Result<(String, ResourceIdentifier), String> {
    let (name, target) = value
        .split_once('=')
        .ok_or_else(|| format!("expected name=type:id, got '{value}'"))?;
    let (resource_type, id) = target
        .split_once(':')
        .ok_or_else(|| format!("expected type:id after '=', got '{target}'"))?;
    if name.is_empty() || id.is_empty() {
        return Err(format!("expected name=type:id, got '{value}'"));
    }
    Ok((
        name.to_string(),
        ResourceIdentifier::new(parse_resource_type(resource_type)?, id),
    ))
}

/// Parse `name=type:id,type:id`. An empty target list is allowed.
pub fn parse_relationship_list(
    value: &str,
) -> Result<(String, Vec<ResourceIdentifier>), String> {
    let (name, targets) = value
        .split_once('=')
        .ok_or_else(|| format!("expected name=type:id,..., got '{value}'"))?;
    if name.is_empty() {
        return Err(format!("missing relationship name in '{value}'"));
    }
    let identifiers = targets
        .split(',')
        .filter(|target| !target.is_empty())
        .map(|target| parse_relationship(&format!("{name}={target}")).map(|(_, id)| id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((name.to_string(), identifiers))
}

/// Collect parsed `--attr` pairs into an attribute bag. Later keys win.
pub fn attributes_from_args(pairs: Vec<(String, Value)>) -> AttributeMap {
    pairs.into_iter().collect()
}

/// Collect parsed `--rel` and `--rels` values.
///
/// A name given once with `--rel` is to-one. A name given with `--rels`, or
/// with `--rel` more than once, is a list.
pub fn relationships_from_args(
    pairs: Vec<(String, ResourceIdentifier)>,
    lists: Vec<(String, Vec<ResourceIdentifier>)>,
) -> RelationshipMap {
    let mut grouped: BTreeMap<String, (bool, Vec<ResourceIdentifier>)> = BTreeMap::new();
    for (name, identifier) in pairs {
        grouped.entry(name).or_default().1.push(identifier);
    }
    for (name, identifiers) in lists {
        let entry = grouped.entry(name).or_default();
        entry.0 = true;
        entry.1.extend(identifiers);
    }
    grouped
        .into_iter()
        .map(|(name, (is_list, mut identifiers))| {
            let related = if !is_list && identifiers.len() == 1 {
                Related::One(identifiers.remove(0))
            } else {
                Related::Many(identifiers)
            };
            (name, related)
        })
        .collect()
}
