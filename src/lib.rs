//! Flair API client library.
//!
//! A Rust library for the Flair smart vent JSON-API. A single generic
//! implementation of get/create/update/delete serves every resource type;
//! typed models give each type its own fields on top of it.
//!
//! # Quick Start
//!
//! ```no_run
//! use flair_api::{FlairClient, Get, List, Structure, Vent};
//!
//! #[tokio::main]
//! async fn main() -> flair_api::Result<()> {
//!     // Create client from environment variables
//!     let client = FlairClient::from_env()?;
//!
//!     // List all structures
//!     let structures = Structure::list(&client).await?;
//!     println!("Found {} structures", structures.len());
//!
//!     // Get a vent and open it halfway
//!     let mut vent = Vent::get(&client, "42".to_string()).await?;
//!     let mut changes = serde_json::Map::new();
//!     changes.insert("percent-open".into(), 50.into());
//!     vent.update(&changes, &Default::default()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`FlairClient`] owns the OAuth token and runs the generic verbs against
//!   `/api/{type}[/{id}]`, classifying every response.
//! - [`Model<A>`] is one resource: id, typed [`Attributes`], relationships and
//!   lifecycle, with `refresh`/`update`/`delete` bound to its client.
//! - [`AnyResource`] resolves a document's `type` to its concrete model.
//! - [`Get`], [`List`], [`Create`] and [`Update`] give every model typed
//!   access through blanket implementations.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `FLAIR_CLIENT_ID` (required) - OAuth2 client id
//! - `FLAIR_CLIENT_SECRET` (required) - OAuth2 client secret
//! - `FLAIR_API_URL` (optional) - Base URL (defaults to `https://api.flair.co`)

mod client;
mod document;
mod error;
mod models;
mod output;
mod relationships;
mod resource_type;
mod response;
mod traits;

pub mod cli;
pub mod mcp;

#[cfg(feature = "test-server")]
pub mod mock_server;

// Re-export core types
pub use client::{FlairClient, Token};
pub use document::{
    attribute_map, AttributeMap, Linkage, PrimaryData, Relationship, ResourceIdentifier,
    ResourceObject,
};
pub use error::{FlairError, Result};
pub use output::PrettyPrint;
pub use relationships::{Related, RelationshipMap};
pub use resource_type::ResourceType;
pub use response::{classify, Outcome};

// Re-export traits
pub use traits::{Create, Get, List, Update};

// Re-export models
pub use models::{
    AnyResource, Attributes, Fetched, Model, ReadingProjection, ResourceState, Untyped,
    // Structure types
    FlairMode, Structure, StructureAttributes, StructureHeatCoolMode,
    // Room and device types
    Bridge, BridgeAttributes, HvacUnit, HvacUnitAttributes, Puck, PuckAttributes, RemoteSensor,
    RemoteSensorAttributes, Room, RoomAttributes, Thermostat, ThermostatAttributes, Vent,
    VentAttributes,
    // Account types
    User, UserAttributes,
};
