//! Flair resource models.

mod any;
mod bridge;
mod hvac_unit;
mod model;
mod puck;
mod remote_sensor;
mod room;
mod structure;
mod thermostat;
mod user;
mod vent;

pub use any::*;
pub use bridge::*;
pub use hvac_unit::*;
pub use model::{Attributes, Model, ReadingProjection, ResourceState, Untyped};
pub use puck::*;
pub use remote_sensor::*;
pub use room::*;
pub use structure::*;
pub use thermostat::*;
pub use user::*;
pub use vent::*;
