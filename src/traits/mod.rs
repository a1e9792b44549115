//! Trait definitions for typed Flair operations.
//!
//! Every [`Model`](crate::Model) with registered [`Attributes`](crate::Attributes)
//! gets these through blanket implementations, so `Vent::get(&client, id)`
//! and `Structure::list(&client)` work without per-type code.

mod create;
mod get;
mod list;
mod update;

pub use create::Create;
pub use get::Get;
pub use list::List;
pub use update::Update;
