//! MCP (Model Context Protocol) server and tool types.
//!
//! Exposes the generic Flair verbs as MCP tools so an assistant can read and
//! adjust structures, rooms, vents and the other resource types.
//!
//! # Example
//!
//! ```no_run
//! use flair_api::mcp::FlairServer;
//!
//! # fn main() -> flair_api::Result<()> {
//! let server = FlairServer::from_env()?;
//! // Server can now be used with rmcp transport
//! # Ok(())
//! # }
//! ```

mod params;
mod server;

pub use params::*;
pub use server::FlairServer;
