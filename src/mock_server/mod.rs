//! Mock Flair API server for E2E testing.
//!
//! This module provides an in-memory mock server that speaks the Flair
//! JSON-API and its OAuth token endpoint. Unlike wiremock which mocks at the
//! HTTP level per-test, this server maintains state across requests, so a
//! resource created in one call can be patched, refreshed and deleted in the
//! next.
//!
//! # Example
//!
//! ```ignore
//! use flair_api::mock_server::MockServer;
//! use flair_api::{FlairClient, Get, Structure};
//!
//! #[tokio::test]
//! async fn test_workflow() {
//!     let server = MockServer::start().await;
//!     let client = FlairClient::new(MockServer::CLIENT_ID, MockServer::CLIENT_SECRET, server.url()).unwrap();
//!
//!     // Server comes with default fixtures
//!     let home = Structure::get(&client, "1".to_string()).await.unwrap();
//!     assert_eq!(home.attrs().name.as_deref(), Some("Home"));
//!
//!     server.shutdown().await;
//! }
//! ```

mod fixtures;
mod handlers;
mod server;
mod state;

pub use fixtures::{DefaultScenario, Fixtures};
pub use server::MockServer;
pub use state::MockState;
