//! Axum server lifecycle and routing for the mock Flair API.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, RwLock};
use tokio::task::JoinHandle;

use super::fixtures::{DefaultScenario, Fixtures};
use super::handlers;
use super::state::MockState;

/// An in-process Flair API bound to a random local port.
///
/// Dropping the handle without [`MockServer::shutdown`] leaves the task
/// running until the test runtime exits.
pub struct MockServer {
    url: String,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
    state: Arc<RwLock<MockState>>,
}

impl MockServer {
    /// Client id accepted by servers started with [`MockServer::start`].
    pub const CLIENT_ID: &'static str = "mock-client-id";
    /// Client secret accepted by servers started with [`MockServer::start`].
    pub const CLIENT_SECRET: &'static str = "mock-client-secret";

    /// Serve the default one-home scenario, locked to
    /// [`CLIENT_ID`](Self::CLIENT_ID) and [`CLIENT_SECRET`](Self::CLIENT_SECRET).
    pub async fn start() -> Self {
        Self::with_state(Self::default_state()).await
    }

    /// Serve no resources and hand a token to any client.
    pub async fn start_empty() -> Self {
        Self::with_state(MockState::new()).await
    }

    /// Serve the given state.
    pub async fn with_state(state: MockState) -> Self {
        let state = state.shared();
        let router = Self::create_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("mock server could not bind a local port");
        let addr = listener
            .local_addr()
            .expect("mock server listener has no local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let graceful = axum::serve(listener, router).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = graceful.await {
                tracing::error!(error = %e, "mock server stopped");
            }
        });

        Self {
            url: format!("http://{addr}"),
            shutdown_tx,
            task,
            state,
        }
    }

    /// Base URL to hand to [`FlairClient::new`](crate::FlairClient::new).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The live store, for seeding or inspecting resources mid-test.
    pub fn state(&self) -> Arc<RwLock<MockState>> {
        Arc::clone(&self.state)
    }

    /// Number of token requests answered so far.
    pub async fn token_requests(&self) -> usize {
        self.state.read().await.token_requests
    }

    /// Stop accepting connections and wait for the server task to end.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }

    fn default_state() -> MockState {
        Self::state_from_scenario(Fixtures::default_scenario())
            .with_credentials(Self::CLIENT_ID, Self::CLIENT_SECRET)
    }

    /// Load every resource and reading of a scenario into a fresh store.
    pub fn state_from_scenario(scenario: DefaultScenario) -> MockState {
        let mut state = MockState::new();

        for object in scenario.resources {
            state.insert(object);
        }

        for (resource_type, id, reading) in scenario.readings {
            state = state.with_reading(&resource_type, &id, reading);
        }

        state
    }

    /// Token endpoint, the generic JSON-API routes and `/health`.
    pub(crate) fn create_router(state: Arc<RwLock<MockState>>) -> Router {
        Router::new()
            .route("/oauth/token", post(handlers::issue_token))
            .route(
                "/api/:resource_type",
                get(handlers::list_resources).post(handlers::create_resource),
            )
            .route(
                "/api/:resource_type/:id",
                get(handlers::get_resource)
                    .patch(handlers::update_resource)
                    .delete(handlers::delete_resource),
            )
            .route(
                "/api/:resource_type/:id/current-reading",
                get(handlers::current_reading),
            )
            .route("/health", get(health_check))
            .with_state(state)
    }
}

async fn health_check() -> &'static str {
    "ok"
}
