use std::sync::Arc;

use formcraft_core::gateway::SubmissionGateway;
use formcraft_core::store::FormStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The store and
/// gateways are constructed once at startup; handlers never re-acquire a
/// storage handle.
#[derive(Clone)]
pub struct AppState {
    /// Form lifecycle operations (gateway + preview cache).
    pub store: Arc<FormStore>,
    /// Submission ingestion and analytics queries.
    pub submissions: Arc<dyn SubmissionGateway>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
