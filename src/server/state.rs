//! Application state shared across all request handlers.
//!
//! The state is initialized once during startup and then cloned for each request handler
//! through Axum's state extraction. All fields are cheap to clone:
//! - `DatabaseConnection` is a connection pool (clones share the pool)
//! - `Arc` fields are reference-counted
//! - `Arc<str>` shares the admin token without copying

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::service::{dispatcher::CommandDispatcher, profile::ProfileSource};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for the queue and settings tables.
    pub db: DatabaseConnection,

    /// The dispatcher also driven by the scheduler; manual operations go through the same
    /// instance so they share its worker id.
    pub dispatcher: Arc<CommandDispatcher>,

    /// Profile source used to report the active remote console configuration.
    pub profiles: Arc<dyn ProfileSource>,

    /// Bearer token required by every admin endpoint.
    pub admin_token: Arc<str>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        dispatcher: Arc<CommandDispatcher>,
        profiles: Arc<dyn ProfileSource>,
        admin_token: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            db,
            dispatcher,
            profiles,
            admin_token: admin_token.into(),
        }
    }
}
