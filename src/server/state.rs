//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds all shared resources and
//! dependencies needed by the application. The state is initialized once during startup
//! and then cloned for each request handler through Axum's state extraction. The Discord
//! bot and the scheduler receive clones of the same state.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::server::{config::Config, service::notification::NotificationHub};

/// Application state containing shared resources and dependencies.
///
/// All fields use cheap-to-clone types:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `reqwest::Client` uses an `Arc` internally
/// - `NotificationHub` wraps a broadcast sender
/// - `Arc<Config>` is a reference-counted pointer
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// HTTP client for firm endpoint forwarding and FiveM status requests.
    ///
    /// Configured with a timeout and without redirects.
    pub http_client: reqwest::Client,

    /// Broadcasts dashboard events to connected SSE clients.
    pub notifier: NotificationHub,

    /// Runtime configuration loaded at startup.
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `http_client` - HTTP client for external requests
    /// - `notifier` - SSE notification hub
    /// - `config` - Application configuration
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        http_client: reqwest::Client,
        notifier: NotificationHub,
        config: Config,
    ) -> Self {
        Self {
            db,
            http_client,
            notifier,
            config: Arc::new(config),
        }
    }
}
