use std::sync::Arc;

use crate::config::AppConfig;
use crate::metrics::Metrics;
use crate::repository::BookStore;

/// The shared application state.
///
/// Cloned into every handler by Axum; all fields are cheap handles onto shared data.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool behind `books`.
    pub db: sqlx::SqlitePool,
    /// Storage client for the `book` table, bounded by `database.query_timeout_ms`.
    pub books: BookStore,
    /// The application configuration.
    pub config: Arc<AppConfig>,
    /// Operation counters exposed on `/metrics`.
    pub metrics: Metrics,
}

impl AppState {
    /// Creates a new `AppState` around an already initialised pool.
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        let books = BookStore::new(db.clone(), config.database.query_timeout());
        Self { db, books, config: Arc::new(config), metrics: Metrics::new() }
    }
}
