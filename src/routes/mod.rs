//! HTTP route handlers for the Bookshelf API.
//!
//! - `books`: the `/api` CRUD surface over the `book` table
//! - `health`: liveness, readiness, metrics and version endpoints

use axum::{
    routing::{delete, get, put},
    Router,
};

use crate::state::AppState;

pub mod books;
pub mod health;

/// Builds the application router without transport-level layers.
///
/// The collection root answers on both `/api` and `/api/`; a nested router would only
/// match the former.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(books::welcome))
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz))
        .route("/metrics", get(health::metrics))
        .route("/metrics/prometheus", get(health::metrics_prometheus))
        .route("/version", get(health::version))
        .route("/api", get(books::list_books).post(books::create_book))
        .route("/api/", get(books::list_books).post(books::create_book))
        .route("/api/reference", get(books::list_references))
        .route("/api/title", get(books::title_contains))
        .route("/api/title/starting", get(books::title_starting))
        .route("/api/borrowing_date", get(books::borrowed_after))
        .route("/api/arrange", get(books::arrange))
        .route("/api/search", get(books::search))
        .route("/api/book/{id}", get(books::get_book))
        .route("/api/{id}", put(books::update_book))
        .route("/api/toggle_returned/{id}", put(books::toggle_returned))
        .route("/api/delete/not_returned", delete(books::delete_not_returned))
        .route("/api/delete/{id}", delete(books::delete_book))
        .with_state(state)
}
