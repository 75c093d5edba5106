//! # Bookshelf Backend Library
//!
//! A small library loan register served over REST. Every endpoint maps one HTTP request
//! to one parameterized statement against the `book` table.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access
//! - **Tokio**: async runtime
//! - **Serde**: JSON bodies and query strings
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (defaults, TOML files, environment)
//! - [`db`]: schema bootstrap
//! - [`error`]: error taxonomy and its HTTP mapping
//! - [`metrics`]: operation counters
//! - [`middleware`]: response hardening
//! - [`repository`]: the `book` table storage client
//! - [`routes`]: HTTP handlers and router assembly
//! - [`state`]: shared application state
//! - [`types`]: the book record, request bodies and query strings

pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
