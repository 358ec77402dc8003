/// Community Service Library
///
/// The AirCanvas community feed: posts, a per-user vote ledger with a
/// denormalized post score, one-level comment threads and an append-only
/// activity timeline, served over JSON/HTTP.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Row types, client views and request bodies
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: Security headers, CORS and shared middleware re-exports
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Observability and metrics collection
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
