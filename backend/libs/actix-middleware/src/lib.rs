//! # Actix Middleware Library
//!
//! Shared middleware components for AirCanvas Actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer token authentication
//! - `rate_limit`: per-IP request quota backed by `governor`
//! - `correlation_id`: request correlation IDs recorded on a tracing span
//! - `error`: JSON error bodies shared by every middleware

pub mod correlation_id;
pub mod error;
pub mod jwt_auth;
pub mod rate_limit;

pub use correlation_id::CorrelationIdMiddleware;
pub use error::json_error;
pub use jwt_auth::{JwtAuthMiddleware, UserId};
pub use rate_limit::{extract_client_ip, RateLimitConfig, RateLimitMiddleware};
