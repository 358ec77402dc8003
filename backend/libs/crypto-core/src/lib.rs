//! Shared cryptographic helpers for AirCanvas services.
//!
//! - `jwt`: bearer-token key storage, validation and minting
//! - `hash`: constant-time secret comparison

pub mod hash;
pub mod jwt;
