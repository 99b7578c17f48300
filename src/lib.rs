//! Append-only, proof-of-work sealed record chain for fingerprint captures.

pub mod api;
pub mod biometric;
pub mod blockchain;
pub mod config;
pub mod error;

pub use error::ChainError;
