//! Domain layer for the botmatch engine.
//!
//! Core models, port traits, and the error taxonomy. Nothing in here
//! talks to the network or the database directly.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
