//! CLI command implementations.

pub mod cache;
pub mod catalog;
pub mod history;
pub mod init;
pub mod query;
