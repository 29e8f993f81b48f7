//! rowmap Store - SQLite persistence for `Entity` types
//!
//! Provides:
//! - Value coding between semantic types and SQLite storage classes
//! - SQL generation from derived table mappings
//! - Schema management (CREATE/DROP TABLE)
//! - Single-row insert and primary-key load
//! - Deferred-load proxies resolving remote content on first access
//! - Connection management and TOML configuration

pub mod coder;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod proxy;
pub mod reader;
pub mod schema;
pub mod statements;
pub mod writer;

// Re-export key types
pub use config::StoreConfig;
pub use db::Database;
pub use errors::Result;
pub use http::HttpFetcher;
pub use proxy::{Deferred, FieldAccess, Loaded};
