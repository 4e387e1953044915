//! Diesel-backed MySQL access
//!
//! This module provides the live [`Catalog`](crate::schema::Catalog) and
//! [`StatementExecutor`](crate::schema::StatementExecutor) implementation used
//! by the CLI. It complements the in-memory catalog used in tests.
//!
//! # Features
//!
//! - `mysql`: Diesel MySQL backend (default)

pub mod database;
pub mod mysql;

// Re-export key types
pub use database::{Database, DatabaseConfig, Pool, PooledConnection};
pub use mysql::MysqlCatalog;
