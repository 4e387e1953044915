//! # dbscaffold: schema-driven boilerplate for MySQL-backed Spring projects
//!
//! dbscaffold reads table and view metadata from a live database and emits
//! Java persistence and web-layer classes, and bundles three small
//! administration tools that work on the same catalog abstraction.
//!
//! ## Features
//!
//! - **Introspection**: turn catalog metadata into typed table descriptors
//! - **Code generation**: entity, repository, service and controller classes
//! - **Schema diff**: report tables, columns, views and procedures that differ
//! - **Table and view transfer**: copy structure and rows between databases
//! - **MySQL backend**: Diesel + r2d2 catalog (feature: `mysql`, default)
//!
//! ## Example
//!
//! ```
//! use dbscaffold::codegen::{ArtifactKind, Generator};
//! use dbscaffold::schema::{CatalogColumn, Introspector, MemoryCatalog};
//!
//! let catalog = MemoryCatalog::new().with_table(
//!     "user_account",
//!     vec![
//!         CatalogColumn::new("id", "int").primary_key().auto_increment(),
//!         CatalogColumn::new("full_name", "varchar(120)"),
//!     ],
//! );
//!
//! let out = tempfile::TempDir::new().unwrap();
//! let generator = Generator::new(Introspector::new(&catalog), "com.example.demo", out.path());
//! let outcomes = generator
//!     .generate("user_account", &[ArtifactKind::Entity])
//!     .unwrap();
//!
//! assert!(outcomes[0].is_ok());
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod ops;
pub mod schema;
pub mod select;

// Live database access
#[cfg(feature = "mysql")]
pub mod db;

pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use schema::{Catalog, ColumnDescriptor, StatementExecutor, TableDescriptor};
