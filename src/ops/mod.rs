//! Database administration tools: schema diff, table transfer, view transfer.
//!
//! All three work against the [`Catalog`](crate::schema::Catalog) and
//! [`StatementExecutor`](crate::schema::StatementExecutor) seams, so they run
//! equally against a live database or an in-memory catalog.

pub mod diff;
pub mod transfer;
pub mod views;

pub use diff::{compare, DiffReport};
pub use transfer::{TableTransfer, TableTransferer};
pub use views::{transfer_views, ViewTransfer};
