//! View transfer between two databases.
//!
//! A captured view definition may carry the full `CREATE ALGORITHM=...
//! DEFINER=... SQL SECURITY ... VIEW name AS` header of the source server.
//! Only the query body is replayed on the target, under the same name.

use super::transfer::quote_identifier;
use crate::error::Result;
use crate::schema::{Catalog, StatementExecutor};
use regex::Regex;
use std::sync::OnceLock;

fn view_header() -> &'static Regex {
    static HEADER: OnceLock<Regex> = OnceLock::new();
    HEADER.get_or_init(|| {
        Regex::new(
            r"(?is)^\s*CREATE\s+(?:OR\s+REPLACE\s+)?(?:ALGORITHM\s*=\s*\w+\s+)?(?:DEFINER\s*=\s*\S+\s+)?(?:SQL\s+SECURITY\s+\w+\s+)?VIEW\s+\S+\s+AS\s+(.*)$",
        )
        .expect("view header pattern is valid")
    })
}

/// Query body of a view definition, without any `CREATE ... AS` header
pub fn clean_view_definition(definition: &str) -> String {
    match view_header().captures(definition).and_then(|c| c.get(1)) {
        Some(body) => body.as_str().trim().to_string(),
        None => definition.trim().to_string(),
    }
}

pub fn create_view_statement(view: &str, definition: &str) -> String {
    format!(
        "CREATE VIEW {} AS {}",
        quote_identifier(view),
        clean_view_definition(definition)
    )
}

/// Outcome of transferring one view
#[derive(Debug)]
pub struct ViewTransfer {
    pub view: String,
    pub result: Result<()>,
}

/// Replay each selected view on the target, continuing past failures
pub fn transfer_views<S, T>(source: &S, target: &mut T, views: &[String]) -> Vec<ViewTransfer>
where
    S: Catalog + ?Sized,
    T: StatementExecutor + ?Sized,
{
    views
        .iter()
        .map(|view| {
            let result = source.view_definition(view).and_then(|definition| {
                let sql = create_view_statement(view, &definition);
                tracing::info!("Creating view in target: {}", view);
                tracing::debug!("View definition: {}", sql);
                target.execute(&sql)
            });

            match result {
                Ok(()) => tracing::info!("Successfully created view: {}", view),
                Err(ref e) => tracing::warn!("Failed to create view {}: {}", view, e),
            }

            ViewTransfer {
                view: view.clone(),
                result,
            }
        })
        .collect()
}
