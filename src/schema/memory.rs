//! In-memory catalog used in place of a live database.
//!
//! As an executor it records every statement, creates relations named by
//! `CREATE TABLE` / `CREATE VIEW`, rejects duplicates with an "already exists"
//! error and rejects inserts into unknown tables.

use super::{Catalog, CatalogColumn, StatementExecutor};
use crate::error::{Result, ScaffoldError};
use indexmap::IndexMap;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
struct MemoryTable {
    columns: Vec<CatalogColumn>,
    rows: Vec<Vec<Value>>,
}

#[derive(Debug, Clone, Default)]
struct MemoryView {
    columns: Vec<CatalogColumn>,
    definition: String,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: IndexMap<String, MemoryTable>,
    views: IndexMap<String, MemoryView>,
    procedures: IndexMap<String, String>,
    executed: Vec<String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, columns: Vec<CatalogColumn>) -> Self {
        self.tables.insert(
            name.to_string(),
            MemoryTable {
                columns,
                rows: Vec::new(),
            },
        );
        self
    }

    /// Attach rows to an existing table; rows for unknown tables are ignored
    pub fn with_rows(mut self, table: &str, rows: Vec<Vec<Value>>) -> Self {
        if let Some(t) = self.tables.get_mut(table) {
            t.rows = rows;
        }
        self
    }

    pub fn with_view(mut self, name: &str, columns: Vec<CatalogColumn>, definition: &str) -> Self {
        self.views.insert(
            name.to_string(),
            MemoryView {
                columns,
                definition: definition.to_string(),
            },
        );
        self
    }

    pub fn with_procedure(mut self, name: &str, definition: &str) -> Self {
        self.procedures.insert(name.to_string(), definition.to_string());
        self
    }

    /// Statements passed to [`StatementExecutor::execute`], including rejected ones
    pub fn executed(&self) -> &[String] {
        &self.executed
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn has_view(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    fn relation_exists(&self, name: &str) -> bool {
        self.has_table(name) || self.has_view(name)
    }
}

/// Relation name following `keywords` at the start of `sql`, without backticks
fn statement_target<'s>(sql: &'s str, keywords: &[&str]) -> Option<&'s str> {
    let mut tokens = sql.split_whitespace();
    for keyword in keywords {
        if !tokens.next()?.eq_ignore_ascii_case(keyword) {
            return None;
        }
    }
    tokens
        .next()
        .map(|name| name.split('(').next().unwrap_or(name).trim_matches('`'))
}

impl Catalog for MemoryCatalog {
    fn table_names(&self) -> Result<Vec<String>> {
        Ok(self.tables.keys().cloned().collect())
    }

    fn view_names(&self) -> Result<Vec<String>> {
        Ok(self.views.keys().cloned().collect())
    }

    fn columns(&self, relation: &str) -> Result<Vec<CatalogColumn>> {
        if let Some(table) = self.tables.get(relation) {
            return Ok(table.columns.clone());
        }
        self.views
            .get(relation)
            .map(|view| view.columns.clone())
            .ok_or_else(|| ScaffoldError::NotFound(relation.to_string()))
    }

    fn view_definition(&self, view: &str) -> Result<String> {
        self.views
            .get(view)
            .map(|v| v.definition.clone())
            .ok_or_else(|| ScaffoldError::NotFound(view.to_string()))
    }

    fn procedure_names(&self) -> Result<Vec<String>> {
        Ok(self.procedures.keys().cloned().collect())
    }

    fn procedure_definition(&self, procedure: &str) -> Result<String> {
        self.procedures
            .get(procedure)
            .cloned()
            .ok_or_else(|| ScaffoldError::NotFound(procedure.to_string()))
    }

    fn fetch_rows(&self, table: &str, columns: &[String]) -> Result<Vec<Vec<Value>>> {
        let t = self
            .tables
            .get(table)
            .ok_or_else(|| ScaffoldError::NotFound(table.to_string()))?;

        let positions: Vec<usize> = columns
            .iter()
            .map(|name| {
                t.columns
                    .iter()
                    .position(|c| &c.name == name)
                    .ok_or_else(|| {
                        ScaffoldError::Connectivity(format!("Unknown column '{}' in '{}'", name, table))
                    })
            })
            .collect::<Result<_>>()?;

        Ok(t.rows
            .iter()
            .map(|row| {
                positions
                    .iter()
                    .map(|&i| row.get(i).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect())
    }
}

impl StatementExecutor for MemoryCatalog {
    fn execute(&mut self, sql: &str) -> Result<()> {
        self.executed.push(sql.to_string());

        if let Some(name) = statement_target(sql, &["CREATE", "TABLE"]) {
            if self.relation_exists(name) {
                return Err(ScaffoldError::Connectivity(format!("Table '{}' already exists", name)));
            }
            self.tables.insert(name.to_string(), MemoryTable::default());
        } else if let Some(name) = statement_target(sql, &["CREATE", "VIEW"]) {
            if self.relation_exists(name) {
                return Err(ScaffoldError::Connectivity(format!("Table '{}' already exists", name)));
            }
            self.views.insert(
                name.to_string(),
                MemoryView {
                    columns: Vec::new(),
                    definition: sql.to_string(),
                },
            );
        } else if let Some(name) = statement_target(sql, &["INSERT", "INTO"]) {
            if !self.has_table(name) {
                return Err(ScaffoldError::Connectivity(format!("Table '{}' doesn't exist", name)));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fetch_rows_projects_columns() {
        let catalog = MemoryCatalog::new()
            .with_table(
                "items",
                vec![CatalogColumn::new("id", "int"), CatalogColumn::new("name", "text")],
            )
            .with_rows("items", vec![vec![json!(1), json!("pen")]]);

        let rows = catalog
            .fetch_rows("items", &["name".to_string(), "id".to_string()])
            .unwrap();
        assert_eq!(rows, vec![vec![json!("pen"), json!(1)]]);

        assert!(catalog.fetch_rows("items", &["nope".to_string()]).is_err());
        assert!(matches!(
            catalog.fetch_rows("missing", &[]),
            Err(ScaffoldError::NotFound(_))
        ));
    }

    #[test]
    fn test_execute_tracks_created_relations() {
        let mut catalog = MemoryCatalog::new();

        catalog.execute("CREATE TABLE `items` (\n  `id` int\n)").unwrap();
        assert!(catalog.has_table("items"));

        let err = catalog.execute("CREATE TABLE `items` (`id` int)").unwrap_err();
        assert!(err.to_string().contains("already exists"));

        catalog.execute("CREATE VIEW cheap AS select 1").unwrap();
        assert!(catalog.has_view("cheap"));

        catalog.execute("INSERT INTO items (id) VALUES\n(1);").unwrap();
        assert!(catalog.execute("INSERT INTO ghosts (id) VALUES (1);").is_err());
        assert_eq!(catalog.executed().len(), 5);
    }
}
