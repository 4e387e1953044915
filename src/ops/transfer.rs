//! Table structure and data transfer between two databases.
//!
//! Each table is handled independently: a failed `CREATE TABLE` (usually
//! because the table already exists on the target) is logged and the data copy
//! still runs; a failed copy is logged and the next table is processed.

use crate::error::{Result, ScaffoldError};
use crate::schema::{Catalog, CatalogColumn, StatementExecutor};
use serde_json::Value;

/// Default number of rows per `INSERT` statement
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Outcome of transferring one table
#[derive(Debug)]
pub struct TableTransfer {
    pub table: String,
    pub structure: Result<()>,
    /// Number of rows copied
    pub data: Result<usize>,
}

impl TableTransfer {
    pub fn is_ok(&self) -> bool {
        self.structure.is_ok() && self.data.is_ok()
    }
}

/// Quote an identifier with backticks
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "''"))
}

/// Render a value as a SQL literal
pub fn sql_literal(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_string(s),
        Value::Array(_) | Value::Object(_) => quote_string(&value.to_string()),
    }
}

/// `CREATE TABLE` statement rebuilt from catalog columns
pub fn create_table_statement(table: &str, columns: &[CatalogColumn]) -> String {
    let mut definitions: Vec<String> = columns
        .iter()
        .map(|column| {
            let mut definition = format!("  {} {}", quote_identifier(&column.name), column.column_type);
            if !column.nullable {
                definition.push_str(" NOT NULL");
            }
            if column.auto_increment {
                definition.push_str(" AUTO_INCREMENT");
            }
            definition
        })
        .collect();

    let keys: Vec<String> = columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| quote_identifier(&c.name))
        .collect();
    if !keys.is_empty() {
        definitions.push(format!("  PRIMARY KEY ({})", keys.join(", ")));
    }

    format!(
        "CREATE TABLE {} (\n{}\n)",
        quote_identifier(table),
        definitions.join(",\n")
    )
}

/// Multi-row `INSERT` statement with inlined literals
pub fn insert_statement(table: &str, columns: &[String], rows: &[Vec<Value>]) -> String {
    let column_list: Vec<String> = columns.iter().map(|c| quote_identifier(c)).collect();
    let values: Vec<String> = rows
        .iter()
        .map(|row| {
            let literals: Vec<String> = row.iter().map(sql_literal).collect();
            format!("({})", literals.join(", "))
        })
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES\n{};",
        quote_identifier(table),
        column_list.join(", "),
        values.join(",\n")
    )
}

/// Copies tables from a source catalog to a target database
pub struct TableTransferer<'a, S: Catalog + ?Sized, T: StatementExecutor + ?Sized> {
    source: &'a S,
    target: &'a mut T,
    batch_size: usize,
}

impl<'a, S: Catalog + ?Sized, T: StatementExecutor + ?Sized> TableTransferer<'a, S, T> {
    pub fn new(source: &'a S, target: &'a mut T) -> Self {
        TableTransferer {
            source,
            target,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Transfer every table in `tables`, continuing past per-table failures
    pub fn transfer_all(&mut self, tables: &[String]) -> Vec<TableTransfer> {
        tables.iter().map(|table| self.transfer(table)).collect()
    }

    pub fn transfer(&mut self, table: &str) -> TableTransfer {
        tracing::info!("Processing table: {}", table);

        let columns = match self.source_columns(table) {
            Ok(columns) => columns,
            Err(e) => {
                tracing::warn!("Failed to read structure of {}: {}", table, e);
                return TableTransfer {
                    table: table.to_string(),
                    structure: Err(e.clone()),
                    data: Err(e),
                };
            }
        };

        let structure = self.create_structure(table, &columns);
        if let Err(ref e) = structure {
            tracing::warn!(
                "Table {} already exists or failed to create, skipping creation: {}",
                table,
                e
            );
        }

        let data = self.copy_rows(table, &columns);
        match data {
            Ok(0) => tracing::info!("No data to transfer for table: {}", table),
            Ok(count) => tracing::info!("Transferred {} rows for table: {}", count, table),
            Err(ref e) => tracing::warn!("Failed to transfer data for table {}: {}", table, e),
        }

        TableTransfer {
            table: table.to_string(),
            structure,
            data,
        }
    }

    fn source_columns(&self, table: &str) -> Result<Vec<CatalogColumn>> {
        if !self.source.table_names()?.iter().any(|t| t == table) {
            return Err(ScaffoldError::NotFound(table.to_string()));
        }
        self.source.columns(table)
    }

    fn create_structure(&mut self, table: &str, columns: &[CatalogColumn]) -> Result<()> {
        let sql = create_table_statement(table, columns);
        tracing::debug!("Creating table in target: {}\n{}", table, sql);
        self.target.execute(&sql)
    }

    fn copy_rows(&mut self, table: &str, columns: &[CatalogColumn]) -> Result<usize> {
        let names: Vec<String> = columns.iter().map(|c| c.name.clone()).collect();
        let rows = self.source.fetch_rows(table, &names)?;

        for chunk in rows.chunks(self.batch_size) {
            let sql = insert_statement(table, &names, chunk);
            tracing::debug!("Generated SQL for {}:\n{}", table, sql);
            self.target.execute(&sql)?;
        }

        Ok(rows.len())
    }
}
