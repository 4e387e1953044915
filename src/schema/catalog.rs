//! Catalog and statement seams between the tools and a database.

use crate::error::Result;
use serde_json::Value;

/// Column metadata as reported by a database catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumn {
    pub name: String,
    /// Bare data type, e.g. `varchar`
    pub data_type: String,
    /// Full type text, e.g. `varchar(100)`
    pub column_type: String,
    pub max_length: Option<u64>,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
}

impl CatalogColumn {
    /// Nullable, non-key column; the data type and character length are
    /// derived from `column_type` (`varchar(100)` -> `varchar`, 100).
    pub fn new(name: &str, column_type: &str) -> Self {
        let column_type = column_type.trim();
        let (data_type, args) = match column_type.split_once('(') {
            Some((base, rest)) => (base.trim(), rest.split(')').next()),
            None => (
                column_type.split_whitespace().next().unwrap_or_default(),
                None,
            ),
        };

        let data_type = data_type.to_lowercase();
        let max_length = match data_type.as_str() {
            "varchar" | "char" => args.and_then(|a| a.trim().parse().ok()),
            _ => None,
        };

        CatalogColumn {
            name: name.to_string(),
            data_type,
            column_type: column_type.to_string(),
            max_length,
            nullable: true,
            primary_key: false,
            auto_increment: false,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }
}

/// Read-only access to a database catalog and its rows
pub trait Catalog {
    /// Base tables, in catalog order
    fn table_names(&self) -> Result<Vec<String>>;

    /// Views, in catalog order
    fn view_names(&self) -> Result<Vec<String>>;

    /// Columns of a table or view, in ordinal order
    fn columns(&self, relation: &str) -> Result<Vec<CatalogColumn>>;

    /// Captured definition text of a view
    fn view_definition(&self, view: &str) -> Result<String>;

    /// Stored procedures of the current schema
    fn procedure_names(&self) -> Result<Vec<String>>;

    fn procedure_definition(&self, procedure: &str) -> Result<String>;

    /// All rows of `table`, each as one JSON value per requested column
    fn fetch_rows(&self, table: &str, columns: &[String]) -> Result<Vec<Vec<Value>>>;
}

/// Write access to a target database
pub trait StatementExecutor {
    fn execute(&mut self, sql: &str) -> Result<()>;
}
