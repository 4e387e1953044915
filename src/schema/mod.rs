//! Normalized schema model and catalog introspection.
//!
//! Descriptors are built fresh from a [`Catalog`] on every introspection call
//! and never mutated afterwards. The live MySQL catalog lives in
//! [`crate::db`]; [`MemoryCatalog`] is an in-memory stand-in for tests.

pub mod catalog;
pub mod introspect;
pub mod memory;

pub use catalog::{Catalog, CatalogColumn, StatementExecutor};
pub use introspect::{AutoIncrementPolicy, Introspector};
pub use memory::MemoryCatalog;

use crate::codegen::naming::{to_camel_case, to_class_name};
use crate::codegen::type_map::TypeMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized source column type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    Integer,
    BigInt,
    Varchar,
    Text,
    Date,
    DateTime,
    Decimal,
    /// Any other catalog type, kept as its uppercase name
    Other(String),
}

impl SourceType {
    /// Normalize a catalog data type (`int`, `varchar(100)`, `bigint unsigned`, ...)
    pub fn from_data_type(raw: &str) -> Self {
        let base = raw
            .trim()
            .split(|c: char| c == '(' || c.is_whitespace())
            .next()
            .unwrap_or_default()
            .to_lowercase();

        match base.as_str() {
            "int" | "integer" => SourceType::Integer,
            "bigint" => SourceType::BigInt,
            "varchar" => SourceType::Varchar,
            "text" => SourceType::Text,
            "date" => SourceType::Date,
            "datetime" => SourceType::DateTime,
            "decimal" | "numeric" => SourceType::Decimal,
            other => SourceType::Other(other.to_uppercase()),
        }
    }

    /// Tag used as the type map key
    pub fn tag(&self) -> &str {
        match self {
            SourceType::Integer => "INTEGER",
            SourceType::BigInt => "BIGINT",
            SourceType::Varchar => "VARCHAR",
            SourceType::Text => "TEXT",
            SourceType::Date => "DATE",
            SourceType::DateTime => "DATETIME",
            SourceType::Decimal => "DECIMAL",
            SourceType::Other(name) => name,
        }
    }

    pub fn is_integer_like(&self) -> bool {
        match self {
            SourceType::Integer | SourceType::BigInt => true,
            SourceType::Other(name) => {
                matches!(name.as_str(), "TINYINT" | "SMALLINT" | "MEDIUMINT")
            }
            _ => false,
        }
    }

    /// Whether the type carries a declared character length
    pub fn is_length_bounded(&self) -> bool {
        match self {
            SourceType::Varchar => true,
            SourceType::Other(name) => name == "CHAR",
            _ => false,
        }
    }

    /// Character-type family, compared by length in schema diffs
    pub fn is_character(&self) -> bool {
        match self {
            SourceType::Varchar | SourceType::Text => true,
            SourceType::Other(name) => {
                matches!(name.as_str(), "CHAR" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT")
            }
            _ => false,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One column of an introspected relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDescriptor {
    pub name: String,
    pub display_name: String,
    pub source_type: SourceType,
    pub target_type: String,
    pub is_primary_key: bool,
    pub is_auto_generated: bool,
    pub length: Option<u32>,
    pub nullable: bool,
    /// Full catalog type text, e.g. `varchar(100)` or `int unsigned`
    pub column_type: String,
}

impl ColumnDescriptor {
    pub fn from_catalog(
        column: &CatalogColumn,
        type_map: &TypeMap,
        policy: AutoIncrementPolicy,
    ) -> Self {
        let source_type = SourceType::from_data_type(&column.data_type);

        let is_auto_generated = column.primary_key
            && column.auto_increment
            && match policy {
                AutoIncrementPolicy::TypeGuarded => source_type.is_integer_like(),
                AutoIncrementPolicy::TrustCatalog => true,
            };

        let length = if source_type.is_length_bounded() {
            column
                .max_length
                .filter(|len| *len > 0)
                .and_then(|len| u32::try_from(len).ok())
        } else {
            None
        };

        ColumnDescriptor {
            name: column.name.clone(),
            display_name: to_camel_case(&column.name),
            target_type: type_map.map_type(source_type.tag()),
            source_type,
            is_primary_key: column.primary_key,
            is_auto_generated,
            length,
            nullable: column.nullable,
            column_type: column.column_type.clone(),
        }
    }
}

/// One introspected table or view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDescriptor {
    pub raw_name: String,
    pub class_name: String,
    pub is_view: bool,
    pub columns: Vec<ColumnDescriptor>,
}

impl TableDescriptor {
    pub fn new(raw_name: &str, is_view: bool, columns: Vec<ColumnDescriptor>) -> Self {
        TableDescriptor {
            raw_name: raw_name.to_string(),
            class_name: to_class_name(raw_name),
            is_view,
            columns,
        }
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// Target type of the single primary key column, `Integer` otherwise
    pub fn primary_key_type(&self) -> &str {
        let mut keys = self.primary_keys();
        match (keys.next(), keys.next()) {
            (Some(key), None) => &key.target_type,
            _ => "Integer",
        }
    }
}
