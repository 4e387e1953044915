//! Relation discovery and descriptor construction.

use super::{Catalog, ColumnDescriptor, TableDescriptor};
use crate::codegen::type_map::TypeMap;
use crate::error::{Result, ScaffoldError};
use serde::{Deserialize, Serialize};

/// How catalog auto-increment flags are honoured on primary keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoIncrementPolicy {
    /// Honour the flag only on integer-like keys
    #[default]
    TypeGuarded,
    /// Honour the flag on any primary key
    TrustCatalog,
}

/// Builds [`TableDescriptor`]s from a catalog
pub struct Introspector<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    type_map: TypeMap,
    policy: AutoIncrementPolicy,
}

impl<'a, C: Catalog + ?Sized> Introspector<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Introspector {
            catalog,
            type_map: TypeMap::default(),
            policy: AutoIncrementPolicy::default(),
        }
    }

    pub fn with_type_map(mut self, type_map: TypeMap) -> Self {
        self.type_map = type_map;
        self
    }

    pub fn with_policy(mut self, policy: AutoIncrementPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &'a C {
        self.catalog
    }

    /// Tables followed by views, as reported by the catalog
    pub fn list_relations(&self) -> Result<Vec<String>> {
        let mut relations = self.catalog.table_names()?;
        relations.extend(self.catalog.view_names()?);
        Ok(relations)
    }

    pub fn is_view(&self, relation: &str) -> Result<bool> {
        Ok(self.catalog.view_names()?.iter().any(|v| v == relation))
    }

    /// Describe a table or view; fails with `NotFound` if it does not exist
    pub fn describe(&self, relation: &str) -> Result<TableDescriptor> {
        let is_view = self.is_view(relation)?;
        if !is_view && !self.catalog.table_names()?.iter().any(|t| t == relation) {
            return Err(ScaffoldError::NotFound(relation.to_string()));
        }

        let columns = self
            .catalog
            .columns(relation)?
            .iter()
            .map(|column| ColumnDescriptor::from_catalog(column, &self.type_map, self.policy))
            .collect();

        tracing::debug!("Described {} (view: {})", relation, is_view);
        Ok(TableDescriptor::new(relation, is_view, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CatalogColumn, MemoryCatalog, SourceType};

    fn shop_catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with_table(
                "user_account",
                vec![
                    CatalogColumn::new("id", "int").primary_key().auto_increment(),
                    CatalogColumn::new("full_name", "varchar(100)"),
                ],
            )
            .with_table("orders", vec![CatalogColumn::new("order_id", "bigint").primary_key()])
            .with_view(
                "active_users",
                vec![CatalogColumn::new("id", "int"), CatalogColumn::new("keyword", "text")],
                "select id, full_name as keyword from user_account",
            )
    }

    #[test]
    fn test_list_relations_tables_then_views() {
        let catalog = shop_catalog();
        let introspector = Introspector::new(&catalog);
        assert_eq!(
            introspector.list_relations().unwrap(),
            vec!["user_account", "orders", "active_users"]
        );
    }

    #[test]
    fn test_describe_table() {
        let catalog = shop_catalog();
        let table = Introspector::new(&catalog).describe("user_account").unwrap();

        assert_eq!(table.class_name, "UserAccount");
        assert!(!table.is_view);
        assert_eq!(table.columns.len(), 2);

        let id = &table.columns[0];
        assert_eq!(id.source_type, SourceType::Integer);
        assert_eq!(id.target_type, "Integer");
        assert!(id.is_primary_key && id.is_auto_generated);

        let full_name = &table.columns[1];
        assert_eq!(full_name.display_name, "fullName");
        assert_eq!(full_name.length, Some(100));
        assert!(!full_name.is_primary_key);
    }

    #[test]
    fn test_describe_view() {
        let catalog = shop_catalog();
        let introspector = Introspector::new(&catalog);
        assert!(introspector.is_view("active_users").unwrap());
        assert!(!introspector.is_view("orders").unwrap());

        let view = introspector.describe("active_users").unwrap();
        assert!(view.is_view);
        assert_eq!(view.class_name, "ActiveUsers");
    }

    #[test]
    fn test_describe_missing_relation() {
        let catalog = shop_catalog();
        let err = Introspector::new(&catalog).describe("missing").unwrap_err();
        assert!(matches!(err, ScaffoldError::NotFound(ref name) if name == "missing"));
    }

    #[test]
    fn test_auto_generated_implies_primary_key() {
        let catalog = MemoryCatalog::new().with_table(
            "events",
            vec![
                CatalogColumn::new("uuid", "char(36)").primary_key().auto_increment(),
                CatalogColumn::new("seq", "int").auto_increment(),
                CatalogColumn::new("id", "bigint").primary_key().auto_increment(),
            ],
        );

        for policy in [AutoIncrementPolicy::TypeGuarded, AutoIncrementPolicy::TrustCatalog] {
            let table = Introspector::new(&catalog).with_policy(policy).describe("events").unwrap();
            for column in &table.columns {
                assert!(!column.is_auto_generated || column.is_primary_key);
            }
        }
    }
}
