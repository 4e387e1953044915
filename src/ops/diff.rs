//! Schema comparison between two databases.
//!
//! The report lists tables, per-table columns, views and stored procedures
//! present on only one side, plus column type and definition differences for
//! objects present on both. Name sets are sorted so reruns produce the same
//! report.

use crate::codegen::fs_utils;
use crate::error::{Result, ScaffoldError};
use crate::schema::{Catalog, CatalogColumn, SourceType};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Default report file name
pub const DEFAULT_REPORT_PATH: &str = "db_comparison_log.txt";

/// Plain-text comparison report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffReport {
    lines: Vec<String>,
}

impl DiffReport {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs_utils::write_file(path, self.to_text()).map_err(|e| ScaffoldError::io(path, e))
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    fn section(&mut self, title: &str) {
        if !self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.lines.push(title.to_string());
    }

    fn only_in(&mut self, label: &str, side: &str, names: &BTreeSet<&str>) {
        if !names.is_empty() {
            self.push(format!("  {} only in {}: {}", label, side, format_set(names)));
        }
    }
}

fn format_set(names: &BTreeSet<&str>) -> String {
    let joined: Vec<&str> = names.iter().copied().collect();
    format!("{{{}}}", joined.join(", "))
}

/// Type text used to decide whether two columns differ
pub fn normalize_type(column: &CatalogColumn) -> String {
    let source_type = SourceType::from_data_type(&column.data_type);

    if source_type.is_integer_like() {
        "INTEGER".to_string()
    } else if source_type.is_character() {
        match column.max_length {
            Some(len) => format!("VARCHAR({})", len),
            None => "VARCHAR".to_string(),
        }
    } else {
        column.column_type.to_uppercase()
    }
}

/// Names present on each side: (only in first, only in second, in both)
fn partition<'n>(
    first: &'n [String],
    second: &'n [String],
) -> (BTreeSet<&'n str>, BTreeSet<&'n str>, BTreeSet<&'n str>) {
    let a: BTreeSet<&str> = first.iter().map(String::as_str).collect();
    let b: BTreeSet<&str> = second.iter().map(String::as_str).collect();

    (
        a.difference(&b).copied().collect(),
        b.difference(&a).copied().collect(),
        a.intersection(&b).copied().collect(),
    )
}

/// Compare the catalogs of two databases
pub fn compare<A, B>(db1: &A, db2: &B) -> Result<DiffReport>
where
    A: Catalog + ?Sized,
    B: Catalog + ?Sized,
{
    let mut report = DiffReport::default();

    let (tables1, tables2) = (db1.table_names()?, db2.table_names()?);
    let (only1, only2, shared) = partition(&tables1, &tables2);

    report.section("Comparing tables:");
    report.only_in("Tables", "DB1", &only1);
    report.only_in("Tables", "DB2", &only2);

    for table in shared {
        compare_table(db1, db2, table, &mut report)?;
    }

    let (views1, views2) = (db1.view_names()?, db2.view_names()?);
    let (only1, only2, shared) = partition(&views1, &views2);

    report.section("Comparing views:");
    report.only_in("Views", "DB1", &only1);
    report.only_in("Views", "DB2", &only2);
    for view in shared {
        if db1.view_definition(view)? != db2.view_definition(view)? {
            report.push(format!("  Difference in view definition for '{}'.", view));
        }
    }

    let (procs1, procs2) = (db1.procedure_names()?, db2.procedure_names()?);
    let (only1, only2, shared) = partition(&procs1, &procs2);

    report.section("Comparing stored procedures:");
    report.only_in("Stored procedures", "DB1", &only1);
    report.only_in("Stored procedures", "DB2", &only2);
    for procedure in shared {
        if db1.procedure_definition(procedure)? != db2.procedure_definition(procedure)? {
            report.push(format!(
                "  Difference in stored procedure definition for '{}'.",
                procedure
            ));
        }
    }

    Ok(report)
}

fn compare_table<A, B>(db1: &A, db2: &B, table: &str, report: &mut DiffReport) -> Result<()>
where
    A: Catalog + ?Sized,
    B: Catalog + ?Sized,
{
    let columns1: BTreeMap<String, CatalogColumn> = db1
        .columns(table)?
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();
    let columns2: BTreeMap<String, CatalogColumn> = db2
        .columns(table)?
        .into_iter()
        .map(|c| (c.name.clone(), c))
        .collect();

    report.section(&format!("Comparing table: {}", table));

    let only1: BTreeSet<&str> = columns1
        .keys()
        .filter(|name| !columns2.contains_key(*name))
        .map(String::as_str)
        .collect();
    let only2: BTreeSet<&str> = columns2
        .keys()
        .filter(|name| !columns1.contains_key(*name))
        .map(String::as_str)
        .collect();

    report.only_in("Columns", "DB1", &only1);
    report.only_in("Columns", "DB2", &only2);

    for (name, column1) in &columns1 {
        if let Some(column2) = columns2.get(name) {
            let (type1, type2) = (normalize_type(column1), normalize_type(column2));
            if type1 != type2 {
                report.push(format!(
                    "  Column type difference in '{}': DB1 ({}) vs DB2 ({})",
                    name, type1, type2
                ));
            }
        }
    }

    Ok(())
}
