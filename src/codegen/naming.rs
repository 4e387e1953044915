//! Identifier conversion for generated sources.
//!
//! Only underscores delimit words. Empty segments produced by leading,
//! trailing or doubled underscores are dropped before conversion.

use convert_case::{Case, Converter};

fn convert(snake: &str, case: Case) -> String {
    let words: Vec<&str> = snake.split('_').filter(|w| !w.is_empty()).collect();

    Converter::new()
        .from_case(Case::Snake)
        .to_case(case)
        .convert(words.join("_"))
}

/// Convert a snake_case column name to a camelCase field name
pub fn to_camel_case(snake: &str) -> String {
    convert(snake, Case::Camel)
}

/// Convert a snake_case relation name to a PascalCase class name
pub fn to_class_name(snake: &str) -> String {
    convert(snake, Case::Pascal)
}

/// URL path segment for a relation: the raw name with `_` replaced by `-`
pub fn to_path_segment(raw_name: &str) -> String {
    raw_name.replace('_', "-")
}
