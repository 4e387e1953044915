//! Source type tag to target-language type lookup.
//!
//! The built-in table covers the common MySQL types. Projects extend or
//! override it through the `generator.type_mapping` configuration map.

use indexmap::IndexMap;

/// Target type used for any tag missing from the table
pub const FALLBACK_TYPE: &str = "String";

const BUILTIN_MAPPINGS: &[(&str, &str)] = &[
    ("INTEGER", "Integer"),
    ("BIGINT", "Long"),
    ("VARCHAR", "String"),
    ("TEXT", "String"),
    ("DATE", "DateTime"),
    ("DATETIME", "DateTime"),
    ("DECIMAL", "Decimal"),
];

/// Lookup table from normalized source type tags to target type names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    entries: IndexMap<String, String>,
}

impl Default for TypeMap {
    fn default() -> Self {
        TypeMap {
            entries: BUILTIN_MAPPINGS
                .iter()
                .map(|(tag, target)| (tag.to_string(), target.to_string()))
                .collect(),
        }
    }
}

impl TypeMap {
    /// Empty table; every lookup yields the fallback type
    pub fn empty() -> Self {
        TypeMap {
            entries: IndexMap::new(),
        }
    }

    /// Built-in table extended by `overrides`; keys are matched case-insensitively
    pub fn with_overrides<'a, I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut map = TypeMap::default();
        for (tag, target) in overrides {
            map.insert(tag, target);
        }
        map
    }

    pub fn insert(&mut self, tag: &str, target: &str) {
        self.entries.insert(tag.to_uppercase(), target.to_string());
    }

    /// Map a source type tag to its target type name, falling back to `String`
    pub fn map_type(&self, tag: &str) -> String {
        self.entries
            .get(&tag.to_uppercase())
            .cloned()
            .unwrap_or_else(|| FALLBACK_TYPE.to_string())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
