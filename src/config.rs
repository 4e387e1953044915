//! Configuration schema for dbscaffold.yaml
//!
//! Connection URLs may also come from the environment (`DATABASE_URL`,
//! `DB1_URL`, `DB2_URL`), which takes precedence over the file.

use crate::codegen::TypeMap;
use crate::error::{Result, ScaffoldError};
use crate::ops::diff::DEFAULT_REPORT_PATH;
use crate::ops::transfer::DEFAULT_BATCH_SIZE;
use crate::schema::AutoIncrementPolicy;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "dbscaffold.yaml";

/// Java sources root inside the project folder
const JAVA_SOURCE_ROOT: &str = "src/main/java";

/// Top-level configuration from dbscaffold.yaml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScaffoldConfig {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub compare: CompareSection,
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub transfer: TransferSection,
}

/// Database used by the code generator
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DatabaseSection {
    #[serde(default)]
    pub url: Option<String>,
}

/// Source (DB1) and target (DB2) databases for diff and transfer
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompareSection {
    #[serde(default)]
    pub db1_url: Option<String>,
    #[serde(default)]
    pub db2_url: Option<String>,
    #[serde(default = "default_report_path")]
    pub report_path: String,
}

impl Default for CompareSection {
    fn default() -> Self {
        CompareSection {
            db1_url: None,
            db2_url: None,
            report_path: default_report_path(),
        }
    }
}

/// Code generation options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorSection {
    #[serde(default = "default_project_folder")]
    pub project_folder: String,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub auto_increment: AutoIncrementPolicy,
    /// Extra or replacement entries for the source type table
    #[serde(default)]
    pub type_mapping: IndexMap<String, String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        GeneratorSection {
            project_folder: default_project_folder(),
            package_name: None,
            auto_increment: AutoIncrementPolicy::default(),
            type_mapping: IndexMap::new(),
        }
    }
}

/// Table transfer options
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TransferSection {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for TransferSection {
    fn default() -> Self {
        TransferSection {
            batch_size: default_batch_size(),
        }
    }
}

fn default_report_path() -> String {
    DEFAULT_REPORT_PATH.to_string()
}

fn default_project_folder() -> String {
    ".".to_string()
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

impl ScaffoldConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScaffoldError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

        Self::from_yaml(&contents)
            .map_err(|e| ScaffoldError::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_yaml(contents: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }

    /// Load `path` if it exists (defaults otherwise), then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            tracing::info!("No configuration file at {}, using defaults", path.display());
            Self::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Replace connection URLs with values from `lookup` (normally the environment)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url);
        }
        if let Some(url) = lookup("DB1_URL") {
            self.compare.db1_url = Some(url);
        }
        if let Some(url) = lookup("DB2_URL") {
            self.compare.db2_url = Some(url);
        }
    }

    pub fn database_url(&self) -> Result<&str> {
        self.database
            .url
            .as_deref()
            .ok_or_else(|| missing("database.url", "DATABASE_URL"))
    }

    /// Source database; falls back to `database.url`
    pub fn db1_url(&self) -> Result<&str> {
        self.compare
            .db1_url
            .as_deref()
            .or(self.database.url.as_deref())
            .ok_or_else(|| missing("compare.db1_url", "DB1_URL"))
    }

    pub fn db2_url(&self) -> Result<&str> {
        self.compare
            .db2_url
            .as_deref()
            .ok_or_else(|| missing("compare.db2_url", "DB2_URL"))
    }

    pub fn package_name(&self) -> Result<&str> {
        match self.generator.package_name.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(ScaffoldError::Config(
                "generator.package_name is not set".to_string(),
            )),
        }
    }

    /// Root under which package directories are created
    pub fn output_root(&self) -> PathBuf {
        Path::new(&self.generator.project_folder).join(JAVA_SOURCE_ROOT)
    }

    pub fn type_map(&self) -> TypeMap {
        TypeMap::with_overrides(&self.generator.type_mapping)
    }
}

fn missing(key: &str, env: &str) -> ScaffoldError {
    ScaffoldError::Config(format!("{} is not set (config file or {})", key, env))
}
