//! Error type shared by the generator and the operator tools.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for introspection, rendering, emission and database operations
#[derive(Debug)]
pub enum ScaffoldError {
    /// Relation absent from the catalog at introspection time
    NotFound(String),
    /// File write failure
    Io { path: PathBuf, source: io::Error },
    /// Database unreachable or statement rejected
    Connectivity(String),
    /// Missing or malformed configuration
    Config(String),
    /// Malformed operator input (non-numeric or out-of-range selection)
    Selection(String),
    /// Formatting failure while rendering an artifact
    Render(fmt::Error),
}

impl ScaffoldError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ScaffoldError::Io {
            path: path.into(),
            source,
        }
    }
}

// io::Error is not Clone; the copy keeps its kind and message
impl Clone for ScaffoldError {
    fn clone(&self) -> Self {
        match self {
            ScaffoldError::NotFound(name) => ScaffoldError::NotFound(name.clone()),
            ScaffoldError::Io { path, source } => ScaffoldError::Io {
                path: path.clone(),
                source: io::Error::new(source.kind(), source.to_string()),
            },
            ScaffoldError::Connectivity(msg) => ScaffoldError::Connectivity(msg.clone()),
            ScaffoldError::Config(msg) => ScaffoldError::Config(msg.clone()),
            ScaffoldError::Selection(msg) => ScaffoldError::Selection(msg.clone()),
            ScaffoldError::Render(e) => ScaffoldError::Render(*e),
        }
    }
}

impl fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaffoldError::NotFound(name) => write!(f, "Relation not found: {}", name),
            ScaffoldError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            ScaffoldError::Connectivity(msg) => write!(f, "Database error: {}", msg),
            ScaffoldError::Config(msg) => write!(f, "Configuration error: {}", msg),
            ScaffoldError::Selection(msg) => write!(f, "Invalid selection: {}", msg),
            ScaffoldError::Render(e) => write!(f, "Render error: {}", e),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::Io { source, .. } => Some(source),
            ScaffoldError::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fmt::Error> for ScaffoldError {
    fn from(e: fmt::Error) -> Self {
        ScaffoldError::Render(e)
    }
}

#[cfg(feature = "mysql")]
impl From<diesel::result::Error> for ScaffoldError {
    fn from(e: diesel::result::Error) -> Self {
        ScaffoldError::Connectivity(e.to_string())
    }
}

#[cfg(feature = "mysql")]
impl From<diesel::r2d2::PoolError> for ScaffoldError {
    fn from(e: diesel::r2d2::PoolError) -> Self {
        ScaffoldError::Connectivity(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;
