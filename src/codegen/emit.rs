//! Output path derivation and artifact writing.

use super::artifact::ArtifactKind;
use super::fs_utils;
use crate::error::{Result, ScaffoldError};
use crate::schema::TableDescriptor;
use std::path::{Path, PathBuf};

/// Extension of every generated source file
pub const SOURCE_EXTENSION: &str = "java";

/// `output_root/<package dirs>/<subdir>/<ClassName><Suffix>.java`
pub fn artifact_path(
    output_root: &Path,
    package_name: &str,
    kind: ArtifactKind,
    table: &TableDescriptor,
) -> PathBuf {
    let mut path = output_root.to_path_buf();
    path.extend(package_name.split('.').filter(|segment| !segment.is_empty()));
    path.push(kind.subdir());
    path.push(format!("{}.{}", kind.type_name(table), SOURCE_EXTENSION));
    path
}

/// Write rendered source to its derived path, replacing any existing file
pub fn emit(
    source: &str,
    kind: ArtifactKind,
    table: &TableDescriptor,
    output_root: &Path,
    package_name: &str,
) -> Result<PathBuf> {
    let path = artifact_path(output_root, package_name, kind, table);

    fs_utils::write_file(&path, source).map_err(|e| ScaffoldError::io(&path, e))?;

    tracing::info!("Generated {}: {}", kind, path.display());
    Ok(path)
}
