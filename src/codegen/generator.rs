//! Generation run for one relation: introspect once, then render and emit
//! each requested artifact.

use super::artifact::{ArtifactKind, ArtifactRequest};
use super::emit::emit;
use super::templates::render;
use crate::error::{Result, ScaffoldError};
use crate::schema::{Catalog, Introspector, TableDescriptor};
use std::path::{Path, PathBuf};

/// Result of one render + write operation
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub kind: ArtifactKind,
    pub result: Result<PathBuf>,
}

impl ArtifactOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

impl<'a> ArtifactRequest<'a> {
    /// Render and write this artifact under `output_root`
    pub fn run(&self, output_root: &Path, package_name: &str) -> Result<PathBuf> {
        let source = render(self.kind, self.table, package_name).map_err(ScaffoldError::from)?;
        emit(&source, self.kind, self.table, output_root, package_name)
    }
}

/// Code generator bound to one catalog, package and output root
pub struct Generator<'a, C: Catalog + ?Sized> {
    introspector: Introspector<'a, C>,
    package_name: String,
    output_root: PathBuf,
}

impl<'a, C: Catalog + ?Sized> Generator<'a, C> {
    pub fn new(introspector: Introspector<'a, C>, package_name: &str, output_root: impl Into<PathBuf>) -> Self {
        Generator {
            introspector,
            package_name: package_name.to_string(),
            output_root: output_root.into(),
        }
    }

    pub fn introspector(&self) -> &Introspector<'a, C> {
        &self.introspector
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Describe `relation` and generate the requested artifacts.
    ///
    /// Fails only when the relation cannot be described; individual artifact
    /// failures are reported in the returned outcomes.
    pub fn generate(&self, relation: &str, kinds: &[ArtifactKind]) -> Result<Vec<ArtifactOutcome>> {
        let table = self.introspector.describe(relation)?;
        Ok(self.generate_table(&table, kinds))
    }

    pub fn generate_table(&self, table: &TableDescriptor, kinds: &[ArtifactKind]) -> Vec<ArtifactOutcome> {
        kinds
            .iter()
            .map(|&kind| {
                let request = ArtifactRequest { table, kind };
                let result = request.run(&self.output_root, &self.package_name);
                if let Err(ref e) = result {
                    tracing::warn!("Failed to generate {} for {}: {}", kind, table.raw_name, e);
                }
                ArtifactOutcome { kind, result }
            })
            .collect()
    }
}
