//! Artifact kinds and generation depth.

use crate::schema::TableDescriptor;
use std::fmt;

/// Kind of generated source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    Entity,
    Repository,
    Service,
    Controller,
}

impl ArtifactKind {
    /// All kinds, in generation order
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Entity,
        ArtifactKind::Repository,
        ArtifactKind::Service,
        ArtifactKind::Controller,
    ];

    /// Package sub-directory holding this kind
    pub fn subdir(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "entity",
            ArtifactKind::Repository => "repository",
            ArtifactKind::Service => "service",
            ArtifactKind::Controller => "controller",
        }
    }

    /// Suffix appended to the class name
    pub fn suffix(&self) -> &'static str {
        match self {
            ArtifactKind::Entity => "",
            ArtifactKind::Repository => "Repository",
            ArtifactKind::Service => "Service",
            ArtifactKind::Controller => "Controller",
        }
    }

    pub fn type_name(&self, table: &TableDescriptor) -> String {
        format!("{}{}", table.class_name, self.suffix())
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subdir())
    }
}

/// One render + write operation
#[derive(Debug, Clone, Copy)]
pub struct ArtifactRequest<'a> {
    pub table: &'a TableDescriptor,
    pub kind: ArtifactKind,
}

/// How many layers to generate for a relation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GenerationDepth {
    EntityOnly,
    #[default]
    WithRepository,
    WithService,
    FullStack,
}

impl GenerationDepth {
    pub const ALL: [GenerationDepth; 4] = [
        GenerationDepth::EntityOnly,
        GenerationDepth::WithRepository,
        GenerationDepth::WithService,
        GenerationDepth::FullStack,
    ];

    pub fn kinds(&self) -> &'static [ArtifactKind] {
        const KINDS: &[ArtifactKind] = &ArtifactKind::ALL;
        let count = match self {
            GenerationDepth::EntityOnly => 1,
            GenerationDepth::WithRepository => 2,
            GenerationDepth::WithService => 3,
            GenerationDepth::FullStack => 4,
        };
        &KINDS[..count]
    }

    pub fn label(&self) -> &'static str {
        match self {
            GenerationDepth::EntityOnly => "Entity only",
            GenerationDepth::WithRepository => "Entity + Repository",
            GenerationDepth::WithService => "Entity + Repository + Service",
            GenerationDepth::FullStack => "Entity + Repository + Service + Controller",
        }
    }
}
