//! Code generation framework for Spring boilerplate.
//!
//! This module turns introspected [`TableDescriptor`](crate::schema::TableDescriptor)s
//! into Java sources: entity, repository, service and controller.

pub mod artifact;
pub mod emit;
pub mod fs_utils;
pub mod generator;
pub mod naming;
pub mod templates;
pub mod type_map;

// Re-export key types
pub use artifact::{ArtifactKind, ArtifactRequest, GenerationDepth};
pub use emit::{artifact_path, emit};
pub use generator::{ArtifactOutcome, Generator};
pub use naming::{to_camel_case, to_class_name};
pub use templates::render;
pub use type_map::TypeMap;
