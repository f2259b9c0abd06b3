// typetree-metadata/src/lib.rs

//! # typetree-metadata
//!
//! Offline metadata sources for type tree generation.
//!
//! This crate owns the data model shared by the toolkit ([`TypeIdentity`],
//! [`FieldTemplate`], [`EngineVersion`]) and the three lookups the type tree
//! builder is written against:
//!
//! 1. [`InheritanceResolver`]: direct base type of a type
//! 2. [`ClassCatalog`]: built-in engine class layouts by class name
//! 3. [`TemplateGenerator`]: a type's own declared serialized fields
//!
//! File-backed implementations read pre-extracted JSON dumps: a
//! [`ClassPackage`] holds one [`ClassDatabase`] per engine version, and an
//! [`AssemblySet`] holds every loaded assembly dump of a game.

pub mod assembly;
pub mod catalog;
pub mod identity;
pub mod provider;
pub mod template;
pub mod version;

pub use assembly::{AssemblyMetadata, AssemblySet, DeclaredField, TypeMetadata};
pub use catalog::{ClassDatabase, ClassEntry, ClassPackage};
pub use identity::TypeIdentity;
pub use provider::{ClassCatalog, InheritanceResolver, TemplateGenerator};
pub use template::{FieldTemplate, category};
pub use typetree_error::{Result, TypeTreeError};
pub use version::{EngineVersion, ReleaseKind};
