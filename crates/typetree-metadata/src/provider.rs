//! Lookups the type tree builder is written against.
//!
//! All three are read-only after construction and `Send + Sync`, so one
//! builder can serve every type of every assembly, in parallel if wanted.

use crate::{EngineVersion, FieldTemplate, TypeIdentity};
use typetree_error::Result;

/// Resolves the direct base type of a compiled type.
pub trait InheritanceResolver: Send + Sync {
    /// `Ok(None)` when the type has no base (the hierarchy root).
    fn base_type(&self, ty: &TypeIdentity) -> Result<Option<TypeIdentity>>;
}

/// Built-in engine class layouts, keyed by simple class name.
pub trait ClassCatalog: Send + Sync {
    /// The root template of the class; its `category` is the class category
    /// (`Component`, `MonoBehaviour`, `ScriptableObject`, ...).
    fn find_class(&self, name: &str) -> Option<FieldTemplate>;
}

/// Templates for a type's own declared serialized members, ancestors excluded.
pub trait TemplateGenerator: Send + Sync {
    fn declared_templates(
        &self,
        ty: &TypeIdentity,
        version: &EngineVersion,
    ) -> Result<Vec<FieldTemplate>>;
}

impl<T: InheritanceResolver + ?Sized> InheritanceResolver for &T {
    fn base_type(&self, ty: &TypeIdentity) -> Result<Option<TypeIdentity>> {
        (**self).base_type(ty)
    }
}

impl<T: ClassCatalog + ?Sized> ClassCatalog for &T {
    fn find_class(&self, name: &str) -> Option<FieldTemplate> {
        (**self).find_class(name)
    }
}

impl<T: TemplateGenerator + ?Sized> TemplateGenerator for &T {
    fn declared_templates(
        &self,
        ty: &TypeIdentity,
        version: &EngineVersion,
    ) -> Result<Vec<FieldTemplate>> {
        (**self).declared_templates(ty, version)
    }
}
