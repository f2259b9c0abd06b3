//! In-memory lookups shared by the integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use typetree_builder::TypeTreeBuilder;
use typetree_error::{Result, TypeTreeError};
use typetree_metadata::{
    ClassCatalog, EngineVersion, FieldTemplate, InheritanceResolver, TemplateGenerator,
    TypeIdentity,
};

pub const TEST_ASSEMBLY: &str = "Test.dll";

pub fn ty(name: &str) -> TypeIdentity {
    TypeIdentity::new(TEST_ASSEMBLY, "", name)
}

pub fn version() -> EngineVersion {
    "2021.3.21f1".parse().unwrap()
}

/// Base-type table keyed by simple name
#[derive(Default)]
pub struct Hierarchy {
    bases: HashMap<TypeIdentity, TypeIdentity>,
}

impl Hierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn derive(mut self, child: &str, base: &str) -> Self {
        self.bases.insert(ty(child), ty(base));
        self
    }

    /// `names[0]` is the root, every later name derives from the previous one
    pub fn linear(names: &[&str]) -> Self {
        names
            .windows(2)
            .fold(Self::new(), |h, pair| h.derive(pair[1], pair[0]))
    }
}

impl InheritanceResolver for Hierarchy {
    fn base_type(&self, ty: &TypeIdentity) -> Result<Option<TypeIdentity>> {
        if ty.name == "Broken" {
            return Err(TypeTreeError::assembly_unresolved_type("Missing.Base"));
        }
        Ok(self.bases.get(ty).cloned())
    }
}

/// Class catalog remembering every queried name
#[derive(Default)]
pub struct RecordingCatalog {
    classes: HashMap<String, FieldTemplate>,
    queries: Mutex<Vec<String>>,
}

impl RecordingCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, template: FieldTemplate) -> Self {
        self.classes.insert(template.category.clone(), template);
        self
    }

    /// Register `template` under a class name other than its category
    pub fn with_named_class(mut self, name: &str, template: FieldTemplate) -> Self {
        self.classes.insert(name.to_string(), template);
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

impl ClassCatalog for RecordingCatalog {
    fn find_class(&self, name: &str) -> Option<FieldTemplate> {
        self.queries.lock().unwrap().push(name.to_string());
        self.classes.get(name).cloned()
    }
}

/// Declared fields per type; unknown types declare nothing
#[derive(Default)]
pub struct Declarations {
    fields: HashMap<TypeIdentity, Vec<FieldTemplate>>,
    calls: Mutex<Vec<String>>,
}

impl Declarations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(mut self, name: &str, fields: Vec<FieldTemplate>) -> Self {
        self.fields.insert(ty(name), fields);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl TemplateGenerator for Declarations {
    fn declared_templates(
        &self,
        ty: &TypeIdentity,
        _version: &EngineVersion,
    ) -> Result<Vec<FieldTemplate>> {
        self.calls.lock().unwrap().push(ty.name.clone());
        if ty.name == "Unreflectable" {
            return Err(TypeTreeError::reflection_type_not_found(ty.full_name())
                .with_type_name(ty.full_name()));
        }
        Ok(self.fields.get(ty).cloned().unwrap_or_default())
    }
}

pub fn pptr(target: &str, name: &str) -> FieldTemplate {
    FieldTemplate::new(format!("PPtr<{target}>"), name).with_children([
        FieldTemplate::new("int", "m_FileID"),
        FieldTemplate::new("SInt64", "m_PathID"),
    ])
}

pub fn string_field(name: &str) -> FieldTemplate {
    FieldTemplate::new("string", name).with_child(
        FieldTemplate::new("Array", "Array")
            .aligned()
            .with_children([
                FieldTemplate::new("int", "size"),
                FieldTemplate::new("char", "data"),
            ]),
    )
}

pub fn object_template() -> FieldTemplate {
    FieldTemplate::new("Object", "Base")
}

pub fn component_template() -> FieldTemplate {
    FieldTemplate::new("Component", "Base").with_child(pptr("GameObject", "m_GameObject"))
}

pub fn mono_behaviour_template() -> FieldTemplate {
    FieldTemplate::new("MonoBehaviour", "Base").with_children([
        pptr("GameObject", "m_GameObject"),
        FieldTemplate::new("UInt8", "m_Enabled").aligned(),
        pptr("MonoScript", "m_Script"),
        string_field("m_Name"),
    ])
}

pub fn scriptable_object_template() -> FieldTemplate {
    FieldTemplate::new("ScriptableObject", "Base").with_children([
        pptr("MonoScript", "m_Script"),
        string_field("m_Name"),
    ])
}

/// Catalog of a typical engine release; `Object` is unknown
pub fn engine_catalog() -> RecordingCatalog {
    RecordingCatalog::new()
        .with_named_class("Component", component_template())
        .with_named_class("Behaviour", component_template())
        .with_class(mono_behaviour_template())
        .with_class(scriptable_object_template())
}

pub fn builder<'a>(
    hierarchy: &'a Hierarchy,
    catalog: &'a RecordingCatalog,
    declarations: &'a Declarations,
) -> TypeTreeBuilder<&'a Hierarchy, &'a RecordingCatalog, &'a Declarations> {
    TypeTreeBuilder::new(hierarchy, catalog, declarations, version())
}
