//! Reflected assembly metadata.
//!
//! Each assembly of a game is described by a JSON dump listing its top-level
//! types, their base-type references and their declared serialized fields.
//! Every dump is loaded into one [`AssemblySet`] before any type is resolved,
//! since base types routinely live in other assemblies.

use crate::provider::{InheritanceResolver, TemplateGenerator};
use crate::{EngineVersion, FieldTemplate, TypeIdentity};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use typetree_error::{Result, TypeTreeError};

/// Compiler-generated module types that never carry serialized data
pub const COMPILER_GENERATED_TYPES: &[&str] = &["<Module>", "<PrivateImplementationDetails>"];

/// A declared field plus the engine versions it is serialized in.
///
/// `since` is inclusive, `until` exclusive; either bound may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredField {
    #[serde(flatten)]
    pub template: FieldTemplate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<EngineVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<EngineVersion>,
}

impl DeclaredField {
    pub fn new(template: FieldTemplate) -> Self {
        Self {
            template,
            since: None,
            until: None,
        }
    }

    pub fn is_serialized_in(&self, version: &EngineVersion) -> bool {
        self.since.is_none_or(|since| *version >= since)
            && self.until.is_none_or(|until| *version < until)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeMetadata {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<TypeIdentity>,
    #[serde(default)]
    pub fields: Vec<DeclaredField>,
}

impl TypeMetadata {
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }

    pub fn is_compiler_generated(&self) -> bool {
        COMPILER_GENERATED_TYPES.contains(&self.name.as_str())
    }
}

/// Contents of one assembly dump file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyMetadata {
    /// Assembly file name, e.g. `Assembly-CSharp.dll`
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeMetadata>,
}

impl AssemblyMetadata {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            TypeTreeError::assembly_invalid_format(e.to_string()).with_file_path(path)
        })
    }
}

#[derive(Debug)]
struct LoadedAssembly {
    metadata: AssemblyMetadata,
    source: Option<PathBuf>,
    type_index: HashMap<(String, String), usize>,
}

impl LoadedAssembly {
    fn new(metadata: AssemblyMetadata, source: Option<PathBuf>) -> Self {
        let mut type_index = HashMap::with_capacity(metadata.types.len());
        for (i, ty) in metadata.types.iter().enumerate() {
            type_index
                .entry((ty.namespace.clone(), ty.name.clone()))
                .or_insert(i);
        }
        Self {
            metadata,
            source,
            type_index,
        }
    }

    fn find(&self, namespace: &str, name: &str) -> Option<&TypeMetadata> {
        self.type_index
            .get(&(namespace.to_string(), name.to_string()))
            .and_then(|&i| self.metadata.types.get(i))
    }
}

/// Every loaded assembly of a game, keyed by assembly file name.
///
/// Populated once, then only read.
#[derive(Debug, Default)]
pub struct AssemblySet {
    assemblies: BTreeMap<String, LoadedAssembly>,
}

impl AssemblySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every `*.json` dump below `dir`, in path order.
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();
        collect_dump_paths(dir, &mut paths)?;
        paths.sort();

        let mut set = Self::new();
        for path in paths {
            let metadata = AssemblyMetadata::load(&path)?;
            debug!(
                "Loaded assembly {} ({} types) from {}",
                metadata.name,
                metadata.types.len(),
                path.display()
            );
            set.insert(metadata, Some(path))?;
        }
        debug!("Loaded {} assemblies from {}", set.len(), dir.display());
        Ok(set)
    }

    pub fn insert(&mut self, metadata: AssemblyMetadata, source: Option<PathBuf>) -> Result<()> {
        if self.assemblies.contains_key(&metadata.name) {
            let mut err = TypeTreeError::assembly(
                format!("assembly '{}' is loaded twice", metadata.name),
                typetree_error::AssemblyErrorKind::DuplicateAssembly,
            );
            if let Some(path) = source {
                err = err.with_file_path(path);
            }
            return Err(err);
        }
        self.assemblies.insert(
            metadata.name.clone(),
            LoadedAssembly::new(metadata, source),
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.assemblies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assemblies.is_empty()
    }

    pub fn assembly_names(&self) -> impl Iterator<Item = &str> {
        self.assemblies.keys().map(String::as_str)
    }

    pub fn source_path(&self, assembly: &str) -> Option<&Path> {
        self.get(assembly).and_then(|a| a.source.as_deref())
    }

    pub fn type_count(&self) -> usize {
        self.assemblies
            .values()
            .map(|a| a.metadata.types.len())
            .sum()
    }

    /// Top-level types of `assembly` in declaration order, compiler-generated
    /// module types excluded.
    pub fn types(&self, assembly: &str) -> Result<Vec<TypeIdentity>> {
        let loaded = self
            .get(assembly)
            .ok_or_else(|| TypeTreeError::assembly_not_loaded(assembly))?;
        Ok(loaded
            .metadata
            .types
            .iter()
            .filter(|ty| !ty.is_compiler_generated())
            .map(|ty| TypeIdentity::new(&loaded.metadata.name, &ty.namespace, &ty.name))
            .collect())
    }

    pub fn find_type(&self, ty: &TypeIdentity) -> Option<&TypeMetadata> {
        self.get(&ty.assembly)?.find(&ty.namespace, &ty.name)
    }

    /// Find a type by full name, in `assembly` only when given, else in the
    /// first assembly (by name) declaring it.
    pub fn find_by_full_name(&self, full_name: &str, assembly: Option<&str>) -> Option<TypeIdentity> {
        let scope: Vec<&LoadedAssembly> = match assembly {
            Some(name) => self.get(name).into_iter().collect(),
            None => self.assemblies.values().collect(),
        };
        scope.into_iter().find_map(|loaded| {
            loaded
                .metadata
                .types
                .iter()
                .find(|ty| ty.full_name() == full_name)
                .map(|ty| TypeIdentity::new(&loaded.metadata.name, &ty.namespace, &ty.name))
        })
    }

    // References may name an assembly with or without its file extension.
    fn get(&self, assembly: &str) -> Option<&LoadedAssembly> {
        self.assemblies
            .get(assembly)
            .or_else(|| self.assemblies.get(&format!("{assembly}.dll")))
    }

    fn with_source(&self, err: TypeTreeError, assembly: &str) -> TypeTreeError {
        match self.source_path(assembly) {
            Some(path) => err.with_file_path(path),
            None => err,
        }
    }
}

impl InheritanceResolver for AssemblySet {
    fn base_type(&self, ty: &TypeIdentity) -> Result<Option<TypeIdentity>> {
        let metadata = self.find_type(ty).ok_or_else(|| {
            self.with_source(
                TypeTreeError::assembly_unresolved_type(ty.full_name()),
                &ty.assembly,
            )
        })?;

        let Some(base) = &metadata.base else {
            return Ok(None);
        };

        if self.get(&base.assembly).is_none() {
            return Err(self.with_source(
                TypeTreeError::assembly_not_loaded(&base.assembly).with_type_name(ty.full_name()),
                &ty.assembly,
            ));
        }
        if self.find_type(base).is_none() {
            return Err(self.with_source(
                TypeTreeError::assembly_unresolved_type(base.to_string())
                    .with_type_name(ty.full_name()),
                &ty.assembly,
            ));
        }

        trace!("{ty} derives from {base}");
        Ok(Some(base.clone()))
    }
}

impl TemplateGenerator for AssemblySet {
    fn declared_templates(
        &self,
        ty: &TypeIdentity,
        version: &EngineVersion,
    ) -> Result<Vec<FieldTemplate>> {
        let metadata = self.find_type(ty).ok_or_else(|| {
            self.with_source(
                TypeTreeError::reflection_type_not_found(ty.full_name())
                    .with_type_name(ty.full_name()),
                &ty.assembly,
            )
        })?;

        Ok(metadata
            .fields
            .iter()
            .filter(|field| field.is_serialized_in(version))
            .map(|field| field.template.clone())
            .collect())
    }
}

fn collect_dump_paths(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| TypeTreeError::from(e).with_file_path(dir))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            collect_dump_paths(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn version(s: &str) -> EngineVersion {
        s.parse().unwrap()
    }

    #[test]
    fn test_field_version_window() {
        let mut field = DeclaredField::new(FieldTemplate::new("int", "m_Value"));
        assert!(field.is_serialized_in(&version("5.6.0f1")));

        field.since = Some(version("2019.3.0f1"));
        field.until = Some(version("2022.1.0f1"));
        assert!(!field.is_serialized_in(&version("2018.4.36f1")));
        assert!(field.is_serialized_in(&version("2019.3.0f1")));
        assert!(field.is_serialized_in(&version("2021.3.21f1")));
        assert!(!field.is_serialized_in(&version("2022.1.0f1")));
    }

    #[test]
    fn test_declared_field_json_is_flat() {
        let json = r#"{ "type": "string", "name": "m_Label", "aligned": true, "since": "2020.1" }"#;
        let field: DeclaredField = serde_json::from_str(json).unwrap();
        assert_eq!(field.template.name, "m_Label");
        assert!(field.template.is_aligned);
        assert_eq!(field.since, Some(version("2020.1.0f0")));
        assert_eq!(field.until, None);
    }

    #[test]
    fn test_types_skip_compiler_generated() {
        let mut set = AssemblySet::new();
        set.insert(
            AssemblyMetadata {
                name: "Game.dll".into(),
                types: ["<Module>", "Player", "<PrivateImplementationDetails>", "Enemy"]
                    .into_iter()
                    .map(|name| TypeMetadata {
                        namespace: String::new(),
                        name: name.into(),
                        base: None,
                        fields: Vec::new(),
                    })
                    .collect(),
            },
            None,
        )
        .unwrap();

        let names: Vec<_> = set
            .types("Game.dll")
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["Player", "Enemy"]);
        assert!(set.types("Missing.dll").unwrap_err().is_assembly());
    }

    #[test]
    fn test_assembly_lookup_accepts_missing_extension() {
        let mut set = AssemblySet::new();
        set.insert(
            AssemblyMetadata {
                name: "UnityEngine.CoreModule.dll".into(),
                types: vec![TypeMetadata {
                    namespace: "UnityEngine".into(),
                    name: "Object".into(),
                    base: None,
                    fields: Vec::new(),
                }],
            },
            None,
        )
        .unwrap();

        let reference = TypeIdentity::new("UnityEngine.CoreModule", "UnityEngine", "Object");
        assert!(set.find_type(&reference).is_some());

        let found = set.find_by_full_name("UnityEngine.Object", None).unwrap();
        assert_eq!(found.assembly, "UnityEngine.CoreModule.dll");
        assert!(set.find_by_full_name("UnityEngine.Object", Some("UnityEngine.CoreModule")).is_some());
        assert!(set.find_by_full_name("UnityEngine.Object", Some("Other.dll")).is_none());
        assert!(set.find_by_full_name("Object", None).is_none());
    }

    #[test]
    fn test_duplicate_assembly_rejected() {
        let metadata = AssemblyMetadata {
            name: "Game.dll".into(),
            types: Vec::new(),
        };
        let mut set = AssemblySet::new();
        set.insert(metadata.clone(), None).unwrap();
        let err = set.insert(metadata, Some("dup.json".into())).unwrap_err();
        assert!(err.is_assembly());
        assert_eq!(err.file_path(), Some(&PathBuf::from("dup.json")));
    }
}
