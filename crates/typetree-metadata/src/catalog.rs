//! Engine class catalog: built-in class layouts per engine version.
//!
//! A [`ClassPackage`] file bundles several [`ClassDatabase`]s, one per engine
//! release. The database matching the target version is selected once and
//! then serves every lookup of the run.

use crate::provider::ClassCatalog;
use crate::{EngineVersion, FieldTemplate};
use log::{debug, info, trace, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use typetree_error::{Result, TypeTreeError};

/// One built-in engine class.
///
/// An entry may carry an editor layout, a release (player) layout, or both.
/// An entry with neither counts as unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub name: String,
    /// Engine class id, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default)]
    pub release_root: Option<FieldTemplate>,
    #[serde(default)]
    pub editor_root: Option<FieldTemplate>,
}

impl ClassEntry {
    /// Release layout by default, editor layout when `prefer_editor`; each
    /// falls back to the other.
    pub fn root(&self, prefer_editor: bool) -> Option<&FieldTemplate> {
        if prefer_editor {
            self.editor_root.as_ref().or(self.release_root.as_ref())
        } else {
            self.release_root.as_ref().or(self.editor_root.as_ref())
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ClassDatabaseFile {
    version: EngineVersion,
    #[serde(default)]
    classes: Vec<ClassEntry>,
}

/// Class layouts for a single engine version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ClassDatabaseFile", into = "ClassDatabaseFile")]
pub struct ClassDatabase {
    pub version: EngineVersion,
    pub classes: Vec<ClassEntry>,
    class_index: HashMap<String, usize>,
    prefer_editor: bool,
}

impl From<ClassDatabaseFile> for ClassDatabase {
    fn from(file: ClassDatabaseFile) -> Self {
        Self::new(file.version, file.classes)
    }
}

impl From<ClassDatabase> for ClassDatabaseFile {
    fn from(db: ClassDatabase) -> Self {
        Self {
            version: db.version,
            classes: db.classes,
        }
    }
}

impl ClassDatabase {
    pub fn new(version: EngineVersion, classes: Vec<ClassEntry>) -> Self {
        let mut class_index = HashMap::with_capacity(classes.len());
        for (i, entry) in classes.iter().enumerate() {
            if class_index.contains_key(&entry.name) {
                debug!(
                    "Duplicate class '{}' in {} database, keeping the first entry",
                    entry.name, version
                );
                continue;
            }
            class_index.insert(entry.name.clone(), i);
        }

        Self {
            version,
            classes,
            class_index,
            prefer_editor: false,
        }
    }

    /// Serve editor layouts instead of release layouts where both exist
    pub fn with_prefer_editor(mut self, prefer_editor: bool) -> Self {
        self.prefer_editor = prefer_editor;
        self
    }

    pub fn prefer_editor(&self) -> bool {
        self.prefer_editor
    }

    pub fn find_entry(&self, name: &str) -> Option<&ClassEntry> {
        self.class_index
            .get(name)
            .and_then(|&index| self.classes.get(index))
    }

    pub fn len(&self) -> usize {
        self.class_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.class_index.is_empty()
    }
}

impl ClassCatalog for ClassDatabase {
    fn find_class(&self, name: &str) -> Option<FieldTemplate> {
        let entry = self.find_entry(name)?;
        let root = entry.root(self.prefer_editor);
        if root.is_none() {
            trace!("Class '{name}' has no layout in the {} database", self.version);
        }
        root.cloned()
    }
}

// On-disk shape read before versions are validated
#[derive(Deserialize)]
struct PackageFile {
    #[serde(default)]
    databases: Vec<RawDatabase>,
}

#[derive(Deserialize)]
struct RawDatabase {
    version: String,
    #[serde(default)]
    classes: Vec<ClassEntry>,
}

/// A catalog file holding class databases for several engine versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassPackage {
    #[serde(default)]
    pub databases: Vec<ClassDatabase>,
}

impl ClassPackage {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
        let package = Self::from_reader(BufReader::new(file)).map_err(|e| e.with_file_path(path))?;
        debug!(
            "Loaded class package {} with {} databases",
            path.display(),
            package.databases.len()
        );
        Ok(package)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let file: PackageFile = serde_json::from_reader(reader)
            .map_err(|e| TypeTreeError::catalog_invalid_format(e.to_string()))?;

        let databases = file
            .databases
            .into_iter()
            .map(|db| -> Result<ClassDatabase> {
                let version = db.version.parse::<EngineVersion>().map_err(|_| {
                    TypeTreeError::catalog_invalid_version(format!(
                        "class database has invalid version '{}'",
                        db.version
                    ))
                })?;
                Ok(ClassDatabase::new(version, db.classes))
            })
            .collect::<Result<_>>()?;
        Ok(Self { databases })
    }

    /// Pick the database for `version`: the exact release if present, else
    /// the newest one not newer than the target, else the oldest one.
    pub fn database_for(&self, version: &EngineVersion) -> Result<&ClassDatabase> {
        if let Some(db) = self.databases.iter().find(|db| db.version == *version) {
            debug!("Using class database {}", db.version);
            return Ok(db);
        }

        if let Some(db) = self
            .databases
            .iter()
            .filter(|db| db.version <= *version)
            .max_by_key(|db| db.version)
        {
            info!("No class database for {version}, using {}", db.version);
            return Ok(db);
        }

        let oldest = self
            .databases
            .iter()
            .min_by_key(|db| db.version)
            .ok_or_else(|| TypeTreeError::catalog_no_database("class package is empty"))?;
        warn!(
            "Target version {version} predates every class database, using {}",
            oldest.version
        );
        Ok(oldest)
    }
}
