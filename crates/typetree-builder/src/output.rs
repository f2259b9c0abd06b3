//! On-disk type tree documents: one pretty-printed JSON file per assembly.

use crate::batch::{AssemblyTypeTree, Dataset};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use typetree_error::{Result, TypeTreeError};

/// Document file name for an assembly: `Assembly-CSharp.dll` becomes
/// `Assembly-CSharp.json`.
pub fn document_file_name(assembly: &str) -> String {
    let stem = Path::new(assembly)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| assembly.to_string());
    format!("{stem}.json")
}

/// Write every assembly of `dataset` into `out_dir`, creating it if needed.
///
/// Nothing is written, and the directory is not created, for an empty
/// dataset. Returns the written paths in assembly order.
pub fn write_dataset<P: AsRef<Path>>(dataset: &Dataset, out_dir: P) -> Result<Vec<PathBuf>> {
    let out_dir = out_dir.as_ref();
    if dataset.is_empty() {
        debug!("Empty dataset, nothing to write");
        return Ok(Vec::new());
    }

    fs::create_dir_all(out_dir).map_err(|e| TypeTreeError::from(e).with_file_path(out_dir))?;

    let mut written = Vec::with_capacity(dataset.len());
    for (assembly, trees) in dataset {
        let path = out_dir.join(document_file_name(assembly));
        write_assembly_tree(trees, &path)?;
        debug!("Wrote {} types to {}", trees.len(), path.display());
        written.push(path);
    }

    info!("Wrote {} documents to {}", written.len(), out_dir.display());
    Ok(written)
}

pub fn write_assembly_tree(trees: &AssemblyTypeTree, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, trees)
        .map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
    writer
        .flush()
        .map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
    Ok(())
}

/// Parse a document written by [`write_dataset`]
pub fn read_assembly_tree<P: AsRef<Path>>(path: P) -> Result<AssemblyTypeTree> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| TypeTreeError::from(e).with_file_path(path))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| TypeTreeError::from(e).with_file_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_file_name() {
        assert_eq!(document_file_name("Assembly-CSharp.dll"), "Assembly-CSharp.json");
        assert_eq!(
            document_file_name("UnityEngine.CoreModule.dll"),
            "UnityEngine.CoreModule.json"
        );
        assert_eq!(document_file_name("NoExtension"), "NoExtension.json");
    }

    #[test]
    fn test_empty_dataset_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let written = write_dataset(&Dataset::new(), &out).unwrap();
        assert!(written.is_empty());
        assert!(!out.exists());
    }
}
