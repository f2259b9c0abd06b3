//! # typetree-builder
//!
//! Reconstructs the serialized field layout ("type tree") of game types from
//! offline metadata.
//!
//! For a type, [`TypeTreeBuilder`] walks the inheritance chain from the
//! hierarchy root down, takes the engine class layout of every ancestor the
//! class catalog knows, appends the type's own declared fields and flattens
//! the result into an ordered list of leveled [`TypeTreeNode`]s.
//!
//! Rules of the ancestor walk:
//! - ancestors unknown to the catalog are skipped
//! - `Component` ancestors are skipped
//! - the walk stops at the first `MonoBehaviour` or `ScriptableObject`
//! - a type with no usable ancestor gets an empty tree and is left out of
//!   every document
//!
//! The [`batch`] module runs the builder over every loaded assembly and
//! [`output`] writes one JSON document per assembly.

pub mod batch;
pub mod engine;
pub mod node;
pub mod output;

pub use batch::{
    AssemblyReport, AssemblyTypeTree, Dataset, DatasetReport, FailurePolicy, GeneratorConfig,
    TypeCounts, generate_assembly, generate_dataset,
};
pub use engine::{ChainOptions, TypeTemplateChain, TypeTreeBuilder, flatten};
pub use node::{ALIGN_FLAG, TypeTreeNode};
pub use output::{read_assembly_tree, write_dataset};
pub use typetree_error::{Result, TypeTreeError};
