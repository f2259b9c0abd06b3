//! # typetree-error - Unified Error Handling
//!
//! Error type shared by every typetree crate:
//! - One enum, [`TypeTreeError`], organised by domain (catalog, assembly,
//!   reflection, output, CLI, configuration)
//! - Contextual information such as the offending file or type name
//! - Short messages for the CLI and detailed ones for debugging
//!
//! Unsupported types are never errors; only collaborator failures and bad
//! input end up here.

pub mod helpers;
pub mod kinds;
pub mod types;

pub use kinds::*;
pub use types::{Result, TypeTreeError};
