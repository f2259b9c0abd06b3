//! Error kind enums for the different domains
//!
//! Each domain of [`crate::TypeTreeError`] carries one of these kinds for
//! programmatic handling.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Specific kinds of class catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CatalogErrorKind {
    #[error("Catalog package contains no class database")]
    NoDatabase,
    #[error("Invalid catalog format")]
    InvalidFormat,
    #[error("Invalid engine version in catalog")]
    InvalidVersion,
}

/// Specific kinds of assembly metadata errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssemblyErrorKind {
    #[error("Invalid assembly metadata format")]
    InvalidFormat,
    #[error("Assembly loaded twice")]
    DuplicateAssembly,
    #[error("Assembly not loaded")]
    AssemblyNotLoaded,
    #[error("Type reference could not be resolved")]
    UnresolvedType,
    #[error("Circular inheritance detected")]
    CircularInheritance,
}

/// Specific kinds of reflected template errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReflectionErrorKind {
    #[error("Type not found in assembly")]
    TypeNotFound,
}

/// Specific kinds of output errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OutputErrorKind {
    #[error("Serialization failed")]
    SerializationFailed,
    #[error("Malformed JSON document")]
    MalformedJson,
}

/// Specific kinds of CLI errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CliErrorKind {
    #[error("Invalid command arguments")]
    InvalidArguments,
    #[error("Output formatting failed")]
    OutputFormatError,
}

/// Specific kinds of configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConfigErrorKind {
    #[error("Invalid configuration value")]
    InvalidValue,
}
