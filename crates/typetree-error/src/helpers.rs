//! Helper functions for creating standardized errors
//!
//! Constructors, context builders and message formatting for
//! [`TypeTreeError`], so every crate reports failures the same way.

use crate::kinds::*;
use crate::types::TypeTreeError;
use std::path::PathBuf;

impl TypeTreeError {
    /// Create a new catalog error
    pub fn catalog<M: Into<String>>(message: M, kind: CatalogErrorKind) -> Self {
        Self::Catalog {
            message: message.into(),
            file_path: None,
            kind,
        }
    }

    /// Create a new assembly error
    pub fn assembly<M: Into<String>>(message: M, kind: AssemblyErrorKind) -> Self {
        Self::Assembly {
            message: message.into(),
            file_path: None,
            type_name: None,
            kind,
        }
    }

    /// Create a new reflection error
    pub fn reflection<M: Into<String>>(message: M, kind: ReflectionErrorKind) -> Self {
        Self::Reflection {
            message: message.into(),
            file_path: None,
            type_name: None,
            kind,
        }
    }

    /// Create a new output error
    pub fn output<M: Into<String>>(message: M, kind: OutputErrorKind) -> Self {
        Self::Output {
            message: message.into(),
            file_path: None,
            kind,
        }
    }

    /// Create a new CLI error
    pub fn cli<M: Into<String>>(message: M, kind: CliErrorKind) -> Self {
        Self::Cli {
            message: message.into(),
            command: None,
            kind,
        }
    }

    /// Create a new configuration error
    pub fn config<M: Into<String>>(message: M, kind: ConfigErrorKind) -> Self {
        Self::Config {
            message: message.into(),
            kind,
        }
    }

    /// Add file path context to an existing error
    pub fn with_file_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        let path = path.into();
        match &mut self {
            Self::Io { file_path, .. } => *file_path = Some(path),
            Self::Catalog { file_path, .. } => *file_path = Some(path),
            Self::Assembly { file_path, .. } => *file_path = Some(path),
            Self::Reflection { file_path, .. } => *file_path = Some(path),
            Self::Output { file_path, .. } => *file_path = Some(path),
            _ => {}
        }
        self
    }

    /// Add the fully qualified name of the type being processed
    pub fn with_type_name<N: Into<String>>(mut self, name: N) -> Self {
        match &mut self {
            Self::Assembly { type_name, .. } => *type_name = Some(name.into()),
            Self::Reflection { type_name, .. } => *type_name = Some(name.into()),
            _ => {}
        }
        self
    }

    /// Add the command name to CLI errors
    pub fn with_command<C: Into<String>>(mut self, name: C) -> Self {
        if let Self::Cli { command, .. } = &mut self {
            *command = Some(name.into());
        }
        self
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_catalog(&self) -> bool {
        matches!(self, Self::Catalog { .. })
    }

    pub fn is_assembly(&self) -> bool {
        matches!(self, Self::Assembly { .. })
    }

    pub fn is_reflection(&self) -> bool {
        matches!(self, Self::Reflection { .. })
    }

    /// Get the file path associated with this error, if any
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { file_path, .. } => file_path.as_ref(),
            Self::Catalog { file_path, .. } => file_path.as_ref(),
            Self::Assembly { file_path, .. } => file_path.as_ref(),
            Self::Reflection { file_path, .. } => file_path.as_ref(),
            Self::Output { file_path, .. } => file_path.as_ref(),
            _ => None,
        }
    }

    /// Get the type name associated with this error, if any
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::Assembly { type_name, .. } => type_name.as_deref(),
            Self::Reflection { type_name, .. } => type_name.as_deref(),
            _ => None,
        }
    }

    /// Get a user-friendly error message suitable for CLI display
    pub fn user_message(&self) -> String {
        match self {
            Self::Io {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("File error in '{}': {}", path.display(), message)
                } else {
                    message.clone()
                }
            }
            Self::Catalog {
                message, file_path, ..
            } => {
                let mut msg = format!("Class catalog error: {message}");
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                msg
            }
            Self::Assembly {
                message,
                file_path,
                type_name,
                ..
            } => {
                let mut msg = format!("Assembly error: {message}");
                if let Some(name) = type_name {
                    msg.push_str(&format!(" (type: {name})"));
                }
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                msg
            }
            Self::Reflection {
                message,
                file_path,
                type_name,
                ..
            } => {
                let mut msg = format!("Reflection failed: {message}");
                if let Some(name) = type_name {
                    msg.push_str(&format!(" (type: {name})"));
                }
                if let Some(path) = file_path {
                    msg.push_str(&format!(" (file: {})", path.display()));
                }
                msg
            }
            Self::Output {
                message, file_path, ..
            } => {
                if let Some(path) = file_path {
                    format!("Output error in '{}': {}", path.display(), message)
                } else {
                    format!("Output error: {message}")
                }
            }
            Self::Cli {
                message, command, ..
            } => {
                if let Some(cmd) = command {
                    format!("Command '{cmd}' failed: {message}")
                } else {
                    format!("CLI error: {message}")
                }
            }
            Self::Config { message, .. } => format!("Configuration error: {message}"),
        }
    }

    /// Get a detailed error message with full context for debugging
    pub fn debug_message(&self) -> String {
        let mut msg = self.user_message();

        match self {
            Self::Io {
                source_message: Some(source),
                ..
            } => msg.push_str(&format!(" [Source: {source}]")),
            Self::Catalog { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Assembly { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Reflection { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Output { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Cli { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            Self::Config { kind, .. } => msg.push_str(&format!(" [Kind: {kind}]")),
            _ => {}
        }

        msg
    }

    /// Get a short error summary without context details
    pub fn summary(&self) -> String {
        match self {
            Self::Io { message, .. } => format!("I/O: {message}"),
            Self::Catalog { kind, .. } => format!("Catalog: {kind}"),
            Self::Assembly { kind, .. } => format!("Assembly: {kind}"),
            Self::Reflection { kind, .. } => format!("Reflection: {kind}"),
            Self::Output { kind, .. } => format!("Output: {kind}"),
            Self::Cli { kind, .. } => format!("CLI: {kind}"),
            Self::Config { kind, .. } => format!("Config: {kind}"),
        }
    }
}

/// Domain helpers used across the crates for consistent messages.
impl TypeTreeError {
    // === Catalog ===

    pub fn catalog_no_database<M: Into<String>>(message: M) -> Self {
        Self::catalog(message, CatalogErrorKind::NoDatabase)
    }

    pub fn catalog_invalid_format<M: Into<String>>(message: M) -> Self {
        Self::catalog(message, CatalogErrorKind::InvalidFormat)
    }

    pub fn catalog_invalid_version<M: Into<String>>(message: M) -> Self {
        Self::catalog(message, CatalogErrorKind::InvalidVersion)
    }

    // === Assembly ===

    pub fn assembly_invalid_format<M: Into<String>>(message: M) -> Self {
        Self::assembly(message, AssemblyErrorKind::InvalidFormat)
    }

    pub fn assembly_not_loaded<M: Into<String>>(assembly: M) -> Self {
        let assembly = assembly.into();
        Self::assembly(
            format!("assembly '{assembly}' is not loaded"),
            AssemblyErrorKind::AssemblyNotLoaded,
        )
    }

    pub fn assembly_unresolved_type<M: Into<String>>(full_name: M) -> Self {
        let full_name = full_name.into();
        Self::assembly(
            format!("cannot resolve type reference '{full_name}'"),
            AssemblyErrorKind::UnresolvedType,
        )
    }

    pub fn assembly_circular_inheritance<M: Into<String>>(full_name: M) -> Self {
        let full_name = full_name.into();
        Self::assembly(
            format!("inheritance chain of '{full_name}' loops back on itself"),
            AssemblyErrorKind::CircularInheritance,
        )
    }

    // === Reflection ===

    pub fn reflection_type_not_found<M: Into<String>>(full_name: M) -> Self {
        let full_name = full_name.into();
        Self::reflection(
            format!("type '{full_name}' is not declared in its assembly"),
            ReflectionErrorKind::TypeNotFound,
        )
    }

    // === Config ===

    pub fn config_invalid_value<M: Into<String>>(message: M) -> Self {
        Self::config(message, ConfigErrorKind::InvalidValue)
    }
}

impl From<std::io::Error> for TypeTreeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            file_path: None,
            source_message: Some(format!("IO Error: {err}")),
        }
    }
}

impl From<serde_json::Error> for TypeTreeError {
    fn from(err: serde_json::Error) -> Self {
        let kind = if err.is_data() || err.is_syntax() || err.is_eof() {
            OutputErrorKind::MalformedJson
        } else {
            OutputErrorKind::SerializationFailed
        };
        Self::output(err.to_string(), kind)
    }
}
