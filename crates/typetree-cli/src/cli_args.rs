use clap::Args;
use std::path::PathBuf;
use typetree_metadata::EngineVersion;

/// Metadata inputs shared by the generating commands
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Directory of assembly metadata dumps (searched recursively for *.json)
    #[arg(long, short = 'a')]
    pub assemblies: PathBuf,

    /// Class catalog package file
    #[arg(long, short = 'c')]
    pub catalog: PathBuf,

    /// Target engine version, e.g. 2021.3.21f1
    #[arg(long = "engine-version", short = 'e', value_parser = parse_engine_version)]
    pub engine_version: EngineVersion,
}

/// Options of the ancestor walk and class layout selection
#[derive(Debug, Clone, Args)]
pub struct LayoutArgs {
    /// Use editor class layouts instead of player layouts
    #[arg(long)]
    pub prefer_editor: bool,

    /// Query every ancestor instead of stopping at MonoBehaviour/ScriptableObject
    #[arg(long)]
    pub no_early_stop: bool,
}

/// Output formatting arguments
#[derive(Debug, Clone, Args)]
pub struct OutputFormatArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = crate::OutputFormat::Tree)]
    pub format: crate::OutputFormat,

    /// Use ASCII characters instead of Unicode box characters for tree output
    #[arg(long)]
    pub ascii: bool,
}

pub fn parse_engine_version(value: &str) -> Result<EngineVersion, String> {
    value.parse().map_err(|e: typetree_error::TypeTreeError| e.user_message())
}
