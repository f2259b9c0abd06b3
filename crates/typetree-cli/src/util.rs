// Utility functions for CLI

use crate::cli_args::{InputArgs, LayoutArgs};
use log::info;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::path::Path;
use typetree_builder::{ChainOptions, FailurePolicy, GeneratorConfig};
use typetree_error::{Result, TypeTreeError};
use typetree_metadata::{AssemblySet, ClassPackage};

/// Output handler that respects quiet mode
pub struct OutputHandler {
    quiet: bool,
}

impl OutputHandler {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print explanatory text (suppressed in quiet mode)
    pub fn print_info_fmt(&self, args: std::fmt::Arguments) {
        if !self.quiet {
            println!("{args}");
        }
    }

    /// Print raw results (always shown)
    pub fn print_result(&self, text: &str) {
        println!("{text}");
    }

    /// Print formatted raw results (always shown)
    pub fn print_result_fmt(&self, args: std::fmt::Arguments) {
        println!("{args}");
    }
}

/// Loaded metadata inputs of one command
pub struct Inputs {
    pub assemblies: AssemblySet,
    pub package: ClassPackage,
}

impl Inputs {
    pub fn load(assemblies: &Path, catalog: &Path) -> Result<Self> {
        if !assemblies.is_dir() {
            return Err(TypeTreeError::config_invalid_value(format!(
                "assemblies path '{}' is not a directory",
                assemblies.display()
            )));
        }

        info!("Loading assembly metadata from {}", assemblies.display());
        let assemblies = AssemblySet::load_dir(assemblies)?;
        info!(
            "Loaded {} assemblies with {} types",
            assemblies.len(),
            assemblies.type_count()
        );

        info!("Loading class catalog {}", catalog.display());
        let package = ClassPackage::load(catalog)?;

        Ok(Self {
            assemblies,
            package,
        })
    }
}

/// Map command line flags onto a generation config
pub fn generator_config(
    input: &InputArgs,
    layout: &LayoutArgs,
    fail_fast: bool,
) -> GeneratorConfig {
    let chain = if layout.no_early_stop {
        ChainOptions::full_walk()
    } else {
        ChainOptions::default()
    };
    let policy = if fail_fast {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Skip
    };

    GeneratorConfig::new(input.engine_version)
        .with_prefer_editor(layout.prefer_editor)
        .with_chain_options(chain)
        .with_failure_policy(policy)
}

pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn colorize_type(type_name: &str) -> String {
    if should_use_colors() {
        type_name.blue().to_string()
    } else {
        type_name.to_string()
    }
}

pub fn colorize_name(name: &str) -> String {
    if should_use_colors() {
        name.yellow().to_string()
    } else {
        name.to_string()
    }
}

pub fn colorize_level(level: u32) -> String {
    if should_use_colors() {
        level.to_string().green().to_string()
    } else {
        level.to_string()
    }
}
