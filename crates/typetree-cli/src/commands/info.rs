use crate::util::{Inputs, OutputHandler};
use std::path::Path;
use typetree_error::Result;
use typetree_metadata::EngineVersion;

pub fn cmd_info(
    assemblies: &Path,
    catalog: &Path,
    engine_version: Option<&EngineVersion>,
    output: &OutputHandler,
) -> Result<()> {
    let inputs = Inputs::load(assemblies, catalog)?;

    output.print_info_fmt(format_args!("Assemblies: {}", assemblies.display()));
    output.print_result_fmt(format_args!(
        "  Loaded assemblies: {}",
        inputs.assemblies.len()
    ));
    for name in inputs.assemblies.assembly_names() {
        let types = inputs.assemblies.types(name)?;
        output.print_result_fmt(format_args!("    {name}: {} types", types.len()));
    }

    output.print_info_fmt(format_args!("Class catalog: {}", catalog.display()));
    output.print_result_fmt(format_args!(
        "  Class databases: {}",
        inputs.package.databases.len()
    ));
    for database in &inputs.package.databases {
        output.print_result_fmt(format_args!(
            "    {}: {} classes",
            database.version,
            database.len()
        ));
    }

    if let Some(version) = engine_version {
        let database = inputs.package.database_for(version)?;
        output.print_result_fmt(format_args!(
            "  Engine version {version} uses the {} database",
            database.version
        ));
    }

    Ok(())
}
