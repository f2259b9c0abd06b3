use crate::cli_args::{InputArgs, LayoutArgs};
use crate::util::{Inputs, OutputHandler, generator_config};
use log::{debug, info, warn};
use std::path::Path;
use typetree_builder::{batch, write_dataset};
use typetree_error::Result;

pub fn cmd_generate(
    input: &InputArgs,
    layout: &LayoutArgs,
    out_dir: &Path,
    fail_fast: bool,
    output: &OutputHandler,
) -> Result<()> {
    let config = generator_config(input, layout, fail_fast);
    debug!("Generator config: {config:?}");

    let inputs = Inputs::load(&input.assemblies, &input.catalog)?;
    if inputs.assemblies.is_empty() {
        warn!(
            "No assembly metadata found in {}",
            input.assemblies.display()
        );
    }

    let report = batch::run(&config, &inputs.assemblies, &inputs.package)?;
    let written = write_dataset(&report.dataset, out_dir)?;

    info!("Done.");
    output.print_info_fmt(format_args!(
        "Wrote {} documents to {}",
        written.len(),
        out_dir.display()
    ));
    output.print_info_fmt(format_args!(
        "  {} types generated, {} without engine layout, {} failed, {} duplicate",
        report.counts.generated,
        report.counts.unsupported,
        report.counts.failed,
        report.counts.duplicate
    ));
    for path in &written {
        output.print_result_fmt(format_args!("{}", path.display()));
    }

    Ok(())
}
