use crate::OutputFormat;
use crate::cli_args::{InputArgs, LayoutArgs};
use crate::util::{Inputs, OutputHandler, colorize_level, colorize_name, colorize_type, generator_config};
use log::{debug, info};
use std::path::PathBuf;
use text_trees::{FormatCharacters, StringTreeNode, TreeFormatting};
use typetree_builder::{TypeTreeNode, read_assembly_tree};
use typetree_error::{CliErrorKind, Result, TypeTreeError};

/// Where `show` takes the type tree from
pub enum TypeSource {
    /// Build it from assembly metadata and a class catalog
    Metadata { input: InputArgs, layout: LayoutArgs },
    /// Read it from a generated document
    Document(PathBuf),
}

pub fn cmd_show(
    type_name: &str,
    source: TypeSource,
    assembly: Option<&str>,
    format: OutputFormat,
    ascii: bool,
    output: &OutputHandler,
) -> Result<()> {
    let nodes = match source {
        TypeSource::Metadata { input, layout } => {
            let inputs = Inputs::load(&input.assemblies, &input.catalog)?;
            let ty = inputs
                .assemblies
                .find_by_full_name(type_name, assembly)
                .ok_or_else(|| {
                    TypeTreeError::reflection_type_not_found(type_name).with_type_name(type_name)
                })?;
            info!("Building type tree for {ty}");

            let config = generator_config(&input, &layout, true);
            let database = config.select_database(&inputs.package)?;
            config
                .builder(&inputs.assemblies, &database)
                .build_type_tree(&ty)?
        }
        TypeSource::Document(path) => {
            if assembly.is_some() {
                debug!("--assembly is ignored when reading {}", path.display());
            }
            let mut trees = read_assembly_tree(&path)?;
            trees.remove(type_name).ok_or_else(|| {
                TypeTreeError::reflection_type_not_found(type_name)
                    .with_type_name(type_name)
                    .with_file_path(&path)
            })?
        }
    };

    if nodes.is_empty() {
        output.print_info_fmt(format_args!(
            "{type_name} has no engine ancestor and no serialized layout"
        ));
        return Ok(());
    }

    output.print_info_fmt(format_args!("{type_name}: {} nodes", nodes.len()));
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&nodes)?;
            output.print_result(&json);
        }
        OutputFormat::Flat => {
            for node in &nodes {
                output.print_result_fmt(format_args!(
                    "{}{} {} {}{}",
                    "  ".repeat(node.level as usize),
                    colorize_level(node.level),
                    colorize_type(&node.type_name),
                    colorize_name(&node.name),
                    if node.is_aligned() { " (aligned)" } else { "" }
                ));
            }
        }
        OutputFormat::Tree => {
            let text = format_tree(&nodes, ascii)?;
            output.print_result(text.trim_end());
        }
    }

    Ok(())
}

fn format_tree(nodes: &[TypeTreeNode], ascii: bool) -> Result<String> {
    let format_chars = if ascii {
        FormatCharacters::ascii()
    } else {
        FormatCharacters::box_chars()
    };
    let formatting = TreeFormatting::dir_tree(format_chars);

    let mut index = 0;
    let tree = build_tree_node(nodes, &mut index);
    tree.to_string_with_format(&formatting).map_err(|e| {
        TypeTreeError::cli(
            format!("failed to format type tree: {e}"),
            CliErrorKind::OutputFormatError,
        )
    })
}

/// Rebuild nesting from levels: every following node deeper than `nodes[index]`
/// belongs to its subtree.
fn build_tree_node(nodes: &[TypeTreeNode], index: &mut usize) -> StringTreeNode {
    let node = &nodes[*index];
    *index += 1;

    let mut children = Vec::new();
    while *index < nodes.len() && nodes[*index].level > node.level {
        children.push(build_tree_node(nodes, index));
    }

    let label = format!(
        "{} {}{}",
        colorize_type(&node.type_name),
        colorize_name(&node.name),
        if node.is_aligned() { " (aligned)" } else { "" }
    );
    StringTreeNode::with_child_nodes(label, children.into_iter())
}
