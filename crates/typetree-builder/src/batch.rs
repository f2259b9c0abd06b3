//! Batch generation over every loaded assembly.

use crate::engine::{ChainOptions, TypeTreeBuilder};
use crate::node::TypeTreeNode;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::ops::AddAssign;
use typetree_error::Result;
use typetree_metadata::{
    AssemblySet, ClassCatalog, ClassDatabase, ClassPackage, EngineVersion, InheritanceResolver,
    TemplateGenerator, TypeIdentity,
};

/// Type trees of one assembly, keyed by full type name
pub type AssemblyTypeTree = BTreeMap<String, Vec<TypeTreeNode>>;

/// Type trees of every processed assembly, keyed by assembly name
pub type Dataset = BTreeMap<String, AssemblyTypeTree>;

/// What to do when a lookup fails for a single type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and leave the type out
    #[default]
    Skip,
    /// Stop the run with the error
    Abort,
}

/// Settings of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub engine_version: EngineVersion,
    /// Use editor class layouts instead of player ones
    pub prefer_editor: bool,
    pub chain: ChainOptions,
    pub failure_policy: FailurePolicy,
}

impl GeneratorConfig {
    pub fn new(engine_version: EngineVersion) -> Self {
        Self {
            engine_version,
            prefer_editor: false,
            chain: ChainOptions::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_prefer_editor(mut self, prefer_editor: bool) -> Self {
        self.prefer_editor = prefer_editor;
        self
    }

    pub fn with_chain_options(mut self, chain: ChainOptions) -> Self {
        self.chain = chain;
        self
    }

    pub fn with_failure_policy(mut self, failure_policy: FailurePolicy) -> Self {
        self.failure_policy = failure_policy;
        self
    }

    /// The class database matching the target version, with the layout
    /// preference applied
    pub fn select_database(&self, package: &ClassPackage) -> Result<ClassDatabase> {
        Ok(package
            .database_for(&self.engine_version)?
            .clone()
            .with_prefer_editor(self.prefer_editor))
    }

    pub fn builder<'a>(
        &self,
        assemblies: &'a AssemblySet,
        database: &'a ClassDatabase,
    ) -> TypeTreeBuilder<&'a AssemblySet, &'a ClassDatabase, &'a AssemblySet> {
        TypeTreeBuilder::new(assemblies, database, assemblies, self.engine_version)
            .with_options(self.chain)
    }
}

/// Per-type outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeCounts {
    /// Types with a non-empty type tree
    pub generated: usize,
    /// Types without an engine ancestor
    pub unsupported: usize,
    /// Types skipped after a lookup error
    pub failed: usize,
    /// Types dropped because an earlier type had the same full name
    pub duplicate: usize,
}

impl TypeCounts {
    pub fn total(&self) -> usize {
        self.generated + self.unsupported + self.failed + self.duplicate
    }
}

impl AddAssign for TypeCounts {
    fn add_assign(&mut self, other: Self) {
        self.generated += other.generated;
        self.unsupported += other.unsupported;
        self.failed += other.failed;
        self.duplicate += other.duplicate;
    }
}

#[derive(Debug, Clone, Default)]
pub struct AssemblyReport {
    pub assembly: String,
    pub trees: AssemblyTypeTree,
    pub counts: TypeCounts,
}

#[derive(Debug, Clone, Default)]
pub struct DatasetReport {
    pub dataset: Dataset,
    pub counts: TypeCounts,
}

/// Generate the type trees of `types`, all declared in `assembly`.
///
/// Unsupported types are counted and left out of the result.
pub fn generate_assembly<R, C, G>(
    builder: &TypeTreeBuilder<R, C, G>,
    assembly: &str,
    types: &[TypeIdentity],
    policy: FailurePolicy,
) -> Result<AssemblyReport>
where
    R: InheritanceResolver,
    C: ClassCatalog,
    G: TemplateGenerator,
{
    let outcomes = build_all(builder, types);

    let mut report = AssemblyReport {
        assembly: assembly.to_string(),
        ..Default::default()
    };
    for (ty, outcome) in types.iter().zip(outcomes) {
        match outcome {
            Ok(nodes) if nodes.is_empty() => report.counts.unsupported += 1,
            Ok(nodes) => {
                let full_name = ty.full_name();
                if report.trees.contains_key(&full_name) {
                    warn!("{assembly}: type {full_name} declared twice, keeping the first");
                    report.counts.duplicate += 1;
                    continue;
                }
                debug!("{ty}: {} nodes", nodes.len());
                report.trees.insert(full_name, nodes);
                report.counts.generated += 1;
            }
            Err(err) => match policy {
                FailurePolicy::Abort => return Err(err),
                FailurePolicy::Skip => {
                    warn!("Skipping {ty}: {}", err.user_message());
                    report.counts.failed += 1;
                }
            },
        }
    }

    Ok(report)
}

/// Generate type trees for every assembly of `assemblies`, in name order.
pub fn generate_dataset<R, C, G>(
    builder: &TypeTreeBuilder<R, C, G>,
    assemblies: &AssemblySet,
    policy: FailurePolicy,
) -> Result<DatasetReport>
where
    R: InheritanceResolver,
    C: ClassCatalog,
    G: TemplateGenerator,
{
    let mut result = DatasetReport::default();

    for name in assemblies.assembly_names() {
        info!("Processing: {name}");
        let types = assemblies.types(name)?;
        let report = generate_assembly(builder, name, &types, policy)?;
        debug!(
            "{name}: {} generated, {} unsupported, {} failed, {} duplicate",
            report.counts.generated,
            report.counts.unsupported,
            report.counts.failed,
            report.counts.duplicate
        );
        result.counts += report.counts;
        result.dataset.insert(report.assembly, report.trees);
    }

    Ok(result)
}

/// Select the class database for `config` and generate every assembly.
pub fn run(
    config: &GeneratorConfig,
    assemblies: &AssemblySet,
    package: &ClassPackage,
) -> Result<DatasetReport> {
    let database = config.select_database(package)?;
    let builder = config.builder(assemblies, &database);
    generate_dataset(&builder, assemblies, config.failure_policy)
}

#[cfg(feature = "rayon")]
fn build_all<R, C, G>(
    builder: &TypeTreeBuilder<R, C, G>,
    types: &[TypeIdentity],
) -> Vec<Result<Vec<TypeTreeNode>>>
where
    R: InheritanceResolver,
    C: ClassCatalog,
    G: TemplateGenerator,
{
    use rayon::prelude::*;

    // Indexed collect keeps declaration order
    types
        .par_iter()
        .map(|ty| builder.build_type_tree(ty))
        .collect()
}

#[cfg(not(feature = "rayon"))]
fn build_all<R, C, G>(
    builder: &TypeTreeBuilder<R, C, G>,
    types: &[TypeIdentity],
) -> Vec<Result<Vec<TypeTreeNode>>>
where
    R: InheritanceResolver,
    C: ClassCatalog,
    G: TemplateGenerator,
{
    types.iter().map(|ty| builder.build_type_tree(ty)).collect()
}
