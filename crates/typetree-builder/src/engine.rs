//! Type tree assembly: ancestor chain, template merge and flattening.

use crate::node::TypeTreeNode;
use log::{debug, trace};
use std::collections::HashSet;
use typetree_error::{Result, TypeTreeError};
use typetree_metadata::{
    ClassCatalog, EngineVersion, FieldTemplate, InheritanceResolver, TemplateGenerator,
    TypeIdentity, category,
};

/// Ordered template roots for one type: engine ancestor templates, root-most
/// first, followed by the type's own declared field templates.
pub type TypeTemplateChain = Vec<FieldTemplate>;

/// Options controlling the ancestor walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainOptions {
    /// Stop at the first `MonoBehaviour` or `ScriptableObject` ancestor.
    ///
    /// Catalog templates of those categories already contain every engine
    /// field of the ancestors above them. With `false` every ancestor is
    /// queried.
    pub stop_at_terminal: bool,
}

impl Default for ChainOptions {
    fn default() -> Self {
        Self {
            stop_at_terminal: true,
        }
    }
}

impl ChainOptions {
    pub fn full_walk() -> Self {
        Self {
            stop_at_terminal: false,
        }
    }
}

/// Builds type trees from the three metadata lookups.
///
/// Stateless between calls, so one builder serves every type of a run and
/// may be shared across threads.
pub struct TypeTreeBuilder<R, C, G> {
    resolver: R,
    catalog: C,
    generator: G,
    version: EngineVersion,
    options: ChainOptions,
}

impl<R, C, G> TypeTreeBuilder<R, C, G>
where
    R: InheritanceResolver,
    C: ClassCatalog,
    G: TemplateGenerator,
{
    pub fn new(resolver: R, catalog: C, generator: G, version: EngineVersion) -> Self {
        Self {
            resolver,
            catalog,
            generator,
            version,
            options: ChainOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ChainOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ChainOptions {
        self.options
    }

    pub fn version(&self) -> &EngineVersion {
        &self.version
    }

    /// Ancestors of `ty` from the hierarchy root down to its direct base,
    /// `ty` itself excluded.
    pub fn ancestor_chain(&self, ty: &TypeIdentity) -> Result<Vec<TypeIdentity>> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::new();
        seen.insert(ty.clone());

        let mut current = self.resolver.base_type(ty)?;
        while let Some(base) = current {
            if !seen.insert(base.clone()) {
                return Err(TypeTreeError::assembly_circular_inheritance(ty.full_name())
                    .with_type_name(ty.full_name()));
            }
            current = self.resolver.base_type(&base)?;
            ancestors.push(base);
        }

        ancestors.reverse();
        Ok(ancestors)
    }

    /// Template chain for `ty`.
    ///
    /// Empty when no ancestor is a known non-`Component` engine class; such a
    /// type has no serialized layout and is not an error.
    pub fn build_template_chain(&self, ty: &TypeIdentity) -> Result<TypeTemplateChain> {
        let mut templates = Vec::new();

        for ancestor in self.ancestor_chain(ty)? {
            let Some(template) = self.catalog.find_class(&ancestor.name) else {
                trace!("{ty}: ancestor {} is not an engine class", ancestor.name);
                continue;
            };
            if category::is_component(&template.category) {
                trace!("{ty}: skipping component ancestor {}", ancestor.name);
                continue;
            }

            let terminal = category::is_terminal(&template.category);
            templates.push(template);
            if terminal && self.options.stop_at_terminal {
                trace!("{ty}: stopping at {}", ancestor.name);
                break;
            }
        }

        if templates.is_empty() {
            debug!("{ty}: no engine ancestor, type is not serializable");
            return Ok(templates);
        }

        templates.extend(self.generator.declared_templates(ty, &self.version)?);
        Ok(templates)
    }

    /// Flattened type tree for `ty`; empty when the type is not serializable
    pub fn build_type_tree(&self, ty: &TypeIdentity) -> Result<Vec<TypeTreeNode>> {
        let chain = self.build_template_chain(ty)?;
        Ok(flatten(&chain))
    }
}

/// Flatten a template chain into a leveled node list.
///
/// The first root starts at level 0, every further root at level 1, each
/// subtree in pre-order with children one level deeper than their parent.
pub fn flatten(chain: &[FieldTemplate]) -> Vec<TypeTreeNode> {
    let Some((first, rest)) = chain.split_first() else {
        return Vec::new();
    };

    let capacity = chain.iter().map(FieldTemplate::node_count).sum();
    let mut nodes = Vec::with_capacity(capacity);
    push_subtree(first, 0, &mut nodes);
    for root in rest {
        push_subtree(root, 1, &mut nodes);
    }
    nodes
}

fn push_subtree(template: &FieldTemplate, level: u32, out: &mut Vec<TypeTreeNode>) {
    out.push(TypeTreeNode::from_template(template, level));
    for child in &template.children {
        push_subtree(child, level + 1, out);
    }
}
