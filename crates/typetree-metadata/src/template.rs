use serde::{Deserialize, Serialize};

/// Category labels the type tree builder treats specially.
///
/// These are engine-specific and versioned: a future engine release may
/// introduce further terminal categories.
pub mod category {
    /// Component fields never belong to a value's own serialized layout
    pub const COMPONENT: &str = "Component";
    pub const MONO_BEHAVIOUR: &str = "MonoBehaviour";
    pub const SCRIPTABLE_OBJECT: &str = "ScriptableObject";

    /// Categories whose catalog templates already fold in every engine
    /// ancestor back to the root type
    pub const TERMINAL_CATEGORIES: &[&str] = &[MONO_BEHAVIOUR, SCRIPTABLE_OBJECT];

    pub fn is_component(category: &str) -> bool {
        category == COMPONENT
    }

    pub fn is_terminal(category: &str) -> bool {
        TERMINAL_CATEGORIES.contains(&category)
    }
}

/// One node of a field template tree.
///
/// `children` keeps declaration order, which is serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplate {
    /// Primitive, engine class name, or user type name
    #[serde(rename = "type")]
    pub category: String,
    pub name: String,
    /// Serialized value is padded to a 4-byte boundary
    #[serde(default, rename = "aligned")]
    pub is_aligned: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FieldTemplate>,
}

impl FieldTemplate {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            is_aligned: false,
            children: Vec::new(),
        }
    }

    pub fn aligned(mut self) -> Self {
        self.is_aligned = true;
        self
    }

    pub fn with_child(mut self, child: FieldTemplate) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = FieldTemplate>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
