use serde::{Deserialize, Serialize};
use typetree_metadata::FieldTemplate;

/// Meta flag bit marking a value padded to a 4-byte boundary after reading
pub const ALIGN_FLAG: i32 = 0x4000;

/// One entry of a flattened type tree.
///
/// Field names follow the engine's own type tree serialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeTreeNode {
    #[serde(rename = "m_Type")]
    pub type_name: String,
    #[serde(rename = "m_Name")]
    pub name: String,
    #[serde(rename = "m_MetaFlag")]
    pub meta_flag: i32,
    #[serde(rename = "m_Level")]
    pub level: u32,
}

impl TypeTreeNode {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>, level: u32) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            meta_flag: 0,
            level,
        }
    }

    pub fn aligned(mut self) -> Self {
        self.meta_flag |= ALIGN_FLAG;
        self
    }

    /// Node for `template` alone; its children are not visited
    pub fn from_template(template: &FieldTemplate, level: u32) -> Self {
        Self {
            type_name: template.category.clone(),
            name: template.name.clone(),
            meta_flag: if template.is_aligned { ALIGN_FLAG } else { 0 },
            level,
        }
    }

    pub fn is_aligned(&self) -> bool {
        self.meta_flag & ALIGN_FLAG != 0
    }
}
