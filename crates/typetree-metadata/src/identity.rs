use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a compiled type: (assembly scope, namespace, simple name).
///
/// Also the shape of a base-type reference inside an assembly dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeIdentity {
    /// File name of the declaring assembly, e.g. `Assembly-CSharp.dll`
    pub assembly: String,
    #[serde(default)]
    pub namespace: String,
    pub name: String,
}

impl TypeIdentity {
    pub fn new(
        assembly: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            assembly: assembly.into(),
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// `Namespace.Name`, or just `Name` for types in the global namespace
    pub fn full_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.assembly, self.full_name())
    }
}
