use serde::{Deserialize, Serialize};

/// Category shared by every error raised for the same condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    /// Stable machine-readable code, e.g. `NC-COMMON-2100`.
    pub code: String,
    /// Short human-readable title.
    pub title: String,
}

impl Classification {
    pub fn new(code: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
        }
    }
}
