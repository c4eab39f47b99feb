use serde::{Deserialize, Serialize};

/// A statute found by the search endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatuteRef {
    /// Statute name (법령명한글)
    pub name: String,
    /// Repository key used to fetch the full text (법령일련번호, MST)
    pub id: String,
}

impl StatuteRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }
}
