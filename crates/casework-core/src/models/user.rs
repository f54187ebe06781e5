use serde::{Deserialize, Serialize};

/// A case team member as shown next to posts and in the mention picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar: String,
    /// Job title, e.g. "Lead Investigator"
    pub role: String,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        avatar: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
            role: role.into(),
        }
    }
}
