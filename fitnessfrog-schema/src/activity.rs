use serde::{Deserialize, Serialize};

/// A selectable activity type. Entries reference it by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
}

impl Activity {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
