use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BlockKind;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: BlockKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub order: usize,
}

impl Block {
    /// Empty block with a freshly generated id.
    pub fn new(kind: BlockKind, order: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: String::new(),
            order,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}
