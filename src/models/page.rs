use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Block;

/// Id carried by a page that has never been saved.
pub const NEW_PAGE_ID: &str = "new";

pub const DEFAULT_PAGE_TITLE: &str = "Untitled Page";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub title: String,
    #[serde(rename = "userId", default)]
    pub owner_id: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Page {
    /// Fresh unsaved page for `owner_id`.
    pub fn draft(owner_id: impl Into<String>) -> Self {
        Self {
            id: NEW_PAGE_ID.to_string(),
            title: DEFAULT_PAGE_TITLE.to_string(),
            owner_id: owner_id.into(),
            blocks: Vec::new(),
            is_deleted: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id == NEW_PAGE_ID
    }

    pub fn block(&self, block_id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == block_id)
    }

    pub fn position_of(&self, block_id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == block_id)
    }

    /// True when every block's `order` equals its array index.
    pub fn is_contiguous(&self) -> bool {
        self.blocks
            .iter()
            .enumerate()
            .all(|(index, block)| block.order == index)
    }

    pub fn block_summary(&self) -> String {
        match self.blocks.len() {
            1 => "1 block".to_string(),
            n => format!("{} blocks", n),
        }
    }
}
