use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique conversation identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sidebar tab a conversation is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatCategory {
    Products,
    General,
    Archived,
}

/// One entry in the conversation sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationListItem {
    pub id: ConversationId,
    pub title: String,
    pub last_message: String,
    #[serde(default)]
    pub unread: u32,
    pub updated_at: DateTime<Utc>,
    pub category: ChatCategory,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub counterpart: Option<String>,
}

/// Conversations shown for one sidebar tab, newest activity first.
pub fn visible_conversations(
    items: &[ConversationListItem],
    tab: ChatCategory,
) -> Vec<&ConversationListItem> {
    let mut visible: Vec<&ConversationListItem> =
        items.iter().filter(|c| c.category == tab).collect();
    visible.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    visible
}
