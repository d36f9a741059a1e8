use serde::{Deserialize, Serialize};

use super::ids::{deserialize_optional_wid, Wid};
use crate::validation::trim_optional;

/// One entry of a group chat's participant list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawParticipant {
    #[serde(default, deserialize_with = "deserialize_optional_wid")]
    pub id: Option<Wid>,
}

impl RawParticipant {
    pub fn new(id: Wid) -> Self {
        Self { id: Some(id) }
    }
}

/// A chat as served by the messaging source. For direct chats the chat id is
/// the counterpart's identifier and `participants` is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChat {
    #[serde(default, deserialize_with = "deserialize_optional_wid")]
    pub id: Option<Wid>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_group: bool,
    #[serde(default)]
    pub participants: Vec<RawParticipant>,
}

impl RawChat {
    pub fn direct(id: Wid) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn group(id: Wid, display_name: Option<&str>, participants: Vec<Wid>) -> Self {
        Self {
            id: Some(id),
            display_name: display_name.map(str::to_string),
            is_group: true,
            participants: participants.into_iter().map(RawParticipant::new).collect(),
        }
    }
}

/// A group chat with its participant list in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRecord {
    pub id: Wid,
    pub display_name: Option<String>,
    /// Source order; duplicates are kept as delivered.
    pub participant_ids: Vec<Wid>,
}

impl GroupRecord {
    /// Builds a record from a group chat. Returns `None` for direct chats and
    /// for chats without an id; participants without an id are dropped.
    pub fn from_chat(chat: &RawChat) -> Option<Self> {
        if !chat.is_group {
            return None;
        }
        let id = chat.id.clone()?;
        Some(Self {
            id,
            display_name: trim_optional(chat.display_name.as_deref()),
            participant_ids: chat.participants.iter().filter_map(|p| p.id.clone()).collect(),
        })
    }

    /// Display name, falling back to the id.
    pub fn name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.id.as_str())
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// All group records contained in a chat list, in list order.
pub fn groups_from_chats(chats: &[RawChat]) -> Vec<GroupRecord> {
    chats.iter().filter_map(GroupRecord::from_chat).collect()
}

/// Id and name of a group, used for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub id: Wid,
    pub display_name: Option<String>,
}
