use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::chat::RawChat;
use super::contact::{Account, RawContact};

/// Metadata of one stored capture of an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub id: Uuid,
    pub account: Account,
    pub captured_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn create(account: Account, captured_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            account,
            captured_at,
        }
    }
}

/// JSON document accepted by `import`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotDocument {
    pub account: Account,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contacts: Vec<RawContact>,
    #[serde(default)]
    pub chats: Vec<RawChat>,
}
