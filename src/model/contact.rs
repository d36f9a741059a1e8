use serde::{Deserialize, Serialize};

use super::ids::{deserialize_optional_wid, Wid};
use crate::validation::trim_optional;

/// Resolved contact details for one identifier. Immutable once cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
    pub phone_number: Option<String>,
    pub address_book_name: Option<String>,
    pub profile_nickname: Option<String>,
}

impl ContactInfo {
    /// Placeholder cached when a lookup fails.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Sort key for report rows; absent numbers sort first.
    pub fn phone_sort_key(&self) -> &str {
        self.phone_number.as_deref().unwrap_or("")
    }
}

/// A contact record as served by the messaging source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContact {
    #[serde(default, deserialize_with = "deserialize_optional_wid")]
    pub id: Option<Wid>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address_book_name: Option<String>,
    #[serde(default)]
    pub profile_nickname: Option<String>,
    #[serde(default)]
    pub is_owned_contact: bool,
    #[serde(default)]
    pub profile_pic_url: Option<String>,
}

impl RawContact {
    pub fn info(&self) -> ContactInfo {
        ContactInfo {
            phone_number: trim_optional(self.phone_number.as_deref()),
            address_book_name: trim_optional(self.address_book_name.as_deref()),
            profile_nickname: trim_optional(self.profile_nickname.as_deref()),
        }
    }
}

/// The account owner ("self") of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: Wid,
    #[serde(default)]
    pub display_name: Option<String>,
}

impl Account {
    pub fn new(id: Wid, display_name: Option<String>) -> Self {
        Self { id, display_name }
    }

    /// Label of the self node: the profile name, else the id's local part.
    pub fn label(&self) -> String {
        let name = self
            .display_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| self.id.local_part());
        format!("{} (me)", name)
    }
}
