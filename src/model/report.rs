use serde::{Deserialize, Serialize};

use super::contact::ContactInfo;
use super::ids::Wid;

/// One shared member of two groups, with resolved contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapRow {
    pub id: Wid,
    #[serde(flatten)]
    pub info: ContactInfo,
}

/// Members a target group shares with one other group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntersectionReport {
    pub other_group_id: Wid,
    pub other_group_name: String,
    pub overlap_count: usize,
    /// Sorted by phone number, absent numbers first.
    pub rows: Vec<OverlapRow>,
}

/// Number of groups two saved contacts have in common. `a < b`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoMembership {
    pub a: Wid,
    pub b: Wid,
    pub shared_groups: u32,
}
