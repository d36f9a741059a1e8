pub mod ids;
pub mod contact;
pub mod chat;
pub mod graph;
pub mod report;
pub mod snapshot;

// Re-exports for convenience
pub use ids::{looks_like_group_id, Wid, BROADCAST_ID, GROUP_SUFFIX};
pub use contact::{Account, ContactInfo, RawContact};
pub use chat::{groups_from_chats, GroupRecord, GroupSummary, RawChat, RawParticipant};
pub use graph::{canonical_edge_key, GraphEdge, GraphNode, NodeCategory, RelationKind, SocialGraph};
pub use report::{CoMembership, IntersectionReport, OverlapRow};
pub use snapshot::{Snapshot, SnapshotDocument};
