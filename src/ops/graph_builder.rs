use std::collections::HashSet;

use crate::model::{
    canonical_edge_key, GraphEdge, GraphNode, NodeCategory, RawChat, RelationKind, SocialGraph,
    Wid,
};
use crate::ops::resolver::ContactResolver;

const UNKNOWN_GROUP_LABEL: &str = "Unknown group";

/// Which non-owner participants become person nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InclusionPolicy {
    /// Everyone, saved or not (full graph).
    All,
    /// Only contacts saved in the address book.
    SavedOnly,
}

impl InclusionPolicy {
    pub fn includes(&self, id: &Wid, contacts: &ContactResolver<'_>) -> bool {
        match self {
            InclusionPolicy::All => true,
            InclusionPolicy::SavedOnly => contacts.is_saved(id),
        }
    }

    /// File name prefix used when the graph is written out.
    pub fn prefix(&self) -> &'static str {
        match self {
            InclusionPolicy::All => "full",
            InclusionPolicy::SavedOnly => "filtered",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub groups: usize,
    pub direct_chats: usize,
    /// Chats or participants without a usable id.
    pub skipped: usize,
}

/// Accumulates a deduplicated node and edge set in insertion order.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<GraphNode>,
    node_ids: HashSet<Wid>,
    edges: Vec<GraphEdge>,
    edge_keys: HashSet<(Wid, Wid)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node unless its id is already present. The first label wins.
    pub fn add_node(&mut self, id: &Wid, label: impl Into<String>, category: NodeCategory) -> bool {
        if !self.node_ids.insert(id.clone()) {
            return false;
        }
        self.nodes.push(GraphNode {
            id: id.clone(),
            label: label.into(),
            category,
        });
        true
    }

    /// Inserts the undirected edge `a`–`b` unless present. Self-loops are ignored.
    pub fn add_edge(&mut self, a: &Wid, b: &Wid) -> bool {
        if a == b {
            return false;
        }
        if !self.edge_keys.insert(canonical_edge_key(a, b)) {
            return false;
        }
        self.edges.push(GraphEdge::new(a, b, RelationKind::Membership));
        true
    }

    /// Walks the chat list, adding the owner, groups, and every participant or
    /// direct-chat partner the policy admits.
    pub fn ingest(
        &mut self,
        self_id: &Wid,
        self_label: &str,
        chats: &[RawChat],
        policy: InclusionPolicy,
        contacts: &ContactResolver<'_>,
    ) -> IngestStats {
        let mut stats = IngestStats::default();
        self.add_node(self_id, self_label, NodeCategory::Owner);

        for chat in chats {
            let Some(chat_id) = &chat.id else {
                tracing::debug!("skipping chat without id");
                stats.skipped += 1;
                continue;
            };

            if chat.is_group {
                stats.groups += 1;
                let label = chat
                    .display_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .unwrap_or(UNKNOWN_GROUP_LABEL);
                self.add_node(chat_id, label, NodeCategory::Group);
                self.add_edge(self_id, chat_id);

                for participant in &chat.participants {
                    let Some(pid) = &participant.id else {
                        stats.skipped += 1;
                        continue;
                    };
                    if pid == self_id || pid.is_broadcast() || !policy.includes(pid, contacts) {
                        continue;
                    }
                    self.add_person(pid, contacts);
                    self.add_edge(pid, chat_id);
                }
            } else {
                if chat_id == self_id || chat_id.is_broadcast() {
                    continue;
                }
                stats.direct_chats += 1;
                if policy.includes(chat_id, contacts) {
                    self.add_person(chat_id, contacts);
                    self.add_edge(self_id, chat_id);
                }
            }
        }

        tracing::info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            groups = stats.groups,
            direct_chats = stats.direct_chats,
            skipped = stats.skipped,
            "built social graph"
        );
        stats
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn finish(self) -> SocialGraph {
        SocialGraph {
            nodes: self.nodes,
            edges: self.edges,
        }
    }

    fn add_person(&mut self, id: &Wid, contacts: &ContactResolver<'_>) {
        let label = contacts
            .display_name(id)
            .map(str::to_string)
            .unwrap_or_else(|| id.local_part().to_string());
        self.add_node(id, label, NodeCategory::Person);
    }
}
