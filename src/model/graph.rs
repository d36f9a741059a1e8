use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::Wid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeCategory {
    /// The account owner.
    #[serde(rename = "Self")]
    Owner,
    Person,
    Group,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeCategory::Owner => write!(f, "Self"),
            NodeCategory::Person => write!(f, "Person"),
            NodeCategory::Group => write!(f, "Group"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: Wid,
    pub label: String,
    pub category: NodeCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationKind {
    /// Membership in a group, or a direct chat with the owner.
    Membership,
}

/// Undirected edge. `source <= target` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: Wid,
    pub target: Wid,
    pub relation: RelationKind,
}

impl GraphEdge {
    pub fn new(a: &Wid, b: &Wid, relation: RelationKind) -> Self {
        let (source, target) = canonical_edge_key(a, b);
        Self {
            source,
            target,
            relation,
        }
    }
}

/// Key of an unordered pair: the two ids in ascending order.
pub fn canonical_edge_key(a: &Wid, b: &Wid) -> (Wid, Wid) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Node and edge lists in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl SocialGraph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id.as_str() == id)
    }

    pub fn has_edge(&self, a: &Wid, b: &Wid) -> bool {
        let key = canonical_edge_key(a, b);
        self.edges.iter().any(|e| e.source == key.0 && e.target == key.1)
    }
}
