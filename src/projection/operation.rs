// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Operations
//!
//! Mappers never touch a database. They return [`GraphOperation`] values as
//! data and an executor interprets them later. There are exactly two
//! primitives, both idempotent upserts:
//!
//! ```text
//! upsert_node(kind, id)            -> [UpsertNode]
//! upsert_edge(parent, child, rel)  -> [UpsertNode(parent), UpsertNode(child), UpsertEdge]
//! ```
//!
//! The edge triple always carries its endpoint upserts first, so a store
//! that applies operations strictly in sequence never sees an edge whose
//! endpoints are missing.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{NodeKind, RelationshipKind};
use crate::errors::{GraphError, GraphResult};

/// Relationship-scoped properties
///
/// Ordered so that identical inputs serialize identically.
pub type EdgeAttributes = BTreeMap<String, Value>;

/// Natural key of a node
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeRef {
    pub kind: NodeKind,
    pub identity: String,
}

impl NodeRef {
    /// Build a node reference, rejecting an empty identity
    pub fn new(kind: NodeKind, identity: impl Into<String>) -> GraphResult<Self> {
        let identity = identity.into();
        if identity.is_empty() {
            return Err(GraphError::empty_identity(kind));
        }
        Ok(Self { kind, identity })
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.identity)
    }
}

/// A single idempotent graph mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GraphOperation {
    /// Ensure a node with this key exists
    UpsertNode(NodeRef),

    /// Ensure a directed, typed relationship exists between two nodes
    UpsertEdge {
        relationship: RelationshipKind,
        from: NodeRef,
        to: NodeRef,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attributes: Option<EdgeAttributes>,
    },
}

impl GraphOperation {
    pub fn is_node(&self) -> bool {
        matches!(self, GraphOperation::UpsertNode(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, GraphOperation::UpsertEdge { .. })
    }

    /// Relationship kind, if this is an edge upsert
    pub fn relationship(&self) -> Option<RelationshipKind> {
        match self {
            GraphOperation::UpsertEdge { relationship, .. } => Some(*relationship),
            GraphOperation::UpsertNode(_) => None,
        }
    }
}

/// Upsert a single node
pub fn upsert_node(kind: NodeKind, identity: &str) -> GraphResult<GraphOperation> {
    Ok(GraphOperation::UpsertNode(NodeRef::new(kind, identity)?))
}

/// Upsert both endpoints and the edge between them, in that order
pub fn upsert_edge(
    from_kind: NodeKind,
    from_identity: &str,
    to_kind: NodeKind,
    to_identity: &str,
    relationship: RelationshipKind,
    attributes: Option<EdgeAttributes>,
) -> GraphResult<[GraphOperation; 3]> {
    let from = NodeRef::new(from_kind, from_identity)?;
    let to = NodeRef::new(to_kind, to_identity)?;

    Ok([
        GraphOperation::UpsertNode(from.clone()),
        GraphOperation::UpsertNode(to.clone()),
        GraphOperation::UpsertEdge {
            relationship,
            from,
            to,
            attributes,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_upsert_node() {
        let op = upsert_node(NodeKind::Network, "vpc-1").unwrap();
        assert!(op.is_node());
        assert_eq!(
            op,
            GraphOperation::UpsertNode(NodeRef {
                kind: NodeKind::Network,
                identity: "vpc-1".to_string(),
            })
        );
    }

    #[test]
    fn test_upsert_node_rejects_empty_identity() {
        let err = upsert_node(NodeKind::Instance, "").unwrap_err();
        assert!(matches!(err, GraphError::InvalidArgument(_)));
    }

    #[test]
    fn test_upsert_edge_orders_endpoints_first() {
        let [first, second, third] = upsert_edge(
            NodeKind::Network,
            "vpc-1",
            NodeKind::Instance,
            "i-1",
            RelationshipKind::MemberOfNetwork,
            None,
        )
        .unwrap();

        assert_eq!(first, upsert_node(NodeKind::Network, "vpc-1").unwrap());
        assert_eq!(second, upsert_node(NodeKind::Instance, "i-1").unwrap());
        assert_eq!(third.relationship(), Some(RelationshipKind::MemberOfNetwork));
    }

    #[test]
    fn test_upsert_edge_rejects_either_empty_identity() {
        for (from, to) in [("", "i-1"), ("vpc-1", "")] {
            let err = upsert_edge(
                NodeKind::Network,
                from,
                NodeKind::Instance,
                to,
                RelationshipKind::MemberOfNetwork,
                None,
            )
            .unwrap_err();
            assert!(matches!(err, GraphError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_operation_json_shape() {
        let mut attributes = EdgeAttributes::new();
        attributes.insert("status".to_string(), json!("ACTIVE"));

        let [_, _, edge] = upsert_edge(
            NodeKind::Subnet,
            "subnet-1",
            NodeKind::FlowLog,
            "fl-1",
            RelationshipKind::HasFlowLog,
            Some(attributes),
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&edge).unwrap(),
            json!({
                "op": "upsert_edge",
                "relationship": "has_flow_log",
                "from": { "kind": "subnet", "identity": "subnet-1" },
                "to": { "kind": "flow_log", "identity": "fl-1" },
                "attributes": { "status": "ACTIVE" }
            })
        );
    }
}
