// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-memory graph store
//!
//! Applies [`GraphOperation`]s with the same semantics a `MERGE`-based store
//! gives them:
//!
//! - nodes are a set keyed by `(kind, identity)`
//! - edges are keyed by `(relationship, from, to)`
//! - edge attributes merge per key, last write wins, `null` removes a key
//! - an edge whose endpoints are absent is rejected
//!
//! Because every operation is an upsert, applying the same batches in any
//! order yields the same graph.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{NodeKind, RelationshipKind};
use crate::errors::{GraphError, GraphResult};
use crate::projection::{
    EdgeAttributes, ExecutorError, GraphOperation, NodeRef, OperationExecutor,
};

/// Natural key of an edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey {
    pub relationship: RelationshipKind,
    pub from: NodeRef,
    pub to: NodeRef,
}

fn node_key(kind: NodeKind, identity: &str) -> NodeRef {
    NodeRef {
        kind,
        identity: identity.to_string(),
    }
}

/// Property graph held in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryGraph {
    nodes: BTreeSet<NodeRef>,
    edges: BTreeMap<EdgeKey, EdgeAttributes>,
}

impl InMemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one operation
    pub fn apply(&mut self, operation: &GraphOperation) -> GraphResult<()> {
        match operation {
            GraphOperation::UpsertNode(node) => {
                self.nodes.insert(node.clone());
            }
            GraphOperation::UpsertEdge {
                relationship,
                from,
                to,
                attributes,
            } => {
                for endpoint in [from, to] {
                    if !self.nodes.contains(endpoint) {
                        return Err(GraphError::MissingEndpoint {
                            kind: endpoint.kind,
                            identity: endpoint.identity.clone(),
                            relationship: relationship.type_name(),
                        });
                    }
                }

                let key = EdgeKey {
                    relationship: *relationship,
                    from: from.clone(),
                    to: to.clone(),
                };
                let stored = self.edges.entry(key).or_default();
                if let Some(attributes) = attributes {
                    for (name, value) in attributes {
                        if value.is_null() {
                            stored.remove(name);
                        } else {
                            stored.insert(name.clone(), value.clone());
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Apply operations in order, stopping at the first failure
    pub fn apply_all<'a, I>(&mut self, operations: I) -> GraphResult<()>
    where
        I: IntoIterator<Item = &'a GraphOperation>,
    {
        for operation in operations {
            self.apply(operation)?;
        }
        Ok(())
    }

    pub fn contains_node(&self, kind: NodeKind, identity: &str) -> bool {
        self.nodes.contains(&node_key(kind, identity))
    }

    /// Attributes of an edge, if the edge exists
    pub fn edge(
        &self,
        relationship: RelationshipKind,
        from: (NodeKind, &str),
        to: (NodeKind, &str),
    ) -> Option<&EdgeAttributes> {
        self.edges.get(&EdgeKey {
            relationship,
            from: node_key(from.0, from.1),
            to: node_key(to.0, to.1),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Nodes of one kind, ordered by identity
    pub fn nodes_of(&self, kind: NodeKind) -> impl Iterator<Item = &NodeRef> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Edges of one relationship kind
    pub fn edges_of(&self, relationship: RelationshipKind) -> impl Iterator<Item = &EdgeKey> {
        self.edges.keys().filter(move |k| k.relationship == relationship)
    }
}

#[async_trait]
impl OperationExecutor for InMemoryGraph {
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        self.apply_all(&operations)
            .map_err(|e| ExecutorError::Rejected(e.to_string()))?;
        debug!(
            operations = operations.len(),
            nodes = self.node_count(),
            edges = self.edge_count(),
            "applied batch to in-memory graph"
        );
        Ok(())
    }
}

/// An [`InMemoryGraph`] shared between concurrent workers
///
/// Each batch is applied under the lock, so a batch is atomic with respect
/// to other workers while batches from different workers interleave freely.
#[derive(Debug, Clone, Default)]
pub struct SharedGraph {
    inner: Arc<Mutex<InMemoryGraph>>,
}

impl SharedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current graph
    pub async fn snapshot(&self) -> InMemoryGraph {
        self.inner.lock().await.clone()
    }
}

#[async_trait]
impl OperationExecutor for SharedGraph {
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        let mut graph = self.inner.lock().await;
        graph.execute(operations).await
    }
}
