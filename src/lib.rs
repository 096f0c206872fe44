//! AWS topology graph mapping for the Composable Information Machine
//!
//! Converts EC2 resource records (instances, VPCs, subnets, security groups,
//! network interfaces, flow logs, ...) into idempotent upsert operations on
//! a property graph, so that a graph store comes to mirror an account's
//! network topology.
//!
//! - [`mapper`] - one pure mapping procedure per resource kind
//! - [`projection`] - the two upsert primitives and operation executors
//! - [`store`] - an in-memory graph with upsert semantics
//! - [`adapters`] - Cypher rendering and the Neo4j executor (`neo4j` feature)
//! - [`service`] - the batching loader that ties mapping to execution

pub mod adapters;
pub mod config;
pub mod domain;
pub mod errors;
pub mod mapper;
pub mod projection;
pub mod service;
pub mod store;

// Re-export commonly used types
pub use config::{InvalidRecordPolicy, LoaderConfig, Neo4jConfig};
pub use domain::{NodeKind, RelationshipKind, Resource, ResourceRecord};
pub use errors::{GraphError, GraphResult};
pub use mapper::{map_resource, Mapping};
pub use projection::{GraphOperation, NodeRef, OperationExecutor};
pub use service::{GraphLoader, LoadReport};
pub use store::InMemoryGraph;
