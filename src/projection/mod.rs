// Copyright (c) 2025 - Cowboy AI, Inc.

//! Graph Projection
//!
//! Projection from resource records to graph state is split in two:
//!
//! - [`operation`] - the pure half: idempotent upsert operations as data,
//!   built only through [`upsert_node`] and [`upsert_edge`]
//! - [`executor`] - the effectful half: interpreters that apply operations
//!   to a target (in-memory store, Neo4j, a log)
//!
//! ```text
//! Resources ────map────> Operations ────execute────> Graph
//!    │                       │                         │
//!    ▼                       ▼                         ▼
//! [r1, r2, r3]  ──>  [o1..o4, o5, o6..o9]  ──>  converged topology
//! ```
//!
//! # Idempotency
//!
//! Applying the same operations twice, or applying batches from different
//! resources in any interleaving, must leave the graph in the same state.
//! Executors rely on store-side upserts (`MERGE`) to guarantee this.

pub mod executor;
pub mod operation;

pub use executor::{
    CollectingExecutor, ExecutorError, FilteringExecutor, LoggingExecutor, OperationExecutor,
};
pub use operation::{upsert_edge, upsert_node, EdgeAttributes, GraphOperation, NodeRef};
