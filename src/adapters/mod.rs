// Copyright (c) 2025 - Cowboy AI, Inc.

//! Graph store adapters
//!
//! [`cypher`] renders operations as openCypher and is always available.
//! The Neo4j executor is behind the `neo4j` feature.

pub mod cypher;

#[cfg(feature = "neo4j")]
pub mod neo4j;

pub use cypher::{render, render_all, schema_statements, CypherStatement};

#[cfg(feature = "neo4j")]
pub use neo4j::Neo4jExecutor;
