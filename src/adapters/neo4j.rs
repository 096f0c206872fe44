// Copyright (c) 2025 - Cowboy AI, Inc.

//! Neo4j Operation Executor
//!
//! Applies graph operations to Neo4j. Each batch runs in one transaction,
//! statement by statement in batch order, so endpoint `MERGE`s always
//! precede the relationship `MERGE` that uses them.
//!
//! # Example
//!
//! ```rust,no_run
//! use cim_infrastructure_aws::adapters::Neo4jExecutor;
//! use cim_infrastructure_aws::config::Neo4jConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let executor = Neo4jExecutor::connect(Neo4jConfig::default()).await?;
//!     executor.initialize_schema().await?;
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use neo4rs::{query, BoltType, ConfigBuilder, Graph, Query};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use super::cypher::{self, CypherStatement};
use crate::config::Neo4jConfig;
use crate::errors::{GraphError, GraphResult};
use crate::projection::{ExecutorError, GraphOperation, OperationExecutor};

/// Executor writing operations to a Neo4j database
pub struct Neo4jExecutor {
    graph: Arc<Graph>,
}

impl Neo4jExecutor {
    /// Connect to Neo4j
    pub async fn connect(config: Neo4jConfig) -> GraphResult<Self> {
        info!("Connecting to Neo4j at {}", config.uri);

        let neo4j_config = ConfigBuilder::default()
            .uri(config.uri.as_str())
            .user(config.username.as_str())
            .password(config.password.as_str())
            .db(config.database())
            .build()
            .map_err(|e| GraphError::Configuration(e.to_string()))?;

        let graph = Graph::connect(neo4j_config)
            .await
            .map_err(|e| GraphError::Database(format!("Failed to connect to Neo4j: {}", e)))?;

        Ok(Self {
            graph: Arc::new(graph),
        })
    }

    /// Create a uniqueness constraint on `id` for every node label
    pub async fn initialize_schema(&self) -> GraphResult<()> {
        info!("Initializing Neo4j schema for topology graph");

        for constraint in cypher::schema_statements() {
            self.graph
                .run(query(&constraint))
                .await
                .map_err(|e| GraphError::Database(e.to_string()))?;
        }

        info!("Neo4j schema initialization complete");
        Ok(())
    }

    /// Verify connectivity
    pub async fn health_check(&self) -> GraphResult<()> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| GraphError::Database(format!("Neo4j health check failed: {}", e)))?;

        debug!("Neo4j health check passed");
        Ok(())
    }
}

fn to_query(statement: CypherStatement) -> Query {
    statement
        .params
        .into_iter()
        .fold(query(&statement.text), |q, (name, value)| {
            q.param(&name, bolt_value(value))
        })
}

fn bolt_value(value: Value) -> BoltType {
    match value {
        Value::String(s) => s.into(),
        Value::Bool(b) => b.into(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.into(),
            None => n.as_f64().unwrap_or_default().into(),
        },
        // Nulls are rendered inline; nested values are stored as JSON text
        other => other.to_string().into(),
    }
}

#[async_trait]
impl OperationExecutor for Neo4jExecutor {
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        if operations.is_empty() {
            return Ok(());
        }

        let count = operations.len();
        let mut txn = self
            .graph
            .start_txn()
            .await
            .map_err(|e| ExecutorError::DatabaseError(e.to_string()))?;

        for statement in cypher::render_all(&operations) {
            txn.run(to_query(statement))
                .await
                .map_err(|e| ExecutorError::DatabaseError(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| ExecutorError::DatabaseError(e.to_string()))?;

        debug!("Committed {} operations to Neo4j", count);
        Ok(())
    }
}
