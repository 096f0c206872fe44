// Copyright (c) 2025 - Cowboy AI, Inc.
//! Operation Executors
//!
//! Executors interpret the [`GraphOperation`] values returned by mappers and
//! perform the actual writes.
//!
//! ```text
//! Mapper (pure)                  Executor
//! ─────────────                  ────────
//!
//! Resource                       Operations
//!    │                               │
//!    ▼                               ▼
//! ┌─────────────┐  Operations  ┌──────────────┐
//! │ map_resource│ ──────────>  │  execute()   │
//! │ (pure func) │              │  (async I/O) │
//! └─────────────┘              └──────────────┘
//! ```
//!
//! Executors must apply a batch in order. Across batches no order is
//! assumed; upsert idempotence makes interleaved batches converge.

use async_trait::async_trait;
use tracing::debug;

use super::operation::GraphOperation;

/// Trait for executing graph operations
#[async_trait]
pub trait OperationExecutor: Send + Sync {
    /// Execute a batch of operations in order
    ///
    /// If any operation fails, the batch fails and returns an error.
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError>;

    /// Execute a single operation
    async fn execute_one(&mut self, operation: GraphOperation) -> Result<(), ExecutorError> {
        self.execute(vec![operation]).await
    }
}

/// Errors that can occur during operation execution
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    /// Database operation failed
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Target refused the operation
    #[error("Operation rejected: {0}")]
    Rejected(String),

    /// Execution failed
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Logging executor - logs operations but doesn't perform them
///
/// Backs dry runs: each operation is logged at debug level and kept.
#[derive(Debug, Clone, Default)]
pub struct LoggingExecutor {
    /// Operations that have been logged
    pub logged_operations: Vec<GraphOperation>,
}

impl LoggingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all logged operations
    pub fn operations(&self) -> &[GraphOperation] {
        &self.logged_operations
    }
}

#[async_trait]
impl OperationExecutor for LoggingExecutor {
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        for operation in operations {
            debug!(?operation, "dry-run operation");
            self.logged_operations.push(operation);
        }
        Ok(())
    }
}

/// Collecting executor - collects operations for later execution
///
/// Useful for batching operations or deferring execution.
#[derive(Debug, Clone, Default)]
pub struct CollectingExecutor {
    /// Collected operations
    pub collected: Vec<GraphOperation>,
    /// Number of batches received
    pub batches: usize,
}

impl CollectingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all collected operations
    pub fn operations(&self) -> &[GraphOperation] {
        &self.collected
    }

    /// Take all collected operations, leaving the collector empty
    pub fn take_operations(&mut self) -> Vec<GraphOperation> {
        std::mem::take(&mut self.collected)
    }
}

#[async_trait]
impl OperationExecutor for CollectingExecutor {
    async fn execute(&mut self, mut operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        self.batches += 1;
        self.collected.append(&mut operations);
        Ok(())
    }
}

/// Filtering executor - wraps another executor and filters operations
///
/// A filter that drops node upserts but keeps edges is still safe against a
/// sequential store only if the endpoints were written by an earlier batch.
pub struct FilteringExecutor<E: OperationExecutor> {
    inner: E,
    filter: Box<dyn Fn(&GraphOperation) -> bool + Send + Sync>,
}

impl<E: OperationExecutor> FilteringExecutor<E> {
    /// Create a new filtering executor
    ///
    /// # Arguments
    ///
    /// * `inner` - Underlying executor
    /// * `filter` - Predicate to determine which operations to execute
    pub fn new<F>(inner: E, filter: F) -> Self
    where
        F: Fn(&GraphOperation) -> bool + Send + Sync + 'static,
    {
        Self {
            inner,
            filter: Box::new(filter),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

#[async_trait]
impl<E: OperationExecutor> OperationExecutor for FilteringExecutor<E> {
    async fn execute(&mut self, operations: Vec<GraphOperation>) -> Result<(), ExecutorError> {
        let filtered: Vec<_> = operations
            .into_iter()
            .filter(|operation| (self.filter)(operation))
            .collect();

        self.inner.execute(filtered).await
    }
}
