// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Loader Service
//!
//! Drives a load run: maps each resource, applies the invalid-record policy,
//! and hands operations to an executor in batches.
//!
//! ```text
//! Resources → map_resource → Operations ─batch─→ Executor → Graph
//!                  │
//!                  └─ InvalidArgument → skip (warn) | abort
//! ```
//!
//! Documents that did not decode take the same skip-or-abort path.
//!
//! # Batching
//!
//! Batches are cut at resource boundaries, so one resource's operations are
//! never split across batches. A batch can therefore exceed `batch_size` by
//! at most one resource's worth of operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{InvalidRecordPolicy, LoaderConfig};
use crate::domain::{Document, Resource};
use crate::errors::{GraphError, GraphResult};
use crate::mapper::map_resource;
use crate::projection::{GraphOperation, OperationExecutor};

/// A resource the loader did not map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedResource {
    pub name: String,
    pub kind: String,
    pub reason: String,
}

/// Summary of a load run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub resources_mapped: usize,
    pub resources_skipped: Vec<SkippedResource>,
    pub operations_executed: usize,
    pub batches: usize,
    /// Edges dropped because the referenced kind could not be inferred
    pub edges_omitted: usize,
}

impl LoadReport {
    fn start() -> Self {
        let now = Utc::now();
        Self {
            run_id: Uuid::now_v7(),
            started_at: now,
            finished_at: now,
            resources_mapped: 0,
            resources_skipped: Vec::new(),
            operations_executed: 0,
            batches: 0,
            edges_omitted: 0,
        }
    }
}

/// Loads resources into a graph through an executor
pub struct GraphLoader<E: OperationExecutor> {
    executor: E,
    batch_size: usize,
    on_invalid: InvalidRecordPolicy,
}

impl<E: OperationExecutor> GraphLoader<E> {
    pub fn new(executor: E) -> Self {
        let defaults = LoaderConfig::default();
        Self {
            executor,
            batch_size: defaults.batch_size,
            on_invalid: defaults.on_invalid,
        }
    }

    /// Take batch size and invalid-record policy from a loader configuration
    pub fn from_config(executor: E, config: &LoaderConfig) -> Self {
        Self::new(executor)
            .with_batch_size(config.batch_size)
            .with_policy(config.on_invalid)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn with_policy(mut self, on_invalid: InvalidRecordPolicy) -> Self {
        self.on_invalid = on_invalid;
        self
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Map and execute every resource
    ///
    /// Under [`InvalidRecordPolicy::Abort`] the first mapping error ends the
    /// run: operations of the resources mapped before it are still flushed,
    /// then the error is returned.
    pub async fn load<I>(&mut self, resources: I) -> GraphResult<LoadReport>
    where
        I: IntoIterator<Item = Resource>,
    {
        self.load_documents(resources.into_iter().map(Document::from))
            .await
    }

    /// Map and execute a decoded input stream
    ///
    /// Documents that failed to decode go through the invalid-record policy
    /// the same way as resources that fail to map.
    pub async fn load_documents<I>(&mut self, documents: I) -> GraphResult<LoadReport>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut report = LoadReport::start();
        let mut pending: Vec<GraphOperation> = Vec::new();

        info!(run_id = %report.run_id, "Starting graph load");

        for document in documents {
            let resource = match document {
                Document::Resource(resource) => resource,
                Document::Invalid(invalid) => {
                    let skipped = SkippedResource {
                        name: invalid
                            .name
                            .unwrap_or_else(|| format!("line {}", invalid.line)),
                        kind: invalid.kind.unwrap_or_else(|| "unknown".to_string()),
                        reason: invalid.reason.clone(),
                    };
                    self.reject(
                        skipped,
                        GraphError::Deserialization(invalid.reason),
                        &mut pending,
                        &mut report,
                    )
                    .await?;
                    continue;
                }
            };

            match map_resource(&resource) {
                Ok(mapping) => {
                    report.resources_mapped += 1;
                    report.edges_omitted += mapping.omitted.len();
                    pending.extend(mapping.operations);

                    if pending.len() >= self.batch_size {
                        self.flush(&mut pending, &mut report).await?;
                    }
                }
                Err(e) => {
                    let skipped = SkippedResource {
                        name: resource.name,
                        kind: resource.record.kind_name().to_string(),
                        reason: e.to_string(),
                    };
                    self.reject(skipped, e, &mut pending, &mut report).await?;
                }
            }
        }

        self.flush(&mut pending, &mut report).await?;
        report.finished_at = Utc::now();

        info!(
            run_id = %report.run_id,
            mapped = report.resources_mapped,
            skipped = report.resources_skipped.len(),
            operations = report.operations_executed,
            "Graph load complete"
        );
        Ok(report)
    }

    /// Record a resource that could not be loaded, or end the run under abort
    async fn reject(
        &mut self,
        skipped: SkippedResource,
        error: GraphError,
        pending: &mut Vec<GraphOperation>,
        report: &mut LoadReport,
    ) -> GraphResult<()> {
        match self.on_invalid {
            InvalidRecordPolicy::Skip => {
                warn!(
                    resource = %skipped.name,
                    kind = %skipped.kind,
                    error = %skipped.reason,
                    "Skipping resource"
                );
                report.resources_skipped.push(skipped);
                Ok(())
            }
            InvalidRecordPolicy::Abort => {
                self.flush(pending, report).await?;
                Err(error)
            }
        }
    }

    async fn flush(
        &mut self,
        pending: &mut Vec<GraphOperation>,
        report: &mut LoadReport,
    ) -> GraphResult<()> {
        if pending.is_empty() {
            return Ok(());
        }

        let batch = std::mem::take(pending);
        let count = batch.len();
        self.executor.execute(batch).await?;

        report.operations_executed += count;
        report.batches += 1;
        debug!(operations = count, batch = report.batches, "Flushed batch");
        Ok(())
    }
}
