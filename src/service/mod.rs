// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer
//!
//! Orchestrates mapping and execution for a whole load run.
//!
//! ```text
//! Record source (API export, NDJSON)
//!     ↓
//! GraphLoader (this module)
//!     ↓
//! Resource Mapper → Operations
//!     ↓
//! OperationExecutor (in-memory, Neo4j, dry-run log)
//! ```

pub mod loader;

pub use loader::{GraphLoader, LoadReport, SkippedResource};
