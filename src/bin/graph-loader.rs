// Copyright (c) 2025 - Cowboy AI, Inc.
//! Graph Loader
//!
//! Reads EC2 resource documents (newline-delimited JSON, tagged by `kind`)
//! from a file or stdin and loads them into the topology graph.
//!
//! Run with: cargo run --bin graph-loader --features neo4j -- resources.ndjson
//!
//! With `GRAPH_DRY_RUN=true`, or when built without the `neo4j` feature,
//! nothing is written; the Cypher for every operation is printed instead.
//!
//! Configuration comes from the environment, see `LoaderConfig::from_env`.

use anyhow::{Context, Result};
use cim_infrastructure_aws::{
    adapters::cypher,
    domain::{read_documents, Document},
    projection::LoggingExecutor,
    GraphLoader, LoadReport, LoaderConfig,
};
use std::fs::File;
use std::io::{self, BufReader};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();

    info!("🚀 Starting graph loader");

    let config = LoaderConfig::from_env().context("Invalid loader configuration")?;
    info!("  - Neo4j URI: {}", config.neo4j.uri);
    info!("  - Database: {}", config.neo4j.database());
    info!("  - Batch size: {}", config.batch_size);
    info!("  - On invalid record: {:?}", config.on_invalid);
    info!("  - Dry run: {}", config.dry_run);

    let documents = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("Failed to open {}", path))?;
            read_documents(BufReader::new(file))
                .with_context(|| format!("Failed to read resources from {}", path))?
        }
        None => read_documents(io::stdin().lock()).context("Failed to read resources from stdin")?,
    };
    info!("Read {} documents", documents.len());

    let report = if config.dry_run {
        dry_run(&config, documents).await?
    } else {
        load_into_store(&config, documents).await?
    };

    info!(
        "✅ Run {} finished: {} mapped, {} skipped, {} operations in {} batches",
        report.run_id,
        report.resources_mapped,
        report.resources_skipped.len(),
        report.operations_executed,
        report.batches
    );
    eprintln!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

/// Map everything and print the Cypher that would be executed
async fn dry_run(config: &LoaderConfig, documents: Vec<Document>) -> Result<LoadReport> {
    let mut loader = GraphLoader::from_config(LoggingExecutor::new(), config);
    let report = loader.load_documents(documents).await?;

    for statement in cypher::render_all(loader.executor().operations()) {
        println!("{};", statement.text);
        println!("// params: {}", serde_json::to_string(&statement.params)?);
    }

    Ok(report)
}

#[cfg(feature = "neo4j")]
async fn load_into_store(config: &LoaderConfig, documents: Vec<Document>) -> Result<LoadReport> {
    use cim_infrastructure_aws::adapters::Neo4jExecutor;

    let executor = Neo4jExecutor::connect(config.neo4j.clone()).await?;
    executor.health_check().await?;
    executor.initialize_schema().await?;

    let mut loader = GraphLoader::from_config(executor, config);
    Ok(loader.load_documents(documents).await?)
}

#[cfg(not(feature = "neo4j"))]
async fn load_into_store(config: &LoaderConfig, documents: Vec<Document>) -> Result<LoadReport> {
    tracing::warn!("Built without the `neo4j` feature, falling back to a dry run");
    dry_run(config, documents).await
}
