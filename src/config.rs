// Copyright (c) 2025 - Cowboy AI, Inc.
//! Loader configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::errors::{GraphError, GraphResult};

/// Neo4j connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neo4jConfig {
    /// Neo4j URI (e.g., "bolt://localhost:7687")
    pub uri: String,

    /// Username for authentication
    pub username: String,

    /// Password for authentication
    pub password: String,

    /// Optional database name (defaults to "neo4j")
    pub database: Option<String>,
}

impl Neo4jConfig {
    /// Get the database name (defaults to "neo4j" if not set)
    pub fn database(&self) -> &str {
        self.database.as_deref().unwrap_or("neo4j")
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            username: "neo4j".to_string(),
            password: "".to_string(),
            database: None,
        }
    }
}

/// What the loader does with a resource whose mapping fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Log and continue with the next resource
    #[default]
    Skip,
    /// Stop the run with the mapping error
    Abort,
}

impl FromStr for InvalidRecordPolicy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(GraphError::Configuration(format!(
                "unknown invalid-record policy '{}', expected 'skip' or 'abort'",
                other
            ))),
        }
    }
}

/// Configuration for a load run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderConfig {
    pub neo4j: Neo4jConfig,
    /// Maximum operations handed to the executor at once
    pub batch_size: usize,
    pub on_invalid: InvalidRecordPolicy,
    /// Log operations instead of writing them
    pub dry_run: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            batch_size: 500,
            on_invalid: InvalidRecordPolicy::Skip,
            dry_run: false,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from environment variables
    ///
    /// `NEO4J_URI`, `NEO4J_USER`, `NEO4J_PASSWORD`, `NEO4J_DATABASE`,
    /// `GRAPH_BATCH_SIZE`, `GRAPH_ON_INVALID` (`skip`/`abort`) and
    /// `GRAPH_DRY_RUN` (`true`/`false`). Unset variables keep their defaults.
    pub fn from_env() -> GraphResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> GraphResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let neo4j = Neo4jConfig {
            uri: lookup("NEO4J_URI").unwrap_or(defaults.neo4j.uri),
            username: lookup("NEO4J_USER").unwrap_or(defaults.neo4j.username),
            password: lookup("NEO4J_PASSWORD").unwrap_or(defaults.neo4j.password),
            database: lookup("NEO4J_DATABASE").filter(|db| !db.is_empty()),
        };

        let batch_size = match lookup("GRAPH_BATCH_SIZE") {
            Some(raw) => parse_var::<usize>("GRAPH_BATCH_SIZE", &raw)?,
            None => defaults.batch_size,
        };
        if batch_size == 0 {
            return Err(GraphError::Configuration(
                "GRAPH_BATCH_SIZE must be greater than zero".to_string(),
            ));
        }

        let on_invalid = match lookup("GRAPH_ON_INVALID") {
            Some(raw) => raw.parse()?,
            None => defaults.on_invalid,
        };

        let dry_run = match lookup("GRAPH_DRY_RUN") {
            Some(raw) => parse_var::<bool>("GRAPH_DRY_RUN", &raw)?,
            None => defaults.dry_run,
        };

        Ok(Self {
            neo4j,
            batch_size,
            on_invalid,
            dry_run,
        })
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> GraphResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| GraphError::Configuration(format!("invalid value '{}' for {}", raw, key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = LoaderConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, LoaderConfig::default());
        assert_eq!(config.neo4j.uri, "bolt://localhost:7687");
        assert_eq!(config.neo4j.database(), "neo4j");
    }

    #[test]
    fn test_config_overrides() {
        let config = LoaderConfig::from_lookup(lookup_from(&[
            ("NEO4J_URI", "bolt://graph:7687"),
            ("NEO4J_DATABASE", "topology"),
            ("GRAPH_BATCH_SIZE", "64"),
            ("GRAPH_ON_INVALID", "Abort"),
            ("GRAPH_DRY_RUN", "true"),
        ]))
        .unwrap();

        assert_eq!(config.neo4j.uri, "bolt://graph:7687");
        assert_eq!(config.neo4j.database(), "topology");
        assert_eq!(config.batch_size, 64);
        assert_eq!(config.on_invalid, InvalidRecordPolicy::Abort);
        assert!(config.dry_run);
    }

    #[test]
    fn test_config_rejects_bad_values() {
        for pairs in [
            [("GRAPH_BATCH_SIZE", "lots")],
            [("GRAPH_BATCH_SIZE", "0")],
            [("GRAPH_ON_INVALID", "retry")],
            [("GRAPH_DRY_RUN", "maybe")],
        ] {
            let err = LoaderConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
            assert!(matches!(err, GraphError::Configuration(_)));
        }
    }
}
