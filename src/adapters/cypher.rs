// Copyright (c) 2025 - Cowboy AI, Inc.

//! Cypher rendering for graph operations
//!
//! Every operation renders to one parameterised `MERGE` statement, so the
//! output can be run against any openCypher store (Neo4j, Memgraph,
//! RedisGraph):
//!
//! ```text
//! UpsertNode  → MERGE (n:AWS_VPC {id: $id})
//! UpsertEdge  → MERGE (p:AWS_VPC {id: $from_id})
//!               MERGE (c:AWS_EC2_INSTANCE {id: $to_id})
//!               MERGE (p)-[r:MEMBER_OF_VPC]->(c)
//!               SET r.`status` = $attr_0
//! ```
//!
//! Labels and relationship types come from closed enums and are inlined;
//! identities and attribute values are always parameters.

use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::NodeKind;
use crate::projection::GraphOperation;

/// A Cypher statement with its parameters
#[derive(Debug, Clone, PartialEq)]
pub struct CypherStatement {
    pub text: String,
    pub params: BTreeMap<String, Value>,
}

/// Render one operation
pub fn render(operation: &GraphOperation) -> CypherStatement {
    match operation {
        GraphOperation::UpsertNode(node) => CypherStatement {
            text: format!("MERGE (n:{} {{id: $id}})", node.kind.label()),
            params: BTreeMap::from([("id".to_string(), Value::String(node.identity.clone()))]),
        },
        GraphOperation::UpsertEdge {
            relationship,
            from,
            to,
            attributes,
        } => {
            let mut text = format!(
                "MERGE (p:{} {{id: $from_id}})\nMERGE (c:{} {{id: $to_id}})\nMERGE (p)-[r:{}]->(c)",
                from.kind.label(),
                to.kind.label(),
                relationship.type_name(),
            );
            let mut params = BTreeMap::from([
                ("from_id".to_string(), Value::String(from.identity.clone())),
                ("to_id".to_string(), Value::String(to.identity.clone())),
            ]);

            for (i, (name, value)) in attributes.iter().flatten().enumerate() {
                let property = quote_identifier(name);
                if value.is_null() {
                    text.push_str(&format!("\nSET r.{} = null", property));
                } else {
                    let param = format!("attr_{}", i);
                    text.push_str(&format!("\nSET r.{} = ${}", property, param));
                    params.insert(param, value.clone());
                }
            }

            CypherStatement { text, params }
        }
    }
}

/// Render a batch, preserving order
pub fn render_all(operations: &[GraphOperation]) -> Vec<CypherStatement> {
    operations.iter().map(render).collect()
}

/// Uniqueness constraint per node label
pub fn schema_statements() -> Vec<String> {
    NodeKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "CREATE CONSTRAINT {}_id IF NOT EXISTS FOR (n:{}) REQUIRE n.id IS UNIQUE",
                kind.label().to_lowercase(),
                kind.label()
            )
        })
        .collect()
}

fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
