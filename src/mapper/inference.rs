// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node kind inference from provider identifiers
//!
//! Some records reference another resource by a bare ID without saying what
//! kind of resource it is (a flow log's `ResourceId` can be a VPC, a subnet
//! or a network interface). EC2 IDs carry a kind prefix, so the kind can be
//! recovered lexically.

use crate::domain::NodeKind;

/// Identifier prefixes in priority order; the first match wins
pub const FLOW_LOG_TARGET_PREFIXES: [(&str, NodeKind); 3] = [
    ("eni-", NodeKind::NetworkInterface),
    ("vpc-", NodeKind::Network),
    ("subnet-", NodeKind::Subnet),
];

/// Infer the node kind of a flow log target identifier
///
/// Returns `None` when no known prefix matches.
pub fn infer_node_kind(resource_id: &str) -> Option<NodeKind> {
    infer_with(&FLOW_LOG_TARGET_PREFIXES, resource_id)
}

/// Infer a node kind against an explicit, ordered prefix table
pub fn infer_with(prefixes: &[(&str, NodeKind)], resource_id: &str) -> Option<NodeKind> {
    prefixes
        .iter()
        .find(|(prefix, _)| resource_id.starts_with(prefix))
        .map(|(_, kind)| *kind)
}
