// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Mapper
//!
//! Turns one [`Resource`] into the ordered [`GraphOperation`]s that make the
//! graph reflect it. Every mapping:
//!
//! 1. upserts the resource's own node first
//! 2. adds one edge group per present singular reference
//! 3. adds one edge group per collection element, in collection order
//!
//! Mappers are pure: the same resource always yields the same operations,
//! and no state is shared between calls, so they can run on any number of
//! workers at once.

pub mod ec2;
pub mod inference;

use serde::{Deserialize, Serialize};

use crate::domain::{NodeKind, RelationshipKind, Resource, ResourceRecord};
use crate::errors::GraphResult;
use crate::projection::GraphOperation;

pub use inference::infer_node_kind;

/// A reference that could not be turned into an edge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OmittedReference {
    /// Relationship the edge would have had
    pub relationship: RelationshipKind,
    /// The unresolvable identifier
    pub reference: String,
}

/// Output of mapping one resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    /// Operations in application order
    pub operations: Vec<GraphOperation>,
    /// References dropped because their node kind could not be inferred
    pub omitted: Vec<OmittedReference>,
}

impl Mapping {
    pub fn into_operations(self) -> Vec<GraphOperation> {
        self.operations
    }
}

/// Map a resource with the procedure for its kind
pub fn map_resource(resource: &Resource) -> GraphResult<Mapping> {
    let name = resource.name.as_str();

    match &resource.record {
        ResourceRecord::Account => ec2::bare(NodeKind::Account, name),
        ResourceRecord::Instance(record) => ec2::instance(name, record),
        ResourceRecord::Vpc => ec2::bare(NodeKind::Network, name),
        ResourceRecord::SecurityGroup(record) => ec2::security_group(name, record),
        ResourceRecord::NetworkInterface(record) => ec2::network_interface(name, record),
        ResourceRecord::Subnet(record) => ec2::subnet(name, record),
        ResourceRecord::EipAddress => ec2::bare(NodeKind::ElasticIp, name),
        ResourceRecord::NatGateway => ec2::bare(NodeKind::NatGateway, name),
        ResourceRecord::RouteTable => ec2::bare(NodeKind::RouteTable, name),
        ResourceRecord::Image => ec2::bare(NodeKind::Image, name),
        ResourceRecord::Snapshot => ec2::bare(NodeKind::Snapshot, name),
        ResourceRecord::FlowLog(record) => ec2::flow_log(name, record),
        ResourceRecord::Volume => ec2::bare(NodeKind::Volume, name),
        ResourceRecord::VpnGateway => ec2::bare(NodeKind::VpnGateway, name),
        ResourceRecord::PeeringConnection => ec2::bare(NodeKind::PeeringConnection, name),
    }
}
