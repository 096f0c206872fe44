// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node and Relationship Kinds
//!
//! The closed vocabulary of the topology graph. Labels and type names are
//! the strings written to the graph store, so they must stay stable across
//! releases: queries written against the graph depend on them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Node kinds in the topology graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Cloud account
    Account,
    /// Compute instance
    Instance,
    /// Virtual network (VPC)
    Network,
    /// Security group
    SecurityGroup,
    /// Elastic network interface
    NetworkInterface,
    /// Subnet
    Subnet,
    /// Elastic IP address
    ElasticIp,
    /// NAT gateway
    NatGateway,
    /// Route table
    RouteTable,
    /// Machine image
    Image,
    /// Volume snapshot
    Snapshot,
    /// Flow log
    FlowLog,
    /// Block storage volume
    Volume,
    /// VPN gateway
    VpnGateway,
    /// VPC peering connection
    PeeringConnection,
}

impl NodeKind {
    /// Every node kind, in declaration order
    pub const ALL: [NodeKind; 15] = [
        NodeKind::Account,
        NodeKind::Instance,
        NodeKind::Network,
        NodeKind::SecurityGroup,
        NodeKind::NetworkInterface,
        NodeKind::Subnet,
        NodeKind::ElasticIp,
        NodeKind::NatGateway,
        NodeKind::RouteTable,
        NodeKind::Image,
        NodeKind::Snapshot,
        NodeKind::FlowLog,
        NodeKind::Volume,
        NodeKind::VpnGateway,
        NodeKind::PeeringConnection,
    ];

    /// Get the graph label for this node kind
    pub fn label(&self) -> &'static str {
        match self {
            Self::Account => "AWS_EC2_ACCOUNT",
            Self::Instance => "AWS_EC2_INSTANCE",
            Self::Network => "AWS_VPC",
            Self::SecurityGroup => "AWS_SECURITY_GROUP",
            Self::NetworkInterface => "AWS_NETWORK_INTERFACE",
            Self::Subnet => "AWS_SUBNET",
            Self::ElasticIp => "AWS_EIP_ADDRESS",
            Self::NatGateway => "AWS_NAT_GATEWAY",
            Self::RouteTable => "AWS_ROUTE_TABLE",
            Self::Image => "AWS_IMAGE",
            Self::Snapshot => "AWS_SNAPSHOT",
            Self::FlowLog => "AWS_FLOW_LOG",
            Self::Volume => "AWS_VOLUME",
            Self::VpnGateway => "AWS_VPN_GATEWAY",
            Self::PeeringConnection => "AWS_PEERING_CONNECTION",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Relationship kinds in the topology graph
///
/// Each kind names the role of the edge's target (the child) relative to
/// its source (the parent): `(vpc)-[:MEMBER_OF_VPC]->(instance)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    /// Child belongs to a network
    MemberOfNetwork,
    /// Network interface is attached to an instance
    AttachedToInstance,
    /// Child is governed by a security group
    InSecurityGroup,
    /// Child sits in a subnet
    InSubnet,
    /// Network resource is observed by a flow log
    HasFlowLog,
}

impl RelationshipKind {
    /// Get the graph relationship type name
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::MemberOfNetwork => "MEMBER_OF_VPC",
            Self::AttachedToInstance => "ATTACHED_TO_INSTANCE",
            Self::InSecurityGroup => "IN_SECURITY_GROUP",
            Self::InSubnet => "IN_SUBNET",
            Self::HasFlowLog => "HAS_FLOW_LOG",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}
