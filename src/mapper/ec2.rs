// Copyright (c) 2025 - Cowboy AI, Inc.
//! EC2 resource mappers
//!
//! One function per resource kind. Each takes the resource's name and its
//! record explicitly and returns the operations for that one record:
//!
//! ```text
//! instance:            (vpc)-[:MEMBER_OF_VPC]->(instance)
//!                      (eni)-[:ATTACHED_TO_INSTANCE]->(instance)
//!                      (sg)-[:IN_SECURITY_GROUP]->(instance)
//!                      (subnet)-[:IN_SUBNET]->(instance)
//! security_group:      (vpc)-[:MEMBER_OF_VPC]->(sg)
//! network_interface:   (vpc)-[:MEMBER_OF_VPC]->(eni)
//!                      (sg)-[:IN_SECURITY_GROUP]->(eni)
//! subnet:              (vpc)-[:MEMBER_OF_VPC]->(subnet)
//! flow_log:            (vpc|subnet|eni)-[:HAS_FLOW_LOG {status}]->(flow_log)
//! ```
//!
//! All other kinds produce only their own node.

use serde_json::Value;
use tracing::debug;

use super::inference::infer_node_kind;
use super::{Mapping, OmittedReference};
use crate::domain::{
    FlowLogRecord, InstanceRecord, NetworkInterfaceRecord, NodeKind, RelationshipKind,
    SecurityGroupRecord, SubnetRecord,
};
use crate::errors::GraphResult;
use crate::projection::{upsert_edge, upsert_node, EdgeAttributes};

/// Accumulates the operations for one record, own node first
struct Emitter<'a> {
    kind: NodeKind,
    identity: &'a str,
    mapping: Mapping,
}

impl<'a> Emitter<'a> {
    fn new(kind: NodeKind, identity: &'a str) -> GraphResult<Self> {
        let mut mapping = Mapping::default();
        mapping.operations.push(upsert_node(kind, identity)?);
        Ok(Self {
            kind,
            identity,
            mapping,
        })
    }

    /// Link a parent to this record's node
    fn link(
        &mut self,
        parent_kind: NodeKind,
        parent_identity: &str,
        relationship: RelationshipKind,
        attributes: Option<EdgeAttributes>,
    ) -> GraphResult<()> {
        self.mapping.operations.extend(upsert_edge(
            parent_kind,
            parent_identity,
            self.kind,
            self.identity,
            relationship,
            attributes,
        )?);
        Ok(())
    }

    /// Link a parent named by an optional field; absent or empty links nothing
    fn link_optional(
        &mut self,
        parent_kind: NodeKind,
        parent_identity: &Option<String>,
        relationship: RelationshipKind,
    ) -> GraphResult<()> {
        match present(parent_identity) {
            Some(parent_identity) => self.link(parent_kind, parent_identity, relationship, None),
            None => Ok(()),
        }
    }

    fn omit(&mut self, relationship: RelationshipKind, reference: &str) {
        self.mapping.omitted.push(OmittedReference {
            relationship,
            reference: reference.to_string(),
        });
    }

    fn finish(self) -> Mapping {
        self.mapping
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Kinds whose records carry no references
pub fn bare(kind: NodeKind, name: &str) -> GraphResult<Mapping> {
    Ok(Emitter::new(kind, name)?.finish())
}

/// belongs to a VPC and a subnet, has many interfaces and security groups
pub fn instance(name: &str, record: &InstanceRecord) -> GraphResult<Mapping> {
    let mut emitter = Emitter::new(NodeKind::Instance, name)?;

    emitter.link_optional(
        NodeKind::Network,
        &record.vpc_id,
        RelationshipKind::MemberOfNetwork,
    )?;

    for interface in &record.network_interfaces {
        emitter.link(
            NodeKind::NetworkInterface,
            &interface.network_interface_id,
            RelationshipKind::AttachedToInstance,
            None,
        )?;
    }

    for group in &record.security_groups {
        emitter.link(
            NodeKind::SecurityGroup,
            &group.group_id,
            RelationshipKind::InSecurityGroup,
            None,
        )?;
    }

    emitter.link_optional(NodeKind::Subnet, &record.subnet_id, RelationshipKind::InSubnet)?;

    Ok(emitter.finish())
}

pub fn security_group(name: &str, record: &SecurityGroupRecord) -> GraphResult<Mapping> {
    let mut emitter = Emitter::new(NodeKind::SecurityGroup, name)?;
    emitter.link_optional(
        NodeKind::Network,
        &record.vpc_id,
        RelationshipKind::MemberOfNetwork,
    )?;
    Ok(emitter.finish())
}

pub fn network_interface(name: &str, record: &NetworkInterfaceRecord) -> GraphResult<Mapping> {
    let mut emitter = Emitter::new(NodeKind::NetworkInterface, name)?;

    emitter.link_optional(
        NodeKind::Network,
        &record.vpc_id,
        RelationshipKind::MemberOfNetwork,
    )?;

    for group in &record.groups {
        emitter.link(
            NodeKind::SecurityGroup,
            &group.group_id,
            RelationshipKind::InSecurityGroup,
            None,
        )?;
    }

    Ok(emitter.finish())
}

/// Keyed by `SubnetId`; the resource name is not used
pub fn subnet(_name: &str, record: &SubnetRecord) -> GraphResult<Mapping> {
    let mut emitter = Emitter::new(NodeKind::Subnet, &record.subnet_id)?;
    emitter.link_optional(
        NodeKind::Network,
        &record.vpc_id,
        RelationshipKind::MemberOfNetwork,
    )?;
    Ok(emitter.finish())
}

/// Target kind is inferred from the `ResourceId` prefix; unknown prefixes
/// drop the edge
pub fn flow_log(name: &str, record: &FlowLogRecord) -> GraphResult<Mapping> {
    let mut emitter = Emitter::new(NodeKind::FlowLog, name)?;

    if let Some(resource_id) = present(&record.resource_id) {
        match infer_node_kind(resource_id) {
            Some(target_kind) => {
                let status = record
                    .flow_log_status
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null);
                let attributes = EdgeAttributes::from([("status".to_string(), status)]);

                emitter.link(
                    target_kind,
                    resource_id,
                    RelationshipKind::HasFlowLog,
                    Some(attributes),
                )?;
            }
            None => {
                debug!(
                    flow_log = name,
                    resource_id, "skipping flow log edge: unrecognised resource id prefix"
                );
                emitter.omit(RelationshipKind::HasFlowLog, resource_id);
            }
        }
    }

    Ok(emitter.finish())
}
