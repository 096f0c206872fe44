// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Resource Mapping
//!
//! Properties that must hold for every well-formed record: own node first,
//! one edge group per reference in order, endpoints before edges, purity,
//! and convergence of the graph regardless of application order.

use cim_infrastructure_aws::domain::{
    FlowLogRecord, GroupIdentifier, InstanceNetworkInterface, InstanceRecord,
    NetworkInterfaceRecord, SecurityGroupRecord, SubnetRecord,
};
use cim_infrastructure_aws::mapper::infer_node_kind;
use cim_infrastructure_aws::projection::upsert_node;
use cim_infrastructure_aws::{
    map_resource, GraphOperation, InMemoryGraph, RelationshipKind, Resource,
    ResourceRecord,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn provider_id(prefix: &'static str) -> impl Strategy<Value = String> {
    "[0-9a-f]{1,8}".prop_map(move |suffix| format!("{}{}", prefix, suffix))
}

/// Absent, empty, or a real ID
fn optional_id(prefix: &'static str) -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        provider_id(prefix).prop_map(Some),
    ]
}

fn instance_record() -> impl Strategy<Value = InstanceRecord> {
    (
        optional_id("vpc-"),
        optional_id("subnet-"),
        prop::collection::vec(provider_id("eni-"), 0..5),
        prop::collection::vec(provider_id("sg-"), 0..5),
    )
        .prop_map(|(vpc_id, subnet_id, enis, groups)| InstanceRecord {
            vpc_id,
            subnet_id,
            network_interfaces: enis.into_iter().map(InstanceNetworkInterface::new).collect(),
            security_groups: groups.into_iter().map(GroupIdentifier::new).collect(),
        })
}

fn security_group_record() -> impl Strategy<Value = SecurityGroupRecord> {
    optional_id("vpc-").prop_map(|vpc_id| SecurityGroupRecord { vpc_id })
}

fn network_interface_record() -> impl Strategy<Value = NetworkInterfaceRecord> {
    (
        optional_id("vpc-"),
        prop::collection::vec(provider_id("sg-"), 0..5),
    )
        .prop_map(|(vpc_id, groups)| NetworkInterfaceRecord {
            vpc_id,
            groups: groups.into_iter().map(GroupIdentifier::new).collect(),
        })
}

fn subnet_record() -> impl Strategy<Value = SubnetRecord> {
    (provider_id("subnet-"), optional_id("vpc-"))
        .prop_map(|(subnet_id, vpc_id)| SubnetRecord { subnet_id, vpc_id })
}

fn flow_log_record() -> impl Strategy<Value = FlowLogRecord> {
    (
        prop_oneof![
            Just(None),
            Just(Some(String::new())),
            flow_log_target().prop_map(Some),
        ],
        prop::option::of("[A-Z]{4,8}"),
    )
        .prop_map(|(resource_id, flow_log_status)| FlowLogRecord {
            resource_id,
            flow_log_status,
        })
}

fn bare_record() -> impl Strategy<Value = ResourceRecord> {
    prop::sample::select(vec![
        ResourceRecord::Account,
        ResourceRecord::Vpc,
        ResourceRecord::EipAddress,
        ResourceRecord::NatGateway,
        ResourceRecord::RouteTable,
        ResourceRecord::Image,
        ResourceRecord::Snapshot,
        ResourceRecord::Volume,
        ResourceRecord::VpnGateway,
        ResourceRecord::PeeringConnection,
    ])
}

/// Any kind of resource, with a non-empty name
fn any_resource() -> impl Strategy<Value = Resource> {
    let record = prop_oneof![
        instance_record().prop_map(ResourceRecord::Instance),
        security_group_record().prop_map(ResourceRecord::SecurityGroup),
        network_interface_record().prop_map(ResourceRecord::NetworkInterface),
        subnet_record().prop_map(ResourceRecord::Subnet),
        flow_log_record().prop_map(ResourceRecord::FlowLog),
        bare_record(),
    ];
    ("[a-z]{1,4}-[0-9a-f]{1,8}", record).prop_map(|(name, record)| Resource::new(name, record))
}

fn flow_log_target() -> impl Strategy<Value = String> {
    prop_oneof![
        provider_id("eni-"),
        provider_id("vpc-"),
        provider_id("subnet-"),
        "[a-z]{1,6}-[0-9]{1,4}",
    ]
}

/// Instances, interfaces, security groups and subnets with distinct names
fn topology() -> impl Strategy<Value = Vec<Resource>> {
    (
        prop::collection::vec(instance_record(), 0..6),
        prop::collection::vec(optional_id("vpc-"), 0..4),
        prop::collection::vec(network_interface_record(), 0..4),
        prop::collection::vec(security_group_record(), 0..4),
    )
        .prop_map(|(instances, subnet_vpcs, interfaces, groups)| {
            let mut resources: Vec<Resource> = instances
                .into_iter()
                .enumerate()
                .map(|(i, record)| Resource::new(format!("i-{}", i), ResourceRecord::Instance(record)))
                .collect();
            resources.extend(subnet_vpcs.into_iter().enumerate().map(|(i, vpc_id)| {
                Resource::new(
                    format!("arn:subnet/{}", i),
                    ResourceRecord::Subnet(SubnetRecord {
                        subnet_id: format!("subnet-{}", i),
                        vpc_id,
                    }),
                )
            }));
            resources.extend(interfaces.into_iter().enumerate().map(|(i, record)| {
                Resource::new(format!("eni-{}", i), ResourceRecord::NetworkInterface(record))
            }));
            resources.extend(groups.into_iter().enumerate().map(|(i, record)| {
                Resource::new(format!("sg-{}", i), ResourceRecord::SecurityGroup(record))
            }));
            resources
        })
}

// ============================================================================
// Helpers
// ============================================================================

fn present(value: &Option<String>) -> Vec<String> {
    value.iter().filter(|v| !v.is_empty()).cloned().collect()
}

/// Identity of the node a resource maps to
fn own_identity(resource: &Resource) -> &str {
    match &resource.record {
        ResourceRecord::Subnet(subnet) => &subnet.subnet_id,
        _ => &resource.name,
    }
}

/// Every edge a resource should produce, as (relationship, parent identity),
/// in emission order
fn expected_edges(resource: &Resource) -> Vec<(RelationshipKind, String)> {
    let tag = |kind: RelationshipKind, ids: Vec<String>| {
        ids.into_iter().map(move |id| (kind, id)).collect::<Vec<_>>()
    };

    match &resource.record {
        ResourceRecord::Instance(record) => [
            tag(RelationshipKind::MemberOfNetwork, present(&record.vpc_id)),
            tag(
                RelationshipKind::AttachedToInstance,
                record
                    .network_interfaces
                    .iter()
                    .map(|ni| ni.network_interface_id.clone())
                    .collect(),
            ),
            tag(
                RelationshipKind::InSecurityGroup,
                record.security_groups.iter().map(|g| g.group_id.clone()).collect(),
            ),
            tag(RelationshipKind::InSubnet, present(&record.subnet_id)),
        ]
        .concat(),
        ResourceRecord::SecurityGroup(record) => {
            tag(RelationshipKind::MemberOfNetwork, present(&record.vpc_id))
        }
        ResourceRecord::NetworkInterface(record) => [
            tag(RelationshipKind::MemberOfNetwork, present(&record.vpc_id)),
            tag(
                RelationshipKind::InSecurityGroup,
                record.groups.iter().map(|g| g.group_id.clone()).collect(),
            ),
        ]
        .concat(),
        ResourceRecord::Subnet(record) => {
            tag(RelationshipKind::MemberOfNetwork, present(&record.vpc_id))
        }
        ResourceRecord::FlowLog(record) => tag(
            RelationshipKind::HasFlowLog,
            present(&record.resource_id)
                .into_iter()
                .filter(|id| infer_node_kind(id).is_some())
                .collect(),
        ),
        _ => Vec::new(),
    }
}

fn actual_edges(operations: &[GraphOperation]) -> Vec<(RelationshipKind, String)> {
    operations
        .iter()
        .filter_map(|op| match op {
            GraphOperation::UpsertEdge {
                relationship, from, ..
            } => Some((*relationship, from.identity.clone())),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The resource's own node is always the first operation
    #[test]
    fn prop_own_node_first(resource in any_resource()) {
        let operations = map_resource(&resource).unwrap().into_operations();

        prop_assert_eq!(
            &operations[0],
            &upsert_node(resource.record.node_kind(), own_identity(&resource)).unwrap()
        );
        prop_assert_eq!(operations.iter().filter(|op| op.is_node()).count() % 2, 1);
    }

    /// Property: Absent or empty references produce no edge; every other
    /// reference produces exactly one, in record order
    #[test]
    fn prop_edges_match_present_references(resource in any_resource()) {
        let operations = map_resource(&resource).unwrap().into_operations();
        let expected = expected_edges(&resource);

        prop_assert_eq!(operations.len(), 1 + 3 * expected.len());
        prop_assert_eq!(actual_edges(&operations), expected);
    }

    /// Property: Both endpoint upserts immediately precede every edge
    #[test]
    fn prop_endpoints_before_edge(resource in any_resource()) {
        let operations = map_resource(&resource).unwrap().into_operations();
        let own = upsert_node(resource.record.node_kind(), own_identity(&resource)).unwrap();

        for (index, operation) in operations.iter().enumerate() {
            if let GraphOperation::UpsertEdge { from, to, .. } = operation {
                prop_assert!(index >= 2);
                prop_assert_eq!(&operations[index - 2], &GraphOperation::UpsertNode(from.clone()));
                prop_assert_eq!(&operations[index - 1], &GraphOperation::UpsertNode(to.clone()));
                prop_assert_eq!(&GraphOperation::UpsertNode(to.clone()), &own);
            }
        }
    }

    /// Property: Mapping is a pure function of its input
    #[test]
    fn prop_mapping_is_deterministic(resource in any_resource()) {
        let first = serde_json::to_vec(&map_resource(&resource).unwrap()).unwrap();
        let second = serde_json::to_vec(&map_resource(&resource).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: A flow log edge exists exactly when the target kind is inferable
    #[test]
    fn prop_flow_log_edge_iff_inferable(target in flow_log_target(), status in "[A-Z]{4,8}") {
        let mapping = map_resource(&Resource::new(
            "fl-1",
            ResourceRecord::FlowLog(FlowLogRecord {
                resource_id: Some(target.clone()),
                flow_log_status: Some(status),
            }),
        ))
        .unwrap();

        match infer_node_kind(&target) {
            Some(kind) => {
                prop_assert_eq!(mapping.operations.len(), 4);
                prop_assert_eq!(&mapping.operations[1], &upsert_node(kind, &target).unwrap());
                prop_assert!(mapping.omitted.is_empty());
            }
            None => {
                prop_assert_eq!(mapping.operations.len(), 1);
                prop_assert_eq!(mapping.omitted.len(), 1);
            }
        }
    }

    /// Property: The graph converges regardless of the order resources arrive in
    #[test]
    fn prop_graph_converges_in_any_order(
        (batches, shuffled) in topology().prop_flat_map(|resources| {
            let batches: Vec<Vec<GraphOperation>> = resources
                .iter()
                .map(|r| map_resource(r).unwrap().into_operations())
                .collect();
            (Just(batches.clone()), Just(batches).prop_shuffle())
        })
    ) {
        let mut in_order = InMemoryGraph::new();
        for batch in &batches {
            in_order.apply_all(batch).unwrap();
        }

        let mut out_of_order = InMemoryGraph::new();
        for batch in &shuffled {
            out_of_order.apply_all(batch).unwrap();
        }

        // Re-applying everything changes nothing
        let before_replay = out_of_order.clone();
        for batch in &batches {
            out_of_order.apply_all(batch).unwrap();
        }

        prop_assert_eq!(&in_order, &out_of_order);
        prop_assert_eq!(before_replay, out_of_order);
    }
}
