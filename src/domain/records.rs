// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Records
//!
//! Raw resource attributes as returned by the EC2 describe APIs. Field names
//! follow the provider's PascalCase JSON so records can be deserialized from
//! API output without reshaping. Only the fields the mappers read are
//! modelled; everything else in the document is ignored.
//!
//! The describe APIs send `null` for empty lists and unset IDs. Those decode
//! to the field's default, the same as an absent field.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reference to a security group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupIdentifier {
    /// Security group ID (`sg-...`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub group_id: String,
    /// Security group name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl GroupIdentifier {
    pub fn new(group_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            group_name: None,
        }
    }
}

/// Network interface attached to an instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceNetworkInterface {
    /// Network interface ID (`eni-...`)
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_interface_id: String,
}

impl InstanceNetworkInterface {
    pub fn new(network_interface_id: impl Into<String>) -> Self {
        Self {
            network_interface_id: network_interface_id.into(),
        }
    }
}

/// Compute instance record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InstanceRecord {
    /// Network the instance is launched in
    pub vpc_id: Option<String>,
    /// Subnet of the primary interface
    pub subnet_id: Option<String>,
    /// Attached network interfaces, in attachment order
    #[serde(deserialize_with = "null_as_default")]
    pub network_interfaces: Vec<InstanceNetworkInterface>,
    /// Security groups applied to the instance
    #[serde(deserialize_with = "null_as_default")]
    pub security_groups: Vec<GroupIdentifier>,
}

/// Security group record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SecurityGroupRecord {
    pub vpc_id: Option<String>,
}

/// Network interface record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NetworkInterfaceRecord {
    pub vpc_id: Option<String>,
    /// Security groups applied to the interface
    #[serde(deserialize_with = "null_as_default")]
    pub groups: Vec<GroupIdentifier>,
}

/// Subnet record
///
/// Subnets are keyed by `SubnetId` rather than the resource name, so that
/// references from instances land on the same node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SubnetRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub subnet_id: String,
    pub vpc_id: Option<String>,
}

/// Flow log record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct FlowLogRecord {
    /// ID of the observed VPC, subnet or network interface
    pub resource_id: Option<String>,
    /// Delivery status (`ACTIVE`, ...)
    pub flow_log_status: Option<String>,
}
