// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Envelope
//!
//! A [`Resource`] pairs the resource's name with its kind-specific record.
//! The set of kinds is closed; each variant of [`ResourceRecord`] has exactly
//! one mapping procedure.
//!
//! On the wire a resource is a flat JSON object tagged by `kind`:
//!
//! ```json
//! { "name": "i-0abc", "kind": "instance", "VpcId": "vpc-1", "SecurityGroups": [] }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{BufRead, Read};

use super::kinds::NodeKind;
use super::records::{
    FlowLogRecord, InstanceRecord, NetworkInterfaceRecord, SecurityGroupRecord, SubnetRecord,
};
use crate::errors::{GraphError, GraphResult};

/// Kind-specific resource record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceRecord {
    Account,
    Instance(InstanceRecord),
    Vpc,
    SecurityGroup(SecurityGroupRecord),
    NetworkInterface(NetworkInterfaceRecord),
    Subnet(SubnetRecord),
    EipAddress,
    NatGateway,
    RouteTable,
    Image,
    Snapshot,
    FlowLog(FlowLogRecord),
    Volume,
    VpnGateway,
    PeeringConnection,
}

impl ResourceRecord {
    /// Wire name of this resource kind
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Account => "account",
            Self::Instance(_) => "instance",
            Self::Vpc => "vpc",
            Self::SecurityGroup(_) => "security_group",
            Self::NetworkInterface(_) => "network_interface",
            Self::Subnet(_) => "subnet",
            Self::EipAddress => "eip_address",
            Self::NatGateway => "nat_gateway",
            Self::RouteTable => "route_table",
            Self::Image => "image",
            Self::Snapshot => "snapshot",
            Self::FlowLog(_) => "flow_log",
            Self::Volume => "volume",
            Self::VpnGateway => "vpn_gateway",
            Self::PeeringConnection => "peering_connection",
        }
    }

    /// Kind of the node this record maps to
    pub fn node_kind(&self) -> NodeKind {
        match self {
            Self::Account => NodeKind::Account,
            Self::Instance(_) => NodeKind::Instance,
            Self::Vpc => NodeKind::Network,
            Self::SecurityGroup(_) => NodeKind::SecurityGroup,
            Self::NetworkInterface(_) => NodeKind::NetworkInterface,
            Self::Subnet(_) => NodeKind::Subnet,
            Self::EipAddress => NodeKind::ElasticIp,
            Self::NatGateway => NodeKind::NatGateway,
            Self::RouteTable => NodeKind::RouteTable,
            Self::Image => NodeKind::Image,
            Self::Snapshot => NodeKind::Snapshot,
            Self::FlowLog(_) => NodeKind::FlowLog,
            Self::Volume => NodeKind::Volume,
            Self::VpnGateway => NodeKind::VpnGateway,
            Self::PeeringConnection => NodeKind::PeeringConnection,
        }
    }
}

/// A named resource as handed over by the record-fetch layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Provider identifier of the resource
    pub name: String,
    #[serde(flatten)]
    pub record: ResourceRecord,
}

impl Resource {
    pub fn new(name: impl Into<String>, record: ResourceRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}

impl TryFrom<Value> for Resource {
    type Error = GraphError;

    fn try_from(document: Value) -> GraphResult<Self> {
        Ok(serde_json::from_value(document)?)
    }
}

/// An input document that did not decode into a [`Resource`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidDocument {
    /// 1-based line number in the input
    pub line: usize,
    /// `name` of the document, when it had one
    pub name: Option<String>,
    /// `kind` of the document, when it had one
    pub kind: Option<String>,
    pub reason: String,
}

impl InvalidDocument {
    fn new(line: usize, document: Option<&Value>, reason: impl ToString) -> Self {
        let field = |key: &str| {
            document
                .and_then(|d| d.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            line,
            name: field("name"),
            kind: field("kind"),
            reason: reason.to_string(),
        }
    }
}

/// One line of a resource stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Document {
    Resource(Resource),
    Invalid(InvalidDocument),
}

impl From<Resource> for Document {
    fn from(resource: Resource) -> Self {
        Document::Resource(resource)
    }
}

/// Read newline-delimited resource documents, one result per line
///
/// Each line is decoded on its own: a malformed line or an undecodable
/// resource becomes [`Document::Invalid`] and reading goes on. Blank lines
/// are ignored. Only I/O failures end the read.
pub fn read_documents<R: BufRead>(reader: R) -> GraphResult<Vec<Document>> {
    let mut documents = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let number = index + 1;
        let document = match serde_json::from_str::<Value>(&line) {
            Ok(value) => match Resource::try_from(value.clone()) {
                Ok(resource) => Document::Resource(resource),
                Err(e) => Document::Invalid(InvalidDocument::new(number, Some(&value), e)),
            },
            Err(e) => Document::Invalid(InvalidDocument::new(number, None, e)),
        };
        documents.push(document);
    }
    Ok(documents)
}

/// Read a stream of whitespace-separated JSON resource documents
///
/// Parsing stops at the first malformed document; [`read_documents`] reads
/// past them.
pub fn read_resources<R: Read>(reader: R) -> GraphResult<Vec<Resource>> {
    let mut resources = Vec::new();
    for resource in serde_json::Deserializer::from_reader(reader).into_iter::<Resource>() {
        resources.push(resource?);
    }
    Ok(resources)
}
