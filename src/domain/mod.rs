// Copyright (c) 2025 - Cowboy AI, Inc.
//! Topology Domain Model
//!
//! - [`NodeKind`] / [`RelationshipKind`] - the graph vocabulary
//! - [`Resource`] / [`ResourceRecord`] - the closed set of input records
//! - record structs for the kinds whose mappers read attributes

pub mod kinds;
pub mod records;
pub mod resource;

pub use kinds::{NodeKind, RelationshipKind};
pub use records::{
    FlowLogRecord, GroupIdentifier, InstanceNetworkInterface, InstanceRecord,
    NetworkInterfaceRecord, SecurityGroupRecord, SubnetRecord,
};
pub use resource::{
    read_documents, read_resources, Document, InvalidDocument, Resource, ResourceRecord,
};
