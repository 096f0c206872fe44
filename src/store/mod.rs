// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-process graph staging

pub mod memory;

pub use memory::{EdgeKey, InMemoryGraph, SharedGraph};
