//! Common Test Utilities
//!
//! Shared fixtures for building reserves and GraphQL payloads.

pub mod fixtures;

pub use fixtures::*;
