//! Crate-internal test suites.
//!
//! Unit tests live beside their modules; this tree holds shared fixtures,
//! mock executors, store scenario tests and property tests.

pub mod common;
mod mocks;
mod property;
