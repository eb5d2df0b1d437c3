//! Lancer Reserves - catalog client
//!
//! GraphQL client for the Lancer reserves API plus a local store that
//! mirrors the catalog and tracks the UI flags of the catalog screens.

pub mod config;
pub mod core;

#[cfg(test)]
mod tests;

pub use crate::config::AppConfig;
pub use crate::core::graphql::{Error, ErrorKind, GraphQLExecutor, HttpExecutor, Result};
pub use crate::core::reserves::{
    ListQuery, LoadOutcome, Reserve, ReserveClient, ReserveInput, ReserveStore, ReserveType,
    ReserveUpdate,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
