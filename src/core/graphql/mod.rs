//! GraphQL transport layer.

pub mod error;
pub mod executor;

pub use error::{Error, ErrorKind, Result};
pub use executor::{
    operation_name, GraphQLErrorEntry, GraphQLExecutor, GraphQLResponse, HttpExecutor,
};

#[cfg(test)]
pub use executor::MockGraphQLExecutor;
