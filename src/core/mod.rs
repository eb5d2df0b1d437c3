pub mod graphql;
pub mod logging;
pub mod reserves;
