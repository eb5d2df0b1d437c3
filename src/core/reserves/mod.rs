//! Reserves catalog: wire models, GraphQL documents, the typed client and
//! the local store.

pub mod client;
pub mod models;
pub mod queries;
pub mod store;

pub use client::{ListQuery, ReserveClient, DEFAULT_LIMIT};
pub use models::{
    format_date, generate_reserve_id, Action, Bonus, DamageValue, Deployable, RangeValue,
    Reserve, ReserveInput, ReserveType, ReserveUpdate, Synergy,
};
pub use store::{
    LoadOutcome, ReserveStats, ReserveStore, StoreAction, StoreError, StoreState,
};
