//! Typed reserves client.
//!
//! One async method per GraphQL operation. Each method builds the variables
//! object, hands the fixed document to the executor and decodes the named
//! field of the result. Executor errors pass through unchanged.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};
use tracing::{debug, instrument};

use crate::config::ApiConfig;
use crate::core::graphql::{Error, GraphQLExecutor, HttpExecutor, Result};
use crate::core::reserves::models::{Reserve, ReserveInput, ReserveType, ReserveUpdate};
use crate::core::reserves::queries;

/// Default page size for [`ReserveClient::list`].
pub const DEFAULT_LIMIT: u32 = 100;

/// Filter and pagination for [`ReserveClient::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    /// `None` lists every type.
    pub reserve_type: Option<ReserveType>,
    pub skip: u32,
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            reserve_type: None,
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ListQuery {
    #[must_use]
    pub fn of_type(mut self, reserve_type: ReserveType) -> Self {
        self.reserve_type = Some(reserve_type);
        self
    }

    #[must_use]
    pub fn page(mut self, skip: u32, limit: u32) -> Self {
        self.skip = skip;
        self.limit = limit;
        self
    }

    fn variables(&self) -> Value {
        let mut vars = Map::new();
        vars.insert("skip".into(), json!(self.skip));
        vars.insert("limit".into(), json!(self.limit));
        if let Some(t) = self.reserve_type {
            vars.insert("type".into(), json!(t));
        }
        Value::Object(vars)
    }
}

/// Client for the reserves catalog.
#[derive(Debug, Clone)]
pub struct ReserveClient<E = HttpExecutor> {
    executor: E,
}

impl ReserveClient<HttpExecutor> {
    /// Build a client that talks HTTP to `config.base_url`.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Ok(Self::new(HttpExecutor::new(config)?))
    }
}

impl<E: GraphQLExecutor> ReserveClient<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// List reserves, optionally filtered by type.
    #[instrument(skip(self))]
    pub async fn list(&self, query: ListQuery) -> Result<Vec<Reserve>> {
        let data = self
            .executor
            .execute(queries::RESERVES, query.variables())
            .await?;
        let reserves: Vec<Reserve> = take_field(data, "reserves")?;
        debug!(count = reserves.len(), "Fetched reserves");
        Ok(reserves)
    }

    /// Fetch one reserve; `None` when the server has no such id.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Reserve>> {
        let data = self
            .executor
            .execute(queries::RESERVE_BY_ID, json!({ "id": id }))
            .await?;
        take_field(data, "reserve")
    }

    /// Ask the server for `count` random reserves.
    ///
    /// `count` must be positive; zero is rejected without a request.
    #[instrument(skip(self))]
    pub async fn random_sample(
        &self,
        count: u32,
        reserve_type: Option<ReserveType>,
    ) -> Result<Vec<Reserve>> {
        if count == 0 {
            return Err(Error::InvalidArgument(
                "random sample count must be at least 1".to_string(),
            ));
        }

        let mut vars = json!({ "count": count });
        if let Some(t) = reserve_type {
            vars["type"] = json!(t);
        }

        let data = self
            .executor
            .execute(queries::RANDOM_RESERVES, vars)
            .await?;
        take_field(data, "randomReserves")
    }

    /// Reserves whose label matches, as decided by the server.
    #[instrument(skip(self))]
    pub async fn search_by_label(&self, label: &str) -> Result<Vec<Reserve>> {
        let data = self
            .executor
            .execute(queries::RESERVES_BY_LABEL, json!({ "label": label }))
            .await?;
        take_field(data, "reservesByLabel")
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: &ReserveInput) -> Result<Reserve> {
        let data = self
            .executor
            .execute(queries::CREATE_RESERVE, json!({ "input": input }))
            .await?;
        take_field(data, "createReserve")
    }

    /// Apply `input` to reserve `id`; the server returns the full record.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: &ReserveUpdate) -> Result<Reserve> {
        let data = self
            .executor
            .execute(queries::UPDATE_RESERVE, json!({ "id": id, "input": input }))
            .await?;
        take_field(data, "updateReserve")
    }

    /// Returns true iff the server confirmed the removal.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let data = self
            .executor
            .execute(queries::DELETE_RESERVE, json!({ "id": id }))
            .await?;
        take_field(data, "deleteReserve")
    }

    /// Bulk create. Ids the server already knows are skipped; only the
    /// created records come back.
    #[instrument(skip(self, inputs), fields(count = inputs.len()))]
    pub async fn import(&self, inputs: &[ReserveInput]) -> Result<Vec<Reserve>> {
        let data = self
            .executor
            .execute(queries::IMPORT_RESERVES, json!({ "reserves": inputs }))
            .await?;
        take_field(data, "importReserves")
    }
}

/// Move `field` out of the `data` object and decode it.
fn take_field<T: DeserializeOwned>(mut data: Value, field: &str) -> Result<T> {
    let value = data
        .get_mut(field)
        .map(Value::take)
        .ok_or_else(|| Error::MissingField(field.to_string()))?;
    Ok(serde_json::from_value(value)?)
}
