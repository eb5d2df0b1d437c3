//! Mock executors for testing
//!
//! `MockGraphQLExecutor` (mockall) covers call/response expectations.
//! [`GatedExecutor`] lets a test decide *when* each response arrives, which
//! is what overlapping-request tests need.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::core::graphql::{Error, GraphQLExecutor, Result};

/// Executor whose responses are released by the test.
///
/// Each call consumes the next gate registered with [`GatedExecutor::gate`]
/// and waits until the matching sender fires.
pub struct GatedExecutor {
    pending: Mutex<VecDeque<oneshot::Receiver<Result<Value>>>>,
}

impl GatedExecutor {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Register the gate for the next call and return its release handle.
    pub fn gate(&self) -> oneshot::Sender<Result<Value>> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl GraphQLExecutor for GatedExecutor {
    async fn execute(&self, _query: &str, _variables: Value) -> Result<Value> {
        let rx = self
            .pending
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected GraphQL call: no gate registered");
        rx.await
            .unwrap_or_else(|_| Err(Error::MissingField("gate dropped".to_string())))
    }
}
