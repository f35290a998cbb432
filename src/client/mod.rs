//! Client side of the Stack API consumed by the store.

pub mod http;

use std::future::Future;

use crate::domain::{DeckError, NewStack, Stack, StackWithCards};

pub use http::HttpStackApi;

/// Remote stack persistence. Each call is one request/response round trip and
/// returns the server's version of the record.
pub trait StackApi: Send + Sync {
    fn load_stacks(
        &self,
        board_id: i64,
    ) -> impl Future<Output = Result<Vec<StackWithCards>, DeckError>> + Send;

    fn load_archived_stacks(
        &self,
        board_id: i64,
    ) -> impl Future<Output = Result<Vec<StackWithCards>, DeckError>> + Send;

    fn create_stack(&self, stack: NewStack) -> impl Future<Output = Result<Stack, DeckError>> + Send;

    fn update_stack(&self, stack: &Stack) -> impl Future<Output = Result<Stack, DeckError>> + Send;

    fn delete_stack(&self, id: i64) -> impl Future<Output = Result<Stack, DeckError>> + Send;

    fn reorder_stack(
        &self,
        id: i64,
        order: i64,
    ) -> impl Future<Output = Result<Vec<Stack>, DeckError>> + Send;
}
