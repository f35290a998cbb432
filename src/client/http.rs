use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::domain::{DeckError, NewStack, Stack, StackWithCards};

use super::StackApi;

#[derive(Clone, Debug)]
pub struct HttpStackApi {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpStackApi {
    /// `base_url` is the API root, e.g. `http://localhost:21547/api`.
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/stacks{}", self.base_url, path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, DeckError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        // error bodies look like {"error": "...", "status": 404}
        let message = match response.json::<Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };

        Err(DeckError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl StackApi for HttpStackApi {
    async fn load_stacks(&self, board_id: i64) -> Result<Vec<StackWithCards>, DeckError> {
        let response = self
            .http_client
            .get(self.url(&format!("/{}", board_id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn load_archived_stacks(&self, board_id: i64) -> Result<Vec<StackWithCards>, DeckError> {
        let response = self
            .http_client
            .get(self.url(&format!("/{}/archived", board_id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn create_stack(&self, stack: NewStack) -> Result<Stack, DeckError> {
        let response = self
            .http_client
            .post(self.url(""))
            .json(&stack)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn update_stack(&self, stack: &Stack) -> Result<Stack, DeckError> {
        let response = self
            .http_client
            .put(self.url(&format!("/{}", stack.id)))
            .json(stack)
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn delete_stack(&self, id: i64) -> Result<Stack, DeckError> {
        let response = self
            .http_client
            .delete(self.url(&format!("/{}", id)))
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn reorder_stack(&self, id: i64, order: i64) -> Result<Vec<Stack>, DeckError> {
        let response = self
            .http_client
            .put(self.url(&format!("/{}/reorder", id)))
            .json(&json!({ "order": order }))
            .send()
            .await?;
        Self::decode(response).await
    }
}
