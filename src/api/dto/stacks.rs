use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ReorderStackRequest {
    pub order: i64,
}
