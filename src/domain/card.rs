use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: i64,
    pub title: String,
    pub stack_id: i64,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub deleted_at: i64,
}
