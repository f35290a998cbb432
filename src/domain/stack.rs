use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Card;

pub const MAX_TITLE_LENGTH: usize = 100;

/// A kanban column. `order` is the position among the stacks of the same board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    pub id: i64,
    pub title: String,
    pub board_id: i64,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub deleted_at: i64,
    #[serde(default)]
    pub last_modified: i64,
    #[serde(default)]
    pub staleness_gradient_enabled: bool,
}

impl Stack {
    /// Overwrites the fields present in `patch`, leaving the others untouched.
    pub fn merge(&mut self, patch: &StackPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(board_id) = patch.board_id {
            self.board_id = board_id;
        }
        if let Some(order) = patch.order {
            self.order = order;
        }
        if let Some(deleted_at) = patch.deleted_at {
            self.deleted_at = deleted_at;
        }
        if let Some(last_modified) = patch.last_modified {
            self.last_modified = last_modified;
        }
        if let Some(enabled) = patch.staleness_gradient_enabled {
            self.staleness_gradient_enabled = enabled;
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at > 0
    }
}

impl From<StackPatch> for Stack {
    fn from(patch: StackPatch) -> Self {
        Self {
            id: patch.id,
            title: patch.title.unwrap_or_default(),
            board_id: patch.board_id.unwrap_or_default(),
            order: patch.order.unwrap_or_default(),
            deleted_at: patch.deleted_at.unwrap_or_default(),
            last_modified: patch.last_modified.unwrap_or_default(),
            staleness_gradient_enabled: patch.staleness_gradient_enabled.unwrap_or_default(),
        }
    }
}

/// Partial stack record keyed by id. Absent fields keep their previous value on merge.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackPatch {
    #[serde(default)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staleness_gradient_enabled: Option<bool>,
}

impl From<Stack> for StackPatch {
    fn from(stack: Stack) -> Self {
        Self {
            id: stack.id,
            title: Some(stack.title),
            board_id: Some(stack.board_id),
            order: Some(stack.order),
            deleted_at: Some(stack.deleted_at),
            last_modified: Some(stack.last_modified),
            staleness_gradient_enabled: Some(stack.staleness_gradient_enabled),
        }
    }
}

impl From<&Stack> for StackPatch {
    fn from(stack: &Stack) -> Self {
        stack.clone().into()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStack {
    pub title: String,
    #[serde(default)]
    pub board_id: Option<i64>,
    #[serde(default)]
    pub order: i64,
}

/// Load payload: a stack with its cards nested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackWithCards {
    #[serde(flatten)]
    pub stack: Stack,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl StackWithCards {
    pub fn into_parts(self) -> (Stack, Vec<Card>) {
        (self.stack, self.cards)
    }
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Stack title must not be empty".into());
    }
    if trimmed.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Stack title must be at most {} characters",
            MAX_TITLE_LENGTH
        ));
    }
    Ok(())
}
