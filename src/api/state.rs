use sqlx::SqlitePool;

use crate::domain::DeckError;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: Option<SqlitePool>,
}

impl AppState {
    pub fn new(db: Option<SqlitePool>) -> Self {
        Self { db }
    }

    pub fn require_db(&self) -> Result<&SqlitePool, DeckError> {
        self.db
            .as_ref()
            .ok_or_else(|| DeckError::Internal("Database not available".into()))
    }
}
