use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::stack::validate_title;
use crate::domain::{Card, DeckError, NewStack, Stack, StackPatch, StackWithCards};

pub struct StackService;

impl StackService {
    // ── Queries ────────────────────────────────────────────────

    pub async fn get_stack(pool: &SqlitePool, id: i64) -> Result<Stack, DeckError> {
        let stack: Stack = sqlx::query_as("SELECT * FROM deck_stacks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| DeckError::NotFound(format!("Stack not found: {}", id)))?;

        Ok(stack)
    }

    /// Live stacks of a board, each with its live non-archived cards.
    pub async fn find_all(pool: &SqlitePool, board_id: i64) -> Result<Vec<StackWithCards>, DeckError> {
        let stacks: Vec<Stack> = sqlx::query_as(
            r#"SELECT * FROM deck_stacks WHERE board_id = ? AND deleted_at = 0 ORDER BY "order" ASC, id ASC"#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        let mut result = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let cards = Self::cards_of(pool, stack.id, false).await?;
            result.push(StackWithCards { stack, cards });
        }

        Ok(result)
    }

    /// Live stacks of a board that hold archived cards, each with those cards.
    pub async fn find_all_archived(
        pool: &SqlitePool,
        board_id: i64,
    ) -> Result<Vec<StackWithCards>, DeckError> {
        let stacks: Vec<Stack> = sqlx::query_as(
            r#"
            SELECT s.* FROM deck_stacks s
            WHERE s.board_id = ? AND s.deleted_at = 0
              AND EXISTS (
                SELECT 1 FROM deck_cards c
                WHERE c.stack_id = s.id AND c.archived = 1 AND c.deleted_at = 0
              )
            ORDER BY s."order" ASC, s.id ASC
            "#,
        )
        .bind(board_id)
        .fetch_all(pool)
        .await?;

        let mut result = Vec::with_capacity(stacks.len());
        for stack in stacks {
            let cards = Self::cards_of(pool, stack.id, true).await?;
            result.push(StackWithCards { stack, cards });
        }

        Ok(result)
    }

    async fn cards_of(pool: &SqlitePool, stack_id: i64, archived: bool) -> Result<Vec<Card>, DeckError> {
        let cards: Vec<Card> = sqlx::query_as(
            r#"SELECT * FROM deck_cards WHERE stack_id = ? AND archived = ? AND deleted_at = 0 ORDER BY "order" ASC, id ASC"#,
        )
        .bind(stack_id)
        .bind(archived)
        .fetch_all(pool)
        .await?;

        Ok(cards)
    }

    // ── Stack CRUD ─────────────────────────────────────────────

    pub async fn create_stack(pool: &SqlitePool, req: NewStack) -> Result<Stack, DeckError> {
        validate_title(&req.title).map_err(DeckError::BadRequest)?;
        let board_id = req
            .board_id
            .ok_or_else(|| DeckError::BadRequest("boardId is required".into()))?;
        let now = Utc::now().timestamp();

        let stack: Stack = sqlx::query_as(
            r#"INSERT INTO deck_stacks (title, board_id, "order", deleted_at, last_modified) VALUES (?, ?, ?, 0, ?) RETURNING *"#,
        )
        .bind(req.title.trim())
        .bind(board_id)
        .bind(req.order)
        .bind(now)
        .fetch_one(pool)
        .await?;

        tracing::debug!(stack_id = stack.id, board_id, "Stack created");
        Ok(stack)
    }

    pub async fn update_stack(
        pool: &SqlitePool,
        id: i64,
        patch: StackPatch,
    ) -> Result<Stack, DeckError> {
        let mut stack = Self::get_stack(pool, id).await?;
        stack.merge(&patch);
        validate_title(&stack.title).map_err(DeckError::BadRequest)?;

        let stack: Stack = sqlx::query_as(
            r#"UPDATE deck_stacks SET title = ?, board_id = ?, "order" = ?, deleted_at = ?, staleness_gradient_enabled = ?, last_modified = ? WHERE id = ? RETURNING *"#,
        )
        .bind(stack.title.trim())
        .bind(stack.board_id)
        .bind(stack.order)
        .bind(stack.deleted_at)
        .bind(stack.staleness_gradient_enabled)
        .bind(Utc::now().timestamp())
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(stack)
    }

    /// Soft delete: the stack stays in the table with `deleted_at` set.
    pub async fn delete_stack(pool: &SqlitePool, id: i64) -> Result<Stack, DeckError> {
        let now = Utc::now().timestamp();

        let stack: Stack = sqlx::query_as(
            "UPDATE deck_stacks SET deleted_at = ?, last_modified = ? WHERE id = ? AND deleted_at = 0 RETURNING *",
        )
        .bind(now)
        .bind(now)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DeckError::NotFound(format!("Stack not found: {}", id)))?;

        tracing::debug!(stack_id = id, "Stack moved to trash");
        Ok(stack)
    }

    /// Moves a stack to index `order` among its board's live stacks and renumbers them densely.
    pub async fn reorder_stack(pool: &SqlitePool, id: i64, order: i64) -> Result<Vec<Stack>, DeckError> {
        let mut tx = pool.begin().await?;

        let moved: Stack = sqlx::query_as("SELECT * FROM deck_stacks WHERE id = ? AND deleted_at = 0")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DeckError::NotFound(format!("Stack not found: {}", id)))?;

        let mut siblings: Vec<Stack> = sqlx::query_as(
            r#"SELECT * FROM deck_stacks WHERE board_id = ? AND deleted_at = 0 AND id != ? ORDER BY "order" ASC, id ASC"#,
        )
        .bind(moved.board_id)
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let index = order.clamp(0, siblings.len() as i64) as usize;
        siblings.insert(index, moved);

        let now = Utc::now().timestamp();
        for (position, stack) in siblings.iter_mut().enumerate() {
            let position = position as i64;
            if stack.order == position && stack.id != id {
                continue;
            }
            stack.order = position;
            stack.last_modified = now;
            sqlx::query(r#"UPDATE deck_stacks SET "order" = ?, last_modified = ? WHERE id = ?"#)
                .bind(position)
                .bind(now)
                .bind(stack.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(stack_id = id, order = index, "Stack reordered");
        Ok(siblings)
    }
}
