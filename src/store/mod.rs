//! Client-side stack state and the actions that keep it in step with the Stack API.
//!
//! Mutations are synchronous and run under the state lock; actions await a
//! single API call and commit mutations before or after it. The lock is
//! never held across an `.await`.

pub mod stack;

use std::sync::{Mutex, PoisonError};

use tokio::sync::broadcast;

use crate::client::StackApi;
use crate::domain::{Card, DeckError, NewStack, Stack, StackWithCards};

pub use stack::{StackMove, StackState};

/// Board selection the UI is currently showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardContext {
    pub current_board: Option<i64>,
    pub show_archived: bool,
}

/// Transient user-facing message emitted when an action fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct DeckState {
    pub stacks: StackState,
    pub cards: Vec<Card>,
    pub trashed_stacks: Vec<Stack>,
}

impl DeckState {
    /// Upserts cards by id.
    pub fn set_cards(&mut self, cards: Vec<Card>) {
        for card in cards {
            match self.cards.iter_mut().find(|existing| existing.id == card.id) {
                Some(existing) => *existing = card,
                None => self.cards.push(card),
            }
        }
    }

    pub fn move_stack_to_trash(&mut self, stack: Stack) {
        self.trashed_stacks.push(stack);
    }
}

pub struct Store<A> {
    api: A,
    state: Mutex<DeckState>,
    notifications: broadcast::Sender<Notification>,
}

impl<A: StackApi> Store<A> {
    pub fn new(api: A) -> Self {
        Self::with_state(api, DeckState::default())
    }

    pub fn with_state(api: A, state: DeckState) -> Self {
        let (notifications, _rx) = broadcast::channel(64);
        Self {
            api,
            state: Mutex::new(state),
            notifications,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    /// Runs a mutation against the state.
    pub fn commit<R>(&self, mutation: impl FnOnce(&mut DeckState) -> R) -> R {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        mutation(&mut state)
    }

    /// Reads the state without mutating it.
    pub fn read<R>(&self, getter: impl FnOnce(&DeckState) -> R) -> R {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        getter(&state)
    }

    pub fn snapshot(&self) -> DeckState {
        self.read(|state| state.clone())
    }

    pub fn stacks_by_board(&self, board_id: i64) -> Vec<Stack> {
        self.read(|state| state.stacks.stacks_by_board(board_id).cloned().collect())
    }

    pub fn stack_by_id(&self, id: i64) -> Option<Stack> {
        self.read(|state| state.stacks.stack_by_id(id).cloned())
    }

    fn report(&self, message: &str, err: &DeckError) {
        tracing::error!(error = %err, "{}", message);
        // no subscribers is fine, the notification is transient
        let _ = self.notifications.send(Notification {
            message: message.to_string(),
        });
    }

    // ── Actions ────────────────────────────────────────────────

    /// Reorders locally first, then persists. On failure the move is
    /// replayed with swapped indices, which is not a true inverse when
    /// other reorders of the same board interleaved with this one.
    pub async fn order_stack(&self, mv: StackMove) -> Result<(), DeckError> {
        self.commit(|state| state.stacks.order_stack(&mv));

        match self
            .api
            .reorder_stack(mv.stack.id, mv.added_index as i64)
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                self.report("Failed to change order", &err);
                self.commit(|state| state.stacks.order_stack(&mv.reversed()));
                Err(err)
            }
        }
    }

    pub async fn load_stacks(&self, ctx: &BoardContext, board_id: i64) -> Result<(), DeckError> {
        let result = if ctx.show_archived {
            self.api.load_archived_stacks(board_id).await
        } else {
            self.api.load_stacks(board_id).await
        };

        let payload = result.inspect_err(|err| self.report("Failed to load stacks", err))?;

        tracing::debug!(board_id, count = payload.len(), "Stacks loaded");
        self.commit_payload(payload, false);
        Ok(())
    }

    /// Like `load_stacks` with archived stacks, but stacks already known
    /// locally are left as they are.
    pub async fn load_archived_stacks(&self, board_id: i64) -> Result<(), DeckError> {
        let payload = self
            .api
            .load_archived_stacks(board_id)
            .await
            .inspect_err(|err| self.report("Failed to load archived stacks", err))?;

        tracing::debug!(board_id, count = payload.len(), "Archived stacks loaded");
        self.commit_payload(payload, true);
        Ok(())
    }

    fn commit_payload(&self, payload: Vec<StackWithCards>, skip_known: bool) {
        self.commit(|state| {
            let mut cards = Vec::new();
            for entry in payload {
                let (stack, stack_cards) = entry.into_parts();
                cards.extend(stack_cards);
                if skip_known && state.stacks.stack_by_id(stack.id).is_some() {
                    continue;
                }
                state.stacks.add_stack(stack);
            }
            state.set_cards(cards);
        });
    }

    /// Creates on the server and adds the returned record once it succeeded.
    pub async fn create_stack(
        &self,
        ctx: &BoardContext,
        mut stack: NewStack,
    ) -> Result<Stack, DeckError> {
        let Some(board_id) = ctx.current_board else {
            let err = DeckError::BadRequest("No board selected".into());
            self.report("Failed to create stack", &err);
            return Err(err);
        };
        stack.board_id = Some(board_id);

        let created = self
            .api
            .create_stack(stack)
            .await
            .inspect_err(|err| self.report("Failed to create stack", err))?;

        self.commit(|state| state.stacks.add_stack(created.clone()));
        Ok(created)
    }

    pub async fn delete_stack(&self, stack: &Stack) -> Result<Stack, DeckError> {
        let deleted = self
            .api
            .delete_stack(stack.id)
            .await
            .inspect_err(|err| self.report("Failed to delete stack", err))?;

        self.commit(|state| {
            state.stacks.delete_stack(deleted.id);
            state.move_stack_to_trash(deleted.clone());
        });
        Ok(deleted)
    }

    pub async fn update_stack(&self, stack: &Stack) -> Result<Stack, DeckError> {
        let updated = self
            .api
            .update_stack(stack)
            .await
            .inspect_err(|err| self.report("Failed to update stack", err))?;

        self.commit(|state| state.stacks.update_stack(updated.clone()));
        Ok(updated)
    }

    /// Returns `Ok(None)` when the stack is not known locally.
    pub async fn update_stack_staleness_gradient(
        &self,
        stack_id: i64,
        enabled: bool,
    ) -> Result<Option<Stack>, DeckError> {
        let Some(stack) = self.stack_by_id(stack_id) else {
            tracing::debug!(stack_id, "Stack not loaded, staleness toggle ignored");
            return Ok(None);
        };

        let updated = Stack {
            staleness_gradient_enabled: enabled,
            ..stack
        };
        self.update_stack(&updated).await.map(Some)
    }
}
