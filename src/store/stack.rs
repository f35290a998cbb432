use crate::domain::{Stack, StackPatch};

/// A drag of `stack` from `removed_index` to `added_index` within its board's
/// order-sorted stacks.
#[derive(Debug, Clone, PartialEq)]
pub struct StackMove {
    pub stack: Stack,
    pub removed_index: usize,
    pub added_index: usize,
}

impl StackMove {
    /// The same move with the indices swapped. Only an inverse while nothing
    /// else reordered the board in between.
    pub fn reversed(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            removed_index: self.added_index,
            added_index: self.removed_index,
        }
    }
}

/// Local stack records. Their position in the vector carries no meaning.
#[derive(Debug, Clone, Default)]
pub struct StackState {
    stacks: Vec<Stack>,
}

impl StackState {
    pub fn new(stacks: Vec<Stack>) -> Self {
        Self { stacks }
    }

    pub fn all(&self) -> &[Stack] {
        &self.stacks
    }

    // ── Getters ────────────────────────────────────────────────

    /// Stacks of `board_id` sorted by `order`. Recomputed on every call.
    pub fn stacks_by_board(&self, board_id: i64) -> impl Iterator<Item = &Stack> + '_ {
        let mut stacks: Vec<&Stack> = self
            .stacks
            .iter()
            .filter(|stack| stack.board_id == board_id)
            .collect();
        stacks.sort_by_key(|stack| stack.order);
        stacks.into_iter()
    }

    pub fn stack_by_id(&self, id: i64) -> Option<&Stack> {
        self.stacks.iter().find(|stack| stack.id == id)
    }

    fn position_of(&self, id: i64) -> Option<usize> {
        self.stacks.iter().position(|stack| stack.id == id)
    }

    // ── Mutations ──────────────────────────────────────────────

    /// Merges into the record with the same id, or appends a new one.
    pub fn add_stack(&mut self, stack: impl Into<StackPatch>) {
        let patch = stack.into();
        match self.position_of(patch.id) {
            Some(index) => self.stacks[index].merge(&patch),
            None => self.stacks.push(Stack::from(patch)),
        }
    }

    /// Merges into the record with the same id. Unknown ids are ignored.
    pub fn update_stack(&mut self, stack: impl Into<StackPatch>) {
        let patch = stack.into();
        if let Some(index) = self.position_of(patch.id) {
            self.stacks[index].merge(&patch);
        }
    }

    pub fn delete_stack(&mut self, id: i64) {
        if let Some(index) = self.position_of(id) {
            self.stacks.remove(index);
        }
    }

    /// Splices the board's sorted stacks and renumbers them `0..n`.
    pub fn order_stack(&mut self, mv: &StackMove) {
        let mut indices: Vec<usize> = (0..self.stacks.len())
            .filter(|&i| self.stacks[i].board_id == mv.stack.board_id)
            .collect();
        indices.sort_by_key(|&i| self.stacks[i].order);

        if mv.removed_index >= indices.len() {
            tracing::debug!(
                board_id = mv.stack.board_id,
                removed_index = mv.removed_index,
                "Reorder index out of range, ignoring"
            );
            return;
        }

        let moved = indices.remove(mv.removed_index);
        let added_index = mv.added_index.min(indices.len());
        indices.insert(added_index, moved);

        for (position, &index) in indices.iter().enumerate() {
            self.stacks[index].order = position as i64;
        }
    }
}
