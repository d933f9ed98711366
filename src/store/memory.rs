//! Volatile board store backed by an ordered map

use std::collections::BTreeMap;

use crate::board::{Board, BoardId};
use crate::io::error::Result;
use crate::store::BoardStore;

/// Volatile store keeping owned copies of each board
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    boards: BTreeMap<BoardId, Board>,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored boards
    pub fn len(&self) -> usize {
        self.boards.len()
    }

    /// Whether no boards are stored
    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

impl BoardStore for InMemoryStore {
    fn load(&self, id: BoardId) -> Result<Option<Board>> {
        Ok(self.boards.get(&id).cloned())
    }

    fn save(&mut self, board: &Board) -> Result<()> {
        self.boards.insert(board.id(), board.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Board>> {
        Ok(self.boards.values().cloned().collect())
    }

    fn delete(&mut self, id: BoardId) -> Result<bool> {
        Ok(self.boards.remove(&id).is_some())
    }
}
