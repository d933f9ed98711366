//! Board persistence
//!
//! This module contains:
//! - The [`BoardStore`] interface consumed by the evolution controller
//! - An in-memory store for tests and embedding
//! - A JSON file store used by the command-line tool
//! - The persisted record layout shared by durable stores

/// JSON file backed store
pub mod file;
/// Volatile in-memory store
pub mod memory;
/// Persisted board layout
pub mod record;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use record::BoardRecord;

use crate::board::{Board, BoardId};
use crate::io::error::Result;

/// Load and save boards by identifier
///
/// Stores hold complete boards only; a failed `save` must leave the
/// previously stored board untouched. Stores do not coordinate concurrent
/// writers to the same identifier: the last successful `save` wins.
pub trait BoardStore {
    /// Fetch a board, or `None` when the identifier is unknown
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read
    fn load(&self, id: BoardId) -> Result<Option<Board>>;

    /// Insert or replace a board under its identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written
    fn save(&mut self, board: &Board) -> Result<()>;

    /// All stored boards ordered by identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read
    fn list(&self) -> Result<Vec<Board>>;

    /// Remove a board, reporting whether it existed
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written
    fn delete(&mut self, id: BoardId) -> Result<bool>;
}

impl<S: BoardStore + ?Sized> BoardStore for &mut S {
    fn load(&self, id: BoardId) -> Result<Option<Board>> {
        (**self).load(id)
    }

    fn save(&mut self, board: &Board) -> Result<()> {
        (**self).save(board)
    }

    fn list(&self) -> Result<Vec<Board>> {
        (**self).list()
    }

    fn delete(&mut self, id: BoardId) -> Result<bool> {
        (**self).delete(id)
    }
}
