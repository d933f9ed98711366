//! Board store persisted as a JSON document on disk
//!
//! The whole collection is read for every operation and rewritten through a
//! uniquely named temporary file in the same directory, which then replaces
//! the store in one rename. An interrupted write never leaves a half-written
//! store behind.
//!
//! The store is single-process: each save is a read-modify-write of the whole
//! file with no locking, so two processes saving at the same time can lose
//! one of the updates.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::board::{Board, BoardId};
use crate::io::error::{BoardError, Result};
use crate::store::BoardStore;
use crate::store::record::BoardRecord;

/// Durable store holding every board as a [`BoardRecord`] in one JSON file
///
/// Safe for one process at a time; concurrent writers are not coordinated.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open a store at `path`; the file is created on the first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_records(&self) -> Result<Vec<BoardRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| BoardError::FileSystem {
            path: self.path.clone(),
            operation: "read store",
            source: e,
        })?;

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|e| BoardError::Serialization {
            path: self.path.clone(),
            source: e,
        })
    }

    fn write_records(&self, records: &[BoardRecord]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;

        let json =
            serde_json::to_string_pretty(records).map_err(|e| BoardError::Serialization {
                path: self.path.clone(),
                source: e,
            })?;

        let mut staging = NamedTempFile::new_in(parent).map_err(|e| BoardError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create staging file",
            source: e,
        })?;
        staging
            .write_all(json.as_bytes())
            .and_then(|()| staging.as_file().sync_all())
            .map_err(|e| BoardError::FileSystem {
                path: staging.path().to_path_buf(),
                operation: "write store",
                source: e,
            })?;

        staging
            .persist(&self.path)
            .map(drop)
            .map_err(|e| BoardError::FileSystem {
                path: self.path.clone(),
                operation: "replace store",
                source: e.error,
            })
    }
}

impl BoardStore for JsonFileStore {
    fn load(&self, id: BoardId) -> Result<Option<Board>> {
        let key = id.to_string();
        self.read_records()?
            .into_iter()
            .find(|record| record.id == key)
            .map(BoardRecord::into_board)
            .transpose()
    }

    fn save(&mut self, board: &Board) -> Result<()> {
        let mut records = self.read_records()?;
        let record = BoardRecord::from(board);

        match records.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }

        self.write_records(&records)
    }

    fn list(&self) -> Result<Vec<Board>> {
        let mut boards = self
            .read_records()?
            .into_iter()
            .map(BoardRecord::into_board)
            .collect::<Result<Vec<_>>>()?;
        boards.sort_by_key(Board::id);
        Ok(boards)
    }

    fn delete(&mut self, id: BoardId) -> Result<bool> {
        let key = id.to_string();
        let mut records = self.read_records()?;
        let before = records.len();
        records.retain(|record| record.id != key);

        if records.len() == before {
            return Ok(false);
        }

        self.write_records(&records)?;
        Ok(true)
    }
}
