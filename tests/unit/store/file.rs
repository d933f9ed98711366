//! Tests for the JSON file board store

#[cfg(test)]
mod tests {
    use lifeboard::board::validation::from_matrix;
    use lifeboard::engine::rules::step;
    use lifeboard::{Board, BoardError, BoardId, BoardStore, ErrorKind, JsonFileStore};
    use std::fs;
    use tempfile::TempDir;

    fn board() -> Board {
        from_matrix(&[[true, true, false], [true, false, false], [false, false, false]]).unwrap()
    }

    // Tests a missing file behaves as an empty store
    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("boards.json"));

        assert!(store.list().unwrap().is_empty());
        assert_eq!(store.load(BoardId::from_u128(9)).unwrap(), None);
    }

    // Tests boards survive reopening the store
    // Verified by skipping the rename of the staging file
    #[test]
    fn test_boards_persist_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("boards.json");
        let board = board();

        JsonFileStore::new(&path).save(&board).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load(board.id()).unwrap(), Some(board));
    }

    // Tests separate handles on one file see each other's saves and leave no staging files
    #[test]
    fn test_saves_leave_only_the_store_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boards.json");
        let mut first = JsonFileStore::new(&path);
        let mut second = JsonFileStore::new(&path);
        let a = board();
        let b = board();

        first.save(&a).unwrap();
        second.save(&b).unwrap();
        first.save(&step(a.clone())).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("boards.json")]);
        assert_eq!(second.list().unwrap().len(), 2);
        assert_eq!(second.load(a.id()).unwrap().unwrap().generation(), 2);
    }

    // Tests saving an existing identifier replaces its record
    #[test]
    fn test_save_replaces_existing_record() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("boards.json"));
        let other = board();
        let board = board();
        store.save(&other).unwrap();
        store.save(&board).unwrap();

        let next = step(board);
        store.save(&next).unwrap();

        let boards = store.list().unwrap();
        assert_eq!(boards.len(), 2);
        assert_eq!(store.load(next.id()).unwrap(), Some(next));
        assert_eq!(store.load(other.id()).unwrap(), Some(other));
    }

    #[test]
    fn test_delete_removes_record() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonFileStore::new(dir.path().join("boards.json"));
        let board = board();
        store.save(&board).unwrap();

        assert!(store.delete(board.id()).unwrap());
        assert!(!store.delete(board.id()).unwrap());
        assert_eq!(store.load(board.id()).unwrap(), None);
    }

    // Tests malformed JSON is reported as a storage failure
    #[test]
    fn test_malformed_file_is_storage_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boards.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);

        let err = store.list().unwrap_err();

        assert!(matches!(err, BoardError::Serialization { .. }));
        assert_eq!(err.kind(), ErrorKind::Storage);
    }

    // Tests a tampered population is caught on load
    #[test]
    fn test_tampered_record_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("boards.json");
        let mut store = JsonFileStore::new(&path);
        let board = board();
        store.save(&board).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        fs::write(&path, contents.replace("\"population\": 3", "\"population\": 7")).unwrap();

        let err = store.load(board.id()).unwrap_err();
        assert!(matches!(err, BoardError::Storage { .. }));
    }
}
