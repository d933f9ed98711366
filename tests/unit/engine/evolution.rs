//! Tests for single-step, N-step and stabilization operations over a store

#[cfg(test)]
mod tests {
    use lifeboard::io::configuration::DEFAULT_ATTEMPTS;
    use lifeboard::io::error::storage_error;
    use lifeboard::{
        Board, BoardError, BoardId, BoardStore, ErrorKind, EvolutionController, InMemoryStore,
        Result,
    };
    use proptest::prelude::*;

    /// In-memory store whose saves can be switched to fail
    #[derive(Default)]
    struct FlakyStore {
        inner: InMemoryStore,
        fail_saves: bool,
        saves: usize,
    }

    impl BoardStore for FlakyStore {
        fn load(&self, id: BoardId) -> Result<Option<Board>> {
            self.inner.load(id)
        }

        fn save(&mut self, board: &Board) -> Result<()> {
            if self.fail_saves {
                return Err(storage_error("save", &"disk full"));
            }
            self.saves += 1;
            self.inner.save(board)
        }

        fn list(&self) -> Result<Vec<Board>> {
            self.inner.list()
        }

        fn delete(&mut self, id: BoardId) -> Result<bool> {
            self.inner.delete(id)
        }
    }

    fn matrix(rows: &[&str]) -> Vec<Vec<bool>> {
        rows.iter()
            .map(|row| row.chars().map(|c| c == '#').collect())
            .collect()
    }

    fn controller() -> EvolutionController<InMemoryStore> {
        EvolutionController::with_seed(InMemoryStore::new(), 42)
    }

    const BLOCK_SEED: [&str; 6] = [
        "......", ".##...", ".#....", "......", "......", "......",
    ];

    const BEACON: [&str; 6] = [
        "......", ".##...", ".##...", "...##.", "...##.", "......",
    ];

    const GLIDER: [&str; 6] = [
        "......", "...#..", ".#.#..", "..##..", "......", "......",
    ];

    // Tests creation persists the board at generation 1
    #[test]
    fn test_create_persists_board() {
        let mut controller = controller();

        let board = controller.create_from_matrix(&matrix(&BEACON)).unwrap();

        assert_eq!(board.generation(), 1);
        assert_eq!(board.population(), 8);
        assert_eq!(controller.get(board.id()).unwrap(), board);
    }

    // Tests random creation persists and honours the seed
    #[test]
    fn test_create_random_is_seeded() {
        let mut first = controller();
        let mut second = controller();

        let a = first.create_random(12, 9).unwrap();
        let b = second.create_random(12, 9).unwrap();

        assert_eq!(a.cells(), b.cells());
        assert_eq!(first.get(a.id()).unwrap(), a);
        assert!(matches!(
            first.create_random(2, 9),
            Err(BoardError::DimensionsTooSmall { .. })
        ));
        assert_eq!(first.store().len(), 1);
    }

    // Tests unknown identifiers are reported as not found by every operation
    #[test]
    fn test_unknown_board_is_not_found() {
        let mut controller = controller();
        let id = BoardId::from_u128(7);

        for result in [
            controller.get(id),
            controller.next(id),
            controller.advance(id, 3),
            controller.stabilize(id, 3),
        ] {
            let err = result.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::NotFound);
            assert!(err.to_string().contains("board not found"));
        }
        assert_eq!(controller.delete(id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    // Tests a single step persists generation + 1
    // Verified by skipping the save in next
    #[test]
    fn test_next_persists_one_generation() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&BEACON)).unwrap().id();

        let board = controller.next(id).unwrap();

        assert_eq!(board.generation(), 2);
        assert_eq!(board.population(), 6);
        assert_eq!(controller.get(id).unwrap(), board);
    }

    // Tests N-step advance applies exactly N steps, each feeding the next
    // Verified by stepping the loaded board N times without chaining
    #[test]
    fn test_advance_moves_glider_diagonally() {
        let mut controller = controller();
        let seed = controller.create_from_matrix(&matrix(&GLIDER)).unwrap();

        let board = controller.advance(seed.id(), 4).unwrap();

        let shifted: Vec<(usize, usize)> = seed
            .alive_positions()
            .into_iter()
            .map(|(row, column)| (row + 1, column + 1))
            .collect();
        assert_eq!(board.alive_positions(), shifted);
        assert_eq!(board.population(), 5);
        assert_eq!(board.generation(), 5);
        assert_eq!(controller.get(seed.id()).unwrap(), board);
    }

    // Tests advance only saves the final generation
    #[test]
    fn test_advance_saves_once() {
        let mut store = FlakyStore::default();
        let id = {
            let mut controller = EvolutionController::with_seed(&mut store, 1);
            let id = controller.create_from_matrix(&matrix(&GLIDER)).unwrap().id();
            controller.advance(id, 25).unwrap();
            id
        };

        assert_eq!(store.saves, 2);
        assert_eq!(store.load(id).unwrap().unwrap().generation(), 26);
    }

    // Tests zero generations is a validation error that loads nothing
    #[test]
    fn test_advance_rejects_zero_generations() {
        let mut controller = controller();

        let err = controller.advance(BoardId::from_u128(1), 0).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("count must be greater than zero"));
    }

    // Tests evolve dispatches one generation to next and more to advance
    #[test]
    fn test_evolve_dispatch() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&GLIDER)).unwrap().id();

        assert_eq!(controller.evolve(id, 1).unwrap().generation(), 2);
        assert_eq!(controller.evolve(id, 3).unwrap().generation(), 5);
        assert_eq!(
            controller.evolve(id, 0).unwrap_err().kind(),
            ErrorKind::Validation
        );
    }

    // Tests the observed dispatch reports each applied generation once
    // Verified by dropping the observer call on the single-step path
    #[test]
    fn test_evolve_observed_reports_generations() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&GLIDER)).unwrap().id();

        let mut single: Vec<Board> = Vec::new();
        let board = controller.evolve_observed(id, 1, &mut single).unwrap();
        assert_eq!(single, vec![board]);

        let mut several: Vec<Board> = Vec::new();
        let board = controller.evolve_observed(id, 3, &mut several).unwrap();
        let generations: Vec<u64> = several.iter().map(Board::generation).collect();
        assert_eq!(generations, vec![3, 4, 5]);
        assert_eq!(several.last(), Some(&board));
        assert_eq!(controller.get(id).unwrap(), board);
    }

    // Tests the L-tromino settles into a block and is detected one step later
    // Verified by comparing against the generation two steps back
    #[test]
    fn test_stabilize_finds_block() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&BLOCK_SEED)).unwrap().id();

        let board = controller.stabilize(id, DEFAULT_ATTEMPTS).unwrap();

        assert_eq!(board.generation(), 3);
        assert_eq!(board.population(), 4);
        assert_eq!(board.alive_positions(), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(controller.get(id).unwrap(), board);
    }

    // Tests oscillators exhaust the attempts and leave the board untouched
    // Verified by persisting the last generation before failing
    #[test]
    fn test_stabilize_fails_on_oscillator() {
        let mut controller = controller();
        let original = controller.create_from_matrix(&matrix(&BEACON)).unwrap();

        let err = controller.stabilize(original.id(), 10).unwrap_err();

        assert_eq!(err.to_string(), "final state not achieved after 10 attempts");
        assert_eq!(err.kind(), ErrorKind::ConvergenceNotFound);
        assert_eq!(controller.get(original.id()).unwrap(), original);
    }

    #[test]
    fn test_stabilize_rejects_zero_attempts() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&BEACON)).unwrap().id();

        let err = controller.stabilize(id, 0).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("attempts must be greater than zero"));
    }

    // Tests an already stable board is detected on the first attempt
    #[test]
    fn test_stabilize_empty_board_after_one_attempt() {
        let mut controller = controller();
        let id = controller
            .create_from_matrix(&matrix(&["...", "...", "..."]))
            .unwrap()
            .id();

        let board = controller.stabilize(id, 1).unwrap();

        assert_eq!(board.generation(), 2);
        assert_eq!(board.population(), 0);
    }

    // Tests observers see every intermediate generation in order
    #[test]
    fn test_observers_receive_each_generation() {
        let mut controller = controller();
        let id = controller.create_from_matrix(&matrix(&BLOCK_SEED)).unwrap().id();

        let mut history: Vec<Board> = Vec::new();
        controller.stabilize_observed(id, 10, &mut history).unwrap();

        let generations: Vec<u64> = history.iter().map(Board::generation).collect();
        assert_eq!(generations, vec![2, 3]);
        assert_eq!(history[0].cells(), history[1].cells());
    }

    // Tests a failing save surfaces verbatim and keeps the stored boards
    // Verified by saving before the failure check
    #[test]
    fn test_storage_failure_keeps_previous_state() {
        let mut store = FlakyStore::default();
        let (glider, tromino) = {
            let mut controller = EvolutionController::with_seed(&mut store, 1);
            (
                controller.create_from_matrix(&matrix(&GLIDER)).unwrap(),
                controller.create_from_matrix(&matrix(&BLOCK_SEED)).unwrap(),
            )
        };

        store.fail_saves = true;
        {
            let mut controller = EvolutionController::with_seed(&mut store, 1);
            for err in [
                controller.next(glider.id()).unwrap_err(),
                controller.advance(glider.id(), 4).unwrap_err(),
                controller.stabilize(tromino.id(), 10).unwrap_err(),
                controller.create_random(5, 5).unwrap_err(),
                controller.create_from_matrix(&matrix(&BEACON)).unwrap_err(),
            ] {
                assert_eq!(err.kind(), ErrorKind::Storage);
                assert!(err.to_string().contains("disk full"));
            }
        }
        store.fail_saves = false;

        assert_eq!(store.load(glider.id()).unwrap(), Some(glider));
        let stored_tromino = store.load(tromino.id()).unwrap().unwrap();
        assert_eq!(stored_tromino.generation(), 1);
        assert_eq!(stored_tromino, tromino);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    // Tests list and delete through the controller
    #[test]
    fn test_list_and_delete() {
        let mut controller = controller();
        let first = controller.create_from_matrix(&matrix(&BEACON)).unwrap().id();
        let second = controller.create_random(4, 4).unwrap().id();

        let mut ids: Vec<BoardId> = controller.list().unwrap().iter().map(Board::id).collect();
        ids.sort();
        let mut expected = vec![first, second];
        expected.sort();
        assert_eq!(ids, expected);

        controller.delete(first).unwrap();
        assert_eq!(controller.get(first).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(controller.list().unwrap().len(), 1);
    }

    proptest! {
        // A successful stabilization ends on a generation equal to the one before it
        #[test]
        fn prop_stabilize_result_is_fixed_point(
            cells in proptest::collection::vec(any::<bool>(), 36),
            attempts in 1usize..30,
        ) {
            let matrix: Vec<Vec<bool>> = cells.chunks(6).map(<[bool]>::to_vec).collect();
            let mut controller = controller();
            let initial = controller.create_from_matrix(&matrix).unwrap();
            let id = initial.id();

            let mut history: Vec<Board> = Vec::new();
            match controller.stabilize_observed(id, attempts, &mut history) {
                Ok(board) => {
                    let mut generations = vec![initial];
                    generations.extend(history.iter().cloned());
                    let count = generations.len();

                    prop_assert_eq!(generations[count - 2].cells(), board.cells());
                    prop_assert_eq!(history.last(), Some(&board));
                    prop_assert!(generations[..count - 1]
                        .windows(2)
                        .all(|pair| pair[0].cells() != pair[1].cells()));
                }
                Err(err) => {
                    prop_assert_eq!(err.kind(), ErrorKind::ConvergenceNotFound);
                    prop_assert_eq!(history.len(), attempts);
                    prop_assert_eq!(controller.get(id).unwrap().generation(), 1);
                }
            }
        }
    }
}
