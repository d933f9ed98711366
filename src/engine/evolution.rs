//! Board lifecycle orchestration over a [`BoardStore`]
//!
//! Each operation loads an owned copy of the board, transforms it through
//! the pure transition functions and hands only the final board back to the
//! store. Intermediate generations are never persisted, and any failure
//! leaves the stored board exactly as it was.

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::board::{Board, BoardId, validation};
use crate::engine::rules;
use crate::io::error::{BoardError, Result, invalid_parameter};
use crate::store::BoardStore;

/// Receives every intermediate generation produced during an evolution
pub trait EvolutionObserver {
    /// Called with the board right after each applied step
    fn on_step(&mut self, board: &Board);
}

impl EvolutionObserver for () {
    fn on_step(&mut self, _board: &Board) {}
}

impl<T: EvolutionObserver> EvolutionObserver for Option<T> {
    fn on_step(&mut self, board: &Board) {
        if let Some(observer) = self {
            observer.on_step(board);
        }
    }
}

impl<A: EvolutionObserver, B: EvolutionObserver> EvolutionObserver for (A, B) {
    fn on_step(&mut self, board: &Board) {
        self.0.on_step(board);
        self.1.on_step(board);
    }
}

impl EvolutionObserver for Vec<Board> {
    fn on_step(&mut self, board: &Board) {
        self.push(board.clone());
    }
}

/// Creates boards and evolves them by identifier
///
/// Random fill draws from the controller's generator, which can be seeded
/// for reproducible boards.
pub struct EvolutionController<S: BoardStore> {
    store: S,
    rng: StdRng,
}

impl<S: BoardStore> EvolutionController<S> {
    /// Create a controller whose random fill is seeded from the OS
    pub fn new(store: S) -> Self {
        Self {
            store,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a controller with a fixed random fill seed
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self {
            store,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The underlying store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Create and persist a board from a matrix of rows
    ///
    /// # Errors
    ///
    /// Returns an error if the matrix is smaller than 3x3, is ragged, or
    /// the store fails to save the new board
    pub fn create_from_matrix<R: AsRef<[bool]>>(&mut self, matrix: &[R]) -> Result<Board> {
        let board = validation::from_matrix(matrix)?;
        self.persist(&board, "create")?;
        info!(
            "Created board {} ({}x{}, population {})",
            board.id(),
            board.rows(),
            board.columns(),
            board.population()
        );
        Ok(board)
    }

    /// Create and persist a randomly filled board
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are rejected or the store fails
    /// to save the new board
    pub fn create_random(&mut self, rows: usize, columns: usize) -> Result<Board> {
        let board = validation::from_random(rows, columns, &mut self.rng)?;
        self.persist(&board, "create")?;
        info!(
            "Created random board {} ({rows}x{columns}, population {})",
            board.id(),
            board.population()
        );
        Ok(board)
    }

    /// Fetch a board without changing it
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for unknown identifiers, or the
    /// store's error if loading fails
    pub fn get(&self, id: BoardId) -> Result<Board> {
        self.load(id)
    }

    /// All stored boards ordered by identifier
    ///
    /// # Errors
    ///
    /// Returns the store's error if listing fails
    pub fn list(&self) -> Result<Vec<Board>> {
        self.store.list().inspect_err(|e| {
            error!("Error listing boards: {e}");
        })
    }

    /// Remove a board
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for unknown identifiers, or the
    /// store's error if deletion fails
    pub fn delete(&mut self, id: BoardId) -> Result<()> {
        let existed = self.store.delete(id).inspect_err(|e| {
            error!("Error deleting board {id}: {e}");
        })?;
        if !existed {
            return Err(BoardError::NotFound { id });
        }
        info!("Deleted board {id}");
        Ok(())
    }

    /// Advance a board by exactly one generation and persist it
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::NotFound`] for unknown identifiers, or the
    /// store's error if loading or saving fails
    pub fn next(&mut self, id: BoardId) -> Result<Board> {
        let board = rules::step(self.load(id)?);
        self.persist(&board, "next")?;
        debug!(
            "Board {id} stepped to generation {} (population {})",
            board.generation(),
            board.population()
        );
        Ok(board)
    }

    /// Apply `generations` steps: one step through [`Self::next`], more
    /// through [`Self::advance`]
    ///
    /// # Errors
    ///
    /// Returns the error of the dispatched operation
    pub fn evolve(&mut self, id: BoardId, generations: usize) -> Result<Board> {
        self.evolve_observed(id, generations, &mut ())
    }

    /// [`Self::evolve`], reporting every applied generation to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`Self::evolve`]
    pub fn evolve_observed<O: EvolutionObserver + ?Sized>(
        &mut self,
        id: BoardId,
        generations: usize,
        observer: &mut O,
    ) -> Result<Board> {
        if generations == 1 {
            let board = self.next(id)?;
            observer.on_step(&board);
            Ok(board)
        } else {
            self.advance_observed(id, generations, observer)
        }
    }

    /// Advance a board by exactly `generations` steps, persisting only the
    /// final generation
    ///
    /// # Errors
    ///
    /// Returns an error if `generations` is zero, the board does not exist,
    /// or the store fails
    pub fn advance(&mut self, id: BoardId, generations: usize) -> Result<Board> {
        self.advance_observed(id, generations, &mut ())
    }

    /// [`Self::advance`], reporting every intermediate generation to `observer`
    ///
    /// # Errors
    ///
    /// Same as [`Self::advance`]
    pub fn advance_observed<O: EvolutionObserver + ?Sized>(
        &mut self,
        id: BoardId,
        generations: usize,
        observer: &mut O,
    ) -> Result<Board> {
        if generations == 0 {
            return Err(invalid_parameter(
                "generations",
                &generations,
                &"count must be greater than zero",
            ));
        }

        let mut board = self.load(id)?;
        for _ in 0..generations {
            board = rules::step(board);
            observer.on_step(&board);
            debug!("Board {id} advanced to generation {}", board.generation());
        }

        self.persist(&board, "advance")?;
        info!(
            "Board {id} advanced {generations} generations to generation {} (population {})",
            board.generation(),
            board.population()
        );
        Ok(board)
    }

    /// Step a board until a generation equals the one before it, trying at
    /// most `attempts` steps
    ///
    /// Only exact fixed points count; oscillators of period two or more
    /// exhaust the attempts. On success only the fixed-point board is
    /// persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if `attempts` is zero, the board does not exist, no
    /// fixed point is reached within `attempts` steps, or the store fails
    pub fn stabilize(&mut self, id: BoardId, attempts: usize) -> Result<Board> {
        self.stabilize_observed(id, attempts, &mut ())
    }

    /// [`Self::stabilize`], reporting every intermediate generation to
    /// `observer`
    ///
    /// # Errors
    ///
    /// Same as [`Self::stabilize`]
    pub fn stabilize_observed<O: EvolutionObserver + ?Sized>(
        &mut self,
        id: BoardId,
        attempts: usize,
        observer: &mut O,
    ) -> Result<Board> {
        if attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &attempts,
                &"attempts must be greater than zero",
            ));
        }

        let mut board = self.load(id)?;
        for attempt in 1..=attempts {
            let next = rules::next_generation(&board);
            let settled = board.cells() == next.as_bitslice();
            board.replace_cells(next);
            observer.on_step(&board);

            if settled {
                self.persist(&board, "stabilize")?;
                info!(
                    "Board {id} reached a final state at generation {} after {attempt} attempts",
                    board.generation()
                );
                return Ok(board);
            }
        }

        warn!("Board {id} did not reach a final state within {attempts} attempts");
        Err(BoardError::ConvergenceNotFound { attempts })
    }

    fn load(&self, id: BoardId) -> Result<Board> {
        self.store
            .load(id)
            .inspect_err(|e| error!("Error loading board {id}: {e}"))?
            .ok_or(BoardError::NotFound { id })
    }

    fn persist(&mut self, board: &Board, operation: &'static str) -> Result<()> {
        self.store.save(board).inspect_err(|e| {
            error!(
                "Error saving board {} during {operation}: {e}",
                board.id()
            );
        })
    }
}
