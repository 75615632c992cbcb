//! Turn-based state machine for a knight's tour duel.

use crate::board::{Board, Position};
use crate::strategy::RegionMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Phase of the game state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No game has been started yet; `reset` begins one.
    NotStarted,
    /// Waiting for the human to pick a cell.
    AwaitingHuman,
    /// A human move landed; the computer's reply is pending.
    AwaitingNpc,
    /// The computer was left without a legal move. Terminal.
    HumanWon,
    /// The human was left without a legal move. Terminal.
    HumanLost,
}

impl Phase {
    /// Whether the game has ended.
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::HumanWon | Phase::HumanLost)
    }
}

/// Error raised when a move cannot be accepted.
///
/// Both variants leave the engine untouched: an illegal move asks the
/// caller to re-prompt, an illegal state flags an integration bug in
/// whoever is driving the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The target cell is not in the current legal-move set.
    #[display("{} is not a legal move", _0)]
    IllegalMove(Position),
    /// The operation is not valid in the current phase.
    #[display("operation not valid in phase {:?}", _0)]
    IllegalState(Phase),
}

impl std::error::Error for MoveError {}

/// The knight's tour duel: one knight, alternating turns, burned cells.
///
/// The engine owns the complete game state - visited grid, region tiling,
/// knight position, move history, phase - and mutates it only through the
/// documented operations. Frontends hold one engine per session and drive
/// it with `reset`, `apply_human_move`, and the NPC pair.
#[derive(Debug, Clone)]
pub struct TourEngine {
    board: Board,
    regions: RegionMap,
    position: Option<Position>,
    history: Vec<Position>,
    phase: Phase,
    rng: StdRng,
}

impl TourEngine {
    /// Creates an engine seeded from OS entropy, in `NotStarted`.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Creates an engine with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(mut rng: StdRng) -> Self {
        let regions = RegionMap::generate(&mut rng);
        Self {
            board: Board::new(),
            regions,
            position: None,
            history: Vec::new(),
            phase: Phase::NotStarted,
            rng,
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Operations
    // ─────────────────────────────────────────────────────────────

    /// Starts a fresh game, discarding any previous state.
    ///
    /// The visited grid and history are cleared, the region tiling is
    /// regenerated, and the knight is removed from the board. With
    /// `npc_first` the computer opens immediately - uniformly at random
    /// over all 64 cells, since no position constrains it - and the engine
    /// then awaits the human either way.
    #[instrument(skip(self))]
    pub fn reset(&mut self, npc_first: bool) {
        self.board = Board::new();
        self.history.clear();
        self.regions = RegionMap::generate(&mut self.rng);
        self.position = None;
        self.phase = Phase::AwaitingHuman;
        if npc_first {
            self.phase = Phase::AwaitingNpc;
            let opening = self.pick_npc_move();
            self.advance(opening);
            self.phase = Phase::AwaitingHuman;
        }
        debug!(npc_first, "game reset");
    }

    /// Applies the human's move.
    ///
    /// # Errors
    ///
    /// `MoveError::IllegalState` when it is not the human's turn,
    /// `MoveError::IllegalMove` when the target is not in the current
    /// legal set. Neither changes any state.
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, cell: Position) -> Result<(), MoveError> {
        if self.phase != Phase::AwaitingHuman {
            return Err(MoveError::IllegalState(self.phase));
        }
        if !self.legal_moves().contains(&cell) {
            return Err(MoveError::IllegalMove(cell));
        }
        self.advance(cell);
        // No reply left for the computer means the human has cornered it.
        self.phase = if self.legal_moves().is_empty() {
            Phase::HumanWon
        } else {
            Phase::AwaitingNpc
        };
        Ok(())
    }

    /// Picks the computer's move without applying it.
    ///
    /// Among the legal moves, targets lying in a different tiling
    /// rectangle than the knight's current cell are preferred; the pick
    /// among those is uniform, as is the fallback over all legal moves
    /// when none qualify. Game state is untouched - only the internal RNG
    /// advances.
    ///
    /// # Errors
    ///
    /// `MoveError::IllegalState` unless the engine is in `AwaitingNpc`,
    /// which also guarantees the legal set is non-empty.
    #[instrument(skip(self))]
    pub fn compute_npc_move(&mut self) -> Result<Position, MoveError> {
        if self.phase != Phase::AwaitingNpc {
            return Err(MoveError::IllegalState(self.phase));
        }
        Ok(self.pick_npc_move())
    }

    /// Applies the computer's move.
    ///
    /// # Errors
    ///
    /// Same contract as [`TourEngine::apply_human_move`], with the phases
    /// swapped.
    #[instrument(skip(self))]
    pub fn apply_npc_move(&mut self, cell: Position) -> Result<(), MoveError> {
        if self.phase != Phase::AwaitingNpc {
            return Err(MoveError::IllegalState(self.phase));
        }
        if !self.legal_moves().contains(&cell) {
            return Err(MoveError::IllegalMove(cell));
        }
        self.advance(cell);
        // No follow-up for the human means the computer has boxed them in.
        self.phase = if self.legal_moves().is_empty() {
            Phase::HumanLost
        } else {
            Phase::AwaitingHuman
        };
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// Legal destinations from the current knight position.
    pub fn legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves_from(self.position)
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current knight position; `None` before the first move.
    pub fn position(&self) -> Option<Position> {
        self.position
    }

    /// Cells visited so far, in move order.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// The visited grid.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The tiling the computer is playing against.
    pub fn regions(&self) -> &RegionMap {
        &self.regions
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    /// Shared bookkeeping for both sides: burn the cell, move the knight,
    /// record the move.
    fn advance(&mut self, cell: Position) {
        self.board.visit(cell);
        self.position = Some(cell);
        self.history.push(cell);
        debug!(cell = %cell, "knight moved");
    }

    /// Move selection; the caller guarantees at least one legal move.
    fn pick_npc_move(&mut self) -> Position {
        let legal = self.legal_moves();
        match self.position {
            None => legal[self.rng.random_range(0..legal.len())],
            Some(current) => {
                let here = self.regions.region_of(current);
                let fresh: Vec<Position> = legal
                    .iter()
                    .copied()
                    .filter(|target| self.regions.region_of(*target) != here)
                    .collect();
                let pool = if fresh.is_empty() { &legal } else { &fresh };
                pool[self.rng.random_range(0..pool.len())]
            }
        }
    }
}

impl Default for TourEngine {
    fn default() -> Self {
        Self::new()
    }
}
