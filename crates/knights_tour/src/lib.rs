//! Knight's tour versus the computer - core game logic.
//!
//! A duel on an ordinary chessboard: human and computer take turns moving a
//! single knight, each landing cell is burned, and whoever leaves the other
//! side without a legal knight move wins. The computer plays the classic
//! boxing strategy, tiling the board into eight 2x4 rectangles and steering
//! the knight between them.
//!
//! # Architecture
//!
//! - **Board**: cell coordinates, algebraic notation, and the visited grid
//! - **Strategy**: the rectangle tiling the computer consults for its moves
//! - **Engine**: the turn-based state machine that owns a game
//!
//! This crate is pure logic. Rendering, input, and the computer's visible
//! "thinking" pause belong to the frontend driving the engine.
//!
//! # Example
//!
//! ```
//! use knights_tour::{Phase, Position, TourEngine};
//!
//! let mut game = TourEngine::seeded(7);
//! game.reset(false);
//!
//! // The opening move may be any of the 64 cells.
//! let opening = Position::from_notation("d4").unwrap();
//! game.apply_human_move(opening).unwrap();
//! assert_eq!(game.phase(), Phase::AwaitingNpc);
//!
//! // The computer replies with a legal knight move.
//! let reply = game.compute_npc_move().unwrap();
//! game.apply_npc_move(reply).unwrap();
//! assert_eq!(game.history().len(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod engine;
mod strategy;

// Crate-level exports - board and coordinates
pub use board::{BOARD_SIZE, Board, Position};

// Crate-level exports - engine state machine
pub use engine::{MoveError, Phase, TourEngine};

// Crate-level exports - region tiling
pub use strategy::{REGION_COUNT, RegionMap};
