//! Board coordinates, algebraic notation, and the visited-cell grid.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Width and height of the board, in cells.
pub const BOARD_SIZE: u8 = 8;

const SIZE: usize = BOARD_SIZE as usize;

/// The eight knight-move offsets, as (dx, dy).
const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// A cell on the 8x8 board.
///
/// `x` counts files left to right and `y` counts ranks top to bottom, both
/// in `[0, 8)`. Algebraic notation maps files to `'a'`-`'h'` and ranks to
/// `'8'`-`'1'`, so `(0, 0)` is `a8` and `(7, 7)` is `h1`. The mapping is
/// lossless in both directions for all 64 cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    /// Creates a position, rejecting out-of-bounds coordinates.
    pub fn new(x: u8, y: u8) -> Option<Self> {
        if x < BOARD_SIZE && y < BOARD_SIZE {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// File index, left to right.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Rank index, top to bottom.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the cell displaced by `(dx, dy)`, or `None` off the board.
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = (self.x as i8).checked_add(dx)?;
        let y = (self.y as i8).checked_add(dy)?;
        if (0..BOARD_SIZE as i8).contains(&x) && (0..BOARD_SIZE as i8).contains(&y) {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Parses algebraic notation, e.g. `"a8"` => `(0, 0)`.
    pub fn from_notation(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let x = (file as u32).checked_sub('a' as u32)?;
        let y = ('8' as u32).checked_sub(rank as u32)?;
        if x < BOARD_SIZE as u32 && y < BOARD_SIZE as u32 {
            Some(Self {
                x: x as u8,
                y: y as u8,
            })
        } else {
            None
        }
    }

    /// Algebraic notation for this cell, e.g. `(7, 7)` => `"h1"`.
    pub fn notation(&self) -> String {
        format!(
            "{}{}",
            (b'a' + self.x) as char,
            (b'8' - self.y) as char
        )
    }

    /// All 64 cells in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Position { x, y }))
    }

    /// The in-bounds knight-move destinations from this cell.
    pub fn knight_targets(self) -> impl Iterator<Item = Position> {
        KNIGHT_OFFSETS
            .iter()
            .filter_map(move |&(dx, dy)| self.offset(dx, dy))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.notation())
    }
}

/// The 8x8 grid of visited cells.
///
/// A cell starts unvisited and is burned exactly once, when the knight
/// lands on it; it never reverts. The engine keeps the current knight
/// position marked visited at all times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    visited: [[bool; SIZE]; SIZE],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self {
            visited: [[false; SIZE]; SIZE],
        }
    }

    /// Whether the knight has already landed on `cell`.
    pub fn is_visited(&self, cell: Position) -> bool {
        self.visited[cell.y() as usize][cell.x() as usize]
    }

    /// Marks `cell` as visited.
    pub(crate) fn visit(&mut self, cell: Position) {
        self.visited[cell.y() as usize][cell.x() as usize] = true;
    }

    /// Number of visited cells.
    pub fn visited_count(&self) -> usize {
        self.visited.iter().flatten().filter(|v| **v).count()
    }

    /// Legal knight destinations from `from`.
    ///
    /// With no current position every cell is playable - the opening move
    /// is unconstrained. Otherwise the up-to-8 knight offsets that stay on
    /// the board and land on unvisited cells.
    #[instrument(skip(self))]
    pub fn legal_moves_from(&self, from: Option<Position>) -> Vec<Position> {
        match from {
            None => Position::all().collect(),
            Some(cell) => cell
                .knight_targets()
                .filter(|target| !self.is_visited(*target))
                .collect(),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
