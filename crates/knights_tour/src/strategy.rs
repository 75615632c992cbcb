//! The rectangle tiling the computer consults when choosing its moves.

use crate::board::{BOARD_SIZE, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

const SIZE: usize = BOARD_SIZE as usize;

/// Number of rectangles in a complete tiling.
pub const REGION_COUNT: u8 = 8;

/// Partition of the board into eight 2x4 or 4x2 rectangles.
///
/// Each cell holds the id of the rectangle it belongs to; the eight
/// rectangles exactly tile the board with no gaps or overlaps. A map is
/// generated once per game and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMap {
    cells: [[u8; SIZE]; SIZE],
}

impl RegionMap {
    /// Generates a fresh tiling, retrying until a placement succeeds.
    ///
    /// Placement scans for rectangle corners without lookahead, so an
    /// attempt can wall itself into a dead end; dead ends are discarded
    /// wholesale and generation restarts from an empty grid. There is no
    /// retry cap - termination relies on the random orientation choices
    /// eventually producing a clean run.
    #[instrument(skip(rng))]
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            if let Some(map) = Self::try_place(rng) {
                debug!(attempts, "region tiling generated");
                return map;
            }
        }
    }

    /// A single placement attempt; `None` signals a dead end.
    fn try_place<R: Rng + ?Sized>(rng: &mut R) -> Option<Self> {
        let mut cells = [[None::<u8>; SIZE]; SIZE];
        let (mut x, mut y) = (0usize, 0usize);

        for id in 0..REGION_COUNT {
            // Advance to the next unassigned cell; it becomes the new
            // rectangle's upper-left corner. Every rectangle has even
            // extents, so corners only ever sit on even coordinates.
            while y < SIZE && cells[y][x].is_some() {
                while x < SIZE && cells[y][x].is_some() {
                    x += 2;
                }
                if x >= SIZE {
                    x = 0;
                    y += 2;
                }
            }

            // Horizontal means 4 wide by 2 tall. When both orientations
            // look open, flip a coin; otherwise take the one that fits.
            let horizontal = if y + 2 < SIZE
                && cells[y + 2][x].is_none()
                && x + 2 < SIZE
                && cells[y][x + 2].is_none()
            {
                rng.random_bool(0.5)
            } else {
                x + 2 < SIZE && cells[y][x + 2].is_none()
            };
            let (w, h) = if horizontal { (4, 2) } else { (2, 4) };

            // The corner checks above do not look far enough ahead to rule
            // out collisions over the full extent, so verify it here and
            // abandon the attempt on any clash.
            if x + w > SIZE || y + h > SIZE {
                return None;
            }
            for row in &cells[y..y + h] {
                if row[x..x + w].iter().any(Option::is_some) {
                    return None;
                }
            }

            for row in &mut cells[y..y + h] {
                for cell in &mut row[x..x + w] {
                    *cell = Some(id);
                }
            }
        }

        // Eight rectangles of eight cells cover the whole grid.
        let mut grid = [[0u8; SIZE]; SIZE];
        for (y, row) in cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                grid[y][x] = (*cell)?;
            }
        }
        Some(Self { cells: grid })
    }

    /// Region id of the given cell.
    pub fn region_of(&self, cell: Position) -> u8 {
        self.cells[cell.y() as usize][cell.x() as usize]
    }
}
