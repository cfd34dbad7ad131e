//! Rules engine for Minesweeper: board generation, clue computation, cascading reveals and
//! win detection.
//!
//! The presentation layer owns a [`GameSession`] and drives it with [`GameSession::reveal`],
//! [`GameSession::toggle_flag`] and [`GameSession::check_win`], drawing each [`Cell`] from
//! [`GameSession::grid`]. Mine placement takes an injected [`RandomSource`] so boards are
//! reproducible from a seed.
//!
//! ```
//! use sweeper_core::*;
//!
//! let mut game = GameSession::new_game(GameConfig::default(), SeededRandom::new(7)).unwrap();
//! let outcome = game.reveal((4, 4)).unwrap();
//! if outcome.has_update() && game.check_win() {
//!     assert_eq!(game.state(), SessionState::Won);
//! }
//! ```
#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use cell::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use reveal::*;
pub use session::*;
pub use types::*;

mod cell;
mod error;
mod generator;
mod grid;
mod reveal;
mod session;
mod types;

pub const DEFAULT_ROWS: Coord = 9;
pub const DEFAULT_COLUMNS: Coord = 9;
pub const DEFAULT_MINES: CellCount = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(rows, columns)`
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    /// Rejects empty grids and more mines than cells, either would make placement impossible.
    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::EmptyGrid);
        }

        let cells = self.total_cells();
        if self.mines > cells {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                cells,
            });
        }

        Ok(())
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((DEFAULT_ROWS, DEFAULT_COLUMNS), DEFAULT_MINES)
    }
}
