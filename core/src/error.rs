use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid must have at least one row and one column")]
    EmptyGrid,
    #[error("Too many mines, requested {mines} but the grid only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Coordinates {coords:?} are outside of a {size:?} grid")]
    OutOfBounds { coords: Coord2, size: Coord2 },
    #[error("Mine layout lists a coordinate outside the grid or the same coordinate twice")]
    InvalidMineLayout,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
    #[error("Snapshot rejected: {0}")]
    InvalidSnapshot(&'static str),
}

pub type Result<T> = core::result::Result<T, GameError>;
