use serde::{Deserialize, Serialize};

use crate::Coord2;

/// One grid position with its mine, clue, reveal and flag state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    coords: Coord2,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) contains_mine: bool,
    pub(crate) mine_neighbor_count: u8,
}

impl Cell {
    pub const fn new(coords: Coord2) -> Self {
        Self {
            coords,
            revealed: false,
            flagged: false,
            contains_mine: false,
            mine_neighbor_count: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        self.coords
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn contains_mine(&self) -> bool {
        self.contains_mine
    }

    /// Number of mines among the clipped neighbors, fixed once mines are placed.
    pub const fn mine_neighbor_count(&self) -> u8 {
        self.mine_neighbor_count
    }

    /// Whether a direct reveal would be refused by the flag or an earlier reveal.
    pub const fn is_guarded(&self) -> bool {
        self.revealed || self.flagged
    }
}
