use alloc::collections::{BTreeSet, VecDeque};
use serde::{Deserialize, Serialize};

use crate::*;

/// Result of a single reveal request on an in-bounds cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Cell was already revealed or is flagged, nothing changed.
    Ignored,
    /// Cell held a mine, game is lost.
    Exploded,
    /// Cell revealed a positive clue, no cascade.
    RevealedWithClue(u8),
    /// Cell had a zero clue; every coordinate revealed by the flood, origin included.
    RevealedBlankCascade(BTreeSet<Coord2>),
}

impl RevealOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Reveals `coords`, flooding through the contiguous zero-clue region when the cell is blank.
pub fn reveal(grid: &mut Grid, coords: Coord2) -> Result<RevealOutcome> {
    use RevealOutcome::*;

    let coords = grid.validate_coords(coords)?;
    let cell = grid[coords];

    if cell.is_guarded() {
        log::debug!("Cell at {:?} already revealed or flagged", coords);
        return Ok(Ignored);
    }

    grid.cell_mut(coords).revealed = true;

    if cell.contains_mine() {
        log::debug!("Mine hit at {:?}", coords);
        return Ok(Exploded);
    }

    Ok(match cell.mine_neighbor_count() {
        0 => RevealedBlankCascade(flood_reveal(grid, coords)),
        count => {
            log::debug!("Reveal cell at {:?}, mine count: {}", coords, count);
            RevealedWithClue(count)
        }
    })
}

/// Breadth-first flood from an already revealed zero-clue `origin`.
fn flood_reveal(grid: &mut Grid, origin: Coord2) -> BTreeSet<Coord2> {
    let mut revealed = BTreeSet::from([origin]);
    let mut queued = BTreeSet::from([origin]);
    let mut frontier = VecDeque::new();
    extend_frontier(grid, origin, &mut queued, &mut frontier);
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        origin,
        frontier
    );

    while let Some(coords) = frontier.pop_front() {
        let cell = grid.cell_mut(coords);
        debug_assert!(!cell.is_guarded(), "queued cell {coords:?} was already guarded");
        cell.revealed = true;
        let count = cell.mine_neighbor_count();
        revealed.insert(coords);
        log::trace!("Flood revealed cell at {:?}, mine count: {}", coords, count);

        // clue cells border the region and stop the flood
        if count == 0 {
            extend_frontier(grid, coords, &mut queued, &mut frontier);
        }
    }

    log::debug!("Flood from {:?} revealed {} cells", origin, revealed.len());
    revealed
}

fn extend_frontier(
    grid: &Grid,
    coords: Coord2,
    queued: &mut BTreeSet<Coord2>,
    frontier: &mut VecDeque<Coord2>,
) {
    for pos in grid.neighbors(coords) {
        let cell = grid[pos];
        if !cell.contains_mine() && !cell.is_guarded() && queued.insert(pos) {
            frontier.push_back(pos);
        }
    }
}
