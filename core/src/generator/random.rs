use rand::rngs::SmallRng;

use super::*;

/// Deterministic random source, the same seed always yields the same boards.
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: SmallRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        use rand::prelude::*;

        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick_index(&mut self, bound: CellCount) -> CellCount {
        use rand::prelude::*;

        self.rng.random_range(0..bound)
    }
}

/// Places `mine_count` mines on distinct cells drawn uniformly from `rng`.
///
/// Candidates that already hold a mine are redrawn, so the grid must have at least
/// `mine_count` mine-free cells; fewer is rejected with [`GameError::TooManyMines`]
/// before anything is drawn.
pub fn place_mines(
    grid: &mut Grid,
    mine_count: CellCount,
    mut rng: impl RandomSource,
) -> Result<()> {
    let total_cells = grid.total_cells();
    let free_cells = total_cells - grid.mine_count();
    if mine_count > free_cells {
        return Err(GameError::TooManyMines {
            mines: mine_count,
            cells: free_cells,
        });
    }

    let (_, columns) = grid.size();
    let mut mines_placed = 0;
    let mut draws = 0u32;
    while mines_placed < mine_count {
        let coords = index_to_coords(rng.pick_index(total_cells), columns);
        draws += 1;
        if grid[coords].contains_mine() {
            continue;
        }
        grid.arm(coords);
        mines_placed += 1;
    }

    log::debug!(
        "Placed {} mines on a {:?} grid in {} draws",
        mines_placed,
        grid.size(),
        draws
    );
    Ok(())
}

/// Purely random generation over an injected [`RandomSource`].
#[derive(Debug)]
pub struct RandomMineGenerator<R> {
    rng: R,
}

impl<R: RandomSource> RandomMineGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource> MineGenerator for RandomMineGenerator<R> {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        config.validate()?;
        let mut grid = Grid::blank(config.size);
        place_mines(&mut grid, config.mines, self.rng)?;
        Ok(grid)
    }
}
