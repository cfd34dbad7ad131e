use super::*;

/// Places mines exactly where the caller says, for scripted and reproducible boards.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedMineGenerator<'a> {
    mines: &'a [Coord2],
}

impl<'a> FixedMineGenerator<'a> {
    pub fn new(mines: &'a [Coord2]) -> Self {
        Self { mines }
    }
}

impl MineGenerator for FixedMineGenerator<'_> {
    fn generate(self, config: GameConfig) -> Result<Grid> {
        config.validate()?;
        if self.mines.len() != usize::from(config.mines) {
            log::warn!(
                "Fixed layout lists {} mines but config asks for {}",
                self.mines.len(),
                config.mines
            );
            return Err(GameError::InvalidMineLayout);
        }

        let mut grid = Grid::blank(config.size);
        for &coords in self.mines {
            if !in_bounds(coords, config.size) || grid[coords].contains_mine() {
                return Err(GameError::InvalidMineLayout);
            }
            grid.arm(coords);
        }
        Ok(grid)
    }
}
