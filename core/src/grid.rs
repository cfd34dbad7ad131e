use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Row-major `rows × columns` arrangement of cells, owned by one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridSnapshot")]
pub struct Grid {
    cells: Array2<Cell>,
}

/// Unchecked wire form of a [`Grid`], only accepted after [`Grid::try_from`] checks it.
#[derive(Deserialize)]
struct GridSnapshot {
    cells: Array2<Cell>,
}

impl TryFrom<GridSnapshot> for Grid {
    type Error = GameError;

    fn try_from(GridSnapshot { cells }: GridSnapshot) -> Result<Self> {
        let (rows, columns) = cells.dim();
        if rows == 0 || columns == 0 {
            return Err(GameError::EmptyGrid);
        }
        if rows > usize::from(Coord::MAX) || columns > usize::from(Coord::MAX) {
            return Err(GameError::InvalidSnapshot("grid larger than 255 in a dimension"));
        }

        let grid = Self { cells };
        for ((row, column), cell) in grid.cells.indexed_iter() {
            let coords = (row as Coord, column as Coord);
            if cell.coords() != coords {
                return Err(GameError::InvalidSnapshot("cell coordinates do not match position"));
            }
            if cell.is_revealed() && cell.is_flagged() {
                return Err(GameError::InvalidSnapshot("revealed cell is flagged"));
            }
            let mines = grid
                .neighbors(coords)
                .into_iter()
                .filter(|&pos| grid[pos].contains_mine())
                .count();
            if usize::from(cell.mine_neighbor_count()) != mines {
                return Err(GameError::InvalidSnapshot("clue does not match neighbor mines"));
            }
        }
        Ok(grid)
    }
}

impl Grid {
    /// Every cell hidden, unflagged, mine-free and with a zero clue.
    pub fn blank((rows, columns): Coord2) -> Self {
        let cells = Array2::from_shape_fn((rows, columns).to_nd_index(), |(row, column)| {
            Cell::new((row as Coord, column as Coord))
        });
        Self { cells }
    }

    /// `(rows, columns)`
    pub fn size(&self) -> Coord2 {
        let (rows, columns) = self.cells.dim();
        (rows as Coord, columns as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, columns) = self.size();
        mult(rows, columns)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if in_bounds(coords, size) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds { coords, size })
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        in_bounds(coords, self.size()).then(|| &self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        neighbors_of(coords, self.size())
    }

    pub fn mine_count(&self) -> CellCount {
        count_cells(self.iter().filter(|cell| cell.contains_mine()))
    }

    pub fn revealed_count(&self) -> CellCount {
        count_cells(self.iter().filter(|cell| cell.is_revealed()))
    }

    pub fn flagged_count(&self) -> CellCount {
        count_cells(self.iter().filter(|cell| cell.is_flagged()))
    }

    /// Mine coordinates in row-major order.
    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter()
            .filter(|cell| cell.contains_mine())
            .map(|cell| cell.coords())
    }

    /// Whether every mine-free cell has been revealed, flags are irrelevant.
    pub fn is_won(&self) -> bool {
        self.iter().all(|cell| cell.contains_mine() || cell.is_revealed())
    }

    /// Puts a mine at `coords` and bumps the clue of each of its neighbors, mines included.
    pub(crate) fn arm(&mut self, coords: Coord2) {
        self.cell_mut(coords).contains_mine = true;
        for pos in self.neighbors(coords) {
            self.cell_mut(pos).mine_neighbor_count += 1;
        }
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

fn count_cells<'a>(cells: impl Iterator<Item = &'a Cell>) -> CellCount {
    cells.count() as CellCount
}

pub fn create_blank_grid(rows: Coord, columns: Coord) -> Grid {
    Grid::blank((rows, columns))
}

pub fn is_won(grid: &Grid) -> bool {
    grid.is_won()
}
