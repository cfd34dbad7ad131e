use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Strategy that turns a configuration into a grid with mines and clues in place.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<Grid>;
}

/// Source of uniformly distributed cell indices, the only randomness the engine consumes.
pub trait RandomSource {
    /// Uniform index in `0..bound`, callers never pass a zero `bound`.
    fn pick_index(&mut self, bound: CellCount) -> CellCount;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick_index(&mut self, bound: CellCount) -> CellCount {
        (**self).pick_index(bound)
    }
}

/// Row-major index into a grid with `columns` columns.
pub(crate) fn index_to_coords(index: CellCount, columns: Coord) -> Coord2 {
    let columns = CellCount::from(columns);
    ((index / columns) as Coord, (index % columns) as Coord)
}

#[cfg(test)]
pub(crate) mod testing {
    use alloc::vec::Vec;

    use super::*;

    /// Replays a fixed list of indices, wrapping each into the requested bound.
    pub struct ScriptedRandom {
        indices: Vec<CellCount>,
        next: usize,
    }

    impl ScriptedRandom {
        pub fn new(indices: &[CellCount]) -> Self {
            Self {
                indices: indices.to_vec(),
                next: 0,
            }
        }

        pub fn draws(&self) -> usize {
            self.next
        }
    }

    impl RandomSource for ScriptedRandom {
        fn pick_index(&mut self, bound: CellCount) -> CellCount {
            let index = self.indices[self.next % self.indices.len()];
            self.next += 1;
            index % bound
        }
    }
}
