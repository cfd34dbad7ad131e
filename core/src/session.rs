use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::InProgress
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Changed,
}

impl FlagOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

/// Owns the grid of one game and routes every mutation through its operations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionSnapshot")]
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    triggered_mine: Option<Coord2>,
}

/// Unchecked wire form of a [`GameSession`].
#[derive(Deserialize)]
struct SessionSnapshot {
    config: GameConfig,
    grid: Grid,
    state: SessionState,
    triggered_mine: Option<Coord2>,
}

impl TryFrom<SessionSnapshot> for GameSession {
    type Error = GameError;

    fn try_from(snapshot: SessionSnapshot) -> Result<Self> {
        let SessionSnapshot {
            config,
            grid,
            state,
            triggered_mine,
        } = snapshot;

        config.validate()?;
        if config.size != grid.size() || config.mines != grid.mine_count() {
            return Err(GameError::InvalidSnapshot("config does not match grid"));
        }

        let (first_exploded, second_exploded) = {
            let mut exploded = grid
                .iter()
                .filter(|cell| cell.contains_mine() && cell.is_revealed())
                .map(|cell| cell.coords());
            (exploded.next(), exploded.next())
        };
        match (state, triggered_mine, first_exploded, second_exploded) {
            (SessionState::Lost, Some(triggered), Some(mine), None) if triggered == mine => {}
            (SessionState::Lost, ..) => {
                return Err(GameError::InvalidSnapshot(
                    "lost game must reveal exactly its triggered mine",
                ));
            }
            (SessionState::Won, None, None, _) if grid.is_won() => {}
            (SessionState::InProgress, None, None, _) => {}
            _ => {
                return Err(GameError::InvalidSnapshot("state does not match grid"));
            }
        }

        Ok(Self {
            config,
            grid,
            state,
            triggered_mine,
        })
    }
}

impl GameSession {
    /// Builds a blank grid and places mines from `rng`, rejecting an invalid config up front.
    pub fn new_game(config: GameConfig, rng: impl RandomSource) -> Result<Self> {
        let grid = RandomMineGenerator::new(rng).generate(config)?;
        log::debug!(
            "New game on a {:?} grid with {} mines",
            config.size,
            config.mines
        );
        Ok(Self::from_grid(grid))
    }

    /// Starts a game on a grid whose mines are already in place.
    pub fn from_grid(grid: Grid) -> Self {
        let config = GameConfig::new_unchecked(grid.size(), grid.mine_count());
        Self {
            config,
            grid,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Replaces this session wholesale with a fresh game using the same config.
    pub fn restart(&mut self, rng: impl RandomSource) -> Result<()> {
        *self = Self::new_game(self.config, rng)?;
        Ok(())
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(&self.grid[coords])
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines
    }

    pub fn flagged_count(&self) -> CellCount {
        self.grid.flagged_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.grid.revealed_count()
    }

    /// How many mines have not been flagged yet, negative when over-flagged
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count() as isize)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Every mine in row-major order, for showing the board after the game ends.
    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.grid.mine_coords().collect()
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_request(coords)?;

        let outcome = reveal(&mut self.grid, coords)?;
        if matches!(outcome, RevealOutcome::Exploded) {
            self.triggered_mine = Some(coords);
            self.end_game(SessionState::Lost);
        }
        Ok(outcome)
    }

    /// Checks the grid for a win, moving an in-progress game to [`SessionState::Won`].
    pub fn check_win(&mut self) -> bool {
        match self.state {
            SessionState::Won => true,
            SessionState::Lost => false,
            SessionState::InProgress => {
                let won = self.grid.is_won();
                if won {
                    self.end_game(SessionState::Won);
                }
                won
            }
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;

        let coords = self.validate_request(coords)?;

        let cell = self.grid.cell_mut(coords);
        if cell.is_revealed() {
            return Ok(NoChange);
        }
        cell.flagged = !cell.flagged;
        log::debug!("Flag at {:?} set to {}", coords, cell.flagged);
        Ok(Changed)
    }

    fn validate_request(&self, coords: Coord2) -> Result<Coord2> {
        let coords = self.grid.validate_coords(coords).inspect_err(|err| {
            log::warn!("Rejected request: {}", err);
        })?;
        if self.state.is_finished() {
            log::warn!("Rejected request at {:?}, game is {:?}", coords, self.state);
            return Err(GameError::AlreadyEnded);
        }
        Ok(coords)
    }

    fn end_game(&mut self, state: SessionState) {
        if self.state.is_finished() {
            return;
        }
        log::debug!("Game ended: {:?}", state);
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;

    use crate::generator::testing::ScriptedRandom;
    use super::*;

    fn session(size: Coord2, mines: &[Coord2]) -> GameSession {
        let config = GameConfig::new(size, mines.len() as CellCount).unwrap();
        GameSession::from_grid(FixedMineGenerator::new(mines).generate(config).unwrap())
    }

    #[test]
    fn seeded_placement_scenario_wins_in_one_reveal() {
        let config = GameConfig::new((3, 3), 1).unwrap();
        let mut game = GameSession::new_game(config, ScriptedRandom::new(&[8])).unwrap();
        assert!(game.cell_at((2, 2)).unwrap().contains_mine());

        let outcome = game.reveal((0, 0)).unwrap();

        let RevealOutcome::RevealedBlankCascade(revealed) = outcome else {
            panic!("expected a cascade");
        };
        assert_eq!(
            revealed,
            BTreeSet::from([
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 0),
                (1, 1),
                (1, 2),
                (2, 0),
                (2, 1),
            ])
        );
        assert_eq!(game.cell_at((1, 2)).unwrap().mine_neighbor_count(), 1);
        assert_eq!(game.cell_at((2, 1)).unwrap().mine_neighbor_count(), 1);
        assert!(game.check_win());
        assert_eq!(game.state(), SessionState::Won);
    }

    #[test]
    fn explosion_is_terminal() {
        let mut game = session((3, 3), &[(1, 1)]);

        assert_eq!(game.reveal((1, 1)).unwrap(), RevealOutcome::Exploded);
        assert_eq!(game.state(), SessionState::Lost);
        assert_eq!(game.triggered_mine(), Some((1, 1)));
        assert!(game.cell_at((1, 1)).unwrap().is_revealed());

        let before = game.clone();
        assert_eq!(game.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
        assert!(!game.check_win());
        assert_eq!(game, before);
    }

    #[test]
    fn won_game_rejects_moves() {
        let mut game = session((2, 1), &[(0, 0)]);

        assert_eq!(game.reveal((1, 0)).unwrap(), RevealOutcome::RevealedWithClue(1));
        assert!(game.check_win());
        assert!(game.is_finished());
        assert!(game.check_win());

        assert_eq!(game.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((0, 0)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn check_win_stays_in_progress_until_all_safe_cells_revealed() {
        let mut game = session((3, 3), &[(0, 0), (0, 1)]);

        game.reveal((1, 1)).unwrap();
        assert!(!game.check_win());
        assert_eq!(game.state(), SessionState::InProgress);
    }

    #[test]
    fn flag_toggles_and_guards_reveal() {
        let mut game = session((3, 3), &[(0, 0)]);

        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert!(game.cell_at((0, 0)).unwrap().is_flagged());
        assert_eq!(game.flagged_count(), 1);
        assert_eq!(game.mines_left(), 0);

        assert_eq!(game.reveal((0, 0)).unwrap(), RevealOutcome::Ignored);
        assert_eq!(game.state(), SessionState::InProgress);

        assert_eq!(game.toggle_flag((0, 0)).unwrap(), FlagOutcome::Changed);
        assert!(!game.cell_at((0, 0)).unwrap().is_flagged());
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut game = session((3, 3), &[(0, 0)]);
        game.reveal((0, 1)).unwrap();

        let outcome = game.toggle_flag((0, 1)).unwrap();

        assert_eq!(outcome, FlagOutcome::NoChange);
        assert!(!outcome.has_update());
        assert!(!game.cell_at((0, 1)).unwrap().is_flagged());
    }

    #[test]
    fn over_flagging_makes_mines_left_negative() {
        let mut game = session((2, 2), &[(0, 0)]);
        game.toggle_flag((0, 1)).unwrap();
        game.toggle_flag((1, 1)).unwrap();

        assert_eq!(game.mines_left(), -1);
    }

    #[test]
    fn out_of_bounds_requests_are_rejected() {
        let mut game = session((2, 3), &[(0, 0)]);
        let before = game.clone();
        let err = GameError::OutOfBounds {
            coords: (2, 0),
            size: (2, 3),
        };

        assert_eq!(game.reveal((2, 0)), Err(err));
        assert_eq!(game.toggle_flag((2, 0)), Err(err));
        assert_eq!(game.cell_at((2, 0)).err(), Some(err));
        assert_eq!(game, before);
    }

    #[test]
    fn new_game_rejects_too_many_mines() {
        let config = GameConfig::new_unchecked((2, 2), 5);

        assert_eq!(
            GameSession::new_game(config, SeededRandom::new(3)),
            Err(GameError::TooManyMines { mines: 5, cells: 4 })
        );
    }

    #[test]
    fn restart_discards_previous_game() {
        let config = GameConfig::default();
        let mut game = GameSession::new_game(config, SeededRandom::new(5)).unwrap();
        let mine = game.mine_coords()[0];
        game.reveal(mine).unwrap();
        assert_eq!(game.state(), SessionState::Lost);

        game.restart(SeededRandom::new(6)).unwrap();

        assert_eq!(game.state(), SessionState::InProgress);
        assert_eq!(game.triggered_mine(), None);
        assert_eq!(game.revealed_count(), 0);
        assert_eq!(game.flagged_count(), 0);
        assert_eq!(game.config(), config);
        assert_eq!(game.mine_coords().len(), 10);
    }

    #[test]
    fn mine_coords_do_not_reveal_anything() {
        let game = session((3, 3), &[(0, 2), (2, 0)]);

        assert_eq!(game.mine_coords(), [(0, 2), (2, 0)]);
        assert_eq!(game.revealed_count(), 0);
        assert_eq!(game.total_mines(), 2);
    }
}
