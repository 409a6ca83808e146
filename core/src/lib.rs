#![no_std]

extern crate alloc;

use alloc::string::String;
use core::ops::{BitOr, Index};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod types;

/// Board dimensions and the number of mines to place.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated config: both dimensions positive and at least one safe cell.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(ConfigIssue::EmptyBoard.into());
        }
        let max = self.total_cells() - 1;
        if self.mines > max {
            return Err(ConfigIssue::TooManyMines {
                mines: self.mines,
                max,
            }
            .into());
        }
        Ok(())
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }

    /// Parses `{"size":[w,h],"mines":m}` and validates the result.
    pub fn from_json(json: &str) -> core::result::Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(Self::new(config.size, config.mines)?)
    }

    pub fn to_json(&self) -> String {
        // a plain struct of integers always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// The classic 20×20 board with 40 mines.
impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked((20, 20), 40)
    }
}

/// Where the mines are, plus the neighbor count of every safe cell.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    adjacent: Array2<u8>,
    mine_count: CellCount,
}

impl MineLayout {
    /// Builds a layout from a mask indexed `[x, y]`.
    ///
    /// The mask must come from a validated config or be otherwise known to
    /// fit in `Coord2`.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        let adjacent = Array2::from_shape_fn(mine_mask.raw_dim(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            if mine_mask[coords.to_nd_index()] {
                0
            } else {
                mine_mask
                    .iter_neighbor_cells(coords)
                    .filter(|&is_mine| is_mine)
                    .count() as u8
            }
        });
        Self {
            mine_mask,
            adjacent,
            mine_count,
        }
    }

    /// Layout with mines at exactly `mine_coords`; duplicates collapse.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        GameConfig::new(size, 0)?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = Self::from_mine_mask(mine_mask);
        layout.game_config().validate()?;
        Ok(layout)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        grid_size(&self.mine_mask)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Panics if `coords` is off the board; check with [`Self::validate_coords`]
    /// or use [`Board::has_mine_at`] for a fallible query.
    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    /// Mines around `coords`; 0 for a mine cell.
    ///
    /// Panics if `coords` is off the board.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.adjacent[coords.to_nd_index()]
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mine_mask.iter_neighbors(coords)
    }
}

/// Mine flag at in-bounds coordinates; panics outside the board.
impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

/// Result of a reveal, so callers know whether to redraw.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}

/// Merges outcomes of several reveals, keeping the most significant one.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_classic_board() {
        let config = GameConfig::default();

        assert_eq!(config.size, (20, 20));
        assert_eq!(config.mines, 40);
        assert_eq!(config.total_cells(), 400);
        assert_eq!(config.safe_cells(), 360);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn presets_are_valid() {
        for config in [
            GameConfig::beginner(),
            GameConfig::intermediate(),
            GameConfig::expert(),
        ] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
    }

    #[test]
    fn config_rejects_empty_board() {
        assert_eq!(
            GameConfig::new((0, 5), 0),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
        assert_eq!(
            GameConfig::new((5, 0), 0),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
    }

    #[test]
    fn config_requires_a_safe_cell() {
        assert_eq!(
            GameConfig::new((3, 3), 9),
            Err(GameError::InvalidConfiguration(ConfigIssue::TooManyMines {
                mines: 9,
                max: 8
            }))
        );
        assert!(GameConfig::new((3, 3), 8).is_ok());
        assert!(GameConfig::new((1, 1), 0).is_ok());
    }

    #[test]
    fn config_loads_from_json() {
        let config = GameConfig::from_json(r#"{"size":[9,9],"mines":10}"#).unwrap();

        assert_eq!(config, GameConfig::beginner());
        assert_eq!(GameConfig::from_json(&config.to_json()).unwrap(), config);
    }

    #[test]
    fn config_json_is_validated() {
        assert!(matches!(
            GameConfig::from_json(r#"{"size":[2,2],"mines":4}"#),
            Err(ConfigError::Invalid(GameError::InvalidConfiguration(
                ConfigIssue::TooManyMines { .. }
            )))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{"size":[2,2]}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn layout_counts_neighbors() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
        assert_eq!(layout.safe_cell_count(), 8);
        assert_eq!(layout.adjacent_mine_count((1, 1)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 1);
        assert_eq!(layout.adjacent_mine_count((2, 2)), 0);
        assert_eq!(layout.adjacent_mine_count((0, 0)), 0);
    }

    #[test]
    fn layout_counts_up_to_eight() {
        let ring = [
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2),
        ];
        let layout = MineLayout::from_mine_coords((3, 3), &ring).unwrap();

        assert_eq!(layout.adjacent_mine_count((1, 1)), 8);
    }

    #[test]
    fn layout_collapses_duplicate_mines() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(1, 1), (1, 1)]).unwrap();

        assert_eq!(layout.mine_count(), 1);
    }

    #[test]
    fn layout_rejects_bad_input() {
        assert_eq!(
            MineLayout::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
        assert_eq!(
            MineLayout::from_mine_coords((0, 2), &[]),
            Err(GameError::InvalidConfiguration(ConfigIssue::EmptyBoard))
        );
        assert!(matches!(
            MineLayout::from_mine_coords((1, 2), &[(0, 0), (0, 1)]),
            Err(GameError::InvalidConfiguration(ConfigIssue::TooManyMines { .. }))
        ));
    }

    #[test]
    #[should_panic]
    fn contains_mine_panics_off_board() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        layout.contains_mine((2, 0));
    }

    #[test]
    #[should_panic]
    fn adjacent_mine_count_panics_off_board() {
        let layout = MineLayout::from_mine_coords((2, 2), &[(0, 0)]).unwrap();

        layout.adjacent_mine_count((0, 2));
    }

    #[test]
    fn validate_coords_checks_bounds() {
        let layout = MineLayout::from_mine_coords((4, 2), &[]).unwrap();

        assert_eq!(layout.validate_coords((3, 1)), Ok((3, 1)));
        assert_eq!(layout.validate_coords((4, 0)), Err(GameError::OutOfBounds));
        assert_eq!(layout.validate_coords((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn outcomes_merge_by_significance() {
        use RevealOutcome::*;

        assert_eq!(NoChange | Revealed, Revealed);
        assert_eq!(Revealed | Won, Won);
        assert_eq!(Won | HitMine, HitMine);
        assert_eq!(NoChange | NoChange, NoChange);
        assert!(!NoChange.has_update());
    }
}
