use alloc::vec::Vec;
use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    InProgress,
    /// A mine was revealed.
    Dead,
    /// Every safe cell was revealed.
    Won,
}

impl BoardState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Dead | Self::Won)
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Game state of one board: the mine layout, what the player has uncovered
/// and whether the game is still going.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    layout: MineLayout,
    revealed: Array2<bool>,
    revealed_count: Saturating<CellCount>,
    state: BoardState,
    triggered_mine: Option<Coord2>,
}

impl Board {
    /// Starts a game over a known layout.
    pub fn new(layout: MineLayout) -> Self {
        let size = layout.size();
        Self {
            layout,
            revealed: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Starts a game with `config.mines` mines placed at random from `seed`.
    pub fn new_game(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }

    /// Starts a game from any layout strategy; a fixed [`MineLayout`] must
    /// match `config` exactly.
    pub fn with_generator(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        log::debug!(
            "New game on {}x{} board with {} mines",
            layout.size().0,
            layout.size().1,
            layout.mine_count()
        );
        Ok(Self::new(layout))
    }

    /// Replaces this game with a fresh one; on error the current game is kept.
    pub fn restart(&mut self, config: GameConfig, seed: u64) -> Result<()> {
        *self = Self::new_game(config, seed)?;
        Ok(())
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_dead(&self) -> bool {
        matches!(self.state, BoardState::Dead)
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.layout.size()
    }

    pub fn config(&self) -> GameConfig {
        self.layout.game_config()
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }

    pub fn total_mines(&self) -> CellCount {
        self.layout.mine_count()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn safe_cells_left(&self) -> CellCount {
        self.layout.safe_cell_count() - self.revealed_count.0
    }

    /// The mine whose reveal ended the game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn is_revealed(&self, coords: Coord2) -> Result<bool> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.revealed[coords.to_nd_index()])
    }

    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.layout.contains_mine(coords))
    }

    /// How the cell at `coords` should be drawn.
    ///
    /// Hidden cells stay hidden until the game is lost, at which point every
    /// mine is shown along with the open cells.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.view_unchecked(coords))
    }

    /// [`Self::cell_view`] for the whole board, indexed `[x, y]`.
    pub fn cell_views(&self) -> Array2<CellView> {
        Array2::from_shape_fn(self.revealed.raw_dim(), |(x, y)| {
            self.view_unchecked((x as Coord, y as Coord))
        })
    }

    fn view_unchecked(&self, coords: Coord2) -> CellView {
        if !self.revealed[coords.to_nd_index()] && !self.is_dead() {
            CellView::Hidden
        } else if self.layout.contains_mine(coords) {
            CellView::Mine
        } else {
            CellView::Open(self.layout.adjacent_mine_count(coords))
        }
    }

    /// Uncovers the cell at `coords`.
    ///
    /// A mine ends the game without being marked revealed. A safe cell with
    /// no adjacent mines cascades into its whole zero region and that
    /// region's numbered border. Reveals after the game ended are ignored.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.layout.validate_coords(coords)?;
        Ok(self.reveal_valid(coords))
    }

    /// Reveals several cells in order, merging the outcomes.
    ///
    /// All coordinates are checked before any cell is touched.
    pub fn reveal_many(
        &mut self,
        coords: impl IntoIterator<Item = Coord2>,
    ) -> Result<RevealOutcome> {
        let coords = coords
            .into_iter()
            .map(|pos| self.layout.validate_coords(pos))
            .collect::<Result<Vec<_>>>()?;

        Ok(coords
            .into_iter()
            .map(|pos| self.reveal_valid(pos))
            .fold(RevealOutcome::NoChange, core::ops::BitOr::bitor))
    }

    fn reveal_valid(&mut self, coords: Coord2) -> RevealOutcome {
        if self.state.is_finished() {
            log::debug!("Ignoring reveal at {coords:?}, game is over");
            return RevealOutcome::NoChange;
        }

        if self.layout.contains_mine(coords) {
            log::debug!("Mine hit at {coords:?}");
            self.triggered_mine = Some(coords);
            self.state = BoardState::Dead;
            return RevealOutcome::HitMine;
        }

        if self.revealed[coords.to_nd_index()] {
            return RevealOutcome::NoChange;
        }

        let opened = self.flood_fill(coords);
        log::trace!("Reveal at {coords:?} opened {opened} cells");

        if self.safe_cells_left() == 0 {
            log::debug!("All {} safe cells revealed", self.revealed_count.0);
            self.state = BoardState::Won;
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens `start` and, through zero-count cells, everything connected to
    /// it. Mines are never entered: a zero cell has none around it, and
    /// numbered cells are not expanded. Returns how many cells were opened.
    fn flood_fill(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = Vec::from([start]);

        while let Some(coords) = to_visit.pop() {
            let revealed = &mut self.revealed[coords.to_nd_index()];
            if *revealed || self.layout.contains_mine(coords) {
                continue;
            }
            *revealed = true;
            self.revealed_count += 1;
            opened += 1;

            if self.layout.adjacent_mine_count(coords) == 0 {
                to_visit.extend(
                    self.layout
                        .iter_neighbors(coords)
                        .filter(|&pos| !self.revealed[pos.to_nd_index()]),
                );
            }
        }

        opened
    }
}
