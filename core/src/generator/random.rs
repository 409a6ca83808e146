use super::*;

/// Uniformly random placement driven by a seeded RNG.
///
/// Mines are placed by rejection sampling: draw a random cell, place a mine
/// there unless one is already present, repeat until the requested count is
/// reached. This needs about `mines` draws on sparse boards and slows down as
/// the board fills up, which [`GameConfig::validate`] bounds by always leaving
/// at least one safe cell.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        use rand::prelude::*;

        config.validate()?;
        log::debug!(
            "Generating {}x{} minefield with {} mines, seed {}",
            config.size.0,
            config.size.1,
            config.mines,
            self.seed
        );

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size.to_nd_index());
        let mut placed: CellCount = 0;
        let mut rejected: u32 = 0;

        while placed < config.mines {
            let coords: Coord2 = (
                rng.random_range(0..config.size.0),
                rng.random_range(0..config.size.1),
            );
            let cell = &mut mines[coords.to_nd_index()];
            if *cell {
                rejected += 1;
            } else {
                *cell = true;
                placed += 1;
            }
        }
        log::trace!("Placed {placed} mines, {rejected} draws rejected");

        Ok(MineLayout::from_mine_mask(mines))
    }
}
