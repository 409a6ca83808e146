use crate::*;
pub use random::*;

mod random;

/// Strategy for laying out the mines of a new game.
pub trait MineGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// A fixed layout generates itself, provided it matches the config.
impl MineGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        config.validate()?;
        if self.game_config() != config {
            log::warn!(
                "Fixed layout {:?} does not match requested config {:?}",
                self.game_config(),
                config
            );
            return Err(ConfigIssue::LayoutMismatch.into());
        }
        Ok(self)
    }
}
