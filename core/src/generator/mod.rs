use crate::*;
pub use random::*;

mod random;

/// Strategy producing a mine layout for a validated configuration.
pub trait MinefieldGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout>;
}
