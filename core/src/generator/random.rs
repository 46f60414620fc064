use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Uniform random placement that keeps the first click and its in-bounds
/// neighbors mine-free, so the opening move always lands on a zero cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
    first_click: Coord2,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, first_click: Coord2) -> Self {
        Self { seed, first_click }
    }

    /// The clicked cell plus its in-bounds neighbors. Between 4 cells
    /// (corner click) and 9 (interior click).
    fn safe_zone(&self, config: &GameConfig) -> impl Iterator<Item = Coord2> {
        core::iter::once(self.first_click).chain(neighbors(self.first_click, config.size()))
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: &GameConfig) -> Result<MineLayout> {
        config.validate_coords(self.first_click)?;

        let cols = usize::from(config.cols());
        let total = config.total_cells() as usize;

        let mut excluded = vec![false; total];
        for (row, col) in self.safe_zone(config) {
            excluded[usize::from(row) * cols + usize::from(col)] = true;
        }
        let candidates: Vec<usize> = (0..total).filter(|&flat| !excluded[flat]).collect();

        let requested = config.mines() as usize;
        if requested > candidates.len() {
            return Err(GameError::InvalidConfiguration(
                "mine count exceeds the cells left outside the first-click safe zone",
            ));
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        for pick in rand::seq::index::sample(&mut rng, candidates.len(), requested) {
            let flat = candidates[pick];
            mines[[flat / cols, flat % cols]] = true;
        }

        log::debug!(
            "placed {} mines on a {}x{} grid, safe zone around {:?}",
            requested,
            config.rows(),
            config.cols(),
            self.first_click
        );

        Ok(MineLayout::from_mine_mask(mines))
    }
}
