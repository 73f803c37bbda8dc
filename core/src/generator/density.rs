use super::*;
use ndarray::Array2;

/// Rolls every block independently; the configured mine count is only an upper bound
/// for logging, the resulting layout reports what was actually placed.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityMinefieldGenerator {
    seed: u64,
    percent: u8,
}

impl DensityMinefieldGenerator {
    pub fn new(seed: u64, percent: u8) -> Self {
        Self {
            seed,
            percent: percent.min(100),
        }
    }
}

impl MinefieldGenerator for DensityMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mines = Array2::from_shape_simple_fn(config.size().to_nd_index(), || {
            rng.random_range(0..100u8) < self.percent
        });

        let layout = MineLayout::from_mine_mask(mines);
        log::debug!(
            "density {}% placed {} mines ({} configured)",
            self.percent,
            layout.mine_count(),
            config.mines
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_full_density() {
        let config = GameConfig::new_unchecked(5, 6, 10);
        assert_eq!(DensityMinefieldGenerator::new(3, 0).generate(config).mine_count(), 0);
        assert_eq!(DensityMinefieldGenerator::new(3, 100).generate(config).mine_count(), 30);
    }

    #[test]
    fn quarter_density_lands_near_a_quarter() {
        let config = GameConfig::new_unchecked(100, 100, 0);
        let count = DensityMinefieldGenerator::new(99, 25).generate(config).mine_count();
        assert!((2000..3000).contains(&count), "{count}");
    }

    #[test]
    fn percent_is_capped() {
        let config = GameConfig::new_unchecked(2, 2, 0);
        let layout = Placement::Density(200).generate(5, config);
        assert_eq!(layout.mine_count(), 4);
    }
}
