use crate::*;
use serde::{Deserialize, Serialize};

pub use density::*;
pub use random::*;

mod density;
mod random;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout;
}

/// How mines are distributed over a new board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    /// Exactly the configured number of mines.
    Exact,
    /// Every block independently holds a mine with the given percent chance.
    Density(u8),
}

impl Placement {
    pub const DEFAULT_DENSITY: u8 = 25;

    pub fn generate(self, seed: u64, config: GameConfig) -> MineLayout {
        match self {
            Self::Exact => RandomMinefieldGenerator::new(seed).generate(config),
            Self::Density(percent) => DensityMinefieldGenerator::new(seed, percent).generate(config),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::Exact
    }
}
