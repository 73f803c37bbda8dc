use super::*;
use ndarray::Array2;

/// Purely random placement of exactly `config.mines` mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    seed: u64,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, config: GameConfig) -> MineLayout {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let shape = config.size().to_nd_index();

        // optimize for full boards
        if config.mines >= total_cells {
            if config.mines > total_cells {
                log::warn!(
                    "Minefield already full, generated anyway, requested {} but only fits {}",
                    config.mines,
                    total_cells
                );
            }
            return MineLayout::from_mine_mask(Array2::from_elem(shape, true));
        }

        let mut mines: Array2<bool> = Array2::default(shape);
        let mut free_cells = total_cells;
        let mut mines_placed = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        if let Some(cells) = mines.as_slice_mut() {
            while mines_placed < config.mines && free_cells > 0 {
                // pick the n-th free cell, skipping the ones already mined
                let mut place: CellCount = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if place == 0 {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                    place -= 1;
                }
            }
        }

        let layout = MineLayout::from_mine_mask(mines);
        if layout.mine_count() != config.mines {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                layout.mine_count(),
                config.mines
            );
        }
        layout
    }
}
