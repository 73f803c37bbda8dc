#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use block::*;
pub use error::*;
pub use game::*;
pub use generator::*;
pub use types::*;

mod block;
mod coords;
mod error;
mod game;
mod generator;
mod types;

/// Board shape and mine count requested by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub height: Coord,
    pub width: Coord,
    pub mines: CellCount,
}

impl GameConfig {
    pub const DEFAULT_HEIGHT: Coord = 12;
    pub const DEFAULT_WIDTH: Coord = 20;
    pub const DEFAULT_MINES: CellCount = 80;

    pub const fn new_unchecked(height: Coord, width: Coord, mines: CellCount) -> Self {
        Self {
            height,
            width,
            mines,
        }
    }

    /// Clamps every value into range instead of failing.
    pub fn new(height: Coord, width: Coord, mines: CellCount) -> Self {
        let height = height.max(1);
        let width = width.max(1);
        let mines = mines.min(mult(height, width));
        Self::new_unchecked(height, width, mines)
    }

    pub fn try_new(height: Coord, width: Coord, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(height, width, mines);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(GameError::InvalidSize);
        }
        if self.mines > self.total_cells() {
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }

    /// `(width, height)`, the bounds used for neighbor lookups.
    pub const fn size(&self) -> (Coord, Coord) {
        (self.width, self.height)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.height, self.width)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            Self::DEFAULT_HEIGHT,
            Self::DEFAULT_WIDTH,
            Self::DEFAULT_MINES,
        )
    }
}

/// Where the mines are, stored row-major as `[row, column]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount;
        Self {
            mine_mask,
            mine_count,
        }
    }

    pub fn from_mine_positions(size: (Coord, Coord), mines: &[BlockPos]) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for &pos in mines {
            if !pos.is_within(size) {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mine_mask))
    }

    pub fn game_config(&self) -> GameConfig {
        let (width, height) = self.size();
        GameConfig::new_unchecked(height, width, self.mine_count)
    }

    /// `(width, height)`
    pub fn size(&self) -> (Coord, Coord) {
        let (rows, columns) = self.mine_mask.dim();
        (columns as Coord, rows as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: BlockPos) -> bool {
        self[pos]
    }

    pub fn adjacent_mine_count(&self, pos: BlockPos) -> u8 {
        pos.neighbors(self.size()).filter(|&n| self[n]).count() as u8
    }
}

impl Index<BlockPos> for MineLayout {
    type Output = bool;

    fn index(&self, pos: BlockPos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    /// Change in the number of placed flags.
    pub const fn flag_delta(self) -> i32 {
        match self {
            Self::NoChange => 0,
            Self::Flagged => 1,
            Self::Unflagged => -1,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed(u8),
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed(_) => true,
            HitMine => true,
            Won => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_form_defaults() {
        let config = GameConfig::default();
        assert_eq!((config.height, config.width, config.mines), (12, 20, 80));
        assert_eq!(config.total_cells(), 240);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn try_new_rejects_bad_configs() {
        assert_eq!(GameConfig::try_new(0, 5, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::try_new(5, 0, 1), Err(GameError::InvalidSize));
        assert_eq!(GameConfig::try_new(2, 2, 5), Err(GameError::TooManyMines));
        assert!(GameConfig::try_new(2, 2, 4).is_ok());
        assert!(GameConfig::try_new(2, 2, 0).is_ok());
    }

    #[test]
    fn new_clamps_into_range() {
        assert_eq!(GameConfig::new(0, 0, 9), GameConfig::new_unchecked(1, 1, 1));
        assert_eq!(GameConfig::new(3, 3, 100).mines, 9);
    }

    #[test]
    fn layout_counts_adjacent_mines() {
        // . * .
        // * . .
        // . . *
        let mines = [BlockPos::new(2, 1), BlockPos::new(1, 2), BlockPos::new(3, 3)];
        let layout = MineLayout::from_mine_positions((3, 3), &mines).unwrap();

        assert_eq!(layout.mine_count(), 3);
        assert_eq!(layout.safe_cell_count(), 6);
        assert_eq!(layout.adjacent_mine_count(BlockPos::new(1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count(BlockPos::new(2, 2)), 3);
        assert_eq!(layout.adjacent_mine_count(BlockPos::new(3, 1)), 1);
        assert_eq!(layout.adjacent_mine_count(BlockPos::new(1, 3)), 1);
    }

    #[test]
    fn layout_size_is_width_then_height() {
        let layout = MineLayout::from_mine_positions((4, 2), &[BlockPos::new(4, 2)]).unwrap();
        assert_eq!(layout.size(), (4, 2));
        assert!(layout.contains_mine(BlockPos::new(4, 2)));
        assert_eq!(layout.game_config(), GameConfig::new_unchecked(2, 4, 1));
    }

    #[test]
    fn layout_rejects_off_board_mines() {
        assert_eq!(
            MineLayout::from_mine_positions((2, 2), &[BlockPos::new(3, 1)]),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(
            MineLayout::from_mine_positions((2, 2), &[BlockPos::new(0, 1)]),
            Err(GameError::InvalidCoords)
        );
    }

    #[test]
    fn flag_deltas() {
        assert_eq!(MarkOutcome::Flagged.flag_delta(), 1);
        assert_eq!(MarkOutcome::Unflagged.flag_delta(), -1);
        assert_eq!(MarkOutcome::NoChange.flag_delta(), 0);
        assert!(!MarkOutcome::NoChange.has_update());
    }
}
