use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockStatus {
    Shielded,
    Flagged,
    /// Opened, carrying the number of adjacent mines.
    Revealed(u8),
}

impl BlockStatus {
    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }
}

impl Default for BlockStatus {
    fn default() -> Self {
        Self::Shielded
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: CellCount,
    pub status: BlockStatus,
    pub pos: BlockPos,
    pub is_mine: bool,
}

impl Block {
    pub(crate) fn new(pos: BlockPos, width: Coord, is_mine: bool) -> Self {
        Self {
            id: pos.block_id(width),
            status: BlockStatus::Shielded,
            pos,
            is_mine,
        }
    }
}
