use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Whether moves are still accepted.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::NotStarted | Self::InProgress)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One round of play: the grid metadata and every block on it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: u32,
    status: GameStatus,
    height: Coord,
    width: Coord,
    num_of_mines: CellCount,
    minefield: Array2<Block>,
    flagged_count: CellCount,
    revealed_count: CellCount,
    triggered_mine: Option<BlockPos>,
}

impl Game {
    pub fn new(id: u32, layout: &MineLayout) -> Self {
        let (width, height) = layout.size();
        let minefield = Array2::from_shape_fn(layout.size().to_nd_index(), |(row, col)| {
            let pos = BlockPos::new(col as Coord + 1, row as Coord + 1);
            Block::new(pos, width, layout.contains_mine(pos))
        });

        Self {
            id,
            status: GameStatus::NotStarted,
            height,
            width,
            num_of_mines: layout.mine_count(),
            minefield,
            flagged_count: 0,
            revealed_count: 0,
            triggered_mine: None,
        }
    }

    /// Single generation pass: validates the config, places mines and shields every block.
    pub fn create_minefield(
        id: u32,
        config: GameConfig,
        placement: Placement,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        let layout = placement.generate(seed, config);
        log::debug!(
            "game {}: {}x{} with {} mines",
            id,
            config.width,
            config.height,
            layout.mine_count()
        );
        Ok(Self::new(id, &layout))
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn height(&self) -> Coord {
        self.height
    }

    pub fn width(&self) -> Coord {
        self.width
    }

    /// `(width, height)`
    pub fn size(&self) -> (Coord, Coord) {
        (self.width, self.height)
    }

    pub fn num_of_mines(&self) -> CellCount {
        self.num_of_mines
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mines_left(&self) -> i32 {
        i32::from(self.num_of_mines) - i32::from(self.flagged_count)
    }

    pub fn triggered_mine(&self) -> Option<BlockPos> {
        self.triggered_mine
    }

    /// Blocks in generation order, row by row.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.minefield.iter()
    }

    pub fn block_at(&self, pos: BlockPos) -> Result<&Block> {
        let pos = self.validate_pos(pos)?;
        Ok(&self.minefield[pos.to_nd_index()])
    }

    pub fn count_surrounding_mines(&self, pos: BlockPos) -> u8 {
        pos.neighbors(self.size())
            .filter(|&n| self.minefield[n.to_nd_index()].is_mine)
            .count() as u8
    }

    pub fn toggle_flag(&mut self, pos: BlockPos) -> Result<MarkOutcome> {
        use BlockStatus::*;

        let pos = self.validate_pos(pos)?;
        self.check_not_finished()?;

        let all_flags_used = self.flagged_count >= self.num_of_mines;
        let block = &mut self.minefield[pos.to_nd_index()];
        let outcome = match block.status {
            Shielded if all_flags_used => MarkOutcome::NoChange,
            Shielded => {
                block.status = Flagged;
                self.flagged_count += 1;
                MarkOutcome::Flagged
            }
            Flagged => {
                block.status = Shielded;
                self.flagged_count -= 1;
                MarkOutcome::Unflagged
            }
            Revealed(_) => MarkOutcome::NoChange,
        };
        log::debug!("flag {:?}: {:?}", pos, outcome);
        Ok(outcome)
    }

    pub fn reveal(&mut self, pos: BlockPos) -> Result<RevealOutcome> {
        let pos = self.validate_pos(pos)?;
        self.check_not_finished()?;

        let block = self.minefield[pos.to_nd_index()];
        let outcome = match block.status {
            BlockStatus::Flagged | BlockStatus::Revealed(_) => RevealOutcome::NoChange,
            BlockStatus::Shielded if block.is_mine => {
                self.triggered_mine = Some(pos);
                self.status = GameStatus::Lost;
                RevealOutcome::HitMine
            }
            BlockStatus::Shielded => {
                let count = self.count_surrounding_mines(pos);
                self.minefield[pos.to_nd_index()].status = BlockStatus::Revealed(count);
                self.revealed_count += 1;

                if self.revealed_count == self.safe_block_count() {
                    self.status = GameStatus::Won;
                    RevealOutcome::Won
                } else {
                    self.status = GameStatus::InProgress;
                    RevealOutcome::Revealed(count)
                }
            }
        };
        log::debug!("reveal {:?}: {:?}", pos, outcome);
        Ok(outcome)
    }

    fn safe_block_count(&self) -> CellCount {
        self.minefield.len() as CellCount - self.num_of_mines
    }

    fn validate_pos(&self, pos: BlockPos) -> Result<BlockPos> {
        if pos.is_within(self.size()) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
