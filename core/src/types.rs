use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major index into the backing `Array2`: `[row, column]`.
pub type NdIndex = [usize; 2];

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Position of a block on the board, 1-based.
///
/// `x` is the column (`1..=width`), `y` is the row (`1..=height`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockPos {
    pub x: Coord,
    pub y: Coord,
}

impl BlockPos {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }

    /// Whether the position lies on a board of the given `(width, height)`.
    pub const fn is_within(self, (width, height): (Coord, Coord)) -> bool {
        self.x >= 1 && self.y >= 1 && self.x <= width && self.y <= height
    }

    /// Sequential id in generation order, starting at 1 on the top-left block.
    pub const fn block_id(self, width: Coord) -> CellCount {
        (self.y as CellCount - 1) * width as CellCount + self.x as CellCount
    }

    /// The 8 surrounding positions that are still on the board.
    pub fn neighbors(self, bounds: (Coord, Coord)) -> NeighborIter {
        NeighborIter::new(self, bounds)
    }
}

pub trait ToNdIndex {
    fn to_nd_index(self) -> NdIndex;
}

impl ToNdIndex for BlockPos {
    fn to_nd_index(self) -> NdIndex {
        [usize::from(self.y) - 1, usize::from(self.x) - 1]
    }
}

/// Board dimensions `(width, height)` as an `Array2` shape `[rows, columns]`.
impl ToNdIndex for (Coord, Coord) {
    fn to_nd_index(self) -> NdIndex {
        [self.1.into(), self.0.into()]
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `pos`, returning a value only when it remains on the board.
fn apply_delta(pos: BlockPos, (dx, dy): (i8, i8), bounds: (Coord, Coord)) -> Option<BlockPos> {
    let next = BlockPos::new(pos.x.checked_add_signed(dx)?, pos.y.checked_add_signed(dy)?);
    next.is_within(bounds).then_some(next)
}

#[derive(Debug)]
pub struct NeighborIter {
    center: BlockPos,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    fn new(center: BlockPos, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = BlockPos;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}
