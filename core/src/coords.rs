use alloc::format;
use alloc::string::String;

use crate::*;

const FLAG_SUFFIX: &str = "flag";

impl BlockPos {
    /// DOM id of the block element, `X{x}Y{y}`.
    pub fn element_id(self) -> String {
        format!("X{}Y{}", self.x, self.y)
    }

    /// DOM id of the flag marker placed inside a flagged block.
    pub fn flag_element_id(self) -> String {
        format!("X{}Y{}{}", self.x, self.y, FLAG_SUFFIX)
    }

    /// Recovers the position from either a block id or a flag marker id.
    pub fn from_element_id(id: &str) -> Result<Self> {
        let id = id.strip_suffix(FLAG_SUFFIX).unwrap_or(id);
        let rest = id.strip_prefix('X').ok_or(GameError::InvalidElementId)?;
        let (x, y) = rest.split_once('Y').ok_or(GameError::InvalidElementId)?;

        let pos = Self::new(parse_coord(x)?, parse_coord(y)?);
        Ok(pos)
    }
}

fn parse_coord(digits: &str) -> Result<Coord> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GameError::InvalidElementId);
    }
    match digits.parse::<Coord>() {
        Ok(0) | Err(_) => Err(GameError::InvalidElementId),
        Ok(coord) => Ok(coord),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_block_and_flag_ids() {
        let pos = BlockPos::new(7, 12);
        assert_eq!(pos.element_id(), "X7Y12");
        assert_eq!(pos.flag_element_id(), "X7Y12flag");
    }

    #[test]
    fn parses_block_and_flag_ids() {
        assert_eq!(BlockPos::from_element_id("X20Y1"), Ok(BlockPos::new(20, 1)));
        assert_eq!(
            BlockPos::from_element_id("X3Y4flag"),
            Ok(BlockPos::new(3, 4))
        );
    }

    #[test]
    fn rejects_malformed_ids() {
        for id in [
            "", "X", "XY", "X1", "Y1", "X1Y", "XaY1", "X1Y1x", "X+1Y1", "x1y1", "gameContainer",
        ] {
            assert_eq!(
                BlockPos::from_element_id(id),
                Err(GameError::InvalidElementId),
                "{id:?}"
            );
        }
    }

    #[test]
    fn rejects_zero_and_overflowing_coordinates() {
        assert_eq!(
            BlockPos::from_element_id("X0Y1"),
            Err(GameError::InvalidElementId)
        );
        assert_eq!(
            BlockPos::from_element_id("X1Y256"),
            Err(GameError::InvalidElementId)
        );
    }
}
