use crate::consts::{FINGER_OF_COLUMN, POSITION_COUNT, ROW_WIDTH};
use serde::Serialize;

/// A physical key position on the 3x10 grid, with its derived attributes.
///
/// Fingers are numbered 0..=9 left pinky to right pinky; the two index
/// fingers each cover two columns. Positions are cheap `Copy` values and
/// compare by their full attribute set, which is determined by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pos {
    pub index: u8,
    pub col: u8,
    pub row: u8,
    pub finger: u8,
    pub hand: u8,
}

impl Pos {
    pub fn new(index: usize) -> Self {
        debug_assert!(index < POSITION_COUNT, "position index out of range");
        let col = (index % ROW_WIDTH) as u8;
        let row = (index / ROW_WIDTH) as u8;
        let finger = FINGER_OF_COLUMN[col as usize];
        let hand = if finger < 5 { 0 } else { 1 };
        Self {
            index: index as u8,
            col,
            row,
            finger,
            hand,
        }
    }

    /// All 30 positions in ascending index order.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..POSITION_COUNT).map(Pos::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_decomposition() {
        let p = Pos::new(17);
        assert_eq!(p.col, 7);
        assert_eq!(p.row, 1);
        assert_eq!(p.finger, 7);
        assert_eq!(p.hand, 1);
    }

    #[test]
    fn index_columns_share_finger() {
        assert_eq!(Pos::new(3).finger, Pos::new(4).finger);
        assert_eq!(Pos::new(5).finger, Pos::new(6).finger);
        assert_ne!(Pos::new(4).finger, Pos::new(5).finger);
    }

    #[test]
    fn hand_split() {
        for p in Pos::all() {
            assert_eq!(p.hand, if p.col < 5 { 0 } else { 1 });
        }
    }
}
