use crate::board::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Ranks counted from the home rank (0) toward the centre (5).
pub const RANKS: u8 = 6;
/// Files around the ring, three segments of eight.
pub const FILES: u8 = 24;
pub const SEGMENT_FILES: u8 = 8;
pub const SQUARES: usize = RANKS as usize * FILES as usize;

/// A square of the ring board.
///
/// Ordering follows the linear index `rank * 24 + file`, which is also the
/// order `Pos::all()` yields squares in.
/// Serialized as a `(rank, file)` pair; pairs off the board are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "(u8, u8)", into = "(u8, u8)")]
pub struct Pos {
    rank: u8,
    file: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square [{rank},{file}] is off the board")]
pub struct OffBoard {
    pub rank: u8,
    pub file: u8,
}

impl TryFrom<(u8, u8)> for Pos {
    type Error = OffBoard;

    fn try_from((rank, file): (u8, u8)) -> Result<Self, OffBoard> {
        if rank < RANKS && file < FILES {
            Ok(Pos { rank, file })
        } else {
            Err(OffBoard { rank, file })
        }
    }
}

impl From<Pos> for (u8, u8) {
    fn from(pos: Pos) -> Self {
        (pos.rank, pos.file)
    }
}

impl Pos {
    #[inline(always)]
    pub const fn new(rank: u8, file: u8) -> Self {
        debug_assert!(rank < RANKS && file < FILES);
        Pos { rank, file }
    }

    /// Builds a square from signed coordinates, wrapping the file around the
    /// ring. `None` when the rank is off the board.
    #[inline]
    pub fn try_new(rank: i16, file: i16) -> Option<Self> {
        if !(0..RANKS as i16).contains(&rank) {
            return None;
        }
        Some(Pos::new(rank as u8, file.rem_euclid(FILES as i16) as u8))
    }

    /// Square addressed relative to a color's own segment.
    #[inline]
    pub const fn colored(color: Color, rank: u8, color_file: u8) -> Self {
        Pos::new(rank, color.segment_start() + color_file)
    }

    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.file
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self.rank as usize * FILES as usize + self.file as usize
    }

    #[inline(always)]
    pub fn from_index(idx: usize) -> Self {
        debug_assert!(idx < SQUARES, "square index out of range: {idx}");
        Pos::new((idx / FILES as usize) as u8, (idx % FILES as usize) as u8)
    }

    /// The color owning the segment this square lies in.
    #[inline]
    pub fn segment(self) -> Color {
        Color::from_index((self.file / SEGMENT_FILES) as usize)
    }

    /// File counted from the start of the owning segment (0..8).
    #[inline(always)]
    pub const fn segment_file(self) -> u8 {
        self.file % SEGMENT_FILES
    }

    /// Same rank, file on the far side of the ring.
    #[inline]
    pub const fn across_center(self) -> Self {
        Pos::new(self.rank, (self.file + FILES / 2) % FILES)
    }

    #[inline]
    pub fn same_rank(self, other: Pos) -> bool {
        self.rank == other.rank
    }

    #[inline]
    pub fn same_file(self, other: Pos) -> bool {
        self.file == other.file
    }

    /// Same file, or the file directly across the centre.
    #[inline]
    pub fn is_same_or_opposite_file(self, other: Pos) -> bool {
        self.file % (FILES / 2) == other.file % (FILES / 2)
    }

    /// All 144 squares in index order.
    pub fn all() -> impl Iterator<Item = Pos> + Clone {
        (0..SQUARES).map(Pos::from_index)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.rank, self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, SeqDeserializer};

    fn deserialize_pair(rank: u8, file: u8) -> Result<Pos, ValueError> {
        Pos::deserialize(SeqDeserializer::<_, ValueError>::new([rank, file].into_iter()))
    }

    #[test]
    fn deserialize_checks_the_board_bounds() {
        assert_eq!(deserialize_pair(2, 5), Ok(Pos::new(2, 5)));
        assert_eq!(deserialize_pair(5, 23), Ok(Pos::new(5, 23)));
        assert!(deserialize_pair(9, 200).is_err());
        assert!(deserialize_pair(6, 0).is_err());
        assert!(deserialize_pair(0, 24).is_err());
        assert_eq!(
            Pos::try_from((9, 200)),
            Err(OffBoard { rank: 9, file: 200 })
        );
        assert_eq!(<(u8, u8)>::from(Pos::new(3, 17)), (3, 17));
    }

    #[test]
    fn index_roundtrip_covers_board() {
        let all: Vec<Pos> = Pos::all().collect();
        assert_eq!(all.len(), SQUARES);
        for (i, p) in all.iter().enumerate() {
            assert_eq!(p.index(), i);
            assert_eq!(Pos::from_index(i), *p);
        }
    }

    #[test]
    fn try_new_wraps_files_and_rejects_ranks() {
        assert_eq!(Pos::try_new(0, -1), Some(Pos::new(0, 23)));
        assert_eq!(Pos::try_new(3, 25), Some(Pos::new(3, 1)));
        assert_eq!(Pos::try_new(6, 0), None);
        assert_eq!(Pos::try_new(-1, 0), None);
    }

    #[test]
    fn segments_follow_color_order() {
        assert_eq!(Pos::new(0, 0).segment(), Color::White);
        assert_eq!(Pos::new(5, 7).segment(), Color::White);
        assert_eq!(Pos::new(2, 8).segment(), Color::Gray);
        assert_eq!(Pos::new(1, 23).segment(), Color::Black);
        assert_eq!(Pos::colored(Color::Black, 0, 4), Pos::new(0, 20));
    }

    #[test]
    fn opposite_file_detection() {
        let a = Pos::new(2, 3);
        assert!(a.is_same_or_opposite_file(Pos::new(5, 15)));
        assert!(a.is_same_or_opposite_file(Pos::new(0, 3)));
        assert!(!a.is_same_or_opposite_file(Pos::new(0, 4)));
        assert_eq!(a.across_center(), Pos::new(2, 15));
    }
}
