// src/board/castle_bits.rs

use crate::board::Color;
use serde::{Deserialize, Serialize};

/// Underlying bit type for castling rights: two bits per color.
pub type CastleBits = u8;

// Bit 2*color is the king side, bit 2*color+1 the queen side.
pub const CASTLE_WK: CastleBits = 0b00_0001;
pub const CASTLE_WQ: CastleBits = 0b00_0010;
pub const CASTLE_GK: CastleBits = 0b00_0100;
pub const CASTLE_GQ: CastleBits = 0b00_1000;
pub const CASTLE_BK: CastleBits = 0b01_0000;
pub const CASTLE_BQ: CastleBits = 0b10_0000;
pub const CASTLE_ALL: CastleBits =
    CASTLE_WK | CASTLE_WQ | CASTLE_GK | CASTLE_GQ | CASTLE_BK | CASTLE_BQ;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CastlingSide {
    KingSide,
    QueenSide,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];

    /// Signed file offset the king travels.
    #[inline]
    pub const fn king_offset(self) -> i16 {
        match self {
            CastlingSide::KingSide => 2,
            CastlingSide::QueenSide => -2,
        }
    }

    /// Segment-relative files of the rook before and after castling.
    #[inline]
    pub const fn rook_files(self) -> (u8, u8) {
        match self {
            CastlingSide::KingSide => (7, 5),
            CastlingSide::QueenSide => (0, 3),
        }
    }

    /// Segment-relative files that must be empty.
    #[inline]
    pub const fn empty_files(self) -> &'static [u8] {
        match self {
            CastlingSide::KingSide => &[5, 6],
            CastlingSide::QueenSide => &[1, 2, 3],
        }
    }

    /// Segment-relative file the king crosses on the way.
    #[inline]
    pub const fn passing_file(self) -> u8 {
        match self {
            CastlingSide::KingSide => 5,
            CastlingSide::QueenSide => 3,
        }
    }

    /// The side a rook standing on a home-rank corner belongs to.
    #[inline]
    pub const fn of_rook_file(segment_file: u8) -> Option<CastlingSide> {
        match segment_file {
            7 => Some(CastlingSide::KingSide),
            0 => Some(CastlingSide::QueenSide),
            _ => None,
        }
    }
}

#[inline(always)]
pub const fn castle_bit(color: Color, side: CastlingSide) -> CastleBits {
    let base = (color as u8) * 2;
    match side {
        CastlingSide::KingSide => 1 << base,
        CastlingSide::QueenSide => 1 << (base + 1),
    }
}

/// Per-color, per-side castling rights. Rights are only ever cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights(CastleBits);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(CASTLE_ALL);
    pub const NONE: CastlingRights = CastlingRights(0);

    #[inline(always)]
    pub const fn bits(self) -> CastleBits {
        self.0
    }

    #[inline(always)]
    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        self.0 & castle_bit(color, side) != 0
    }

    #[inline]
    #[must_use]
    pub const fn revoke(self, color: Color, side: CastlingSide) -> Self {
        CastlingRights(self.0 & !castle_bit(color, side))
    }

    #[inline]
    #[must_use]
    pub const fn revoke_color(self, color: Color) -> Self {
        self.revoke(color, CastlingSide::KingSide)
            .revoke(color, CastlingSide::QueenSide)
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::ALL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn castle_bits_single_and_disjoint() {
        for b in [CASTLE_WK, CASTLE_WQ, CASTLE_GK, CASTLE_GQ, CASTLE_BK, CASTLE_BQ] {
            assert_eq!(b.count_ones(), 1);
        }
        assert_eq!(CASTLE_ALL.count_ones(), 6);
        assert_eq!(castle_bit(Color::Gray, CastlingSide::QueenSide), CASTLE_GQ);
        assert_eq!(castle_bit(Color::Black, CastlingSide::KingSide), CASTLE_BK);
    }

    #[test]
    fn revoking_is_sticky_and_local() {
        let r = CastlingRights::ALL.revoke(Color::Gray, CastlingSide::KingSide);
        assert!(!r.has(Color::Gray, CastlingSide::KingSide));
        assert!(r.has(Color::Gray, CastlingSide::QueenSide));
        assert!(r.has(Color::White, CastlingSide::KingSide));
        let r = r.revoke_color(Color::Gray);
        assert_eq!(r.bits(), CASTLE_WK | CASTLE_WQ | CASTLE_BK | CASTLE_BQ);
        assert_eq!(r.revoke(Color::Gray, CastlingSide::KingSide), r);
    }
}
