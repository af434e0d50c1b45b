//! Displacements on the ring board.
//!
//! The board is six ranks by twenty-four files bent into a ring: files wrap
//! modulo 24 and rank 5 borders the centre. Anything that moves inward past
//! rank 5 comes out on the far side of the centre, twelve files away, and
//! continues outward.
//!
//! A [`Vector`] knows where it lands from a given origin, which squares must
//! be empty on the way, and which moats it crosses. The `*_to` resolvers on
//! [`Pos`] go the other way: given two squares, which shapes connect them.

use crate::board::{CastlingSide, Color, KING_START_FILE, Piece, PieceKind};
use crate::square::{FILES, Pos, RANKS};
use arrayvec::ArrayVec;
use thiserror::Error;

const LAST_RANK: i16 = RANKS as i16 - 1;
/// Inward distance of a full pass through the centre, home rank to home rank.
const THROUGH_CENTER: i16 = 2 * LAST_RANK + 1;
const HALF_RING: i16 = FILES as i16 / 2;

/// Longest list of squares a vector can require to be empty.
pub const MAX_EMPTIES: usize = FILES as usize;

pub type Empties = ArrayVec<Pos, MAX_EMPTIES>;
pub type Moats = ArrayVec<Color, 3>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("no {shape} vector leads from {from} to {to}")]
    CannotConstruct {
        shape: &'static str,
        from: Pos,
        to: Pos,
    },
    #[error("{vector:?} cannot be added to {from}")]
    AdditionFailed { vector: Vector, from: Pos },
    #[error("no piece movement relates {from} and {to}")]
    NoVector { from: Pos, to: Pos },
}

/// Every displacement a piece can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vector {
    /// Along a file; positive is inward, and may continue through the centre.
    Rank(i8),
    /// Along a rank; positive is toward higher files, wrapping the ring.
    File(i8),
    Diagonal {
        steps: u8,
        inward: bool,
        plus_file: bool,
    },
    Knight {
        rank: i8,
        file: i8,
    },
    PawnWalk {
        inward: bool,
    },
    /// Two squares inward from rank 1.
    PawnLongJump,
    PawnCapture {
        inward: bool,
        plus_file: bool,
    },
    Castling(CastlingSide),
}

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
];

#[inline]
fn sign(plus: bool) -> i16 {
    if plus { 1 } else { -1 }
}

/// `n` squares along the file, passing through the centre when needed.
fn rank_step(from: Pos, n: i16) -> Option<Pos> {
    let t = from.rank() as i16 + n;
    let f = from.file() as i16;
    match t {
        0..=LAST_RANK => Pos::try_new(t, f),
        _ if t > LAST_RANK && t <= THROUGH_CENTER => Pos::try_new(THROUGH_CENTER - t, f + HALF_RING),
        _ => None,
    }
}

/// Position after `k` unit diagonal steps.
///
/// Going inward past rank 5 the diagonal turns through the centre: the
/// crossing step lands on rank 5 again, `12 ± 2` files further on, and the
/// walk continues outward with the same file direction.
fn diagonal_step(from: Pos, k: i16, inward: bool, plus_file: bool) -> Option<Pos> {
    let d = sign(plus_file);
    let r = from.rank() as i16;
    let f = from.file() as i16;
    if !inward {
        return Pos::try_new(r - k, f + d * k);
    }
    if r + k <= LAST_RANK {
        return Pos::try_new(r + k, f + d * k);
    }
    let beyond = k - (LAST_RANK - r) - 1;
    if beyond > LAST_RANK {
        return None;
    }
    Pos::try_new(LAST_RANK - beyond, f + d * (k + 1) + HALF_RING)
}

/// Moat crossed by a unit step between two squares, if any. Moats only exist
/// along the home rank.
fn moat_of_step(a: Pos, b: Pos) -> Option<Color> {
    if a.rank() != 0 && b.rank() != 0 {
        return None;
    }
    if a.segment() == b.segment() {
        return None;
    }
    // The moat belongs to the segment whose first file borders the step.
    if (a.file() + 1) % FILES == b.file() {
        Some(b.segment())
    } else if (b.file() + 1) % FILES == a.file() {
        Some(a.segment())
    } else {
        None
    }
}

fn push_moat(moats: &mut Moats, moat: Color) {
    if !moats.contains(&moat) {
        moats.push(moat);
    }
}

impl Vector {
    /// Where this vector lands from `from`. Never `from` itself: the long
    /// diagonal that would circle back to it is rejected.
    pub fn add_to(self, from: Pos) -> Result<Pos, GeometryError> {
        let failed = GeometryError::AdditionFailed { vector: self, from };
        let r = from.rank() as i16;
        let f = from.file() as i16;
        let to = match self {
            Vector::Rank(0) | Vector::File(0) => None,
            Vector::Rank(n) => rank_step(from, n as i16),
            Vector::File(n) => {
                if (n as i16).abs() >= FILES as i16 {
                    None
                } else {
                    Pos::try_new(r, f + n as i16)
                }
            }
            Vector::Diagonal { steps: 0, .. } => None,
            Vector::Diagonal {
                steps,
                inward,
                plus_file,
            } => diagonal_step(from, steps as i16, inward, plus_file),
            Vector::Knight { rank, file } => {
                let t = r + rank as i16;
                if t > LAST_RANK {
                    Pos::try_new(THROUGH_CENTER - t, f + file as i16 + HALF_RING)
                } else {
                    Pos::try_new(t, f + file as i16)
                }
            }
            Vector::PawnWalk { inward: true } => rank_step(from, 1),
            Vector::PawnWalk { inward: false } => Pos::try_new(r - 1, f),
            Vector::PawnLongJump => (r == 1).then(|| Pos::new(3, from.file())),
            Vector::PawnCapture { inward, plus_file } => {
                diagonal_step(from, 1, inward, plus_file)
            }
            Vector::Castling(side) => (r == 0 && from.segment_file() == KING_START_FILE)
                .then(|| Pos::try_new(0, f + side.king_offset()))
                .flatten(),
        };
        to.filter(|&to| to != from).ok_or(failed)
    }

    /// Squares that must be empty for the move to go through, destination
    /// excluded except for castling, where the whole gap between king and
    /// rook counts.
    pub fn empties_from(self, from: Pos) -> Result<Empties, GeometryError> {
        self.add_to(from)?;
        let mut out = Empties::new();
        match self {
            Vector::Rank(n) => {
                let s = (n as i16).signum();
                for k in 1..(n as i16).abs() {
                    out.extend(rank_step(from, s * k));
                }
            }
            Vector::File(n) => {
                let s = (n as i16).signum();
                for k in 1..(n as i16).abs() {
                    out.extend(Pos::try_new(from.rank() as i16, from.file() as i16 + s * k));
                }
            }
            Vector::Diagonal {
                steps,
                inward,
                plus_file,
            } => {
                for k in 1..steps as i16 {
                    out.extend(diagonal_step(from, k, inward, plus_file));
                }
            }
            Vector::PawnLongJump => out.push(Pos::new(2, from.file())),
            Vector::Castling(side) => {
                let base = from.file() - KING_START_FILE;
                for &sf in side.empty_files() {
                    out.push(Pos::new(0, base + sf));
                }
            }
            Vector::Knight { .. } | Vector::PawnWalk { .. } | Vector::PawnCapture { .. } => {}
        }
        Ok(out)
    }

    /// Moats this vector crosses from `from`. Jumps, castling and moves along
    /// a file never cross one.
    pub fn moats(self, from: Pos) -> Moats {
        let mut moats = Moats::new();
        match self {
            Vector::File(n) if from.rank() == 0 => {
                let s = (n as i16).signum();
                let mut prev = from;
                for k in 1..=(n as i16).abs() {
                    let Some(next) = Pos::try_new(0, from.file() as i16 + s * k) else {
                        break;
                    };
                    if let Some(m) = moat_of_step(prev, next) {
                        push_moat(&mut moats, m);
                    }
                    prev = next;
                }
            }
            Vector::Diagonal {
                steps,
                inward,
                plus_file,
            } => {
                let mut prev = from;
                for k in 1..=steps as i16 {
                    let Some(next) = diagonal_step(from, k, inward, plus_file) else {
                        break;
                    };
                    if let Some(m) = moat_of_step(prev, next) {
                        push_moat(&mut moats, m);
                    }
                    prev = next;
                }
            }
            Vector::PawnCapture { inward, plus_file } => {
                if let Some(m) = diagonal_step(from, 1, inward, plus_file)
                    .and_then(|next| moat_of_step(from, next))
                {
                    moats.push(m);
                }
            }
            _ => {}
        }
        moats
    }

    /// Does a pawn making this move pass through the centre?
    pub fn crosses_center(self, from: Pos) -> bool {
        from.rank() as i16 == LAST_RANK
            && matches!(
                self,
                Vector::PawnWalk { inward: true } | Vector::PawnCapture { inward: true, .. }
            )
    }

    /// Can a piece of `kind` ever move along this vector?
    pub fn fits(self, kind: PieceKind) -> bool {
        match self {
            Vector::Rank(n) | Vector::File(n) => match kind {
                PieceKind::Rook | PieceKind::Queen => true,
                PieceKind::King => n.abs() == 1,
                _ => false,
            },
            Vector::Diagonal { steps, .. } => match kind {
                PieceKind::Bishop | PieceKind::Queen => true,
                PieceKind::King => steps == 1,
                _ => false,
            },
            Vector::Knight { .. } => kind == PieceKind::Knight,
            Vector::PawnWalk { .. } | Vector::PawnLongJump | Vector::PawnCapture { .. } => {
                kind == PieceKind::Pawn
            }
            Vector::Castling(_) => kind == PieceKind::King,
        }
    }
}

/// Signed file difference from `from` to `to`, the short way round or, with
/// `long`, the other way. Exactly opposite files give +12 short and -12 long.
pub fn wrapped_file_diff(from: u8, to: u8, long: bool) -> i16 {
    let diff = to as i16 - from as i16;
    let sgn = if diff < 0 { -1 } else { 1 };
    if (diff * sgn > HALF_RING) == long {
        diff
    } else {
        diff - FILES as i16 * sgn
    }
}

impl Pos {
    fn cannot(self, shape: &'static str, to: Pos) -> GeometryError {
        GeometryError::CannotConstruct {
            shape,
            from: self,
            to,
        }
    }

    /// Rook-like move along the file, possibly through the centre onto the
    /// opposite file.
    pub fn rank_vector_to(self, to: Pos) -> Result<Vector, GeometryError> {
        let (r, s) = (self.rank() as i16, to.rank() as i16);
        let n = if self.same_file(to) {
            s - r
        } else if self.is_same_or_opposite_file(to) {
            THROUGH_CENTER - r - s
        } else {
            0
        };
        if n == 0 {
            return Err(self.cannot("rank", to));
        }
        Ok(Vector::Rank(n as i8))
    }

    pub fn file_vector_to(self, to: Pos, long: bool) -> Result<Vector, GeometryError> {
        if !self.same_rank(to) || self.same_file(to) {
            return Err(self.cannot("file", to));
        }
        Ok(Vector::File(wrapped_file_diff(self.file(), to.file(), long) as i8))
    }

    /// Every straight line to `to`: along the file and both ways round the rank.
    pub fn axis_vectors_to(self, to: Pos) -> ArrayVec<Vector, 3> {
        [
            self.rank_vector_to(to),
            self.file_vector_to(to, false),
            self.file_vector_to(to, true),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Diagonals to `to`: one staying on this side of the centre, one turning
    /// through it. Zero, one or both may exist.
    pub fn diagonal_vectors_to(self, to: Pos) -> ArrayVec<Vector, 2> {
        let mut out = ArrayVec::new();
        let file_diff = wrapped_file_diff(self.file(), to.file(), false);
        let plus_file = file_diff > 0;
        let abs_file = file_diff.abs();
        let (r, s) = (self.rank() as i16, to.rank() as i16);

        if r != s && abs_file == (s - r).abs() {
            out.push(Vector::Diagonal {
                steps: abs_file as u8,
                inward: s > r,
                plus_file,
            });
        }
        let rank_sum = r + s;
        if abs_file != 0 && abs_file == rank_sum {
            out.push(Vector::Diagonal {
                steps: (THROUGH_CENTER - rank_sum) as u8,
                inward: true,
                plus_file: !plus_file,
            });
        }
        out.retain(|v| v.add_to(self) == Ok(to));
        out
    }

    pub fn continuous_vectors_to(self, to: Pos) -> ArrayVec<Vector, 5> {
        let mut out = ArrayVec::new();
        out.extend(self.axis_vectors_to(to));
        out.extend(self.diagonal_vectors_to(to));
        out
    }

    pub fn knight_vectors_to(self, to: Pos) -> ArrayVec<Vector, 8> {
        KNIGHT_JUMPS
            .iter()
            .map(|&(rank, file)| Vector::Knight { rank, file })
            .filter(|v| v.add_to(self) == Ok(to))
            .collect()
    }

    /// Single king step: along the rank, along the file, then diagonally.
    pub fn king_continuous_vector_to(self, to: Pos) -> Result<Vector, GeometryError> {
        let axis = [
            Vector::File(1),
            Vector::File(-1),
            Vector::Rank(1),
            Vector::Rank(-1),
        ];
        let diagonal = [(true, true), (false, false), (true, false), (false, true)].map(
            |(inward, plus_file)| Vector::Diagonal {
                steps: 1,
                inward,
                plus_file,
            },
        );
        axis.into_iter()
            .chain(diagonal)
            .find(|v| v.add_to(self) == Ok(to))
            .ok_or_else(|| self.cannot("king step", to))
    }

    pub fn castling_vector_to(self, to: Pos) -> Result<Vector, GeometryError> {
        CastlingSide::BOTH
            .into_iter()
            .map(Vector::Castling)
            .find(|v| v.add_to(self) == Ok(to))
            .ok_or_else(|| self.cannot("castling", to))
    }

    pub fn king_vector_to(self, to: Pos) -> Result<Vector, GeometryError> {
        self.king_continuous_vector_to(to)
            .or_else(|_| self.castling_vector_to(to))
    }

    pub fn pawn_walk_vector_to(self, to: Pos, inward: bool) -> Result<Vector, GeometryError> {
        let v = Vector::PawnWalk { inward };
        match v.add_to(self) {
            Ok(p) if p == to => Ok(v),
            _ => Err(self.cannot("pawn walk", to)),
        }
    }

    pub fn pawn_long_jump_vector_to(self, to: Pos) -> Result<Vector, GeometryError> {
        match Vector::PawnLongJump.add_to(self) {
            Ok(p) if p == to => Ok(Vector::PawnLongJump),
            _ => Err(self.cannot("pawn long jump", to)),
        }
    }

    pub fn pawn_capture_vector_to(self, to: Pos, inward: bool) -> Result<Vector, GeometryError> {
        [true, false]
            .into_iter()
            .map(|plus_file| Vector::PawnCapture { inward, plus_file })
            .find(|v| v.add_to(self) == Ok(to))
            .ok_or_else(|| self.cannot("pawn capture", to))
    }

    /// Pawn shapes in resolution order: long jump, walk, capture.
    pub fn pawn_vector_to(self, to: Pos, inward: bool) -> Result<Vector, GeometryError> {
        let jump = if inward {
            self.pawn_long_jump_vector_to(to)
        } else {
            Err(self.cannot("pawn long jump", to))
        };
        jump.or_else(|_| self.pawn_walk_vector_to(to, inward))
            .or_else(|_| self.pawn_capture_vector_to(to, inward))
    }
}

impl Piece {
    /// Every vector this piece could use to get from `from` to `to`, ignoring
    /// what stands on the board.
    pub fn vectors_to(self, from: Pos, to: Pos) -> ArrayVec<Vector, 8> {
        let mut out = ArrayVec::new();
        match self.kind {
            PieceKind::Pawn => out.extend(from.pawn_vector_to(to, self.moves_inward())),
            PieceKind::Knight => out.extend(from.knight_vectors_to(to)),
            PieceKind::Bishop => out.extend(from.diagonal_vectors_to(to)),
            PieceKind::Rook => out.extend(from.axis_vectors_to(to)),
            PieceKind::Queen => out.extend(from.continuous_vectors_to(to)),
            PieceKind::King => out.extend(from.king_vector_to(to)),
        }
        out
    }
}

/// Every vector shape that can start on `from`, for building reach tables.
pub fn all_vectors_from(from: Pos) -> impl Iterator<Item = Vector> {
    let ranks = (-(LAST_RANK as i8)..=THROUGH_CENTER as i8).map(Vector::Rank);
    let files = (1..FILES as i8).map(Vector::File);
    let diagonals = (1..=THROUGH_CENTER as u8).flat_map(|steps| {
        [(true, true), (true, false), (false, true), (false, false)].map(|(inward, plus_file)| {
            Vector::Diagonal {
                steps,
                inward,
                plus_file,
            }
        })
    });
    let knights = KNIGHT_JUMPS.map(|(rank, file)| Vector::Knight { rank, file });
    let pawns = [
        Vector::PawnWalk { inward: true },
        Vector::PawnWalk { inward: false },
        Vector::PawnLongJump,
        Vector::PawnCapture {
            inward: true,
            plus_file: true,
        },
        Vector::PawnCapture {
            inward: true,
            plus_file: false,
        },
        Vector::PawnCapture {
            inward: false,
            plus_file: true,
        },
        Vector::PawnCapture {
            inward: false,
            plus_file: false,
        },
    ];
    let castling = CastlingSide::BOTH.map(Vector::Castling);
    ranks
        .chain(files)
        .chain(diagonals)
        .chain(knights)
        .chain(pawns)
        .chain(castling)
        .filter(move |v| v.add_to(from).is_ok())
}

/// Squares on either side of a segment boundary, for tests and callers that
/// want to reason about moats.
pub fn segment_edge(moat: Color) -> (u8, u8) {
    let first = moat.segment_start();
    ((first + FILES - 1) % FILES, first)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(rank: u8, file: u8) -> Pos {
        Pos::new(rank, file)
    }

    #[test]
    fn wrapped_diff_short_and_long() {
        assert_eq!(wrapped_file_diff(2, 5, false), 3);
        assert_eq!(wrapped_file_diff(2, 5, true), -21);
        assert_eq!(wrapped_file_diff(22, 1, false), 3);
        assert_eq!(wrapped_file_diff(0, 12, false), 12);
        assert_eq!(wrapped_file_diff(0, 12, true), -12);
        assert_eq!(wrapped_file_diff(12, 0, false), -12);
        assert_eq!(wrapped_file_diff(12, 0, true), 12);
    }

    #[test]
    fn rank_vector_through_center() {
        let v = p(3, 2).rank_vector_to(p(4, 14)).unwrap();
        assert_eq!(v, Vector::Rank(4));
        assert_eq!(v.add_to(p(3, 2)), Ok(p(4, 14)));
        assert_eq!(
            v.empties_from(p(3, 2)).unwrap().as_slice(),
            &[p(4, 2), p(5, 2), p(5, 14)]
        );
        assert_eq!(Vector::Rank(-4).add_to(p(3, 2)), Err(GeometryError::AdditionFailed {
            vector: Vector::Rank(-4),
            from: p(3, 2),
        }));
    }

    #[test]
    fn diagonals_within_and_through_center() {
        let from = p(3, 5);
        let direct = from.diagonal_vectors_to(p(5, 7));
        assert_eq!(
            direct.as_slice(),
            &[Vector::Diagonal {
                steps: 2,
                inward: true,
                plus_file: true
            }]
        );

        // Two inward steps reach rank 5, the third crosses, the fourth walks out.
        let across = Vector::Diagonal {
            steps: 4,
            inward: true,
            plus_file: true,
        };
        let to = across.add_to(from).unwrap();
        assert_eq!(to, p(4, (5 + 5 + 12) % 24));
        assert!(from.diagonal_vectors_to(to).contains(&across));
        assert_eq!(
            across.empties_from(from).unwrap().as_slice(),
            &[p(4, 6), p(5, 7), p(5, 21)]
        );
    }

    #[test]
    fn diagonal_step_from_rank_five_crosses() {
        let v = Vector::Diagonal {
            steps: 1,
            inward: true,
            plus_file: false,
        };
        assert_eq!(v.add_to(p(5, 10)), Ok(p(5, 20)));
        assert!(p(5, 10).diagonal_vectors_to(p(5, 20)).contains(&v));
    }

    #[test]
    fn file_ring_is_closed() {
        for file in 0..FILES {
            for m in 1..FILES as i8 {
                let start = p(2, file);
                let there = Vector::File(m).add_to(start).unwrap();
                let back = Vector::File(-m).add_to(there).unwrap();
                assert_eq!(back, start);
            }
        }
    }

    #[test]
    fn exact_opposite_file_has_both_directions() {
        let from = p(4, 3);
        let to = p(4, 15);
        let axes = from.axis_vectors_to(to);
        assert!(axes.contains(&Vector::File(12)));
        assert!(axes.contains(&Vector::File(-12)));
        // and through the centre along the file
        assert!(axes.contains(&Vector::Rank(3)));
    }

    #[test]
    fn knight_jumps_through_center_are_reversible() {
        for from in Pos::all() {
            assert!(from.knight_vectors_to(from).is_empty());
            for &(rank, file) in KNIGHT_JUMPS.iter() {
                let v = Vector::Knight { rank, file };
                if let Ok(to) = v.add_to(from) {
                    assert!(
                        !to.knight_vectors_to(from).is_empty(),
                        "no way back from {to} to {from}"
                    );
                }
            }
        }
    }

    #[test]
    fn pawn_resolution_order() {
        let from = p(1, 9);
        assert_eq!(from.pawn_vector_to(p(3, 9), true), Ok(Vector::PawnLongJump));
        assert_eq!(
            from.pawn_vector_to(p(2, 9), true),
            Ok(Vector::PawnWalk { inward: true })
        );
        assert_eq!(
            from.pawn_vector_to(p(2, 10), true),
            Ok(Vector::PawnCapture {
                inward: true,
                plus_file: true
            })
        );
        assert!(from.pawn_vector_to(p(3, 10), true).is_err());
        // outward pawns never long-jump
        assert!(from.pawn_vector_to(p(3, 9), false).is_err());
        assert_eq!(
            p(5, 4).pawn_vector_to(p(5, 16), true),
            Ok(Vector::PawnWalk { inward: true })
        );
        assert!(Vector::PawnWalk { inward: true }.crosses_center(p(5, 4)));
    }

    #[test]
    fn castling_only_from_king_start() {
        let king = Pos::colored(Color::Gray, 0, KING_START_FILE);
        assert_eq!(
            king.castling_vector_to(Pos::colored(Color::Gray, 0, 6)),
            Ok(Vector::Castling(CastlingSide::KingSide))
        );
        assert_eq!(
            king.king_vector_to(Pos::colored(Color::Gray, 0, 2)),
            Ok(Vector::Castling(CastlingSide::QueenSide))
        );
        assert!(Vector::Castling(CastlingSide::KingSide)
            .add_to(Pos::colored(Color::Gray, 0, 3))
            .is_err());
        assert_eq!(
            Vector::Castling(CastlingSide::QueenSide)
                .empties_from(king)
                .unwrap()
                .as_slice(),
            &[
                Pos::colored(Color::Gray, 0, 1),
                Pos::colored(Color::Gray, 0, 2),
                Pos::colored(Color::Gray, 0, 3)
            ]
        );
    }

    #[test]
    fn king_prefers_single_steps() {
        let from = p(0, 4);
        assert_eq!(from.king_vector_to(p(0, 5)), Ok(Vector::File(1)));
        assert_eq!(from.king_vector_to(p(1, 4)), Ok(Vector::Rank(1)));
        assert!(matches!(
            from.king_vector_to(p(1, 3)),
            Ok(Vector::Diagonal { steps: 1, .. })
        ));
        assert!(from.king_vector_to(p(2, 4)).is_err());
    }

    #[test]
    fn moats_only_on_home_rank() {
        let (left, right) = segment_edge(Color::Gray);
        assert_eq!((left, right), (7, 8));
        assert_eq!(Vector::File(3).moats(p(0, 6)).as_slice(), &[Color::Gray]);
        assert!(Vector::File(3).moats(p(1, 6)).is_empty());
        assert_eq!(Vector::File(-2).moats(p(0, 0)).as_slice(), &[Color::White]);
        assert_eq!(
            Vector::File(20).moats(p(0, 2)).as_slice(),
            &[Color::Gray, Color::Black]
        );
        let out_of_home = Vector::Diagonal {
            steps: 2,
            inward: true,
            plus_file: true,
        };
        assert_eq!(out_of_home.moats(p(0, 7)).as_slice(), &[Color::Gray]);
        assert!(out_of_home.moats(p(1, 7)).is_empty());
        assert!(Vector::Knight { rank: 1, file: 2 }.moats(p(0, 7)).is_empty());
    }

    #[test]
    fn vector_shapes_fit_pieces() {
        assert!(Vector::Rank(3).fits(PieceKind::Rook));
        assert!(!Vector::Rank(3).fits(PieceKind::King));
        assert!(Vector::File(-1).fits(PieceKind::King));
        assert!(!Vector::Knight { rank: 1, file: 2 }.fits(PieceKind::Queen));
        assert!(Vector::Castling(CastlingSide::KingSide).fits(PieceKind::King));
    }
}
