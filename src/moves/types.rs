use crate::board::{Color, Piece, PieceKind};
use crate::moves::vectors::{GeometryError, Vector};
use crate::square::Pos;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};
use thiserror::Error;

pub trait MoveBuffer: Deref<Target = [DescMove]> + DerefMut {
    fn push(&mut self, mv: DescMove);
    fn clear(&mut self);
}

impl MoveBuffer for Vec<DescMove> {
    fn push(&mut self, mv: DescMove) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize> MoveBuffer for ArrayVec<DescMove, N> {
    fn push(&mut self, mv: DescMove) {
        self.push(mv);
    }
    fn clear(&mut self) {
        self.clear();
    }
}

/// A move described by its endpoints, independent of any position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DescMove {
    pub from: Pos,
    pub to: Pos,
    pub promotion: Option<PieceKind>,
}

impl DescMove {
    #[inline]
    pub const fn new(from: Pos, to: Pos) -> Self {
        DescMove {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn promoting(self, kind: PieceKind) -> Self {
        DescMove {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for DescMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "={}", kind.symbol())?;
        }
        Ok(())
    }
}

/// A move resolved to one concrete vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VecMove {
    pub from: Pos,
    pub vec: Vector,
    pub promotion: Option<PieceKind>,
}

impl VecMove {
    pub const fn new(from: Pos, vec: Vector) -> Self {
        VecMove {
            from,
            vec,
            promotion: None,
        }
    }
}

/// Why a particular move cannot be made in a particular position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Impossibility {
    #[error("there is no piece to move")]
    NothingToMove,
    #[error("it is not this player's turn")]
    NotYourTurn,
    #[error("the moving player is out of the game")]
    MoverEliminated,
    #[error("the piece cannot move along this vector")]
    WrongShape,
    #[error("the moat before {0:?} is not bridged")]
    MoatNotBridged(Color),
    #[error("the path is blocked at {0}")]
    PathBlocked(Pos),
    #[error("own piece on the destination")]
    OwnPieceOnDestination,
    #[error("pieces of eliminated players cannot be captured")]
    DeadPieceOnDestination,
    #[error("pawns cannot capture moving straight")]
    PawnBlocked,
    #[error("the pawn moves the other way")]
    PawnWrongDirection,
    #[error("pawns move diagonally only to capture")]
    PawnCaptureOnEmpty,
    #[error("castling right already lost")]
    CastlingRightLost,
    #[error("no rook to castle with")]
    CastlingRookMissing,
    #[error("cannot castle out of check")]
    CastlingOutOfCheck,
    #[error("cannot castle through an attacked square")]
    CastlingThroughCheck,
    #[error("the move leaves the own king in check")]
    WouldBeInCheck,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
    #[error("only pawns reaching the home rank promote")]
    UnexpectedPromotion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Otherwise fine, but the caller has to pick a promotion.
    #[error("the move {from}{to} needs a promotion")]
    NeedsPromotion { from: Pos, to: Pos },
    #[error(transparent)]
    Impossible(#[from] Impossibility),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Enough to put a [`MutableBoard`](crate::board::MutableBoard) back the way
/// it was before [`make_move`](crate::moves::execute::make_move).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Undo {
    pub from: Pos,
    pub to: Pos,
    pub moved: Piece,
    pub captured: Option<(Pos, Piece)>,
    pub castling_rook: Option<(Pos /*rook_from*/, Pos /*rook_to*/)>,
}
