use crate::game_state::{EnPassantStore, MoatsState, PlayersAlive};
use crate::moves::square_control;
use crate::square::{Pos, SEGMENT_FILES, SQUARES};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub mod castle_bits;
pub use castle_bits::*;

/// Segment-relative file the king starts on.
pub const KING_START_FILE: u8 = 4;

/// Home-rank layout of every segment, by segment file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The three players, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Gray,
    Black,
}

/// Piece enum to hold all types of pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece on the board.
///
/// Pawns remember whether they already went through the centre; from then on
/// they walk outward, toward the home rank of the far side. Two pieces compare
/// equal when kind and color match, orientation is not part of identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub crossed_center: bool,
}

impl Color {
    pub const ALL: [Color; 3] = [Color::White, Color::Gray, Color::Black];

    #[inline]
    pub const fn next(self) -> Self {
        match self {
            Color::White => Color::Gray,
            Color::Gray => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn prev(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Gray => Color::White,
            Color::Black => Color::Gray,
        }
    }

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Decode a 0..3 value into a Color.
    #[inline(always)]
    pub fn from_index(v: usize) -> Self {
        match v {
            0 => Color::White,
            1 => Color::Gray,
            2 => Color::Black,
            _ => panic!("Invalid Color encoding: {}", v),
        }
    }

    /// First file of the segment this color owns.
    #[inline(always)]
    pub const fn segment_start(self) -> u8 {
        self as u8 * SEGMENT_FILES
    }

    pub fn initial(self) -> char {
        match self {
            Color::White => 'w',
            Color::Gray => 'g',
            Color::Black => 'b',
        }
    }
}

impl PieceKind {
    /// What a pawn may turn into, in the order generation reports them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub fn is_promotion_target(self) -> bool {
        Self::PROMOTIONS.contains(&self)
    }

    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            crossed_center: false,
        }
    }

    /// A pawn that already passed the centre.
    #[inline]
    pub const fn crossed_pawn(color: Color) -> Self {
        Piece {
            kind: PieceKind::Pawn,
            color,
            crossed_center: true,
        }
    }

    #[inline(always)]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// Pawns that have not crossed the centre move toward it.
    #[inline]
    pub fn moves_inward(self) -> bool {
        !self.crossed_center
    }
}

impl PartialEq for Piece {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.color == other.color
    }
}

impl Eq for Piece {}

impl Hash for Piece {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.color.hash(state);
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color.initial(), self.kind.symbol())
    }
}

/// The piece standing on `pos` in the starting position.
pub fn new_game_piece(pos: Pos) -> Option<Piece> {
    let color = pos.segment();
    match pos.rank() {
        0 => Some(Piece::new(BACK_RANK[pos.segment_file() as usize], color)),
        1 => Some(Piece::new(PieceKind::Pawn, color)),
        _ => None,
    }
}

/// One occupied square, tagged with whether it belongs to the asking color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FriendOrNot {
    pub friend: bool,
    pub pos: Pos,
}

/// Read-only queries shared by both board representations.
pub trait BoardView {
    fn get(&self, pos: Pos) -> Option<Piece>;

    #[inline]
    fn is_empty(&self, pos: Pos) -> bool {
        self.get(pos).is_none()
    }

    /// Occupied squares in index order.
    fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        Pos::all().filter_map(move |pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Where the king of `who` stands, if it is still on the board.
    fn where_is_king(&self, who: Color) -> Option<Pos> {
        self.pieces()
            .find(|(_, piece)| piece.is(PieceKind::King, who))
            .map(|(pos, _)| pos)
    }

    fn check_empties(&self, which: &[Pos]) -> bool {
        which.iter().all(|&pos| self.is_empty(pos))
    }

    /// Can the piece on `from` take whatever stands on `to`?
    fn is_there_a_threat(
        &self,
        to: Pos,
        from: Pos,
        alive: PlayersAlive,
        en_passant: EnPassantStore,
        moats: MoatsState,
    ) -> bool {
        square_control::is_there_a_threat(self, to, from, alive, en_passant, moats)
    }

    /// Squares of living enemy pieces attacking the piece on `target`.
    fn threat_checking(
        &self,
        target: Pos,
        alive: PlayersAlive,
        en_passant: EnPassantStore,
        moats: MoatsState,
    ) -> impl Iterator<Item = Pos> + '_ {
        square_control::threat_checking(self, target, alive, en_passant, moats)
    }

    /// Squares of every living piece giving check to `who`.
    fn check_checking(
        &self,
        who: Color,
        alive: PlayersAlive,
        moats: MoatsState,
    ) -> impl Iterator<Item = Pos> + '_ {
        square_control::check_checking(self, who, alive, moats)
    }

    /// Occupied squares of living players, split into `who`'s and the rest.
    /// Empty when `who` itself is out of the game.
    fn friends_and_not(
        &self,
        who: Color,
        alive: PlayersAlive,
    ) -> impl Iterator<Item = FriendOrNot> + '_ {
        let who_alive = alive.get(who);
        self.pieces().filter_map(move |(pos, piece)| {
            if !who_alive || !alive.get(piece.color) {
                return None;
            }
            Some(FriendOrNot {
                friend: piece.color == who,
                pos,
            })
        })
    }
}

/// In-place edits, only available on [`MutableBoard`].
pub trait BoardMut: BoardView {
    fn put(&mut self, pos: Pos, piece: Option<Piece>);

    #[inline]
    fn clr(&mut self, pos: Pos) {
        self.put(pos, None);
    }

    /// Moves whatever stands on `from` to `to`, overwriting it.
    fn relocate(&mut self, from: Pos, to: Pos) {
        let piece = self.get(from);
        self.put(to, piece);
        self.clr(from);
    }

    fn fill_from(&mut self, source: &impl BoardView) {
        for pos in Pos::all() {
            self.put(pos, source.get(pos));
        }
    }
}

/// Immutable board snapshot. Clones share storage; every edit yields a new
/// board.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: Arc<[Option<Piece>; SQUARES]>,
}

/// Board edited in place, used for simulation. Take a private copy before
/// branching off a shared position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutableBoard {
    squares: [Option<Piece>; SQUARES],
}

impl Board {
    pub fn empty() -> Self {
        Board {
            squares: Arc::new([None; SQUARES]),
        }
    }

    /// Standard three-player setup: pieces on rank 0, pawns on rank 1 of
    /// every segment.
    pub fn new_game() -> Self {
        let mut squares = [None; SQUARES];
        for pos in Pos::all() {
            squares[pos.index()] = new_game_piece(pos);
        }
        Board {
            squares: Arc::new(squares),
        }
    }

    #[must_use]
    pub fn with_put(&self, pos: Pos, piece: Option<Piece>) -> Board {
        let mut squares = *self.squares;
        squares[pos.index()] = piece;
        Board {
            squares: Arc::new(squares),
        }
    }

    #[must_use]
    pub fn with_cleared(&self, pos: Pos) -> Board {
        self.with_put(pos, None)
    }

    #[must_use]
    pub fn with_moved(&self, from: Pos, to: Pos) -> Board {
        let mut board = self.to_mutable();
        board.relocate(from, to);
        board.freeze()
    }

    /// Private mutable copy.
    pub fn to_mutable(&self) -> MutableBoard {
        MutableBoard {
            squares: *self.squares,
        }
    }
}

impl MutableBoard {
    pub fn empty() -> Self {
        MutableBoard {
            squares: [None; SQUARES],
        }
    }

    /// Snapshot the current contents.
    pub fn freeze(&self) -> Board {
        Board {
            squares: Arc::new(self.squares),
        }
    }
}

impl BoardView for Board {
    #[inline(always)]
    fn get(&self, pos: Pos) -> Option<Piece> {
        self.squares[pos.index()]
    }
}

impl BoardView for MutableBoard {
    #[inline(always)]
    fn get(&self, pos: Pos) -> Option<Piece> {
        self.squares[pos.index()]
    }
}

impl BoardMut for MutableBoard {
    #[inline(always)]
    fn put(&mut self, pos: Pos, piece: Option<Piece>) {
        self.squares[pos.index()] = piece;
    }
}

impl From<MutableBoard> for Board {
    fn from(board: MutableBoard) -> Self {
        Board {
            squares: Arc::new(board.squares),
        }
    }
}

impl From<&Board> for MutableBoard {
    fn from(board: &Board) -> Self {
        board.to_mutable()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new_game()
    }
}

/// Rank 5 on top, one two-character cell per square (`wK`, `gP`, ` .`),
/// segments separated by `|`.
fn render(board: &impl BoardView, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rank in (0..crate::square::RANKS).rev() {
        write!(f, "{rank} ")?;
        for file in 0..crate::square::FILES {
            if file > 0 && file % SEGMENT_FILES == 0 {
                write!(f, "|")?;
            }
            match board.get(Pos::new(rank, file)) {
                Some(piece) => write!(f, "{piece}")?,
                None => write!(f, " .")?,
            }
        }
        writeln!(f)?;
    }
    Ok(())
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board")?;
        render(self, f)
    }
}

impl fmt::Display for MutableBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f)
    }
}
