use crate::board::{Board, BoardView, CastlingRights, Color};
use crate::square::Pos;
use serde::{Deserialize, Serialize};

/// Which players are still in the game. Members only ever leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayersAlive([bool; 3]);

impl PlayersAlive {
    pub const ALL: PlayersAlive = PlayersAlive([true; 3]);

    #[inline(always)]
    pub const fn get(self, who: Color) -> bool {
        self.0[who as usize]
    }

    #[must_use]
    pub fn die(self, who: Color) -> Self {
        let mut alive = self.0;
        alive[who.index()] = false;
        PlayersAlive(alive)
    }

    pub fn count(self) -> usize {
        self.0.iter().filter(|&&a| a).count()
    }

    pub fn iter(self) -> impl Iterator<Item = Color> {
        Color::ALL.into_iter().filter(move |&c| self.get(c))
    }

    /// The winner, once only one player is left.
    pub fn only_survivor(self) -> Option<Color> {
        match self.count() {
            1 => self.iter().next(),
            _ => None,
        }
    }

    pub fn is_subset_of(self, other: PlayersAlive) -> bool {
        Color::ALL.iter().all(|&c| !self.get(c) || other.get(c))
    }

    /// First living color starting at `from` (inclusive) in turn order.
    pub fn first_from(self, from: Color) -> Option<Color> {
        let mut c = from;
        for _ in 0..3 {
            if self.get(c) {
                return Some(c);
            }
            c = c.next();
        }
        None
    }
}

impl Default for PlayersAlive {
    fn default() -> Self {
        PlayersAlive::ALL
    }
}

/// Bridges over the three moats on the home rank. The moat of a color lies
/// in front of the first file of its segment, between `color.prev()` and
/// `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MoatsState([bool; 3]);

impl MoatsState {
    pub const NO_BRIDGES: MoatsState = MoatsState([false; 3]);
    pub const ALL_BRIDGED: MoatsState = MoatsState([true; 3]);

    #[inline(always)]
    pub const fn is_bridged(self, moat: Color) -> bool {
        self.0[moat as usize]
    }

    #[must_use]
    pub fn bridge(self, moat: Color) -> Self {
        let mut bridged = self.0;
        bridged[moat.index()] = true;
        MoatsState(bridged)
    }

    /// A moat gets bridged once a player on either side of it is out.
    #[must_use]
    pub fn bridged_for(self, alive: PlayersAlive) -> Self {
        Color::ALL.iter().fold(self, |moats, &moat| {
            if !alive.get(moat) || !alive.get(moat.prev()) {
                moats.bridge(moat)
            } else {
                moats
            }
        })
    }
}

/// The square a pawn skipped with its long jump, capturable for one half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EnPassantStore(Option<Pos>);

impl EnPassantStore {
    pub const EMPTY: EnPassantStore = EnPassantStore(None);

    pub const fn new(target: Pos) -> Self {
        EnPassantStore(Some(target))
    }

    #[inline(always)]
    pub const fn target(self) -> Option<Pos> {
        self.0
    }
}

/// A complete position. Never mutated once built; moves produce successors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub board: Board,
    pub moats: MoatsState,
    /// Color whose turn it is.
    pub moves_next: Color,
    pub castling: CastlingRights,
    pub en_passant: EnPassantStore,
    /// Half-moves since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Incremented each time the turn wraps back to White.
    pub fullmove_number: u32,
    pub alive: PlayersAlive,
}

impl GameState {
    /// The starting position. Built fresh on every call.
    pub fn new_game() -> Self {
        GameState {
            board: Board::new_game(),
            moats: MoatsState::NO_BRIDGES,
            moves_next: Color::White,
            castling: CastlingRights::ALL,
            en_passant: EnPassantStore::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 0,
            alive: PlayersAlive::ALL,
        }
    }

    /// A position on `board` with `moves_next` to move and nothing else
    /// special: no bridges, no castling, no en passant, everybody alive.
    pub fn from_board(board: Board, moves_next: Color) -> Self {
        GameState {
            board,
            moats: MoatsState::NO_BRIDGES,
            moves_next,
            castling: CastlingRights::NONE,
            en_passant: EnPassantStore::EMPTY,
            halfmove_clock: 0,
            fullmove_number: 0,
            alive: PlayersAlive::ALL,
        }
    }

    #[must_use]
    pub fn with_alive(&self, alive: PlayersAlive) -> Self {
        GameState {
            alive,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_moves_next(&self, moves_next: Color) -> Self {
        GameState {
            moves_next,
            ..self.clone()
        }
    }

    #[inline]
    pub fn players_alive(&self) -> PlayersAlive {
        self.alive
    }

    /// Squares of the pieces currently giving check to `who`. En passant plays
    /// no part in standing checks.
    pub fn am_i_in_check(&self, who: Color) -> impl Iterator<Item = Pos> + '_ {
        self.board.check_checking(who, self.alive, self.moats)
    }

    pub fn is_in_check(&self, who: Color) -> bool {
        self.am_i_in_check(who).next().is_some()
    }

    /// Does `who` have at least one move that keeps its king safe?
    /// Simulation happens on private board copies, `self` is never touched.
    pub fn can_i_move_without_check(&self, who: Color) -> bool {
        let probe = self.with_moves_next(who);
        crate::moves::movegen::legal_moves(&probe).next().is_some()
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new_game()
    }
}
