//! Rules core for three-player chess on a ring-shaped board.
//!
//! Positions are immutable [`GameState`] values. Generate the legal moves of
//! the player to move with [`generate_legal_moves`] (or the lazy
//! [`legal_moves`]) and get the successor with [`apply_move`].

pub mod board;
pub mod game_state;
pub mod hash;
#[cfg(feature = "logging")]
pub mod logger;
pub mod moves;
pub mod square;
pub mod status;

pub use board::{Board, BoardMut, BoardView, CastlingRights, CastlingSide, Color, MutableBoard, Piece, PieceKind};
pub use game_state::{EnPassantStore, GameState, MoatsState, PlayersAlive};
pub use moves::execute::apply_move;
pub use moves::movegen::{generate_legal_moves, legal_moves, states_after_all_others_move};
pub use moves::types::{DescMove, Impossibility, MoveError};
pub use moves::vectors::{GeometryError, Vector};
pub use square::{OffBoard, Pos};
pub use status::{GameStatus, position_status};

/// The starting position.
pub fn new_game() -> GameState {
    GameState::new_game()
}

/// Squares of the pieces giving check to `color`; empty when not in check.
pub fn is_in_check(state: &GameState, color: Color) -> impl Iterator<Item = Pos> + '_ {
    state.am_i_in_check(color)
}

pub fn players_alive(state: &GameState) -> PlayersAlive {
    state.players_alive()
}
