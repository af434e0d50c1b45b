use crate::board::{BoardView, Color};
use crate::game_state::{GameState, PlayersAlive};
use crate::moves::movegen::legal_moves;
use tracing::debug;

/// Half-moves without a capture or pawn move after which the game is drawn:
/// fifty moves for each of the three players.
pub const MOVE_CLOCK_LIMIT: u32 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    /// Only this color is left.
    Won(Color),
    /// The color to move has no legal move but is not in check.
    Stalemate(Color),
    DrawByMoveClock,
}

pub fn is_draw_by_move_clock(state: &GameState) -> bool {
    state.halfmove_clock >= MOVE_CLOCK_LIMIT
}

impl GameState {
    /// Which players are still in after the last move.
    ///
    /// A color whose king is gone is out. Then, in turn order from the color
    /// to move, each living color that is checkmated is out, until one is
    /// found able to play on. Check and mate are judged with the moats
    /// bridged next to every fallen color. Eliminated colors stay eliminated.
    pub fn eval_death(&self) -> PlayersAlive {
        let mut alive = self.alive;
        for player in alive.iter() {
            if self.board.where_is_king(player).is_none() {
                debug!(?player, "king is gone");
                alive = alive.die(player);
            }
        }

        let mut player = self.moves_next;
        for _ in 0..3 {
            if alive.get(player) {
                let probe = GameState {
                    alive,
                    moats: self.moats.bridged_for(alive),
                    ..self.clone()
                };
                if probe.is_in_check(player) && !probe.can_i_move_without_check(player) {
                    debug!(?player, "checkmated");
                    alive = alive.die(player);
                } else {
                    break;
                }
            }
            player = player.next();
        }
        alive
    }

    /// Applies [`eval_death`](Self::eval_death): bridges the moats next to
    /// the fallen and hands the turn to the next living color, counting a
    /// full move whenever the turn passes back to White.
    #[must_use]
    pub fn evaluate_death(self) -> GameState {
        let alive = self.eval_death();
        let moats = self.moats.bridged_for(alive);
        let mut moves_next = self.moves_next;
        let mut fullmove_number = self.fullmove_number;
        if alive.count() > 0 {
            while !alive.get(moves_next) {
                if moves_next == Color::Black {
                    fullmove_number += 1;
                }
                moves_next = moves_next.next();
            }
        }
        GameState {
            moats,
            moves_next,
            fullmove_number,
            alive,
            ..self
        }
    }
}

/// Where the game stands for the color to move.
pub fn position_status(state: &GameState) -> GameStatus {
    if let Some(winner) = state.alive.only_survivor() {
        return GameStatus::Won(winner);
    }
    if is_draw_by_move_clock(state) {
        return GameStatus::DrawByMoveClock;
    }
    if legal_moves(state).next().is_none() && !state.is_in_check(state.moves_next) {
        return GameStatus::Stalemate(state.moves_next);
    }
    GameStatus::InPlay
}
