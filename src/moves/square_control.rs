use crate::board::{BoardView, Color};
use crate::game_state::{EnPassantStore, MoatsState, PlayersAlive};
use crate::moves::execute::{Situation, check_possibility};
use crate::moves::types::VecMove;
use crate::square::Pos;

/// Can the piece on `from` take whatever stands on `to`?
///
/// The attacker's own king safety is ignored and castling never attacks.
/// Dead attackers threaten nothing.
pub fn is_there_a_threat<B: BoardView + ?Sized>(
    board: &B,
    to: Pos,
    from: Pos,
    alive: PlayersAlive,
    en_passant: EnPassantStore,
    moats: MoatsState,
) -> bool {
    let Some(attacker) = board.get(from) else {
        return false;
    };
    if !alive.get(attacker.color) {
        return false;
    }
    let sit = Situation::for_threats(alive, en_passant, moats);
    attacker
        .vectors_to(from, to)
        .into_iter()
        .any(|vec| check_possibility(board, &sit, VecMove::new(from, vec), false).is_ok())
}

/// Squares of living pieces, not of the target's color, attacking `target`.
pub fn threat_checking<B: BoardView + ?Sized>(
    board: &B,
    target: Pos,
    alive: PlayersAlive,
    en_passant: EnPassantStore,
    moats: MoatsState,
) -> impl Iterator<Item = Pos> + '_ {
    let victim = board.get(target).map(|p| p.color);
    Pos::all().filter(move |&from| match board.get(from) {
        Some(p) if Some(p.color) != victim && alive.get(p.color) => {
            is_there_a_threat(board, target, from, alive, en_passant, moats)
        }
        _ => false,
    })
}

/// Attackers of `who`'s king. Empty when the king is gone.
pub fn check_checking<B: BoardView + ?Sized>(
    board: &B,
    who: Color,
    alive: PlayersAlive,
    moats: MoatsState,
) -> impl Iterator<Item = Pos> + '_ {
    board
        .where_is_king(who)
        .into_iter()
        .flat_map(move |king| threat_checking(board, king, alive, EnPassantStore::EMPTY, moats))
}

#[inline]
pub fn in_check<B: BoardView + ?Sized>(
    board: &B,
    who: Color,
    alive: PlayersAlive,
    moats: MoatsState,
) -> bool {
    check_checking(board, who, alive, moats).next().is_some()
}
