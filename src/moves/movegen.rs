use crate::board::{BoardView, Color, PieceKind};
use crate::game_state::GameState;
use crate::moves::execute::{after, check_move};
use crate::moves::types::{DescMove, MoveBuffer, MoveError, VecMove};
use crate::moves::vectors::all_vectors_from;
use crate::square::{Pos, SQUARES};
use arrayvec::ArrayVec;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::debug;

/// Every square any piece could possibly reach from a square on an empty
/// board, sorted. Built once on first use.
static CANDIDATE_TARGETS: Lazy<Vec<Vec<Pos>>> = Lazy::new(|| {
    let table: Vec<Vec<Pos>> = Pos::all()
        .map(|from| {
            let mut targets: Vec<Pos> = all_vectors_from(from)
                .filter_map(|vec| vec.add_to(from).ok())
                .filter(|&to| to != from)
                .collect();
            targets.sort_unstable();
            targets.dedup();
            targets
        })
        .collect();
    debug_assert_eq!(table.len(), SQUARES);
    table
});

#[inline]
pub fn candidate_targets(from: Pos) -> &'static [Pos] {
    &CANDIDATE_TARGETS[from.index()]
}

/// Legal moves between two squares: none, one, or the four promotions, each
/// with the vector that makes it legal.
fn moves_between(state: &GameState, from: Pos, to: Pos) -> ArrayVec<(DescMove, VecMove), 4> {
    let mut out = ArrayVec::new();
    let Some(piece) = state.board.get(from) else {
        return out;
    };
    for vec in piece.vectors_to(from, to) {
        let vm = VecMove::new(from, vec);
        match check_move(state, vm) {
            Ok(()) => {
                out.push((DescMove::new(from, to), vm));
                break;
            }
            Err(MoveError::NeedsPromotion { .. }) => {
                for kind in PieceKind::PROMOTIONS {
                    let promoted = VecMove {
                        promotion: Some(kind),
                        ..vm
                    };
                    out.push((DescMove::new(from, to).promoting(kind), promoted));
                }
                break;
            }
            Err(_) => {}
        }
    }
    out
}

fn moves_from(state: &GameState, from: Pos) -> impl Iterator<Item = (DescMove, VecMove)> + '_ {
    candidate_targets(from)
        .iter()
        .flat_map(move |&to| moves_between(state, from, to))
}

/// Squares of the pieces belonging to the player to move.
fn origins(state: &GameState) -> impl Iterator<Item = Pos> + '_ {
    state
        .board
        .friends_and_not(state.moves_next, state.alive)
        .filter(|f| f.friend)
        .map(|f| f.pos)
}

pub(crate) fn legal_vec_moves(
    state: &GameState,
) -> impl Iterator<Item = (DescMove, VecMove)> + '_ {
    origins(state).flat_map(move |from| moves_from(state, from))
}

/// Lazy legal moves for the player to move, by ascending origin then target,
/// promotions as Q, R, B, N. Calling it again starts over.
pub fn legal_moves(state: &GameState) -> impl Iterator<Item = DescMove> + '_ {
    legal_vec_moves(state).map(|(desc, _)| desc)
}

/// All legal moves, origin squares worked on in parallel. Same order as
/// [`legal_moves`].
pub fn generate_legal_moves(state: &GameState) -> Vec<DescMove> {
    let from: Vec<Pos> = origins(state).collect();
    let moves: Vec<DescMove> = from
        .par_iter()
        .flat_map_iter(|&from| moves_from(state, from).map(|(desc, _)| desc))
        .collect();
    debug!(
        color = ?state.moves_next,
        pieces = from.len(),
        moves = moves.len(),
        "generated legal moves"
    );
    moves
}

/// Fills `out` with the legal moves, reusing its storage. A fixed-size
/// buffer must have room for all of them.
pub fn generate_legal_into(state: &GameState, out: &mut impl MoveBuffer) {
    out.clear();
    for mv in legal_moves(state) {
        out.push(mv);
    }
}

/// Successors of every legal move, paired with the move.
pub fn successors(state: &GameState) -> Vec<(DescMove, GameState)> {
    let found: Vec<(DescMove, VecMove)> = legal_vec_moves(state).collect();
    found
        .into_par_iter()
        .filter_map(|(desc, vm)| after(state, vm).ok().map(|next| (desc, next)))
        .collect()
}

/// Every position in which it is `our_color`'s turn again (or `our_color` is
/// out), reached by the other players moving in every legal way.
/// Positions repeated through different move orders are kept once. A player
/// left without moves on the way ends that line where it stands.
pub fn states_after_all_others_move(state: &GameState, our_color: Color) -> Vec<GameState> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut frontier = vec![state.clone()];
    while let Some(current) = frontier.pop() {
        if !current.alive.get(our_color) || current.moves_next == our_color {
            if seen.insert(current.zobrist()) {
                out.push(current);
            }
            continue;
        }
        let next = successors(&current);
        if next.is_empty() {
            if seen.insert(current.zobrist()) {
                out.push(current);
            }
            continue;
        }
        frontier.extend(next.into_iter().rev().map(|(_, s)| s));
    }
    debug!(?our_color, positions = out.len(), "states after the others moved");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_table_is_sorted_and_excludes_origin() {
        for from in Pos::all() {
            let t = candidate_targets(from);
            assert!(!t.is_empty());
            assert!(t.windows(2).all(|w| w[0] < w[1]));
            assert!(!t.contains(&from));
        }
    }

    #[test]
    fn lazy_and_parallel_agree() {
        let s = GameState::new_game();
        let lazy: Vec<DescMove> = legal_moves(&s).collect();
        assert_eq!(lazy, generate_legal_moves(&s));
        let mut buf = Vec::new();
        generate_legal_into(&s, &mut buf);
        assert_eq!(buf, lazy);
    }

    #[test]
    fn opening_moves_are_pawns_and_knights() {
        let s = GameState::new_game();
        let moves = generate_legal_moves(&s);
        // 8 pawns with one or two steps; each knight has two quiet jumps and
        // one capture of a neighbour's pawn across the moat
        assert_eq!(moves.len(), 8 * 2 + 2 * 3);
        assert!(moves.contains(&DescMove::new(Pos::new(0, 1), Pos::new(1, 23))));
        assert!(moves.contains(&DescMove::new(Pos::new(0, 6), Pos::new(1, 8))));
        for mv in &moves {
            assert_eq!(mv.from.segment(), Color::White);
        }
    }
}
