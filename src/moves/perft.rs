use crate::board::BoardView;
use crate::game_state::GameState;
use crate::moves::execute::after;
use crate::moves::movegen::legal_vec_moves;
use crate::moves::types::{DescMove, VecMove};
use crate::moves::vectors::Vector;
use rayon::prelude::*;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 3; // only trace details for shallow nodes

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub ep_captures: u64,
    pub castles: u64,
    pub promotions: u64,
    /// Leaves where the player to move is in check.
    pub checks: u64,
    /// Leaves reached by a move that knocked somebody out.
    pub eliminations: u64,
}

impl PerftCounters {
    pub fn zero() -> Self {
        Self::default()
    }
    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.ep_captures += o.ep_captures;
        self.castles += o.castles;
        self.promotions += o.promotions;
        self.checks += o.checks;
        self.eliminations += o.eliminations;
    }
}

/// Successor of a generated move. Generated moves are legal, so a rejection
/// here is a bug.
fn play(state: &GameState, vm: VecMove) -> GameState {
    after(state, vm).unwrap_or_else(|e| panic!("generated move {vm:?} was rejected: {e}"))
}

fn perft_recursive(state: &GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves: Vec<(DescMove, VecMove)> = legal_vec_moves(state).collect();
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .map(|&(_, vm)| perft_recursive(&play(state, vm), depth - 1))
        .sum()
}

/// Leaf positions `depth` half-moves ahead.
#[instrument(skip(state), fields(depth))]
pub fn perft(state: &GameState, depth: u32) -> u64 {
    perft_recursive(state, depth)
}

/// [`perft`] with the root moves spread over the rayon pool.
#[instrument(skip(state), fields(depth))]
pub fn perft_parallel(state: &GameState, depth: u32) -> u64 {
    if depth <= 1 {
        return perft_recursive(state, depth);
    }
    let moves: Vec<(DescMove, VecMove)> = legal_vec_moves(state).collect();
    moves
        .par_iter()
        .map(|&(_, vm)| perft_recursive(&play(state, vm), depth - 1))
        .sum()
}

/// Node count below each root move, in generation order.
#[instrument(skip(state), fields(depth))]
pub fn perft_divide(state: &GameState, depth: u32) -> Vec<(DescMove, u64)> {
    assert!(depth > 0, "perft_divide needs at least one ply");
    let moves: Vec<(DescMove, VecMove)> = legal_vec_moves(state).collect();
    if depth <= MAX_LOG_DEPTH {
        debug!(depth, moves = moves.len(), "divide: root legal moves");
    }

    let split: Vec<(DescMove, u64)> = moves
        .par_iter()
        .map(|&(desc, vm)| {
            let count = perft_recursive(&play(state, vm), depth - 1);
            if depth <= MAX_LOG_DEPTH {
                debug!(%desc, nodes = count, "divide: root child total");
            }
            (desc, count)
        })
        .collect();

    let total: u64 = split.iter().map(|(_, n)| n).sum();
    debug!(depth, total, "divide: total");
    split
}

fn count_leaf_move(state: &GameState, vm: VecMove, desc: DescMove, out: &mut PerftCounters) {
    let next = play(state, vm);
    out.nodes += 1;
    match vm.vec {
        Vector::Castling(_) => out.castles += 1,
        Vector::PawnCapture { .. } if state.board.is_empty(desc.to) => {
            out.captures += 1;
            out.ep_captures += 1;
        }
        _ if !state.board.is_empty(desc.to) => out.captures += 1,
        _ => {}
    }
    if desc.is_promotion() {
        out.promotions += 1;
    }
    if next.is_in_check(next.moves_next) {
        out.checks += 1;
    }
    if next.alive.count() < state.alive.count() {
        out.eliminations += 1;
    }
}

fn perft_count_recursive(state: &GameState, depth: u32, out: &mut PerftCounters) {
    for (desc, vm) in legal_vec_moves(state) {
        if depth == 1 {
            count_leaf_move(state, vm, desc, out);
        } else {
            perft_count_recursive(&play(state, vm), depth - 1, out);
        }
    }
}

/// Leaf count with a breakdown of how the last half-move got there.
#[instrument(skip(state), fields(depth))]
pub fn perft_count(state: &GameState, depth: u32) -> PerftCounters {
    let mut out = PerftCounters::zero();
    if depth == 0 {
        out.nodes = 1;
        return out;
    }
    perft_count_recursive(state, depth, &mut out);
    if depth <= MAX_LOG_DEPTH {
        debug!(?out, "perft breakdown");
    }
    out
}
