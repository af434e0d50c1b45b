// src/hash/zobrist.rs

use crate::board::castle_bits::*;
use crate::board::{BoardView, Color, Piece, PieceKind};
use crate::game_state::GameState;
use crate::square::{FILES, Pos, SQUARES};
use once_cell::sync::OnceCell;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Piece slots per color: the six kinds plus pawns that crossed the centre.
const PIECE_SLOTS: usize = 7;
const CROSSED_PAWN_SLOT: usize = 6;

#[cfg(feature = "deterministic_zobrist")]
const ZOBRIST_SEED: u64 = 0x9E37_79B9_AAAC_5C87;

fn make_zobrist_rng() -> StdRng {
    #[cfg(feature = "deterministic_zobrist")]
    {
        StdRng::seed_from_u64(ZOBRIST_SEED)
    }
    #[cfg(not(feature = "deterministic_zobrist"))]
    {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        StdRng::from_seed(seed)
    }
}

pub struct ZobristKeys {
    /// [color][slot][square], slot = kind index, or 6 for a crossed pawn
    pub piece: [[[u64; SQUARES]; PIECE_SLOTS]; 3],
    /// XOR for the color to move
    pub side_to_move: [u64; 3],
    /// One key per castling bit, in `castle_bit` order
    pub castling: [u64; 6],
    pub ep_file: [u64; FILES as usize],
    /// XOR for every eliminated color
    pub eliminated: [u64; 3],
    pub bridged: [u64; 3],
}

#[inline]
fn piece_slot(piece: Piece) -> usize {
    if piece.kind == PieceKind::Pawn && piece.crossed_center {
        CROSSED_PAWN_SLOT
    } else {
        piece.kind as usize
    }
}

#[inline]
pub fn xor_castling_rights_delta(hash: &mut u64, keys: &ZobristKeys, old: CastleBits, new_: CastleBits) {
    let d = old ^ new_;
    for (bit, key) in keys.castling.iter().enumerate() {
        if d & (1 << bit) != 0 {
            *hash ^= key;
        }
    }
}

/// File of the en passant target if it matters this ply: a pawn of the
/// color to move, already back from the centre, stands diagonally behind the
/// target. King safety is ignored.
pub fn ep_file_to_hash(state: &GameState) -> Option<u8> {
    let ep = state.en_passant.target()?;
    let jumped = state
        .board
        .get(Pos::new(3, ep.file()))
        .filter(|p| p.kind == PieceKind::Pawn && state.alive.get(p.color))?;
    let has_capturing_pawn = [-1i16, 1].into_iter().any(|d| {
        Pos::try_new(3, ep.file() as i16 + d)
            .and_then(|from| state.board.get(from))
            .is_some_and(|p| {
                p.kind == PieceKind::Pawn
                    && p.crossed_center
                    && p.color == state.moves_next
                    && p.color != jumped.color
            })
    });
    has_capturing_pawn.then_some(ep.file())
}

// Global keys, initialized on first use.
pub fn zobrist_keys() -> &'static ZobristKeys {
    static KEYS: OnceCell<ZobristKeys> = OnceCell::new();
    KEYS.get_or_init(|| generate_zobrist_keys_with_rng(make_zobrist_rng()))
}

fn generate_zobrist_keys_with_rng(mut rng: StdRng) -> ZobristKeys {
    #[inline]
    fn non_zero(r: &mut StdRng) -> u64 {
        // avoid zero keys to reduce degenerate collisions
        let mut v = r.next_u64();
        while v == 0 {
            v = r.next_u64();
        }
        v
    }

    let mut keys = ZobristKeys {
        piece: [[[0u64; SQUARES]; PIECE_SLOTS]; 3],
        side_to_move: [0u64; 3],
        castling: [0u64; 6],
        ep_file: [0u64; FILES as usize],
        eliminated: [0u64; 3],
        bridged: [0u64; 3],
    };

    for color in keys.piece.iter_mut() {
        for slot in color.iter_mut() {
            for key in slot.iter_mut() {
                *key = non_zero(&mut rng);
            }
        }
    }
    for key in keys
        .castling
        .iter_mut()
        .chain(keys.ep_file.iter_mut())
        .chain(keys.side_to_move.iter_mut())
        .chain(keys.eliminated.iter_mut())
        .chain(keys.bridged.iter_mut())
    {
        *key = non_zero(&mut rng);
    }

    keys
}

/// Hash of the whole position, computed from scratch.
pub fn compute_zobrist(state: &GameState) -> u64 {
    let keys = zobrist_keys();
    let mut h = 0u64;
    for (pos, piece) in state.board.pieces() {
        h ^= keys.piece[piece.color.index()][piece_slot(piece)][pos.index()];
    }
    h ^= keys.side_to_move[state.moves_next.index()];
    xor_castling_rights_delta(&mut h, keys, 0, state.castling.bits());
    if let Some(f) = ep_file_to_hash(state) {
        h ^= keys.ep_file[f as usize];
    }
    for color in Color::ALL {
        if !state.alive.get(color) {
            h ^= keys.eliminated[color.index()];
        }
        if state.moats.is_bridged(color) {
            h ^= keys.bridged[color.index()];
        }
    }
    h
}

impl GameState {
    #[inline]
    pub fn zobrist(&self) -> u64 {
        compute_zobrist(self)
    }
}
