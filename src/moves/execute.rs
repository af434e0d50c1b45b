use crate::board::{
    BoardMut, BoardView, CastlingRights, CastlingSide, Color, MutableBoard, Piece, PieceKind,
};
use crate::game_state::{EnPassantStore, GameState, MoatsState, PlayersAlive};
use crate::moves::square_control::in_check;
use crate::moves::types::{DescMove, Impossibility, MoveError, Undo, VecMove};
use crate::moves::vectors::{GeometryError, Vector};
use crate::square::Pos;
use tracing::trace;

/// The parts of a position, besides the board, that decide whether a move is
/// possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Situation {
    pub moats: MoatsState,
    pub castling: CastlingRights,
    pub en_passant: EnPassantStore,
    pub alive: PlayersAlive,
}

impl Situation {
    pub fn of(state: &GameState) -> Self {
        Situation {
            moats: state.moats,
            castling: state.castling,
            en_passant: state.en_passant,
            alive: state.alive,
        }
    }

    /// Nobody castles onto a piece, so attack queries run without rights.
    pub const fn for_threats(
        alive: PlayersAlive,
        en_passant: EnPassantStore,
        moats: MoatsState,
    ) -> Self {
        Situation {
            moats,
            castling: CastlingRights::NONE,
            en_passant,
            alive,
        }
    }
}

/// Square of the pawn taken en passant when a pawn on `from` captures onto
/// the empty square `to`. Only pawns coming back from the centre can do it,
/// and only onto the square a living enemy pawn just skipped.
fn en_passant_victim<B: BoardView + ?Sized>(
    board: &B,
    sit: &Situation,
    mover: Piece,
    to: Pos,
) -> Option<Pos> {
    if !mover.crossed_center || sit.en_passant.target() != Some(to) || to.rank() != 2 {
        return None;
    }
    let jumped = Pos::new(3, to.file());
    match board.get(jumped) {
        Some(p) if p.kind == PieceKind::Pawn && p.color != mover.color && sit.alive.get(p.color) => {
            Some(jumped)
        }
        _ => None,
    }
}

/// Piece as it stands after arriving on `to`: pawns through the centre turn
/// around, pawns on the home rank become `promotion`.
fn landed(piece: Piece, vec: Vector, from: Pos, promotion: Option<PieceKind>) -> Piece {
    if piece.kind != PieceKind::Pawn {
        return piece;
    }
    match promotion {
        Some(kind) => Piece::new(kind, piece.color),
        None if vec.crosses_center(from) => Piece::crossed_pawn(piece.color),
        None => piece,
    }
}

/// Is the move physically possible on `board` in situation `sit`?
///
/// Everything except turn order and the mover's own king safety is checked
/// here, so the same test answers "does this piece attack that square".
/// With `enforce_promotion` off, promotion choice is not looked at.
/// Returns the piece as it will stand on the destination.
pub fn check_possibility<B: BoardView + ?Sized>(
    board: &B,
    sit: &Situation,
    mv: VecMove,
    enforce_promotion: bool,
) -> Result<Piece, MoveError> {
    let VecMove { from, vec, .. } = mv;
    let piece = board.get(from).ok_or(Impossibility::NothingToMove)?;
    if !vec.fits(piece.kind) {
        return Err(Impossibility::WrongShape.into());
    }
    let to = vec.add_to(from)?;

    for moat in vec.moats(from) {
        if !sit.moats.is_bridged(moat) {
            return Err(Impossibility::MoatNotBridged(moat).into());
        }
    }
    for pos in vec.empties_from(from)? {
        if !board.is_empty(pos) {
            return Err(Impossibility::PathBlocked(pos).into());
        }
    }

    let target = board.get(to);
    if let Some(victim) = target {
        if victim.color == piece.color {
            return Err(Impossibility::OwnPieceOnDestination.into());
        }
        if !sit.alive.get(victim.color) {
            return Err(Impossibility::DeadPieceOnDestination.into());
        }
    }

    match vec {
        Vector::PawnWalk { inward } | Vector::PawnCapture { inward, .. }
            if inward != piece.moves_inward() =>
        {
            return Err(Impossibility::PawnWrongDirection.into());
        }
        Vector::PawnLongJump if !piece.moves_inward() => {
            return Err(Impossibility::PawnWrongDirection.into());
        }
        Vector::PawnWalk { .. } | Vector::PawnLongJump if target.is_some() => {
            return Err(Impossibility::PawnBlocked.into());
        }
        Vector::PawnCapture { .. }
            if target.is_none() && en_passant_victim(board, sit, piece, to).is_none() =>
        {
            return Err(Impossibility::PawnCaptureOnEmpty.into());
        }
        Vector::Castling(side) => check_castling_pieces(board, sit, piece, from, side)?,
        _ => {}
    }

    let promotes = piece.kind == PieceKind::Pawn && to.rank() == 0;
    if !enforce_promotion {
        return Ok(landed(piece, vec, from, None));
    }
    match (promotes, mv.promotion) {
        (true, None) => Err(MoveError::NeedsPromotion { from, to }),
        (true, Some(kind)) if !kind.is_promotion_target() => {
            Err(Impossibility::InvalidPromotion(kind).into())
        }
        (false, Some(_)) => Err(Impossibility::UnexpectedPromotion.into()),
        (_, promotion) => Ok(landed(piece, vec, from, promotion)),
    }
}

fn check_castling_pieces<B: BoardView + ?Sized>(
    board: &B,
    sit: &Situation,
    king: Piece,
    from: Pos,
    side: CastlingSide,
) -> Result<(), Impossibility> {
    if from.segment() != king.color || !sit.castling.has(king.color, side) {
        return Err(Impossibility::CastlingRightLost);
    }
    let rook_from = Pos::colored(king.color, 0, side.rook_files().0);
    match board.get(rook_from) {
        Some(rook) if rook.is(PieceKind::Rook, king.color) => Ok(()),
        _ => Err(Impossibility::CastlingRookMissing),
    }
}

/// Castling out of check or across an attacked square is off. The king is
/// test-moved onto the square it passes on a private copy.
fn check_castling_safety(
    board: &MutableBoard,
    state: &GameState,
    from: Pos,
    side: CastlingSide,
    color: Color,
) -> Result<(), Impossibility> {
    if in_check(board, color, state.alive, state.moats) {
        return Err(Impossibility::CastlingOutOfCheck);
    }
    let passing = Pos::colored(color, 0, side.passing_file());
    let mut probe = board.clone();
    probe.relocate(from, passing);
    if in_check(&probe, color, state.alive, state.moats) {
        return Err(Impossibility::CastlingThroughCheck);
    }
    Ok(())
}

/// Plays a checked move on `board` in place. The move must have passed
/// [`check_possibility`]; anything else is a bug and panics.
pub fn make_move(board: &mut MutableBoard, mv: VecMove, en_passant: EnPassantStore) -> Undo {
    let VecMove {
        from,
        vec,
        promotion,
    } = mv;
    let moved = board
        .get(from)
        .unwrap_or_else(|| panic!("make_move: no piece on {from} for {vec:?}"));
    let to = vec
        .add_to(from)
        .unwrap_or_else(|e| panic!("make_move: {e} although the move was checked"));

    let captured = match board.get(to) {
        Some(victim) => Some((to, victim)),
        None => {
            let sit = Situation::for_threats(PlayersAlive::ALL, en_passant, MoatsState::NO_BRIDGES);
            match vec {
                Vector::PawnCapture { .. } => en_passant_victim(board, &sit, moved, to)
                    .and_then(|pos| board.get(pos).map(|p| (pos, p))),
                _ => None,
            }
        }
    };
    if let Some((pos, _)) = captured {
        board.clr(pos);
    }

    board.clr(from);
    board.put(to, Some(landed(moved, vec, from, promotion)));

    let castling_rook = match vec {
        Vector::Castling(side) => {
            let (rf, rt) = side.rook_files();
            let rook = (
                Pos::colored(moved.color, 0, rf),
                Pos::colored(moved.color, 0, rt),
            );
            board.relocate(rook.0, rook.1);
            Some(rook)
        }
        _ => None,
    };

    Undo {
        from,
        to,
        moved,
        captured,
        castling_rook,
    }
}

/// Reverts [`make_move`] exactly.
pub fn undo_move(board: &mut MutableBoard, undo: Undo) {
    if let Some((rook_from, rook_to)) = undo.castling_rook {
        board.relocate(rook_to, rook_from);
    }
    board.clr(undo.to);
    board.put(undo.from, Some(undo.moved));
    if let Some((pos, piece)) = undo.captured {
        board.put(pos, Some(piece));
    }
}

/// Full legality check for the player to move: turn order, the move itself,
/// castling safety and own king safety. Returns the board after the move.
/// `NeedsPromotion` means the move is legal once a piece is chosen.
fn checked(state: &GameState, mv: VecMove) -> Result<(MutableBoard, Undo), MoveError> {
    let piece = state
        .board
        .get(mv.from)
        .ok_or(Impossibility::NothingToMove)?;
    if !state.alive.get(piece.color) {
        return Err(Impossibility::MoverEliminated.into());
    }
    if piece.color != state.moves_next {
        return Err(Impossibility::NotYourTurn.into());
    }
    let sit = Situation::of(state);
    // a missing promotion is only reported once the rest of the move holds
    let needs_promotion = match check_possibility(&state.board, &sit, mv, true) {
        Err(e @ MoveError::NeedsPromotion { .. }) => Some(e),
        other => {
            other?;
            None
        }
    };

    let mut board = state.board.to_mutable();
    if let Vector::Castling(side) = mv.vec {
        check_castling_safety(&board, state, mv.from, side, piece.color)?;
    }
    let undo = make_move(&mut board, mv, state.en_passant);
    if in_check(&board, piece.color, state.alive, state.moats) {
        return Err(Impossibility::WouldBeInCheck.into());
    }
    match needs_promotion {
        Some(e) => Err(e),
        None => Ok((board, undo)),
    }
}

/// Is `mv` legal for the player to move?
pub fn check_move(state: &GameState, mv: VecMove) -> Result<(), MoveError> {
    checked(state, mv).map(|_| ())
}

/// Bookkeeping after a move: rights, en passant, clocks and turn. Nobody is
/// eliminated here.
fn successor(state: &GameState, board: &MutableBoard, mv: VecMove, undo: &Undo) -> GameState {
    let mover = undo.moved.color;
    let mut castling = state.castling;
    match undo.moved.kind {
        PieceKind::King => castling = castling.revoke_color(mover),
        PieceKind::Rook => {
            if let Some(side) = corner_side(undo.from, mover) {
                castling = castling.revoke(mover, side);
            }
        }
        _ => {}
    }
    if let Some((pos, victim)) = undo.captured
        && victim.kind == PieceKind::Rook
        && let Some(side) = corner_side(pos, victim.color)
    {
        castling = castling.revoke(victim.color, side);
    }

    let en_passant = match mv.vec {
        Vector::PawnLongJump => EnPassantStore::new(Pos::new(2, mv.from.file())),
        _ => EnPassantStore::EMPTY,
    };
    let halfmove_clock = if undo.moved.kind == PieceKind::Pawn || undo.captured.is_some() {
        0
    } else {
        state.halfmove_clock + 1
    };
    let fullmove_number = state.fullmove_number + u32::from(mover == Color::Black);

    GameState {
        board: board.freeze(),
        moats: state.moats,
        moves_next: mover.next(),
        castling,
        en_passant,
        halfmove_clock,
        fullmove_number,
        alive: state.alive,
    }
}

/// Castling side of a rook standing on one of `color`'s home corners.
fn corner_side(pos: Pos, color: Color) -> Option<CastlingSide> {
    if pos.rank() != 0 || pos.segment() != color {
        return None;
    }
    CastlingSide::of_rook_file(pos.segment_file())
}

/// Successor of a legal move, before anybody is eliminated.
pub fn after_without_death(state: &GameState, mv: VecMove) -> Result<GameState, MoveError> {
    let (board, undo) = checked(state, mv)?;
    Ok(successor(state, &board, mv, &undo))
}

/// Successor of a legal move, with eliminations and turn order settled.
pub fn after(state: &GameState, mv: VecMove) -> Result<GameState, MoveError> {
    Ok(after_without_death(state, mv)?.evaluate_death())
}

/// Applies a described move, trying every vector that could explain it.
///
/// A missing promotion is reported straight away. Otherwise the last
/// rejection is returned when no vector works.
pub fn apply_move(state: &GameState, mv: DescMove) -> Result<GameState, MoveError> {
    let piece = state
        .board
        .get(mv.from)
        .ok_or(Impossibility::NothingToMove)?;
    let mut err = MoveError::Geometry(GeometryError::NoVector {
        from: mv.from,
        to: mv.to,
    });
    for vec in piece.vectors_to(mv.from, mv.to) {
        let vm = VecMove {
            from: mv.from,
            vec,
            promotion: mv.promotion,
        };
        match after(state, vm) {
            Ok(next) => return Ok(next),
            Err(e @ MoveError::NeedsPromotion { .. }) => return Err(e),
            Err(e) => {
                trace!(%mv, ?vec, error = %e, "vector rejected");
                err = e;
            }
        }
    }
    Err(err)
}
