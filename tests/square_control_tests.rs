use trichess::board::{Board, BoardView, Color, Piece, PieceKind};
use trichess::game_state::{EnPassantStore, GameState, MoatsState, PlayersAlive};
use trichess::square::Pos;
use trichess::{is_in_check, new_game};

fn board_with(pieces: &[(u8, u8, PieceKind, Color)]) -> Board {
    pieces.iter().fold(Board::empty(), |b, &(rank, file, kind, color)| {
        b.with_put(Pos::new(rank, file), Some(Piece::new(kind, color)))
    })
}

#[test]
fn start_position_has_no_checks() {
    let s = new_game();
    for color in Color::ALL {
        assert_eq!(is_in_check(&s, color).count(), 0, "{color:?}");
    }
}

#[test]
fn start_position_home_ranks_are_safe_across_moats() {
    let b = Board::new_game();
    let alive = PlayersAlive::ALL;
    // the rooks next to each moat face each other but cannot cross
    assert!(!b.is_there_a_threat(
        Pos::new(0, 8),
        Pos::new(0, 7),
        alive,
        EnPassantStore::EMPTY,
        MoatsState::NO_BRIDGES
    ));
    // knights jump over them
    assert!(b.is_there_a_threat(
        Pos::new(1, 23),
        Pos::new(0, 1),
        alive,
        EnPassantStore::EMPTY,
        MoatsState::NO_BRIDGES
    ));
}

#[test]
fn queen_checks_through_the_center() {
    let b = board_with(&[
        (3, 2, PieceKind::Queen, Color::White),
        (4, 14, PieceKind::King, Color::Black),
    ]);
    let s = GameState::from_board(b, Color::Gray);
    let attackers: Vec<Pos> = is_in_check(&s, Color::Black).collect();
    assert_eq!(attackers, vec![Pos::new(3, 2)]);

    // a piece on the centre ring blocks it
    let blocked = s.board.with_put(Pos::new(5, 14), Some(Piece::new(PieceKind::Pawn, Color::Gray)));
    let s = GameState::from_board(blocked, Color::Gray);
    assert!(!s.is_in_check(Color::Black));
}

#[test]
fn every_attacker_is_listed() {
    let b = board_with(&[
        (3, 12, PieceKind::King, Color::Gray),
        (3, 9, PieceKind::Rook, Color::White),
        (5, 10, PieceKind::Bishop, Color::Black),
        (1, 11, PieceKind::Knight, Color::Black),
        (2, 11, PieceKind::Pawn, Color::White),
    ]);
    let s = GameState::from_board(b, Color::White);
    let attackers: Vec<Pos> = is_in_check(&s, Color::Gray).collect();
    assert_eq!(
        attackers,
        vec![Pos::new(1, 11), Pos::new(2, 11), Pos::new(3, 9), Pos::new(5, 10)]
    );
}

#[test]
fn threats_on_other_squares() {
    let b = board_with(&[
        (2, 5, PieceKind::Knight, Color::Gray),
        (3, 7, PieceKind::Pawn, Color::White),
    ]);
    let all = PlayersAlive::ALL;
    let attackers: Vec<Pos> = b
        .threat_checking(Pos::new(3, 7), all, EnPassantStore::EMPTY, MoatsState::NO_BRIDGES)
        .collect();
    assert_eq!(attackers, vec![Pos::new(2, 5)]);
    let gray_out = all.die(Color::Gray);
    assert_eq!(
        b.threat_checking(Pos::new(3, 7), gray_out, EnPassantStore::EMPTY, MoatsState::NO_BRIDGES)
            .count(),
        0
    );
}
