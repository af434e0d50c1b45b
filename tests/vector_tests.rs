use std::collections::HashSet;
use trichess::board::{Color, Piece, PieceKind};
use trichess::moves::vectors::{Vector, all_vectors_from, wrapped_file_diff};
use trichess::square::{FILES, Pos};

fn is_slide(v: Vector) -> bool {
    matches!(v, Vector::Rank(_) | Vector::File(_) | Vector::Diagonal { .. })
}

fn slide_len(v: Vector) -> usize {
    match v {
        Vector::Rank(n) | Vector::File(n) => n.unsigned_abs() as usize,
        Vector::Diagonal { steps, .. } => steps as usize,
        _ => unreachable!(),
    }
}

#[test]
fn slide_empties_lie_strictly_between() {
    for from in Pos::all() {
        for v in all_vectors_from(from).filter(|&v| is_slide(v)) {
            let to = v.add_to(from).unwrap();
            let empties = v.empties_from(from).unwrap();
            assert_eq!(empties.len(), slide_len(v) - 1, "{v:?} from {from}");
            assert!(!empties.contains(&from), "{v:?} from {from}");
            assert!(!empties.contains(&to), "{v:?} from {from}");
            let distinct: HashSet<Pos> = empties.iter().copied().collect();
            assert_eq!(distinct.len(), empties.len(), "{v:?} from {from}");
        }
    }
}

#[test]
fn every_resolved_vector_lands_on_its_target() {
    let pieces = [
        Piece::new(PieceKind::Knight, Color::White),
        Piece::new(PieceKind::Queen, Color::White),
        Piece::new(PieceKind::King, Color::Gray),
        Piece::new(PieceKind::Pawn, Color::Black),
        Piece::crossed_pawn(Color::Black),
    ];
    for from in Pos::all() {
        for to in Pos::all() {
            for piece in pieces {
                for v in piece.vectors_to(from, to) {
                    assert_eq!(v.add_to(from), Ok(to), "{piece} {v:?} {from}->{to}");
                }
            }
        }
    }
}

#[test]
fn file_vectors_form_a_ring() {
    for from in Pos::all() {
        for m in 1..FILES as i8 {
            let there = Vector::File(m).add_to(from).unwrap();
            assert_eq!(Vector::File(-m).add_to(there), Ok(from));
            // the same displacement the other way round the ring
            let other_way = Vector::File(m - FILES as i8).add_to(from).unwrap();
            assert_eq!(other_way, there);
        }
    }
}

#[test]
fn short_and_long_file_vectors_differ_by_a_full_ring() {
    for a in 0..FILES {
        for b in 0..FILES {
            if a == b {
                continue;
            }
            let short = wrapped_file_diff(a, b, false);
            let long = wrapped_file_diff(a, b, true);
            assert_eq!((short - long).abs(), FILES as i16);
            assert!(short.abs() <= long.abs());
        }
    }
}

#[test]
fn queen_sees_through_the_center_along_the_file() {
    let from = Pos::new(4, 2);
    let to = Pos::new(4, 14);
    let queen = Piece::new(PieceKind::Queen, Color::White);
    let vectors = queen.vectors_to(from, to);
    assert!(vectors.contains(&Vector::Rank(3)));
    assert_eq!(
        Vector::Rank(3).empties_from(from).unwrap().as_slice(),
        &[Pos::new(5, 2), Pos::new(5, 14)]
    );
}

#[test]
fn king_and_castling_from_every_segment() {
    for color in Color::ALL {
        let king = Piece::new(PieceKind::King, color);
        let start = Pos::colored(color, 0, 4);
        let short = king.vectors_to(start, Pos::colored(color, 0, 6));
        assert_eq!(short.len(), 1);
        assert!(matches!(short[0], Vector::Castling(_)));
        // one step is always a single unit vector
        assert_eq!(king.vectors_to(start, Pos::colored(color, 1, 5)).len(), 1);
        assert!(king.vectors_to(start, Pos::colored(color, 2, 4)).is_empty());
    }
}
