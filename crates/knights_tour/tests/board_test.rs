//! Tests for board coordinates, notation, and legal-move computation.

use knights_tour::{BOARD_SIZE, Board, Position};

fn pos(x: u8, y: u8) -> Position {
    Position::new(x, y).expect("coordinates in bounds")
}

#[test]
fn test_notation_round_trip_all_cells() {
    for cell in Position::all() {
        let notation = cell.notation();
        let parsed = Position::from_notation(&notation).expect("own notation parses");
        assert_eq!(parsed, cell, "round trip failed for {notation}");
    }
}

#[test]
fn test_notation_anchors() {
    assert_eq!(pos(0, 0).notation(), "a8");
    assert_eq!(pos(7, 0).notation(), "h8");
    assert_eq!(pos(0, 7).notation(), "a1");
    assert_eq!(pos(7, 7).notation(), "h1");
    assert_eq!(Position::from_notation("e4"), Position::new(4, 4));
}

#[test]
fn test_invalid_notation_rejected() {
    for bad in ["", "a", "a9", "a0", "i5", "A5", "5a", "a55"] {
        assert_eq!(Position::from_notation(bad), None, "accepted {bad:?}");
    }
}

#[test]
fn test_position_bounds() {
    assert!(Position::new(BOARD_SIZE, 0).is_none());
    assert!(Position::new(0, BOARD_SIZE).is_none());
    assert!(pos(0, 0).offset(-1, 2).is_none());
    assert!(pos(7, 7).offset(1, -2).is_none());
    assert_eq!(pos(3, 3).offset(2, -1), Position::new(5, 2));
}

#[test]
fn test_opening_has_all_64_cells() {
    let board = Board::new();
    let opening = board.legal_moves_from(None);
    assert_eq!(opening.len(), 64);
}

#[test]
fn test_corner_has_two_moves() {
    let board = Board::new();
    let mut moves = board.legal_moves_from(Some(pos(0, 0)));
    moves.sort();
    assert_eq!(moves, vec![pos(1, 2), pos(2, 1)]);
}

#[test]
fn test_center_has_eight_moves() {
    let board = Board::new();
    let mut moves = board.legal_moves_from(Some(pos(3, 3)));
    moves.sort();
    let mut expected = vec![
        pos(4, 5),
        pos(5, 4),
        pos(4, 1),
        pos(5, 2),
        pos(2, 5),
        pos(1, 4),
        pos(2, 1),
        pos(1, 2),
    ];
    expected.sort();
    assert_eq!(moves, expected);
}

#[test]
fn test_legal_moves_query_is_idempotent() {
    let board = Board::new();
    let first = board.legal_moves_from(Some(pos(4, 4)));
    let second = board.legal_moves_from(Some(pos(4, 4)));
    assert_eq!(first, second);
}

#[test]
fn test_legal_moves_stay_in_bounds() {
    let board = Board::new();
    for cell in Position::all() {
        for target in board.legal_moves_from(Some(cell)) {
            assert!(target.x() < BOARD_SIZE);
            assert!(target.y() < BOARD_SIZE);
        }
    }
}
