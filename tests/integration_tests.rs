//! Integration tests for tsumego-core
//!
//! These go through the public API only: boards set up from text and SGF,
//! play/undo sequences, block queries and the transposition table.

use tsumego_core::board::Board;
use tsumego_core::error::BoardError;
use tsumego_core::setup::TextMode;
use tsumego_core::stone::{Color, Move, Stone};
use tsumego_core::tt::TT;
use tsumego_core::walk::StoneFilter;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Plays every stone in order, each one must be legal.
fn play_all(board: &mut Board, stones: &[Stone]) {
    for &s in stones {
        assert!(board.play(s) > 0, "{s} should be legal");
    }
}

fn plain() -> TextMode {
    TextMode {
        hide_labels: true,
        show_libs: false,
    }
}

// =============================================================================
// Play and undo
// =============================================================================

#[test]
fn test_capture_in_the_center() {
    let mut b = Board::new(5).unwrap();
    play_all(
        &mut b,
        &[
            Stone::black(2, 2),
            Stone::white(2, 1),
            Stone::white(1, 2),
            Stone::white(3, 2),
        ],
    );

    let black = b.get(2, 2).unwrap();
    assert_eq!((black.size(), black.libs()), (1, 1));
    assert_eq!(b.natari(Color::Black), 1);

    assert_eq!(b.play(Stone::white(2, 3)), 2);
    assert_eq!(b.get(2, 2), None);
    assert_eq!(b.nstones(Color::Black), 0);
    assert_eq!(b.removed_blocks(), vec![black]);
    // the captured cell is a liberty again for all four white stones
    for (x, y) in [(2, 1), (1, 2), (3, 2), (2, 3)] {
        assert!(b.is_liberty_of(2, 2, b.id_at(x, y)));
    }

    assert_eq!(b.undo(), Some(Stone::white(2, 3)));
    assert_eq!(b.get(2, 2), Some(black));

    for _ in 0..3 {
        b.undo();
    }
    let alone = b.get(2, 2).unwrap();
    assert_eq!((alone.size(), alone.libs()), (1, 4));

    assert_eq!(b.undo(), Some(Stone::black(2, 2)));
    assert_eq!(b.hash(), 0);
    assert_eq!(b.undo(), None);
}

#[test]
fn test_capture_gives_liberties_back() {
    // X O -
    // X O -
    // - - -
    let mut b = Board::from_rows(3, ["X O -", "X O -", "- - -"]).unwrap();
    assert_eq!(b.natari(Color::Black), 1);
    assert_eq!(b.get(1, 0).unwrap().libs(), 3);

    assert_eq!(b.play(Stone::white(0, 2)), 3);
    assert_eq!(b.nstones(Color::Black), 0);
    assert_eq!(b.get(1, 0).unwrap().libs(), 5);
    assert_eq!(b.get(0, 2).unwrap().libs(), 2);
}

#[test]
fn test_moves_are_listed_in_order() {
    let mut b = Board::new(9).unwrap();
    let seq = [Stone::black(2, 2), Stone::white(6, 6), Stone::black(2, 3)];
    play_all(&mut b, &seq);

    assert_eq!(b.moves().collect::<Vec<_>>(), seq);
    assert_eq!(b.depth(), 3);

    b.drop_history();
    assert_eq!(b.moves().count(), 0);
    assert_eq!(b.get(2, 3).unwrap().size(), 2);
}

#[test]
fn test_merge_then_undo_restores_both_blocks() {
    let mut b = Board::new(5).unwrap();
    play_all(&mut b, &[Stone::black(0, 1), Stone::black(2, 1)]);
    let left = b.get(0, 1).unwrap();
    let right = b.get(2, 1).unwrap();

    b.play(Stone::black(1, 1));
    assert_eq!(b.id_at(0, 1), b.id_at(2, 1));
    assert_eq!(b.nblocks(Color::Black), 1);
    assert_eq!(b.sumlibs(Color::Black), 7);

    b.undo();
    assert_eq!(b.nblocks(Color::Black), 2);
    assert_eq!(b.get(0, 1), Some(left));
    assert_eq!(b.get(2, 1), Some(right));
    assert_ne!(b.id_at(0, 1), b.id_at(2, 1));
}

#[test]
fn test_redo_counts_captures() {
    let mut b = Board::from_rows(4, ["- X O", "X O -", "O - -"]).unwrap();
    let s = Stone::white(0, 0);

    // W[aa] captures both black stones
    assert_eq!(b.play(s), 3);
    let after = b.snapshot();
    b.undo();

    assert_eq!(b.play(s), 3);
    assert_eq!(b.stats().redos, 1);
    assert_eq!(b.snapshot(), after);
    assert_eq!(b.removed_blocks().len(), 2);
}

#[test]
fn test_structural_errors() {
    assert_eq!(Board::new(17).err(), Some(BoardError::TooBig(17)));

    let msg = BoardError::TooBig(19).to_string();
    assert!(msg.contains("19x19"), "{msg}");
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_rect_and_counts() {
    let b = Board::from_rows(9, ["- - X", "- O X", "- - - - O"]).unwrap();

    let black = b.rect(Color::Black).unwrap();
    assert_eq!(black.dims(), (2, 2, 0, 1));

    let white = b.rect(Color::White).unwrap();
    assert_eq!(white.dims(), (1, 4, 1, 2));

    assert_eq!(b.nblocks(Color::White), 2);
    assert_eq!(b.nstones(Color::White), 2);
    assert_eq!(b.nblocks(Color::Black), 1);
    assert_eq!(b.nstones(Color::Black), 2);
    assert_eq!(b.sumlibs(Color::Black), 4);

    assert_eq!(Board::new(5).unwrap().rect(Color::Black), None);
}

#[test]
fn test_stone_iterators() {
    let b = Board::from_rows(5, ["X O", "X -"]).unwrap();

    let all: Vec<_> = b.stones(StoneFilter::All).collect();
    assert_eq!(all, [Stone::black(0, 0), Stone::black(0, 1), Stone::white(1, 0)]);

    let white: Vec<_> = b.stones(StoneFilter::Color(Color::White)).collect();
    assert_eq!(white, [Stone::white(1, 0)]);

    let id = b.id_at(0, 1);
    assert_eq!(b.stones(StoneFilter::Block(id)).count(), 2);
    assert_eq!(b.libs(id).collect::<Vec<_>>(), [(0, 2), (1, 1)]);
    assert_eq!(b.edge(id).count(), 3);
    assert_eq!(b.libs(id).count(), b.get(0, 0).unwrap().libs());

    // restartable
    assert_eq!(b.libs(id).count(), b.libs(id).count());
}

#[test]
fn test_neighbors_on_the_edge() {
    let b = Board::new(3).unwrap();
    assert_eq!(b.neighbors(0, 0).collect::<Vec<_>>(), [(1, 0), (0, 1)]);
    assert_eq!(b.neighbors(1, 1).count(), 4);
    assert_eq!(b.neighbors(2, 2).collect::<Vec<_>>(), [(1, 2), (2, 1)]);
}

// =============================================================================
// Setup formats
// =============================================================================

#[test]
fn test_text_round_trip() {
    let rows = ["- X O", "X X O", "O O -"];
    let b = Board::from_rows(5, rows).unwrap();

    let text = b.to_text(plain());
    assert_eq!(text, " - X O\n X X O\n O O -");

    let again = Board::from_text(5, &text).unwrap();
    assert_eq!(again.hash(), b.hash());
}

#[test]
fn test_sgf_round_trip() {
    let b = Board::from_rows(7, ["- X O", "X X O", "- O -"]).unwrap();
    let sgf = b.to_sgf();
    assert_eq!(sgf, "(;FF[4]SZ[7]AB[ba][ab][bb]AW[ca][cb][bc])");

    let again = Board::from_sgf(&sgf, None).unwrap();
    assert_eq!(again.hash(), b.hash());
    assert_eq!(again.size(), 7);
    assert_eq!(again.to_text(plain()), b.to_text(plain()));
}

#[test]
fn test_sgf_variations() {
    let src = "(;FF[4]SZ[9]AB[cc]\n(;AW[dd])\n(;AW[ee][ff]))";

    let root = Board::from_sgf(src, None).unwrap();
    assert_eq!(root.nstones(Color::White), 0);

    let v2 = Board::from_sgf(src, Some(2)).unwrap();
    assert_eq!(v2.nstones(Color::White), 2);
    assert_eq!(v2.nstones(Color::Black), 1);
    assert_eq!(v2.depth(), 0);

    assert_eq!(
        Board::from_sgf(src, Some(3)).err(),
        Some(BoardError::NoVariation(3))
    );
}

// =============================================================================
// Transposition table
// =============================================================================

#[test]
fn test_tt_black_wins_with_move() {
    let mut tt = TT::new();
    let h = 0x1234_5678_9abc_def0;

    tt.set(h, Color::Black, Move::at(3, 3, Color::Black), 0);
    assert_eq!(tt.get(h, Color::Black, 0), Some(Move::at(3, 3, Color::Black)));
    assert_eq!(tt.get(h, Color::Black, 1), Some(Move::at(3, 3, Color::Black)));
    // a black win without ko treats says nothing when white has one
    assert_eq!(tt.get(h, Color::Black, -1), None);
}

#[test]
fn test_tt_keys_positions_by_board_hash() {
    let mut b = Board::new(5).unwrap();
    let mut tt = TT::new();

    b.play(Stone::black(1, 1));
    tt.set(b.hash(), Color::White, Move::nocoords(Color::Black), 0);

    b.undo();
    assert_eq!(tt.get(b.hash(), Color::White, 0), None);

    b.play(Stone::black(1, 1));
    assert_eq!(tt.get(b.hash(), Color::White, 0), Some(Move::nocoords(Color::Black)));
    assert_eq!(tt.get(b.hash(), Color::White, 1), Some(Move::nocoords(Color::Black)));
    assert_eq!(tt.len(), 1);

    tt.clear();
    assert!(tt.is_empty());
}
