//! Random walk tests for the board bookkeeping.
//!
//! Every walk is seeded, so a failure reproduces with the seed printed in
//! the assertion message.

use std::collections::{BTreeMap, BTreeSet};

use tsumego_core::block::{BlockId, Slot};
use tsumego_core::board::Board;
use tsumego_core::stone::{Color, Stone};
use tsumego_core::walk::StoneFilter;

const SEEDS: std::ops::Range<u64> = 0..20;

// =============================================================================
// Helper functions
// =============================================================================

fn random_stone(rng: &mut fastrand::Rng, size: usize, color: Color) -> Stone {
    Stone::new(rng.usize(..size), rng.usize(..size), color)
}

/// Plays up to `attempts` random moves with alternating colors and returns
/// the number of legal ones.
fn walk(board: &mut Board, rng: &mut fastrand::Rng, attempts: usize) -> usize {
    let mut color = Color::Black;
    let mut played = 0;

    for _ in 0..attempts {
        let s = random_stone(rng, board.size(), color);
        if board.play(s) > 0 {
            played += 1;
            color = color.opponent();
        }
    }

    played
}

/// Recomputes every block from the cell table by flood fill over lifted ids
/// and compares it with the stored descriptor.
fn check_blocks(board: &Board, seed: u64) {
    let n = board.size();
    let mut cells: BTreeMap<BlockId, Vec<(usize, usize)>> = BTreeMap::new();

    for y in 0..n {
        for x in 0..n {
            let id = board.id_at(x, y);
            if id != 0 {
                cells.entry(id).or_default().push((x, y));
            }
        }
    }

    for (&id, stones) in &cells {
        let b = board
            .block(id)
            .unwrap_or_else(|| panic!("seed {seed}: cell lifts to dead block {id}"));

        let libs: BTreeSet<(usize, usize)> = stones
            .iter()
            .flat_map(|&(x, y)| board.neighbors(x, y))
            .filter(|&(x, y)| board.id_at(x, y) == 0)
            .collect();

        let xmin = stones.iter().map(|s| s.0).min().unwrap();
        let xmax = stones.iter().map(|s| s.0).max().unwrap();
        let ymin = stones.iter().map(|s| s.1).min().unwrap();
        let ymax = stones.iter().map(|s| s.1).max().unwrap();

        assert_eq!(b.size(), stones.len(), "seed {seed}: size of {b}");
        assert_eq!(b.libs(), libs.len(), "seed {seed}: libs of {b}");
        assert_eq!(b.dims(), (xmin, xmax, ymin, ymax), "seed {seed}: bounds of {b}");
        assert!(b.libs() > 0, "seed {seed}: {b} has no liberties");
        assert_eq!(board.libs(id).collect::<BTreeSet<_>>(), libs, "seed {seed}");

        for &(x, y) in stones {
            for (nx, ny) in board.neighbors(x, y) {
                if let Some(nb) = board.get(nx, ny) {
                    if nb.color() == b.color() {
                        assert_eq!(board.id_at(nx, ny), id, "seed {seed}: split block");
                    }
                }
            }
        }
    }

    // no live block without stones
    for (id, slot) in board.snapshot().blocks.iter().enumerate() {
        if let Slot::Live(b) = slot {
            assert!(
                cells.contains_key(&(id as BlockId)),
                "seed {seed}: orphan block {id}: {b}"
            );
        }
    }
}

// =============================================================================
// Invariants
// =============================================================================

#[test]
fn test_play_undo_restores_snapshot() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(5).unwrap();
        let empty = b.snapshot();

        let mut color = Color::Black;
        let mut snapshots = vec![b.snapshot()];

        for _ in 0..80 {
            let s = random_stone(&mut rng, 5, color);
            if b.play(s) > 0 {
                snapshots.push(b.snapshot());
                color = color.opponent();
            }
        }

        assert_eq!(b.depth() + 1, snapshots.len());

        snapshots.pop();
        while let Some(expected) = snapshots.pop() {
            assert!(b.undo().is_some());
            assert_eq!(b.snapshot(), expected, "seed {seed}: depth {}", b.depth());
        }

        assert_eq!(b.undo(), None);
        assert_eq!(b.snapshot(), empty, "seed {seed}");
    }
}

#[test]
fn test_blocks_match_flood_fill() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(7).unwrap();
        let mut color = Color::White;

        for _ in 0..120 {
            let s = random_stone(&mut rng, 7, color);
            if b.play(s) > 0 {
                check_blocks(&b, seed);
                color = color.opponent();
            }

            // step back now and then to check undo as well
            if rng.u8(..8) == 0 && b.undo().is_some() {
                check_blocks(&b, seed);
            }
        }

        let stones = b.stones(StoneFilter::All).count();
        assert_eq!(stones, b.nstones(Color::Black) + b.nstones(Color::White));
    }
}

#[test]
fn test_redo_matches_slow_play() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(5).unwrap();
        let mut color = Color::Black;

        for _ in 0..80 {
            let s = random_stone(&mut rng, 5, color);
            let n = b.play(s);
            if n == 0 {
                continue;
            }

            let after = b.snapshot();
            let removed = b.removed_blocks();
            let redos = b.stats().redos;

            assert_eq!(b.undo(), Some(s));
            assert_eq!(b.play(s), n, "seed {seed}: {s}");
            assert_eq!(b.stats().redos, redos + 1, "seed {seed}: {s} not redone");
            assert_eq!(b.snapshot(), after, "seed {seed}: {s}");
            assert_eq!(b.removed_blocks(), removed, "seed {seed}: {s}");

            color = color.opponent();
        }
    }
}

#[test]
fn test_hash_depends_on_stones_only() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(6).unwrap();
        walk(&mut b, &mut rng, 60);

        let fork = b.fork();
        assert_eq!(fork.hash(), b.hash());
        assert_eq!(fork.to_sgf(), b.to_sgf());

        // the same stones placed in reverse order: any order works since
        // every block of a legal position keeps a liberty
        let mut stones: Vec<Stone> = b.stones(StoneFilter::All).collect();
        stones.reverse();

        let mut other = Board::new(6).unwrap();
        for &s in &stones {
            assert_eq!(other.play(s), 1, "seed {seed}: {s}");
        }

        assert_eq!(other.hash(), b.hash(), "seed {seed}");
        for color in [Color::Black, Color::White] {
            assert_eq!(other.nblocks(color), b.nblocks(color), "seed {seed}");
            assert_eq!(other.sumlibs(color), b.sumlibs(color), "seed {seed}");
            assert_eq!(other.natari(color), b.natari(color), "seed {seed}");
        }

        let reloaded = Board::from_sgf(&b.to_sgf(), None).unwrap();
        assert_eq!(reloaded.hash(), b.hash(), "seed {seed}");
    }
}

#[test]
fn test_illegal_moves_change_nothing() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(5).unwrap();
        walk(&mut b, &mut rng, 40);

        let before = b.snapshot();
        let depth = b.depth();

        for y in 0..6 {
            for x in 0..6 {
                for color in [Color::Black, Color::White] {
                    let s = Stone::new(x, y, color);
                    if !b.in_bounds(x, y) || b.get(x, y).is_some() {
                        assert_eq!(b.play(s), 0, "seed {seed}: {s}");
                        assert_eq!(b.snapshot(), before, "seed {seed}: {s}");
                    }
                }
            }
        }

        assert_eq!(b.depth(), depth);
    }
}

#[test]
fn test_hash_is_zero_only_when_empty() {
    for seed in SEEDS {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut b = Board::new(4).unwrap();
        walk(&mut b, &mut rng, 10);

        if b.nstones(Color::Black) + b.nstones(Color::White) > 0 {
            assert_ne!(b.hash(), 0, "seed {seed}");
        }

        while b.undo().is_some() {}
        assert_eq!(b.hash(), 0, "seed {seed}");
    }
}
