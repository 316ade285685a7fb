//! Transposition table: solved outcomes keyed by board hash.
//!
//! Every entry keeps two 16 bit records, one for "black plays first" and
//! one for "white plays first":
//!
//! ```text
//!  0               1
//!  0 1 2 3 4 5 6 7 0 1 2 3 4 5 6 7
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   x   |   y   |  b  |  w  |u|m|
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! - `b`: if `km >= b`, black wins; `b` is in `-3..=3`
//! - `w`: if `km <= w`, white wins; `w` is in `-3..=3`
//! - `m`: whether the winner has to play at `(x, y)`
//! - `u`: unused
//!
//! where `km` is the ko treat count: `+1` means black has an external ko
//! treat, `-1` means white has one and `0` means neither side has. More ko
//! treats never hurt black, so a black win at `km` holds for every larger
//! count and a white win for every smaller one.
//!
//! A record always has `w < b`, which makes the zero record invalid; a
//! fresh record is `b = +3, w = -3` and solves nothing.
//!
//! The table is meant to be shared by the whole search and is not
//! synchronized.

use std::collections::HashMap;

use crate::constants::{KO_TREATS, THRESHOLD_MAX, THRESHOLD_MIN};
use crate::stone::{Color, Move};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Record(u16);

impl Record {
    const UNSOLVED: Record = Record::new(0, 0, THRESHOLD_MAX, THRESHOLD_MIN, false);

    const fn new(x: usize, y: usize, b: i8, w: i8, m: bool) -> Self {
        Record(
            (x & 15) as u16
                | ((y & 15) as u16) << 4
                | ((b & 7) as u16) << 8
                | ((w & 7) as u16) << 11
                | (m as u16) << 15,
        )
    }

    #[inline]
    fn x(self) -> usize {
        (self.0 & 15) as usize
    }

    #[inline]
    fn y(self) -> usize {
        (self.0 >> 4 & 15) as usize
    }

    /// Sign-extends a 3 bit field.
    #[inline]
    fn signed3(bits: u16) -> i8 {
        ((bits & 7) as i8) << 5 >> 5
    }

    #[inline]
    fn b(self) -> i8 {
        Self::signed3(self.0 >> 8)
    }

    #[inline]
    fn w(self) -> i8 {
        Self::signed3(self.0 >> 11)
    }

    #[inline]
    fn m(self) -> bool {
        self.0 & 0x8000 != 0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Entry {
    black: Record,
    white: Record,
}

impl Entry {
    const BASE: Entry = Entry {
        black: Record::UNSOLVED,
        white: Record::UNSOLVED,
    };

    #[inline]
    fn get(&self, color: Color) -> Record {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    #[inline]
    fn set(&mut self, color: Color, r: Record) {
        match color {
            Color::Black => self.black = r,
            Color::White => self.white = r,
        }
    }
}

/// Transposition table.
#[derive(Default)]
pub struct TT {
    data: HashMap<u64, Entry>,
}

impl TT {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions with an entry.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// The outcome of the position `hash` with `color` to play and `km` ko
    /// treats, or `None` if it has not been solved for that many ko treats.
    /// The winning move's coordinates are only reported when the winner is
    /// the side to play.
    pub fn get(&self, hash: u64, color: Color, km: i8) -> Option<Move> {
        let e = self.data.get(&hash)?.get(color);

        let winner = if km >= e.b() {
            // enough ko treats for black
            Color::Black
        } else if km <= e.w() {
            // enough ko treats for white
            Color::White
        } else {
            return None;
        };

        // the move must be dropped if the outcome is a loss
        if winner == color && e.m() {
            Some(Move::at(e.x(), e.y(), winner))
        } else {
            Some(Move::nocoords(winner))
        }
    }

    /// Records that `mv.color` wins the position `hash` when `color` plays
    /// first and there are `km` ko treats.
    ///
    /// A threshold is only ever tightened: a black win lowers `b` if `km` is
    /// below it and a white win raises `w` if `km` is above it. A write that
    /// tells nothing new keeps the stored move, so a winning move found at
    /// one ko treat count is not replaced by a later, weaker result (the
    /// bent four is the typical case: black wins without ko treats and
    /// loses when white has them).
    ///
    /// # Panics
    ///
    /// If `km` is not -1, 0 or +1, or if a coordinate is off a 16x16 board.
    pub fn set(&mut self, hash: u64, color: Color, mv: Move, km: i8) {
        assert!(KO_TREATS.contains(&km), "invalid ko treat count: {km}");

        let entry = self.data.entry(hash).or_insert(Entry::BASE);
        let e = entry.get(color);

        let (x, y, hc) = if mv.color == color {
            match mv.point {
                Some((x, y)) => {
                    assert!(x < 16 && y < 16, "invalid TT move: {mv}");
                    (x, y, true)
                }
                None => (0, 0, false),
            }
        } else {
            (e.x(), e.y(), e.m())
        };

        let b = e.b();
        let w = e.w();

        let e2 = match mv.color {
            Color::Black if km < b => Record::new(x, y, km, w, hc),
            Color::White if km > w => Record::new(x, y, b, km, hc),
            _ => e,
        };

        debug_assert!(e2.w() < e2.b(), "contradictory TT result at {hash:#x}");

        entry.set(color, e2);
    }
}
