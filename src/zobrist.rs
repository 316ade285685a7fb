//! Zobrist tables: a random 32 bit value per cell and per color.
//!
//! The hash of a board is `H = XOR Q(x, y)` over occupied cells, where
//! `Q(x, y)` is taken from the black table for a black stone and from the
//! white table for a white one. Black stones feed the low half of the 64 bit
//! hash and white stones the high half.

use std::sync::LazyLock;

use crate::constants::{CELLS, ZOBRIST_SEED};
use crate::stone::Color;

pub struct Zobrist {
    black: [u32; CELLS],
    white: [u32; CELLS],
}

static TABLES: LazyLock<Zobrist> = LazyLock::new(|| Zobrist::with_seed(ZOBRIST_SEED));

impl Zobrist {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let black = std::array::from_fn(|_| rng.u32(..));
        let white = std::array::from_fn(|_| rng.u32(..));
        Self { black, white }
    }

    /// The process-wide tables shared by every board.
    #[inline]
    pub fn global() -> &'static Zobrist {
        &TABLES
    }

    #[inline]
    pub fn key(&self, color: Color, cell: usize) -> u32 {
        match color {
            Color::Black => self.black[cell],
            Color::White => self.white[cell],
        }
    }
}
