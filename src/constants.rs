//! Limits and fixed parameters of the board and the transposition table.
//!
//! Block bounds are kept in 4 bit coordinates, block ids in a byte and
//! block sizes in 7 bits, so every limit below is structural: exceeding one
//! is reported as an error rather than silently wrapping.

use std::ops::RangeInclusive;

// =============================================================================
// Board Geometry
// =============================================================================

/// Largest supported board side. Block bounds use 4 bit coordinates.
pub const MAX_SIZE: usize = 16;

/// Number of cells in the cell table, independent of the actual board size.
/// A cell is addressed as `y << 4 | x`.
pub const CELLS: usize = MAX_SIZE * MAX_SIZE;

// =============================================================================
// Block Store Limits
// =============================================================================

/// The highest block id. Id 0 means "no block".
pub const MAX_BLOCK_ID: usize = 255;

/// The largest number of stones a single block may hold.
pub const MAX_BLOCK_SIZE: usize = 127;

// =============================================================================
// Hashing
// =============================================================================

/// Seed of the Zobrist tables. Fixed so that every board in the process
/// (and every run) hashes identical stone sets identically.
pub const ZOBRIST_SEED: u64 = 0x7473_756d_6567_6f21;

// =============================================================================
// Transposition Table
// =============================================================================

/// Ko treat counts accepted by the transposition table:
/// +1 = black has an external ko treat, -1 = white has one, 0 = neither.
pub const KO_TREATS: RangeInclusive<i8> = -1..=1;

/// Threshold stored in an unsolved record: no ko treat count reaches it.
pub const THRESHOLD_MAX: i8 = 3;

/// Lower counterpart of [`THRESHOLD_MAX`].
pub const THRESHOLD_MIN: i8 = -3;

/// Cell table offset of `(x, y)`.
#[inline]
pub const fn cell(x: usize, y: usize) -> usize {
    y << 4 | x
}
