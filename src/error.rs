//! Errors raised while building a board.
//!
//! Illegal moves are not errors: [`Board::play`](crate::board::Board::play)
//! reports them with a zero result. The variants below are the structural
//! failures that must stop construction (or play) before any state is
//! corrupted.

use crate::constants::{MAX_BLOCK_ID, MAX_BLOCK_SIZE, MAX_SIZE};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Requested board side is above [`MAX_SIZE`].
    #[error("board {0}x{0} is too big, up to {max}x{max} boards are supported", max = MAX_SIZE)]
    TooBig(usize),

    /// The SGF text could not be parsed.
    #[error("invalid SGF: {0}")]
    Sgf(String),

    /// The SGF root node has no usable `SZ[n]` property.
    #[error("SZ[n] tag must specify the size of the board")]
    MissingSize,

    /// A 1-based variation index that the SGF record does not have.
    #[error("variation {0} does not exist")]
    NoVariation(usize),

    /// A setup stone is off the board, on an occupied cell or a suicide.
    #[error("{0} cannot be added")]
    InvalidStone(String),

    /// Allocating another block would exceed [`MAX_BLOCK_ID`].
    #[error("too many blocks: {0} (at most {max})", max = MAX_BLOCK_ID)]
    TooManyBlocks(usize),

    /// A merge would produce a block above [`MAX_BLOCK_SIZE`] stones.
    #[error("block of {0} stones exceeds the limit of {max}", max = MAX_BLOCK_SIZE)]
    BlockTooLarge(usize),
}

/// Result type for board construction.
pub type Result<T> = std::result::Result<T, BoardError>;
