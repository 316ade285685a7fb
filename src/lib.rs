//! Tsumego-Core: the state-tracking core of a life-and-death solver.
//!
//! This crate provides an incremental Go board built for search: it plays
//! and undoes moves on boards up to 16x16 while maintaining exact block and
//! liberty bookkeeping and a Zobrist hash, plus the transposition table the
//! solver memoizes on.
//!
//! ## Modules
//!
//! - [`board`] - The incremental board: play, undo, redo cache, queries
//! - [`block`] - Block descriptors and block store slots
//! - [`walk`] - Lazy stone, liberty and edge iterators
//! - [`setup`] - Boards from text and SGF, and back
//! - [`tt`] - Transposition table keyed by board hash
//! - [`stone`] - Colors, stones and moves
//! - [`ff256`] - Arithmetic in GF(2^8)
//! - [`sgf`] - A minimal SGF reader
//! - [`zobrist`] - Random tables behind the board hash
//! - [`constants`] - Board limits and fixed parameters
//! - [`error`] - Construction errors
//!
//! ## Example
//!
//! ```
//! use tsumego_core::board::Board;
//! use tsumego_core::stone::{Color, Move, Stone};
//! use tsumego_core::tt::TT;
//!
//! let mut board = Board::new(5).unwrap();
//! board.play(Stone::black(2, 2));
//! for (x, y) in [(2, 1), (1, 2), (3, 2)] {
//!     board.play(Stone::white(x, y));
//! }
//!
//! // the last liberty: one stone captured
//! assert_eq!(board.play(Stone::white(2, 3)), 2);
//! assert_eq!(board.get(2, 2), None);
//!
//! board.undo();
//! assert_eq!(board.get(2, 2).unwrap().libs(), 1);
//!
//! let mut tt = TT::new();
//! tt.set(board.hash(), Color::White, Move::at(2, 3, Color::White), 0);
//! assert_eq!(
//!     tt.get(board.hash(), Color::White, 0),
//!     Some(Move::at(2, 3, Color::White))
//! );
//! ```

pub mod block;
pub mod board;
pub mod constants;
pub mod error;
pub mod ff256;
pub mod setup;
pub mod sgf;
pub mod stone;
pub mod tt;
pub mod walk;
pub mod zobrist;

pub use block::{Block, BlockId, Slot};
pub use board::{Board, Snapshot, Stats};
pub use error::BoardError;
pub use stone::{Color, Move, Stone};
pub use tt::TT;
