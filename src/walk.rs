//! Lazy coordinate sequences over a board.
//!
//! Each call returns a fresh iterator borrowing the board, so the sequences
//! can be restarted at will and never mutate anything. Cells are visited
//! column by column.

use std::ops::Range;

use crate::block::BlockId;
use crate::board::Board;
use crate::stone::{Color, Stone};

/// Which stones [`Board::stones`] lists.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StoneFilter {
    All,
    Color(Color),
    /// Only the stones of one block, looked up by its lifted id.
    Block(BlockId),
}

/// Cells of a rectangle, column by column.
fn rect(xs: Range<usize>, ys: Range<usize>) -> impl Iterator<Item = (usize, usize)> {
    xs.flat_map(move |x| ys.clone().map(move |y| (x, y)))
}

impl Board {
    /// Stones on the board, optionally limited to a color or a block.
    pub fn stones(&self, filter: StoneFilter) -> impl Iterator<Item = Stone> + '_ {
        let (xs, ys) = match filter {
            StoneFilter::Block(id) => match self.block(id) {
                Some(b) => (b.xmin()..b.xmax() + 1, b.ymin()..b.ymax() + 1),
                None => (0..0, 0..0),
            },
            _ => (0..self.size(), 0..self.size()),
        };

        rect(xs, ys).filter_map(move |(x, y)| {
            let id = self.id_at(x, y);
            let b = self.block(id)?;

            let keep = match filter {
                StoneFilter::All => true,
                StoneFilter::Color(c) => b.color() == c,
                StoneFilter::Block(t) => id == t,
            };

            keep.then(|| Stone::new(x, y, b.color()))
        })
    }

    /// All cells adjacent to a block: empty ones and those occupied by the
    /// opponent.
    pub fn edge(&self, id: BlockId) -> impl Iterator<Item = (usize, usize)> + '_ {
        let block = self.block(id);

        let (xs, ys) = match block {
            Some(b) => {
                let n = self.size();
                (
                    b.xmin().saturating_sub(1)..(b.xmax() + 2).min(n),
                    b.ymin().saturating_sub(1)..(b.ymax() + 2).min(n),
                )
            }
            None => (0..0, 0..0),
        };

        rect(xs, ys).filter(move |&(x, y)| {
            let friendly = match (self.get(x, y), block) {
                (Some(c), Some(b)) => c.color() == b.color(),
                _ => false,
            };

            !friendly && self.neighbors(x, y).any(|(nx, ny)| self.id_at(nx, ny) == id)
        })
    }

    /// The liberties of a block.
    pub fn libs(&self, id: BlockId) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edge(id).filter(move |&(x, y)| self.id_at(x, y) == 0)
    }
}
