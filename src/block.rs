//! Block (group) descriptors and the slots of the block store.
//!
//! A [`Block`] describes one connected group of same-colored stones by its
//! bounding rectangle, its number of liberties, its number of stones and its
//! color. The board keeps one [`Slot`] per block id ever allocated: a slot
//! holds a live descriptor, a forwarding pointer left behind by a merge, or
//! nothing at all once the block has been captured.

use std::fmt;

use crate::constants::{MAX_BLOCK_SIZE, MAX_SIZE};
use crate::stone::{Color, Stone};

/// Index into the block store. Cells of the board hold block ids and id 0
/// means "no block", so real ids start at 1.
pub type BlockId = u8;

/// Descriptor of a group of stones.
///
/// Bounds are inclusive and fit in 4 bits each, liberties in 8 bits and the
/// stone count in 7 bits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    xmin: u8,
    xmax: u8,
    ymin: u8,
    ymax: u8,
    libs: u8,
    size: u8,
    color: Color,
}

impl Block {
    /// # Panics
    ///
    /// If a bound is off a 16x16 board, the bounds are inverted or `size`
    /// is above [`MAX_BLOCK_SIZE`].
    pub fn new(
        xmin: usize,
        xmax: usize,
        ymin: usize,
        ymax: usize,
        libs: usize,
        size: usize,
        color: Color,
    ) -> Self {
        assert!(
            xmin <= xmax && xmax < MAX_SIZE && ymin <= ymax && ymax < MAX_SIZE,
            "block bounds [{xmin}, {xmax}]x[{ymin}, {ymax}] are invalid"
        );
        assert!(size <= MAX_BLOCK_SIZE, "block of {size} stones is too large");
        assert!(libs <= u8::MAX as usize, "block with {libs} liberties");

        Self {
            xmin: xmin as u8,
            xmax: xmax as u8,
            ymin: ymin as u8,
            ymax: ymax as u8,
            libs: libs as u8,
            size: size as u8,
            color,
        }
    }

    /// A 1x1 descriptor covering a single stone. Its liberty and size
    /// fields are zero.
    pub fn just(s: Stone) -> Self {
        Self::new(s.x, s.y, s.x, s.y, 0, 0, s.color)
    }

    #[inline]
    pub fn xmin(&self) -> usize {
        self.xmin as usize
    }

    #[inline]
    pub fn xmax(&self) -> usize {
        self.xmax as usize
    }

    #[inline]
    pub fn ymin(&self) -> usize {
        self.ymin as usize
    }

    #[inline]
    pub fn ymax(&self) -> usize {
        self.ymax as usize
    }

    /// `(xmin, xmax, ymin, ymax)`
    #[inline]
    pub fn dims(&self) -> (usize, usize, usize, usize) {
        (self.xmin(), self.xmax(), self.ymin(), self.ymax())
    }

    #[inline]
    pub fn libs(&self) -> usize {
        self.libs as usize
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Whether `(x, y)` is inside the bounding rectangle.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        (self.xmin()..=self.xmax()).contains(&x) && (self.ymin()..=self.ymax()).contains(&y)
    }

    /// The smallest rectangle covering both blocks. Only the bounds of the
    /// result are meaningful: liberties and size are zero and the color is
    /// taken from `self`.
    pub fn join(self, other: Block) -> Block {
        Block {
            xmin: self.xmin.min(other.xmin),
            xmax: self.xmax.max(other.xmax),
            ymin: self.ymin.min(other.ymin),
            ymax: self.ymax.max(other.ymax),
            libs: 0,
            size: 0,
            color: self.color,
        }
    }

    /// The same block with its liberty count moved by `delta`.
    #[inline]
    pub(crate) fn adjust_libs(self, delta: i32) -> Block {
        let libs = self.libs as i32 + delta;
        debug_assert!((0..=u8::MAX as i32).contains(&libs));
        Block {
            libs: libs as u8,
            ..self
        }
    }
}

impl fmt::Display for Block {
    /// `+[0, 2]x[1, 1] libs=3 size=2`, with `+` for black and `-` for white.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.color {
            Color::Black => '+',
            Color::White => '-',
        };
        write!(
            f,
            "{sign}[{}, {}]x[{}, {}] libs={} size={}",
            self.xmin, self.xmax, self.ymin, self.ymax, self.libs, self.size
        )
    }
}

/// One entry of the block store.
///
/// Slots are never deleted while their id is referenced: a captured block
/// becomes [`Slot::Removed`] and a block absorbed by a merge becomes a
/// [`Slot::Forward`] to the surviving id. Only the last slot is popped, when
/// the move that allocated it is undone.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Removed,
    Live(Block),
    Forward(BlockId),
}

impl Slot {
    #[inline]
    pub fn live(self) -> Option<Block> {
        match self {
            Slot::Live(b) => Some(b),
            _ => None,
        }
    }
}
