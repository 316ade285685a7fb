//! The incremental board used by the solver.
//!
//! A [`Board`] supports very fast `play` / `undo` pairs on boards up to
//! 16x16 while keeping exact block and liberty bookkeeping and a Zobrist
//! hash of the position.
//!
//! The cell table holds block ids, not colors. When blocks merge, the cell
//! table is left alone and the absorbed blocks are rewritten to forward to
//! the surviving id; when a block is captured its slot becomes
//! [`Slot::Removed`] and its cells keep the stale id. Every id read from the
//! table therefore has to be *lifted* (see [`Board::id_at`]) before it can be
//! trusted.
//!
//! Every change to the block store goes through the history, so `undo`
//! replays it backwards. Undoing a move also records its net effect in a
//! redo cache: replaying the same move at the same depth then skips the
//! capture and merge logic entirely.

use std::collections::HashMap;

use crate::block::{Block, BlockId, Slot};
use crate::constants::{CELLS, MAX_BLOCK_ID, MAX_BLOCK_SIZE, MAX_SIZE, cell};
use crate::error::{BoardError, Result};
use crate::stone::{Color, Stone};
use crate::zobrist::Zobrist;

/// Counters of the two ways a move gets played.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Moves that went through the full capture/merge path.
    pub plays: u64,
    /// Moves replayed from the redo cache.
    pub redos: u64,
}

/// The raw state of a board: hash, cell table and block store.
///
/// Two boards with equal snapshots are indistinguishable to every query,
/// and `play` followed by `undo` must give back the same snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub hash: u64,
    pub cells: Vec<BlockId>,
    pub blocks: Vec<Slot>,
}

/// One applied move.
struct Frame {
    stone: Stone,
    /// Number of [`Change`] records the move pushed.
    changed: usize,
    /// The id the move overwrote in the cell table.
    displaced: BlockId,
    hash_b: u32,
    hash_w: u32,
}

/// A block slot as it was before a move touched it. `prev` is `None` when
/// the move allocated the slot.
struct Change {
    id: BlockId,
    prev: Option<Slot>,
}

#[derive(Default)]
struct History {
    frames: Vec<Frame>,
    changes: Vec<Change>,
}

/// The net effect of an undone move.
struct Redo {
    hash_b: u32,
    hash_w: u32,
    cell: BlockId,
    /// `(id, slot)` pairs in undo order; redo applies them back to front.
    list: Vec<(BlockId, Slot)>,
}

/// Redo entries, valid only at the history depth they were recorded at.
#[derive(Default)]
struct RedoCache {
    depth: Option<usize>,
    entries: HashMap<u16, Redo>,
}

impl RedoCache {
    #[inline]
    fn is_valid_at(&self, depth: usize) -> bool {
        self.depth == Some(depth)
    }

    #[inline]
    fn invalidate(&mut self) {
        if self.depth.take().is_some() {
            self.entries.clear();
        }
    }

    fn record(&mut self, depth: usize, key: u16, redo: Redo) {
        if self.depth != Some(depth) {
            self.entries.clear();
            self.depth = Some(depth);
        }
        self.entries.insert(key, redo);
    }
}

/// x: 4 bits, y: 4 bits, color: 1 bit
#[inline]
fn redo_key(s: &Stone) -> u16 {
    let c = match s.color {
        Color::Black => 0,
        Color::White => 256,
    };
    cell(s.x, s.y) as u16 | c
}

/// A square board with size up to 16x16.
pub struct Board {
    size: usize,
    /// Black stones' half of the hash.
    hash_b: u32,
    /// White stones' half of the hash.
    hash_w: u32,
    /// `blocks[id]` for every id ever allocated. `blocks[0]` is a permanent
    /// `Removed` sentinel so that id 0 lifts to itself.
    blocks: Vec<Slot>,
    /// `table[y << 4 | x]` holds a block id or 0.
    table: [BlockId; CELLS],
    history: History,
    redo: RedoCache,
    stats: Stats,
    zobrist: &'static Zobrist,
}

impl Board {
    /// An empty board.
    ///
    /// # Errors
    ///
    /// [`BoardError::TooBig`] if `size` is above 16.
    pub fn new(size: usize) -> Result<Self> {
        if size > MAX_SIZE {
            return Err(BoardError::TooBig(size));
        }

        Ok(Self {
            size,
            hash_b: 0,
            hash_w: 0,
            blocks: vec![Slot::Removed],
            table: [0; CELLS],
            history: History::default(),
            redo: RedoCache::default(),
            stats: Stats::default(),
            zobrist: Zobrist::global(),
        })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The 64 bit Zobrist hash: white stones in the high half, black
    /// stones in the low half.
    #[inline]
    pub fn hash(&self) -> u64 {
        (self.hash_w as u64) << 32 | self.hash_b as u64
    }

    #[inline]
    pub fn hash_b(&self) -> u32 {
        self.hash_b
    }

    #[inline]
    pub fn hash_w(&self) -> u32 {
        self.hash_w
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Number of moves that can be undone.
    #[inline]
    pub fn depth(&self) -> usize {
        self.history.frames.len()
    }

    #[inline]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size
    }

    /// The descriptor of the block at `(x, y)`, if the cell is occupied.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Block> {
        self.block(self.id_at(x, y))
    }

    /// The descriptor of a live block.
    #[inline]
    pub fn block(&self, id: BlockId) -> Option<Block> {
        self.blocks.get(id as usize).and_then(|s| s.live())
    }

    /// The lifted block id at `(x, y)`, or 0 if the cell is empty or off
    /// the board.
    #[inline]
    pub fn id_at(&self, x: usize, y: usize) -> BlockId {
        if !self.in_bounds(x, y) {
            return 0;
        }
        self.lift(self.table[cell(x, y)])
    }

    /// Follows forwarding slots until a live block or id 0.
    #[inline]
    fn lift(&self, mut id: BlockId) -> BlockId {
        loop {
            match self.blocks[id as usize] {
                Slot::Live(_) => return id,
                Slot::Forward(next) => id = next,
                Slot::Removed => return 0,
            }
        }
    }

    /// Forgets the history of moves and the redo cache. Every cell is
    /// rewritten to its lifted id.
    pub fn drop_history(&mut self) {
        log::trace!("dropping {} moves of history", self.history.frames.len());

        self.history.frames.clear();
        self.history.changes.clear();

        for k in 0..CELLS {
            self.table[k] = self.lift(self.table[k]);
        }

        self.redo.invalidate();
    }

    /// An independent copy of the position, without history.
    pub fn fork(&self) -> Board {
        let mut b = Board {
            size: self.size,
            hash_b: self.hash_b,
            hash_w: self.hash_w,
            blocks: self.blocks.clone(),
            table: self.table,
            history: History::default(),
            redo: RedoCache::default(),
            stats: Stats::default(),
            zobrist: self.zobrist,
        };

        b.drop_history();
        b
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            hash: self.hash(),
            cells: self.table.to_vec(),
            blocks: self.blocks.clone(),
        }
    }

    /// Plays a stone and returns the number of captured stones + 1, or 0 if
    /// the move is off the board, on an occupied cell or a suicide. An
    /// illegal move leaves the board untouched.
    ///
    /// # Panics
    ///
    /// If the move would need a 256th block or a block above 127 stones.
    /// Use [`Board::try_play`] to get these as errors.
    pub fn play(&mut self, stone: Stone) -> usize {
        match self.try_play(stone) {
            Ok(n) => n,
            Err(e) => panic!("{e}"),
        }
    }

    /// Like [`Board::play`], but reports the structural limits as errors.
    /// The board is left untouched when an error is returned.
    pub fn try_play(&mut self, stone: Stone) -> Result<usize> {
        let Stone { x, y, color } = stone;

        if !self.in_bounds(x, y) {
            return Ok(0);
        }

        if self.redo.is_valid_at(self.history.frames.len()) {
            if let Some(n) = self.redo(stone) {
                return Ok(n);
            }
        } else {
            self.redo.invalidate();
        }

        if self.id_at(x, y) != 0 {
            return Ok(0);
        }

        self.stats.plays += 1;

        let size = self.size;
        let hash_b = self.hash_b;
        let hash_w = self.hash_w;
        let n_changed = self.history.changes.len();

        // [L, R, T, B]
        let ids = self.neighbor_ids(x, y);
        let mut nbs = ids.map(|id| self.block(id));
        let on_board = [x > 0, x + 1 < size, y > 0, y + 1 < size];

        let mut captures = false;
        let mut suicide = true;
        let mut merged_size = 1;
        let mut id_new = self.blocks.len();

        for i in 0..4 {
            let Some(b) = nbs[i] else {
                suicide &= !on_board[i];
                continue;
            };

            if b.color() != color {
                captures |= b.libs() == 1;
                continue;
            }

            suicide &= b.libs() == 1;
            id_new = id_new.min(ids[i] as usize);

            if !ids[..i].contains(&ids[i]) {
                merged_size += b.size();
            }
        }

        if suicide && !captures {
            return Ok(0);
        }

        let is_new = id_new == self.blocks.len();

        if is_new && id_new > MAX_BLOCK_ID {
            return Err(BoardError::TooManyBlocks(id_new));
        }

        if merged_size > MAX_BLOCK_SIZE {
            return Err(BoardError::BlockTooLarge(merged_size));
        }

        let id_new = id_new as BlockId;

        // remove captured blocks

        let mut result = 0;

        for i in 0..4 {
            if ids[..i].contains(&ids[i]) {
                continue;
            }

            let Some(b) = nbs[i] else { continue };

            if b.color() != color && b.libs() == 1 {
                self.remove(ids[i]);
                result += b.size();

                // the removed block may have occupied
                // several liberties of the stone
                for j in 0..4 {
                    if ids[j] == ids[i] {
                        nbs[j] = None;
                    }
                }
            }
        }

        // take away a lib of every neighboring enemy block

        self.adjust(x, y, color.opponent(), -1);

        let k = cell(x, y);
        let displaced = self.table[k];

        self.table[k] = id_new;
        self.toggle(color, k);

        if is_new {
            let libs = (0..4).filter(|&i| on_board[i] && nbs[i].is_none()).count();
            self.change(id_new, Slot::Live(Block::new(x, x, y, y, libs, 1, color)));
        } else {
            self.merge(stone, id_new, &ids, &nbs, merged_size);
        }

        self.history.frames.push(Frame {
            stone,
            changed: self.history.changes.len() - n_changed,
            displaced,
            hash_b,
            hash_w,
        });

        Ok(result + 1)
    }

    /// Merges the friendly neighbors of a just placed stone into `id_new`.
    ///
    /// Liberties are recounted from scratch in the bounding rectangle
    /// extended by one cell: merging several blocks can make them share
    /// liberties, so the old counts cannot simply be added up.
    fn merge(
        &mut self,
        stone: Stone,
        id_new: BlockId,
        ids: &[BlockId; 4],
        nbs: &[Option<Block>; 4],
        merged_size: usize,
    ) {
        let Stone { x, y, color } = stone;

        let mut xmin = x;
        let mut xmax = x;
        let mut ymin = y;
        let mut ymax = y;

        for i in 0..4 {
            let Some(b) = nbs[i] else { continue };

            if b.color() != color || ids[..i].contains(&ids[i]) {
                continue;
            }

            xmin = xmin.min(b.xmin());
            xmax = xmax.max(b.xmax());
            ymin = ymin.min(b.ymin());
            ymax = ymax.max(b.ymax());

            if ids[i] != id_new {
                self.change(ids[i], Slot::Forward(id_new));
            }
        }

        let x0 = xmin.saturating_sub(1);
        let y0 = ymin.saturating_sub(1);
        let x1 = (xmax + 1).min(self.size - 1);
        let y1 = (ymax + 1).min(self.size - 1);

        let mut area = [0 as BlockId; CELLS];

        for y in y0..=y1 {
            for x in x0..=x1 {
                area[cell(x, y)] = self.lift(self.table[cell(x, y)]);
            }
        }

        let mut libs = 0;

        for y in y0..=y1 {
            for x in x0..=x1 {
                if area[cell(x, y)] != 0 {
                    continue;
                }

                let is_lib = x > x0 && area[cell(x - 1, y)] == id_new
                    || y > y0 && area[cell(x, y - 1)] == id_new
                    || x < x1 && area[cell(x + 1, y)] == id_new
                    || y < y1 && area[cell(x, y + 1)] == id_new;

                if is_lib {
                    libs += 1;
                }
            }
        }

        let merged = Block::new(xmin, xmax, ymin, ymax, libs, merged_size, color);
        self.change(id_new, Slot::Live(merged));
    }

    /// Reverts the last move and returns it, or `None` if there is nothing
    /// to undo. The returned stone can be given to [`Board::play`] to redo
    /// the move, which is then served by the redo cache.
    pub fn undo(&mut self) -> Option<Stone> {
        let frame = self.history.frames.pop()?;
        let k = cell(frame.stone.x, frame.stone.y);

        let mut next = Redo {
            hash_b: self.hash_b,
            hash_w: self.hash_w,
            cell: self.table[k],
            list: Vec::with_capacity(frame.changed),
        };

        self.table[k] = frame.displaced;
        self.hash_b = frame.hash_b;
        self.hash_w = frame.hash_w;

        let start = self.history.changes.len() - frame.changed;

        for change in self.history.changes.drain(start..).rev() {
            let idx = change.id as usize;

            next.list.push((change.id, self.blocks[idx]));

            match change.prev {
                Some(slot) => self.blocks[idx] = slot,
                None => {
                    // only the last slot can have been allocated by this move
                    debug_assert_eq!(idx + 1, self.blocks.len());
                    self.blocks.pop();
                }
            }
        }

        let depth = self.history.frames.len();
        self.redo.record(depth, redo_key(&frame.stone), next);

        Some(frame.stone)
    }

    /// Replays a move that has been played and undone at this depth.
    fn redo(&mut self, stone: Stone) -> Option<usize> {
        let next = self.redo.entries.get(&redo_key(&stone))?;
        let k = cell(stone.x, stone.y);

        self.stats.redos += 1;

        self.history.frames.push(Frame {
            stone,
            changed: next.list.len(),
            displaced: self.table[k],
            hash_b: self.hash_b,
            hash_w: self.hash_w,
        });

        self.hash_b = next.hash_b;
        self.hash_w = next.hash_w;
        self.table[k] = next.cell;

        let mut result = 0;

        for &(id, slot) in next.list.iter().rev() {
            let idx = id as usize;
            let prev = self.blocks.get(idx).copied();

            if let (Slot::Removed, Some(Slot::Live(b))) = (slot, prev) {
                result += b.size();
            }

            match prev {
                Some(_) => self.blocks[idx] = slot,
                None => self.blocks.push(slot),
            }

            self.history.changes.push(Change { id, prev });
        }

        Some(result + 1)
    }

    /// Lifted ids of the four neighbors in the [L, R, T, B] order.
    fn neighbor_ids(&self, x: usize, y: usize) -> [BlockId; 4] {
        [
            if x > 0 { self.id_at(x - 1, y) } else { 0 },
            self.id_at(x + 1, y),
            if y > 0 { self.id_at(x, y - 1) } else { 0 },
            self.id_at(x, y + 1),
        ]
    }

    /// Adds `delta` to the liberties of every distinct block of `color`
    /// next to `(x, y)`.
    fn adjust(&mut self, x: usize, y: usize, color: Color, delta: i32) {
        let ids = self.neighbor_ids(x, y);

        for (i, &id) in ids.iter().enumerate() {
            if ids[..i].contains(&id) {
                continue;
            }

            if let Some(b) = self.block(id) {
                if b.color() == color {
                    self.change(id, Slot::Live(b.adjust_libs(delta)));
                }
            }
        }
    }

    /// Removes a block from the board and gives its cells back as
    /// liberties to the surrounding blocks.
    fn remove(&mut self, id: BlockId) {
        let Some(b) = self.block(id) else { return };
        let (xmin, xmax, ymin, ymax) = b.dims();

        for y in ymin..=ymax {
            for x in xmin..=xmax {
                if self.id_at(x, y) == id {
                    self.toggle(b.color(), cell(x, y));
                    self.adjust(x, y, b.color().opponent(), 1);
                }
            }
        }

        self.change(id, Slot::Removed);
    }

    /// Changes a slot and records its previous value in the history.
    /// Changing the slot right past the end allocates it.
    fn change(&mut self, id: BlockId, slot: Slot) {
        let idx = id as usize;

        let prev = if idx < self.blocks.len() {
            Some(std::mem::replace(&mut self.blocks[idx], slot))
        } else {
            debug_assert_eq!(idx, self.blocks.len());
            self.blocks.push(slot);
            None
        };

        self.history.changes.push(Change { id, prev });
    }

    #[inline]
    fn toggle(&mut self, color: Color, k: usize) {
        let key = self.zobrist.key(color, k);
        match color {
            Color::Black => self.hash_b ^= key,
            Color::White => self.hash_w ^= key,
        }
    }

    /// In-bounds orthogonal neighbors in the [L, R, T, B] order.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        [
            (x.wrapping_sub(1), y),
            (x + 1, y),
            (x, y.wrapping_sub(1)),
            (x, y + 1),
        ]
        .into_iter()
        .filter(move |&(x, y)| self.in_bounds(x, y))
    }

    /// Whether `(x, y)` is an empty cell next to block `id`.
    pub fn is_liberty_of(&self, x: usize, y: usize, id: BlockId) -> bool {
        id != 0
            && self.in_bounds(x, y)
            && self.id_at(x, y) == 0
            && self.neighbors(x, y).any(|(nx, ny)| self.id_at(nx, ny) == id)
    }

    /// The moves played since the board was built, forked or had its
    /// history dropped.
    pub fn moves(&self) -> impl Iterator<Item = Stone> + '_ {
        self.history.frames.iter().map(|f| f.stone)
    }

    /// Descriptors of the blocks captured by the last move.
    pub fn removed_blocks(&self) -> Vec<Block> {
        let Some(frame) = self.history.frames.last() else {
            return Vec::new();
        };

        let changes = &self.history.changes[self.history.changes.len() - frame.changed..];

        changes
            .iter()
            .filter(|c| self.blocks[c.id as usize] == Slot::Removed)
            .filter_map(|c| c.prev.and_then(Slot::live))
            .collect()
    }

    fn live_blocks(&self, color: Color) -> impl Iterator<Item = Block> + '_ {
        self.blocks
            .iter()
            .filter_map(|s| s.live())
            .filter(move |b| b.color() == color)
    }

    /// The bounding rectangle of all the stones of a color.
    pub fn rect(&self, color: Color) -> Option<Block> {
        self.live_blocks(color).reduce(Block::join)
    }

    pub fn nblocks(&self, color: Color) -> usize {
        self.live_blocks(color).count()
    }

    pub fn nstones(&self, color: Color) -> usize {
        self.live_blocks(color).map(|b| b.size()).sum()
    }

    pub fn sumlibs(&self, color: Color) -> usize {
        self.live_blocks(color).map(|b| b.libs()).sum()
    }

    /// Number of blocks in atari (exactly one liberty).
    pub fn natari(&self, color: Color) -> usize {
        self.live_blocks(color).filter(|b| b.libs() == 1).count()
    }
}
