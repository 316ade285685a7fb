//! Building boards from text and SGF, and writing them back.
//!
//! The text form is a grid of rows where `X` is a black stone, `O` a white
//! stone and anything else an empty cell; whitespace is ignored. The SGF
//! form is a setup record `(;FF[4]SZ[n]AB[..]AW[..])`, optionally with
//! variations that add more setup stones.

use std::fmt::{self, Write};

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::sgf::{self, Node};
use crate::stone::{Color, Stone, letter, parse_point};

/// How [`Board::to_text`] renders a board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TextMode {
    /// Omit the row and column letters.
    pub hide_labels: bool,
    /// Print each stone's block liberty count instead of `X`/`O`.
    pub show_libs: bool,
}

impl Board {
    /// A board set up from text rows, with no history.
    pub fn from_rows<'a>(size: usize, rows: impl IntoIterator<Item = &'a str>) -> Result<Board> {
        let mut board = Board::new(size)?;

        for (y, row) in rows.into_iter().enumerate() {
            let cells = row.chars().filter(|c| !c.is_whitespace());

            for (x, chr) in cells.enumerate() {
                let color = match chr {
                    'X' => Color::Black,
                    'O' => Color::White,
                    _ => continue,
                };

                board.place(Stone::new(x, y, color))?;
            }
        }

        board.drop_history();
        log::debug!(
            "text setup: {size}x{size}, {} black, {} white",
            board.nstones(Color::Black),
            board.nstones(Color::White)
        );

        Ok(board)
    }

    /// Same as [`Board::from_rows`] with the rows taken from the lines of
    /// `text`.
    pub fn from_text(size: usize, text: &str) -> Result<Board> {
        Self::from_rows(size, text.lines())
    }

    /// A board set up from an SGF record. `variation` is 1-based and adds
    /// the setup stones of that variation on top of the root ones.
    pub fn from_sgf(source: &str, variation: Option<usize>) -> Result<Board> {
        let tree = sgf::parse(source)?;
        let root = &tree.nodes[0];

        let size = root
            .get("SZ")
            .and_then(|v| v.first())
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
            .ok_or(BoardError::MissingSize)?;

        let mut board = Board::new(size)?;
        board.place_node(root)?;

        if let Some(n) = variation {
            let var = n
                .checked_sub(1)
                .and_then(|i| tree.variations.get(i))
                .ok_or(BoardError::NoVariation(n))?;

            board.place_node(&var.nodes[0])?;
        }

        board.drop_history();
        log::debug!(
            "SGF setup: {size}x{size}, variation {variation:?}, {} black, {} white",
            board.nstones(Color::Black),
            board.nstones(Color::White)
        );

        Ok(board)
    }

    fn place_node(&mut self, node: &Node) -> Result<()> {
        for (tag, color) in [("AW", Color::White), ("AB", Color::Black)] {
            for xy in node.get(tag).unwrap_or_default() {
                let (x, y) = parse_point(xy)
                    .ok_or_else(|| BoardError::Sgf(format!("invalid point {tag}[{xy}]")))?;

                self.place(Stone::new(x, y, color))?;
            }
        }

        Ok(())
    }

    fn place(&mut self, stone: Stone) -> Result<()> {
        match self.try_play(stone)? {
            0 => Err(BoardError::InvalidStone(stone.to_string())),
            _ => Ok(()),
        }
    }

    /// `(;FF[4]SZ[n]AB[..]AW[..])`, stones listed row by row.
    pub fn to_sgf(&self) -> String {
        let take = |tag: &str, color: Color| {
            let mut list = String::new();

            for y in 0..self.size() {
                for x in 0..self.size() {
                    if self.get(x, y).is_some_and(|b| b.color() == color) {
                        let _ = write!(list, "[{}{}]", letter(x), letter(y));
                    }
                }
            }

            if list.is_empty() { list } else { format!("{tag}{list}") }
        };

        format!(
            "(;FF[4]SZ[{}]{}{})",
            self.size(),
            take("AB", Color::Black),
            take("AW", Color::White)
        )
    }

    /// A grid of `X`, `O` and `-`, cropped to the bottom-right-most stone.
    pub fn to_text(&self, mode: TextMode) -> String {
        let mut xmax = 0;
        let mut ymax = 0;

        for y in 0..self.size() {
            for x in 0..self.size() {
                if self.get(x, y).is_some() {
                    xmax = xmax.max(x);
                    ymax = ymax.max(y);
                }
            }
        }

        let mut s = String::new();

        if !mode.hide_labels {
            s.push(' ');
            for x in 0..=xmax {
                s.push(' ');
                s.push(letter(x));
            }
        }

        for y in 0..=ymax {
            if !s.is_empty() {
                s.push('\n');
            }

            if !mode.hide_labels {
                s.push(letter(y));
            }

            for x in 0..=xmax {
                s.push(' ');

                let b = self.get(x, y);

                if mode.show_libs {
                    let _ = write!(s, "{}", b.map_or(0, |b| b.libs()));
                } else {
                    s.push(match b.map(|b| b.color()) {
                        Some(Color::Black) => 'X',
                        Some(Color::White) => 'O',
                        None => '-',
                    });
                }
            }
        }

        s
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text(TextMode::default()))
    }
}
