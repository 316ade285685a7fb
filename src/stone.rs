//! Stones, colors and moves.
//!
//! Black is the "positive" color and white the "negative" one: block
//! descriptors, ko treat counts and the transposition table all use this
//! sign convention.
//!
//! Coordinates are written the SGF way, as two letters (column, then row)
//! where `a` is 0: a black stone at x = 2, y = 3 is `B[cd]`.

use std::fmt;
use std::str::FromStr;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// `+1` for black, `-1` for white.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// The SGF property letter: `B` or `W`.
    pub fn tag(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }

    fn from_tag(tag: &str) -> Option<Color> {
        match tag {
            "B" => Some(Color::Black),
            "W" => Some(Color::White),
            _ => None,
        }
    }
}

/// A stone of a given color at `(x, y)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stone {
    pub x: usize,
    pub y: usize,
    pub color: Color,
}

impl Stone {
    pub fn new(x: usize, y: usize, color: Color) -> Self {
        Self { x, y, color }
    }

    pub fn black(x: usize, y: usize) -> Self {
        Self::new(x, y, Color::Black)
    }

    pub fn white(x: usize, y: usize) -> Self {
        Self::new(x, y, Color::White)
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}{}]", self.color.tag(), letter(self.x), letter(self.y))
    }
}

/// Error returned when a string is not of the `B[xy]` / `W[xy]` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStoneError(pub String);

impl fmt::Display for ParseStoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid stone: {:?}", self.0)
    }
}

impl std::error::Error for ParseStoneError {}

impl FromStr for Stone {
    type Err = ParseStoneError;

    /// Parses `B[cd]` or `W[cd]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseStoneError(s.to_string());
        let (tag, rest) = s.split_once('[').ok_or_else(err)?;
        let color = Color::from_tag(tag).ok_or_else(err)?;
        let xy = rest.strip_suffix(']').ok_or_else(err)?;
        let (x, y) = parse_point(xy).ok_or_else(err)?;
        Ok(Stone::new(x, y, color))
    }
}

/// The outcome of a solved position: who wins and, optionally, where the
/// winner has to play.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub color: Color,
    pub point: Option<(usize, usize)>,
}

impl Move {
    pub fn at(x: usize, y: usize, color: Color) -> Self {
        Self {
            color,
            point: Some((x, y)),
        }
    }

    /// A move of the given color that carries no coordinates.
    pub fn nocoords(color: Color) -> Self {
        Self { color, point: None }
    }
}

impl From<Stone> for Move {
    fn from(s: Stone) -> Self {
        Move::at(s.x, s.y, s.color)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.point {
            Some((x, y)) => write!(f, "{}", Stone::new(x, y, self.color)),
            None => write!(f, "{}[]", self.color.tag()),
        }
    }
}

/// The SGF letter for a coordinate in `0..26`, `?` past that.
#[inline]
pub fn letter(v: usize) -> char {
    if v < 26 { (b'a' + v as u8) as char } else { '?' }
}

/// Parses a two-letter SGF point such as `cd` into `(2, 3)`.
pub fn parse_point(s: &str) -> Option<(usize, usize)> {
    match s.as_bytes() {
        &[x, y] if x.is_ascii_lowercase() && y.is_ascii_lowercase() => {
            Some(((x - b'a') as usize, (y - b'a') as usize))
        }
        _ => None,
    }
}
