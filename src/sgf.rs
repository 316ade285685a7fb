//! A minimal SGF reader, enough to load board setups.
//!
//! Only the tree structure and the properties are parsed; nothing is
//! interpreted here. `(;FF[4]SZ[9]AB[aa][bb](;AW[cc])(;AW[dd]))` gives a
//! tree with one node and two variations.

use crate::error::{BoardError, Result};

/// A node: its properties in the order they appear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub props: Vec<(String, Vec<String>)>,
}

impl Node {
    /// The values of a property, if the node has it.
    pub fn get(&self, id: &str) -> Option<&[String]> {
        self.props
            .iter()
            .find(|(name, _)| name == id)
            .map(|(_, values)| values.as_slice())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameTree {
    /// The main sequence; never empty.
    pub nodes: Vec<Node>,
    pub variations: Vec<GameTree>,
}

/// Parses the first game tree of `src`.
pub fn parse(src: &str) -> Result<GameTree> {
    let mut p = Parser { src, pos: 0 };
    p.tree()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn error(&self, msg: &str) -> BoardError {
        BoardError::Sgf(format!("{msg} at offset {}", self.pos))
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn expect(&mut self, c: char) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(x) if x == c => Ok(()),
            _ => Err(self.error(&format!("expected '{c}'"))),
        }
    }

    fn tree(&mut self) -> Result<GameTree> {
        self.expect('(')?;

        let mut nodes = Vec::new();
        let mut variations = Vec::new();

        loop {
            self.skip_ws();
            if self.peek() != Some(';') {
                break;
            }
            self.bump();
            nodes.push(self.node()?);
        }

        if nodes.is_empty() {
            return Err(self.error("game tree without nodes"));
        }

        loop {
            self.skip_ws();
            if self.peek() != Some('(') {
                break;
            }
            variations.push(self.tree()?);
        }

        self.expect(')')?;

        Ok(GameTree { nodes, variations })
    }

    fn node(&mut self) -> Result<Node> {
        let mut node = Node::default();

        loop {
            self.skip_ws();

            let start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_uppercase()) {
                self.bump();
            }

            if start == self.pos {
                return Ok(node);
            }

            let id = self.src[start..self.pos].to_string();
            let mut values = Vec::new();

            loop {
                self.skip_ws();
                if self.peek() != Some('[') {
                    break;
                }
                self.bump();
                values.push(self.value()?);
            }

            if values.is_empty() {
                return Err(self.error(&format!("property {id} without values")));
            }

            node.props.push((id, values));
        }
    }

    fn value(&mut self) -> Result<String> {
        let mut v = String::new();

        loop {
            match self.bump() {
                Some('\\') => {
                    if let Some(c) = self.bump() {
                        v.push(c);
                    }
                }
                Some(']') => return Ok(v),
                Some(c) => v.push(c),
                None => return Err(self.error("unterminated value")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_setup() {
        let t = parse("(;FF[4]SZ[9]AB[aa][bb]AW[cc])").unwrap();
        assert_eq!(t.nodes.len(), 1);
        assert_eq!(t.nodes[0].get("SZ"), Some(&["9".to_string()][..]));
        assert_eq!(t.nodes[0].get("AB").unwrap().len(), 2);
        assert_eq!(t.nodes[0].get("XX"), None);
        assert!(t.variations.is_empty());
    }

    #[test]
    fn test_parse_variations() {
        let t = parse(" ( ;SZ[5] AB[aa]\n (;AW[bb]) (;AW[cc];B[dd]) ) ").unwrap();
        assert_eq!(t.variations.len(), 2);
        assert_eq!(t.variations[1].nodes.len(), 2);
        assert_eq!(t.variations[1].nodes[1].get("B"), Some(&["dd".to_string()][..]));
    }

    #[test]
    fn test_escaped_value() {
        let t = parse(r"(;C[a \] b])").unwrap();
        assert_eq!(t.nodes[0].get("C"), Some(&["a ] b".to_string()][..]));
    }

    #[test]
    fn test_errors() {
        assert!(parse("").is_err());
        assert!(parse("()").is_err());
        assert!(parse("(;SZ[9]").is_err());
        assert!(parse("(;SZ[9").is_err());
        assert!(parse("(;SZ)").is_err());
    }
}
