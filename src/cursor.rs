use crate::error::{ParseError, Result};

/// Forward-only reader over a pattern.
///
/// The position is a byte offset into the pattern and only ever moves
/// forward, one character at a time.
pub struct Cursor<'a> {
    pattern: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.pattern.len()
    }

    /// Peek at the current character without advancing.
    fn current(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    fn advance(&mut self, ch: char) -> char {
        self.pos += ch.len_utf8();
        ch
    }

    /// Consume and return the current character.
    pub fn next_char(&mut self) -> Result<char> {
        match self.current() {
            Some(ch) => Ok(self.advance(ch)),
            None => Err(ParseError::UnexpectedEndOfInput { offset: self.pos }),
        }
    }

    /// Consume the current character if it is one of `allowed`.
    pub fn next_in(&mut self, allowed: &[char]) -> Option<char> {
        let ch = self.current().filter(|ch| allowed.contains(ch))?;
        Some(self.advance(ch))
    }

    /// Whether the current character is one of `allowed`.
    pub fn peek_in(&self, allowed: &[char]) -> bool {
        self.current().is_some_and(|ch| allowed.contains(&ch))
    }

    /// Consume the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        self.next_in(&[expected]).is_some()
    }
}
