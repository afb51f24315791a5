use thiserror::Error;

/// Reasons a pattern fails to parse.
///
/// `offset` is a UTF-8 byte offset into the pattern string where the failure
/// was detected. It is not a character index or a UTF-16 code-unit index;
/// slice the pattern with it (`&pattern[offset..]`) rather than counting
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of pattern at offset {offset}")]
    UnexpectedEndOfInput { offset: usize },

    #[error("character class is missing its closing ']' at offset {offset}")]
    UnterminatedCharacterClass { offset: usize },

    #[error("group is missing its closing ')' at offset {offset}")]
    UnterminatedGroup { offset: usize },

    #[error("malformed repetition quantifier at offset {offset}")]
    MalformedQuantifier { offset: usize },

    #[error("empty character class at offset {offset}")]
    EmptyCharacterClass { offset: usize },

    #[error("unmatched ')' at offset {offset}")]
    UnmatchedGroupClose { offset: usize },

    #[error("pattern nests deeper than {limit} levels at offset {offset}")]
    NestLimitExceeded { offset: usize, limit: u32 },

    #[error("character range {start:?}-{end:?} is out of order at offset {offset}")]
    InvertedRange { offset: usize, start: char, end: char },

    #[error("repetition {{{min},{max}}} has min greater than max at offset {offset}")]
    InvertedRepeat { offset: usize, min: u32, max: u32 },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match *self {
            ParseError::UnexpectedEndOfInput { offset }
            | ParseError::UnterminatedCharacterClass { offset }
            | ParseError::UnterminatedGroup { offset }
            | ParseError::MalformedQuantifier { offset }
            | ParseError::EmptyCharacterClass { offset }
            | ParseError::UnmatchedGroupClose { offset }
            | ParseError::NestLimitExceeded { offset, .. }
            | ParseError::InvertedRange { offset, .. }
            | ParseError::InvertedRepeat { offset, .. } => offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
