pub mod ast;
pub mod cursor;
pub mod dump;
pub mod error;
pub mod parser;

pub use ast::{NodeKind, RegexNode, RepeatBound};
pub use error::ParseError;
pub use parser::{ParseOptions, Parser};

/// Parse `pattern` into its AST, rejecting inverted ranges and bounds.
pub fn parse(pattern: &str) -> Result<RegexNode, ParseError> {
    Parser::new(pattern).parse()
}

pub fn parse_with(pattern: &str, options: ParseOptions) -> Result<RegexNode, ParseError> {
    Parser::with_options(pattern, options).parse()
}
