use crate::ast::{NodeKind, RegexNode, RepeatBound};
use crate::cursor::Cursor;
use crate::error::{ParseError, Result};

const QUANTIFIERS: [char; 4] = ['?', '*', '+', '{'];
const TERM_END: [char; 2] = [')', '|'];
const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// Knobs for [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject `z-a` style ranges and `{n,m}` with `n > m`.
    pub reject_inverted: bool,
    /// How deep groups and stacked quantifiers may nest. Each group and
    /// each quantifier counts as one level.
    pub nest_limit: u32,
}

impl ParseOptions {
    /// Accept inverted ranges and repetition bounds as written.
    pub fn lenient() -> Self {
        Self {
            reject_inverted: false,
            ..Self::default()
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            reject_inverted: true,
            nest_limit: 250,
        }
    }
}

/// Recursive-descent parser for patterns.
///
/// A parser is single use: [`Parser::parse`] consumes it together with its
/// cursor. Every decision looks at most one character ahead and nothing is
/// ever re-read.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    options: ParseOptions,
    depth: u32,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self::with_options(pattern, ParseOptions::default())
    }

    pub fn with_options(pattern: &'a str, options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(pattern),
            options,
            depth: 0,
        }
    }

    /// Entry point for parsing a pattern.
    ///
    /// The root is always an alternation, even for a single branch.
    ///
    /// Example:
    /// - Pattern: `a`   → Alternation([Literal('a')])
    /// - Pattern: `a|b` → Alternation([Literal('a'), Literal('b')])
    pub fn parse(mut self) -> Result<RegexNode> {
        let root = self.parse_union()?;
        // Only a stray ')' can stop the top-level union early.
        if self.cursor.has_next() {
            return Err(ParseError::UnmatchedGroupClose {
                offset: self.cursor.position(),
            });
        }
        Ok(root)
    }

    /// Parse alternation (`|`).
    ///
    /// Example:
    /// - Pattern: `ab|c` → Alternation([Literal('a') -> Literal('b'), Literal('c')])
    fn parse_union(&mut self) -> Result<RegexNode> {
        let mut branches = vec![self.parse_term()?];
        while self.cursor.match_char('|') {
            branches.push(self.parse_term()?);
        }
        Ok(RegexNode::alternation(branches))
    }

    /// Parse a concatenation, linking each element to the one after it.
    ///
    /// Example:
    /// - Pattern: `ab*` → Literal('a') -> Repeat(Literal('b'), 0, inf)
    fn parse_term(&mut self) -> Result<RegexNode> {
        let head = self.parse_repeat()?;
        let mut rest = Vec::new();
        while self.cursor.has_next() && !self.cursor.peek_in(&TERM_END) {
            rest.push(self.parse_repeat()?);
        }
        let tail = rest
            .into_iter()
            .rev()
            .fold(None::<RegexNode>, |next, node| Some(node.followed_by(next)));
        Ok(head.followed_by(tail))
    }

    /// Parse quantifiers after a class or atom. Quantifiers stack, each one
    /// wrapping the result of the previous.
    ///
    /// Example:
    /// - Pattern: `a?`     → Repeat(Literal('a'), 0, 1)
    /// - Pattern: `a{2,}`  → Repeat(Literal('a'), 2, inf)
    /// - Pattern: `a+?`    → Repeat(Repeat(Literal('a'), 1, inf), 0, 1)
    fn parse_repeat(&mut self) -> Result<RegexNode> {
        let mut node = self.parse_character_class()?;
        let mut level = self.depth;
        loop {
            let offset = self.cursor.position();
            let Some(quantifier) = self.cursor.next_in(&QUANTIFIERS) else {
                return Ok(node);
            };
            level += 1;
            self.check_nest(level, offset)?;
            node = match quantifier {
                '?' => RegexNode::repeat(node, 0, RepeatBound::Bounded(1)),
                '*' => RegexNode::repeat(node, 0, RepeatBound::Unbounded),
                '+' => RegexNode::repeat(node, 1, RepeatBound::Unbounded),
                _ => {
                    let (min, max) = self.parse_bounds(offset)?;
                    RegexNode::repeat(node, min, max)
                }
            };
        }
    }

    fn check_nest(&self, level: u32, offset: usize) -> Result<()> {
        if level > self.options.nest_limit {
            return Err(ParseError::NestLimitExceeded {
                offset,
                limit: self.options.nest_limit,
            });
        }
        Ok(())
    }

    /// Parse the inside of `{n}`, `{n,}` or `{n,m}`; the `{` at `offset` is
    /// already consumed.
    fn parse_bounds(&mut self, offset: usize) -> Result<(u32, RepeatBound)> {
        let min = self
            .parse_integer()?
            .ok_or(ParseError::MalformedQuantifier {
                offset: self.cursor.position(),
            })?;
        let max = if self.cursor.match_char(',') {
            match self.parse_integer()? {
                Some(max) => RepeatBound::Bounded(max),
                None => RepeatBound::Unbounded,
            }
        } else {
            RepeatBound::Bounded(min)
        };
        if !self.cursor.match_char('}') {
            return Err(ParseError::MalformedQuantifier {
                offset: self.cursor.position(),
            });
        }
        if let RepeatBound::Bounded(max) = max {
            if self.options.reject_inverted && min > max {
                return Err(ParseError::InvertedRepeat { offset, min, max });
            }
        }
        Ok((min, max))
    }

    /// Parse a run of decimal digits. `None` if there are none.
    fn parse_integer(&mut self) -> Result<Option<u32>> {
        let offset = self.cursor.position();
        let mut value = None;
        while let Some(digit) = self.cursor.next_in(&DIGITS) {
            let digit = digit as u32 - '0' as u32;
            let acc: u32 = value.unwrap_or(0);
            let next = acc
                .checked_mul(10)
                .and_then(|acc| acc.checked_add(digit))
                .ok_or(ParseError::MalformedQuantifier { offset })?;
            value = Some(next);
        }
        Ok(value)
    }

    /// Parse a character class, e.g. `[abc]` or `[^a-z]`, or fall through to
    /// an atom.
    ///
    /// Examples:
    /// - Pattern: `[a-z]`  → Alternation([CharRange('a', 'z')])
    /// - Pattern: `[^ab]`  → Complement(Alternation([Literal('a'), Literal('b')]))
    fn parse_character_class(&mut self) -> Result<RegexNode> {
        let offset = self.cursor.position();
        if !self.cursor.match_char('[') {
            return self.parse_atom();
        }
        let negated = self.cursor.match_char('^');
        let entries = self.parse_character_classes()?;
        if !self.cursor.match_char(']') {
            return Err(ParseError::UnterminatedCharacterClass {
                offset: self.cursor.position(),
            });
        }
        if entries.is_empty() {
            return Err(ParseError::EmptyCharacterClass { offset });
        }
        let class = RegexNode::alternation(entries);
        Ok(if negated {
            RegexNode::complement(class)
        } else {
            class
        })
    }

    /// Parse class entries up to (not including) the closing `]`.
    fn parse_character_classes(&mut self) -> Result<Vec<RegexNode>> {
        let mut entries = Vec::new();
        while self.cursor.has_next() && !self.cursor.peek_in(&[']']) {
            let mut entry = self.parse_character_range()?;
            if entry.next.is_none() {
                if let NodeKind::Alternation(branches) = &mut entry.kind {
                    entries.append(branches);
                    continue;
                }
            }
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Parse a single class entry.
    ///
    /// Examples:
    /// - `a-z` → CharRange('a', 'z')
    /// - `a`   → Literal('a')
    /// - `a-]` → Alternation([Literal('a'), Literal('-')]), the `]` is left for the class
    fn parse_character_range(&mut self) -> Result<RegexNode> {
        let offset = self.cursor.position();
        let start = self.parse_character()?;
        if !self.cursor.match_char('-') {
            return Ok(RegexNode::literal(start));
        }
        if self.cursor.peek_in(&[']']) {
            return Ok(RegexNode::alternation(vec![
                RegexNode::literal(start),
                RegexNode::literal('-'),
            ]));
        }
        let end = self.parse_character()?;
        if self.options.reject_inverted && start > end {
            return Err(ParseError::InvertedRange { offset, start, end });
        }
        Ok(RegexNode::range(start, end))
    }

    /// Parse a single atom: dot, group, empty group or literal.
    ///
    /// Examples:
    /// - Pattern: `.`     → Dot
    /// - Pattern: `()`    → Empty
    /// - Pattern: `(a|b)` → Alternation([Literal('a'), Literal('b')])
    /// - Pattern: `a`     → Literal('a')
    fn parse_atom(&mut self) -> Result<RegexNode> {
        if self.cursor.match_char('.') {
            return Ok(RegexNode::new(NodeKind::Dot));
        }
        let offset = self.cursor.position();
        if !self.cursor.match_char('(') {
            return Ok(RegexNode::literal(self.parse_character()?));
        }
        if self.cursor.match_char(')') {
            return Ok(RegexNode::new(NodeKind::Empty));
        }
        self.depth += 1;
        self.check_nest(self.depth, offset)?;
        let inner = self.parse_union()?;
        self.depth -= 1;
        if !self.cursor.match_char(')') {
            return Err(ParseError::UnterminatedGroup {
                offset: self.cursor.position(),
            });
        }
        Ok(inner)
    }

    /// A backslash is dropped and whatever follows it is taken literally.
    fn parse_character(&mut self) -> Result<char> {
        self.cursor.match_char('\\');
        self.cursor.next_char()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(pattern: &str) -> Result<RegexNode> {
        Parser::new(pattern).parse()
    }

    fn lit(c: char) -> RegexNode {
        RegexNode::literal(c)
    }

    fn root(branches: Vec<RegexNode>) -> RegexNode {
        RegexNode::alternation(branches)
    }

    #[test]
    fn single_literal() {
        assert_eq!(parse("a"), Ok(root(vec![lit('a')])));
    }

    #[test]
    fn concatenation_is_a_chain() {
        let expected = root(vec![lit('a').followed_by(Some(lit('b')))]);
        assert_eq!(parse("ab"), Ok(expected));
    }

    #[test]
    fn chain_attaches_to_repeat_not_its_child() {
        let star = RegexNode::repeat(lit('a'), 0, RepeatBound::Unbounded);
        let expected = root(vec![star.followed_by(Some(lit('b')))]);
        assert_eq!(parse("a*b"), Ok(expected));
    }

    #[test]
    fn stacked_quantifiers_nest() {
        let inner = RegexNode::repeat(lit('a'), 1, RepeatBound::Unbounded);
        let outer = RegexNode::repeat(inner, 0, RepeatBound::Bounded(1));
        assert_eq!(parse("a+?"), Ok(root(vec![outer])));
    }

    #[test]
    fn group_yields_inner_union() {
        let group = root(vec![lit('a'), lit('b')]);
        let expected = root(vec![group.followed_by(Some(lit('c')))]);
        assert_eq!(parse("(a|b)c"), Ok(expected));
    }

    #[test]
    fn empty_group() {
        assert_eq!(parse("()"), Ok(root(vec![RegexNode::new(NodeKind::Empty)])));
    }

    #[test]
    fn escape_takes_next_character_literally() {
        let expected = root(vec![lit('.').followed_by(Some(lit('d')))]);
        assert_eq!(parse(r"\.\d"), Ok(expected));
    }

    #[test]
    fn metacharacters_in_atom_position_are_literals() {
        let expected = root(vec![lit('*').followed_by(Some(lit('a')))]);
        assert_eq!(parse("*a"), Ok(expected));
    }

    #[test]
    fn class_entries_form_an_alternation() {
        let class = root(vec![lit('a'), RegexNode::range('0', '9'), lit('_')]);
        assert_eq!(parse("[a0-9_]"), Ok(root(vec![class])));
    }

    #[test]
    fn trailing_hyphen_is_flattened_into_class() {
        let class = root(vec![lit('x'), lit('a'), lit('-')]);
        assert_eq!(parse("[xa-]"), Ok(root(vec![class])));
    }

    #[test]
    fn escaped_bracket_inside_class() {
        let class = root(vec![lit(']'), lit('a')]);
        assert_eq!(parse(r"[\]a]"), Ok(root(vec![class])));
    }

    #[test]
    fn negated_class() {
        let class = RegexNode::complement(root(vec![lit('a')]));
        assert_eq!(parse("[^a]"), Ok(root(vec![class])));
    }

    #[test]
    fn integer_bounds() {
        let node = RegexNode::repeat(lit('a'), 3, RepeatBound::Bounded(3));
        assert_eq!(parse("a{3}"), Ok(root(vec![node])));

        let node = RegexNode::repeat(lit('a'), 2, RepeatBound::Unbounded);
        assert_eq!(parse("a{2,}"), Ok(root(vec![node])));

        let node = RegexNode::repeat(lit('a'), 0, RepeatBound::Bounded(0));
        assert_eq!(parse("a{0,0}"), Ok(root(vec![node])));
    }

    #[test]
    fn error_offsets() {
        assert_eq!(parse(""), Err(ParseError::UnexpectedEndOfInput { offset: 0 }));
        assert_eq!(parse("a|"), Err(ParseError::UnexpectedEndOfInput { offset: 2 }));
        assert_eq!(parse(r"a\"), Err(ParseError::UnexpectedEndOfInput { offset: 2 }));
        assert_eq!(parse("(a"), Err(ParseError::UnterminatedGroup { offset: 2 }));
        assert_eq!(parse("[a"), Err(ParseError::UnterminatedCharacterClass { offset: 2 }));
        assert_eq!(parse("a{"), Err(ParseError::MalformedQuantifier { offset: 2 }));
        assert_eq!(parse("a{2"), Err(ParseError::MalformedQuantifier { offset: 3 }));
        assert_eq!(parse("a{,2}"), Err(ParseError::MalformedQuantifier { offset: 2 }));
        assert_eq!(parse("a{2,3x"), Err(ParseError::MalformedQuantifier { offset: 5 }));
        assert_eq!(parse("[]"), Err(ParseError::EmptyCharacterClass { offset: 0 }));
        assert_eq!(parse("x[^]"), Err(ParseError::EmptyCharacterClass { offset: 1 }));
        assert_eq!(parse("a)"), Err(ParseError::UnmatchedGroupClose { offset: 1 }));
    }

    #[test]
    fn oversized_bound_is_malformed() {
        assert_eq!(
            parse("a{99999999999}"),
            Err(ParseError::MalformedQuantifier { offset: 2 })
        );
    }

    #[test]
    fn nesting_is_limited() {
        let options = ParseOptions {
            nest_limit: 2,
            ..ParseOptions::default()
        };
        let limited = |pattern: &str| Parser::with_options(pattern, options).parse();

        assert!(limited("((a))").is_ok());
        assert!(limited("(a*)+").is_ok());
        assert_eq!(
            limited("(((a)))"),
            Err(ParseError::NestLimitExceeded { offset: 2, limit: 2 })
        );
        assert_eq!(
            limited("a+?*"),
            Err(ParseError::NestLimitExceeded { offset: 3, limit: 2 })
        );
        assert_eq!(
            limited("((a?*))"),
            Err(ParseError::NestLimitExceeded { offset: 3, limit: 2 })
        );
    }

    #[test]
    fn inverted_input_is_rejected_by_default() {
        assert_eq!(
            parse("[z-a]"),
            Err(ParseError::InvertedRange {
                offset: 1,
                start: 'z',
                end: 'a'
            })
        );
        assert_eq!(
            parse("a{4,2}"),
            Err(ParseError::InvertedRepeat {
                offset: 1,
                min: 4,
                max: 2
            })
        );
    }

    #[test]
    fn lenient_accepts_inverted_input() {
        let lenient = |pattern: &str| Parser::with_options(pattern, ParseOptions::lenient()).parse();

        let class = root(vec![RegexNode::range('z', 'a')]);
        assert_eq!(lenient("[z-a]"), Ok(root(vec![class])));

        let node = RegexNode::repeat(lit('a'), 4, RepeatBound::Bounded(2));
        assert_eq!(lenient("a{4,2}"), Ok(root(vec![node])));
    }
}
