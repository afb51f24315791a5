//! Tree rendering of a parsed pattern.
//!
//! One node per line, two spaces per level of nesting. Each alternation
//! branch is introduced by a `branch` line and its chain of nodes follows
//! beneath it, one per line, in match order:
//!
//! ```text
//! alternation
//!   branch
//!     literal 'a'
//!     repeat{0,inf}
//!       literal 'b'
//!   branch
//!     complement
//!       alternation
//!         branch
//!           range '0'-'9'
//! ```

use std::fmt;

use crate::ast::{NodeKind, RegexNode, RepeatBound};

/// Render `node` and its continuation chain as an indented tree.
pub fn render(node: &RegexNode) -> String {
    node.to_string()
}

impl fmt::Display for RegexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_chain(f, self, 0)
    }
}

impl fmt::Display for RepeatBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatBound::Bounded(max) => write!(f, "{max}"),
            RepeatBound::Unbounded => f.write_str("inf"),
        }
    }
}

fn write_chain<W: fmt::Write>(out: &mut W, node: &RegexNode, depth: usize) -> fmt::Result {
    for node in node.chain() {
        write_node(out, node, depth)?;
    }
    Ok(())
}

fn write_node<W: fmt::Write>(out: &mut W, node: &RegexNode, depth: usize) -> fmt::Result {
    indent(out, depth)?;
    match &node.kind {
        NodeKind::Empty => writeln!(out, "empty"),
        NodeKind::Dot => writeln!(out, "dot"),
        NodeKind::Literal(c) => writeln!(out, "literal {c:?}"),
        NodeKind::CharRange { start, end } => writeln!(out, "range {start:?}-{end:?}"),
        NodeKind::Complement(inner) => {
            writeln!(out, "complement")?;
            write_chain(out, inner, depth + 1)
        }
        NodeKind::Alternation(branches) => {
            writeln!(out, "alternation")?;
            for branch in branches {
                indent(out, depth + 1)?;
                writeln!(out, "branch")?;
                write_chain(out, branch, depth + 2)?;
            }
            Ok(())
        }
        NodeKind::Repeat { node, min, max } => {
            writeln!(out, "repeat{{{min},{max}}}")?;
            write_chain(out, node, depth + 1)
        }
    }
}

fn indent<W: fmt::Write>(out: &mut W, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        out.write_str("  ")?;
    }
    Ok(())
}
