use std::fmt;

/// A node of the pattern AST.
///
/// Concatenation has no node of its own: `next` points at the node that must
/// match right after this one, so a term like `abc` is the chain
/// `Literal('a') -> Literal('b') -> Literal('c')`.
///
/// Chains can be as long as the pattern, so `Clone`, `PartialEq`, `Debug`
/// and `Drop` walk them with a loop instead of recursing per link.
pub struct RegexNode {
    pub kind: NodeKind,
    pub next: Option<Box<RegexNode>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// `()`, matches without consuming anything.
    Empty,
    Dot,
    Literal(char),
    /// Inclusive on both ends.
    CharRange {
        start: char,
        end: char,
    },
    /// `[^...]`
    Complement(Box<RegexNode>),
    /// Never empty. Used for `|` and for the entries of a character class.
    Alternation(Vec<RegexNode>),
    Repeat {
        node: Box<RegexNode>,
        min: u32,
        max: RepeatBound,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatBound {
    Bounded(u32),
    Unbounded,
}

impl RegexNode {
    /// A node without a continuation.
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, next: None }
    }

    pub fn literal(c: char) -> Self {
        Self::new(NodeKind::Literal(c))
    }

    pub fn range(start: char, end: char) -> Self {
        Self::new(NodeKind::CharRange { start, end })
    }

    pub fn alternation(branches: Vec<RegexNode>) -> Self {
        Self::new(NodeKind::Alternation(branches))
    }

    pub fn complement(inner: RegexNode) -> Self {
        Self::new(NodeKind::Complement(Box::new(inner)))
    }

    pub fn repeat(inner: RegexNode, min: u32, max: RepeatBound) -> Self {
        Self::new(NodeKind::Repeat {
            node: Box::new(inner),
            min,
            max,
        })
    }

    /// Attach `next` as the continuation of this node.
    pub fn followed_by(mut self, next: Option<RegexNode>) -> Self {
        self.next = next.map(Box::new);
        self
    }

    /// Iterate over this node and every node reachable through `next`.
    ///
    /// Example:
    /// - Pattern: `ab` (single branch) → yields `Literal('a')`, then `Literal('b')`
    pub fn chain(&self) -> Chain<'_> {
        Chain { node: Some(self) }
    }

    /// Whether this node, followed by its continuation chain, can match the
    /// empty string.
    pub fn is_nullable(&self) -> bool {
        self.chain().all(|node| node.kind.is_nullable())
    }
}

impl NodeKind {
    /// Nullability of this node alone, ignoring its continuation.
    ///
    /// A complement always consumes exactly one character, like the class it
    /// negates.
    pub fn is_nullable(&self) -> bool {
        match self {
            NodeKind::Empty => true,
            NodeKind::Dot
            | NodeKind::Literal(_)
            | NodeKind::CharRange { .. }
            | NodeKind::Complement(_) => false,
            NodeKind::Alternation(branches) => branches.iter().any(RegexNode::is_nullable),
            NodeKind::Repeat { node, min, .. } => *min == 0 || node.is_nullable(),
        }
    }
}

impl Clone for RegexNode {
    fn clone(&self) -> Self {
        let tail: Vec<NodeKind> = self.chain().skip(1).map(|n| n.kind.clone()).collect();
        let next = tail
            .into_iter()
            .rev()
            .fold(None::<RegexNode>, |next, kind| Some(RegexNode::new(kind).followed_by(next)));
        RegexNode::new(self.kind.clone()).followed_by(next)
    }
}

impl PartialEq for RegexNode {
    fn eq(&self, other: &Self) -> bool {
        self.chain()
            .map(|n| &n.kind)
            .eq(other.chain().map(|n| &n.kind))
    }
}

impl Eq for RegexNode {}

/// Formats as the list of kinds along the chain.
impl fmt::Debug for RegexNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.chain().map(|n| &n.kind)).finish()
    }
}

impl Drop for RegexNode {
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

/// Iterator returned by [`RegexNode::chain`].
pub struct Chain<'a> {
    node: Option<&'a RegexNode>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a RegexNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(node)
    }
}
