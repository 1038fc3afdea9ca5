use std::collections::HashSet;

/// One compiled unit of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternNode {
    Literal(char),
    /// `.`, any single character.
    Dot,
    Digit,
    Word,
    CharSet {
        members: HashSet<char>,
        negated: bool,
    },
    Group {
        alternatives: Vec<Program>,
        index: usize,
    },
    BackRef(usize),
}

impl PatternNode {
    /// Whether a single-character node accepts `c`. Groups and backreferences
    /// consume a variable amount of input and never match here.
    pub fn matches_char(&self, c: char) -> bool {
        match self {
            PatternNode::Literal(l) => *l == c,
            PatternNode::Dot => true,
            PatternNode::Digit => c.is_ascii_digit(),
            PatternNode::Word => c.is_ascii_alphanumeric(),
            PatternNode::CharSet { members, negated } => members.contains(&c) != *negated,
            PatternNode::Group { .. } | PatternNode::BackRef(_) => false,
        }
    }

    /// Whether a single-character node accepts a byte that is not valid UTF-8.
    /// Only `.` and negated sets do, since such a byte is no set member.
    pub fn matches_invalid_byte(&self) -> bool {
        matches!(
            self,
            PatternNode::Dot | PatternNode::CharSet { negated: true, .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    ZeroOrOne,
    OneOrMore,
}

/// A pattern node together with the quantifier written after it, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: PatternNode,
    pub quantifier: Option<Quantifier>,
}

impl Node {
    pub fn new(kind: PatternNode) -> Self {
        Self {
            kind,
            quantifier: None,
        }
    }
}

/// Ordered node sequence plus the anchors stripped from its ends.
///
/// The top-level pattern and every group alternative compile to a `Program`.
/// A program is never mutated while matching; captures are kept in
/// [`MatchState`](crate::matcher::MatchState).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub nodes: Vec<Node>,
    pub anchored_start: bool,
    pub anchored_end: bool,
}
