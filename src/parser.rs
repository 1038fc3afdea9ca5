use std::collections::HashSet;

use crate::ast::{Node, PatternNode, Program, Quantifier};
use crate::error::CompileError;

/// Compile a pattern string into a [`Program`].
///
/// Example:
/// - Pattern: `^a+$` → Program { nodes: [Literal('a')+], anchored_start, anchored_end }
pub fn compile(pattern: &str) -> Result<Program, CompileError> {
    Parser::new(pattern).parse()
}

/// Parser for patterns.
///
/// The `Parser` struct holds the pattern and the current position.
/// It also numbers capturing groups in the order their `(` appears.
pub struct Parser<'a> {
    pattern: &'a str,
    pos: usize,
    group_count: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self {
            pattern,
            pos: 0,
            group_count: 0,
        }
    }

    /// Number of groups opened so far.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// Allocate a new group index for capturing groups.
    fn alloc_group_index(&mut self) -> usize {
        self.group_count += 1;
        self.group_count
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Peek at the character after the next one.
    fn peek_second(&self) -> Option<char> {
        self.pattern[self.pos..].chars().nth(1)
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Entry point: parse the whole pattern as the top-level program.
    pub fn parse(&mut self) -> Result<Program, CompileError> {
        self.parse_program(false)
    }

    /// Parse a node sequence up to the end of the pattern, or for a group
    /// alternative up to the next `|` or `)`.
    ///
    /// Example:
    /// - Pattern: `^cat$` → Program { nodes: [c, a, t], anchored_start, anchored_end }
    /// - Pattern: `a^b`   → Program { nodes: [a, ^, b] }
    fn parse_program(&mut self, in_group: bool) -> Result<Program, CompileError> {
        let mut program = Program::default();
        if self.peek() == Some('^') {
            self.advance();
            program.anchored_start = true;
        }

        while let Some(ch) = self.peek() {
            if in_group && (ch == '|' || ch == ')') {
                break;
            }
            match ch {
                '$' if self.ends_after_next(in_group) => {
                    self.advance();
                    program.anchored_end = true;
                }
                '+' => {
                    self.advance();
                    quantify(&mut program.nodes, Quantifier::OneOrMore)?;
                }
                '?' => {
                    self.advance();
                    quantify(&mut program.nodes, Quantifier::ZeroOrOne)?;
                }
                _ => {
                    self.advance();
                    self.parse_atom(ch, &mut program.nodes)?;
                }
            }
        }
        Ok(program)
    }

    /// Whether the character after the next one closes the current sequence.
    fn ends_after_next(&self, in_group: bool) -> bool {
        match self.peek_second() {
            None => true,
            Some('|') | Some(')') => in_group,
            Some(_) => false,
        }
    }

    /// Parse the atom starting with `ch`, already consumed, and push the
    /// node(s) it produces.
    ///
    /// Examples:
    /// - Pattern: `(a|b)` → Group { alternatives: [[a], [b]], index }
    /// - Pattern: `[abc]` → CharSet { members: {a, b, c}, negated: false }
    /// - Pattern: `\d`    → Digit
    /// - Pattern: `\1`    → BackRef(1)
    /// - Pattern: `\.`    → Literal('\\'), Literal('.')
    /// - Pattern: `.`     → Dot
    fn parse_atom(&mut self, ch: char, nodes: &mut Vec<Node>) -> Result<(), CompileError> {
        let kind = match ch {
            '(' => self.parse_group()?,
            '[' => self.parse_char_set()?,
            '\\' => match self.advance() {
                Some('d') => PatternNode::Digit,
                Some('w') => PatternNode::Word,
                Some(c @ '1'..='9') => {
                    let index = c as usize - '0' as usize;
                    if index > self.group_count {
                        return Err(CompileError::UnknownGroupReference(index));
                    }
                    PatternNode::BackRef(index)
                }
                Some(c) => {
                    nodes.push(Node::new(PatternNode::Literal('\\')));
                    PatternNode::Literal(c)
                }
                None => PatternNode::Literal('\\'),
            },
            '.' => PatternNode::Dot,
            c => PatternNode::Literal(c),
        };
        nodes.push(Node::new(kind));
        Ok(())
    }

    /// Parse the alternatives of a group; the `(` is already consumed.
    fn parse_group(&mut self) -> Result<PatternNode, CompileError> {
        let index = self.alloc_group_index();
        let mut alternatives = Vec::new();
        loop {
            alternatives.push(self.parse_program(true)?);
            match self.advance() {
                Some('|') => continue,
                Some(')') => break,
                _ => return Err(CompileError::UnterminatedGroup),
            }
        }
        Ok(PatternNode::Group {
            alternatives,
            index,
        })
    }

    /// Parse a bracket expression; the `[` is already consumed.
    ///
    /// Examples:
    /// - Pattern: `[abc]`  → CharSet { members: {a, b, c}, negated: false }
    /// - Pattern: `[^xyz]` → CharSet { members: {x, y, z}, negated: true }
    fn parse_char_set(&mut self) -> Result<PatternNode, CompileError> {
        let negated = if self.peek() == Some('^') {
            self.advance();
            true
        } else {
            false
        };
        let mut members = HashSet::new();
        loop {
            match self.advance() {
                Some(']') => break,
                Some(c) => {
                    members.insert(c);
                }
                None => return Err(CompileError::UnterminatedCharacterClass),
            }
        }
        Ok(PatternNode::CharSet { members, negated })
    }
}

/// Attach a quantifier to the last node of the sequence.
fn quantify(nodes: &mut [Node], quantifier: Quantifier) -> Result<(), CompileError> {
    let Some(last) = nodes.last_mut() else {
        return Err(CompileError::DanglingQuantifier);
    };
    if last.quantifier.is_some() {
        return Err(CompileError::DanglingQuantifier);
    }
    if matches!(last.kind, PatternNode::Group { .. }) {
        return Err(CompileError::QuantifiedGroup);
    }
    last.quantifier = Some(quantifier);
    Ok(())
}
