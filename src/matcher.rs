use std::ops::Range;

use crate::ast::{Node, PatternNode, Program, Quantifier};

/// Outcome of matching a program against one line.
///
/// Offsets are byte offsets into the line. When `found` is false both
/// offsets are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub found: bool,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Captures recorded along the current backtracking path, as byte ranges
/// of the line.
///
/// Recording a capture returns a new state, so a choice point that is
/// abandoned takes its captures with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchState {
    captures: Vec<Option<Range<usize>>>,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Byte range captured by group `index`, if it has matched.
    pub fn capture(&self, index: usize) -> Option<Range<usize>> {
        self.captures.get(index).cloned().flatten()
    }

    pub fn with_capture(&self, index: usize, range: Range<usize>) -> Self {
        let mut captures = self.captures.clone();
        if captures.len() <= index {
            captures.resize(index + 1, None);
        }
        captures[index] = Some(range);
        Self { captures }
    }
}

/// Called with the input position and captures reached after a prefix of
/// the program matched. Returns the end position of the whole match, if the
/// rest of the search succeeds from there.
type Continuation<'k> = dyn FnMut(usize, &MatchState) -> Option<usize> + 'k;

/// Search `line` for the leftmost match of `program`.
pub fn find(program: &Program, line: &[u8]) -> MatchResult {
    Matcher::new(line).find(program)
}

/// Backtracking matcher over one line.
///
/// The line is split into units: each valid UTF-8 character is one unit,
/// and each byte that is not part of a valid sequence is a unit of its own
/// (`None`). Positions during the search are unit indices.
pub struct Matcher<'a> {
    line: &'a [u8],
    units: Vec<Option<char>>,
    /// Byte offset of every unit boundary; `bounds[i]` is where unit `i`
    /// starts and `bounds[units.len()] == line.len()`.
    bounds: Vec<usize>,
}

impl<'a> Matcher<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        let mut units = Vec::with_capacity(line.len());
        let mut bounds = Vec::with_capacity(line.len() + 1);
        bounds.push(0);
        let mut offset = 0;
        for chunk in line.utf8_chunks() {
            for c in chunk.valid().chars() {
                offset += c.len_utf8();
                units.push(Some(c));
                bounds.push(offset);
            }
            for _ in chunk.invalid() {
                offset += 1;
                units.push(None);
                bounds.push(offset);
            }
        }
        Self {
            line,
            units,
            bounds,
        }
    }

    /// Try every permitted starting position in order; the first that
    /// completes the program wins.
    pub fn find(&self, program: &Program) -> MatchResult {
        let last_start = if program.anchored_start {
            0
        } else {
            self.units.len()
        };
        for start in 0..=last_start {
            if let Some(end) = self.match_at(program, start) {
                return MatchResult {
                    found: true,
                    start_offset: self.bounds[start],
                    end_offset: self.bounds[end],
                };
            }
        }
        MatchResult::default()
    }

    /// Match `program` starting exactly at unit `start`, returning the end unit.
    pub fn match_at(&self, program: &Program, start: usize) -> Option<usize> {
        if start > self.units.len() {
            return None;
        }
        let len = self.units.len();
        self.match_nodes(&program.nodes, start, &MatchState::new(), &mut |end, _| {
            (!program.anchored_end || end == len).then_some(end)
        })
    }

    /// Match `nodes` at `pos`, handing every way the sequence can complete to `k`
    /// until one of them succeeds.
    fn match_nodes(
        &self,
        nodes: &[Node],
        pos: usize,
        state: &MatchState,
        k: &mut Continuation<'_>,
    ) -> Option<usize> {
        let Some((node, rest)) = nodes.split_first() else {
            return k(pos, state);
        };
        match node.quantifier {
            None => self.match_once(&node.kind, pos, state, &mut |next, state| {
                self.match_nodes(rest, next, state, &mut *k)
            }),
            Some(Quantifier::ZeroOrOne) => {
                let once = self.match_once(&node.kind, pos, state, &mut |next, state| {
                    self.match_nodes(rest, next, state, &mut *k)
                });
                once.or_else(|| self.match_nodes(rest, pos, state, k))
            }
            Some(Quantifier::OneOrMore) => self.match_repeat(&node.kind, rest, pos, state, k),
        }
    }

    /// One or more occurrences of `kind`, longest run first, then giving
    /// back one occurrence at a time.
    fn match_repeat(
        &self,
        kind: &PatternNode,
        rest: &[Node],
        pos: usize,
        state: &MatchState,
        k: &mut Continuation<'_>,
    ) -> Option<usize> {
        self.match_once(kind, pos, state, &mut |next, state| {
            // A zero-width occurrence would repeat forever.
            if next > pos {
                if let Some(end) = self.match_repeat(kind, rest, next, state, &mut *k) {
                    return Some(end);
                }
            }
            self.match_nodes(rest, next, state, &mut *k)
        })
    }

    /// Exactly one occurrence of `kind` at `pos`.
    fn match_once(
        &self,
        kind: &PatternNode,
        pos: usize,
        state: &MatchState,
        k: &mut Continuation<'_>,
    ) -> Option<usize> {
        match kind {
            PatternNode::Group {
                alternatives,
                index,
            } => alternatives.iter().find_map(|alternative| {
                if alternative.anchored_start && pos != 0 {
                    return None;
                }
                self.match_nodes(&alternative.nodes, pos, state, &mut |end, state| {
                    if alternative.anchored_end && end != self.units.len() {
                        return None;
                    }
                    let captured = self.bounds[pos]..self.bounds[end];
                    k(end, &state.with_capture(*index, captured))
                })
            }),
            PatternNode::BackRef(index) => {
                let captured = &self.line[state.capture(*index)?];
                let start = self.bounds[pos];
                let upcoming = self.line.get(start..start + captured.len())?;
                if upcoming != captured {
                    return None;
                }
                // The bytes must also end on a unit boundary.
                let next = self.bounds.binary_search(&(start + captured.len())).ok()?;
                k(next, state)
            }
            single => match self.units.get(pos) {
                Some(Some(c)) if single.matches_char(*c) => k(pos + 1, state),
                Some(None) if single.matches_invalid_byte() => k(pos + 1, state),
                _ => None,
            },
        }
    }
}
