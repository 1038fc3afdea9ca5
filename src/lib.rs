pub mod ast;
pub mod error;
pub mod input;
pub mod matcher;
pub mod parser;

use std::str::FromStr;

pub use ast::Program;
pub use error::CompileError;
pub use matcher::MatchResult;

/// A compiled pattern that can be matched against any number of lines.
#[derive(Debug, Clone)]
pub struct Regex {
    pattern: String,
    program: Program,
    group_count: usize,
}

impl Regex {
    pub fn new(pattern: &str) -> Result<Self, CompileError> {
        let mut parser = parser::Parser::new(pattern);
        let program = parser.parse()?;
        Ok(Self {
            pattern: pattern.to_owned(),
            program,
            group_count: parser.group_count(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Number of capturing groups in the pattern.
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn is_match(&self, line: &[u8]) -> bool {
        self.find(line).found
    }

    /// Leftmost match in `line`.
    pub fn find(&self, line: &[u8]) -> MatchResult {
        matcher::find(&self.program, line)
    }
}

impl FromStr for Regex {
    type Err = CompileError;

    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        Self::new(pattern)
    }
}

/// Compile `pattern` and report whether it matches anywhere in `line`.
pub fn match_line(line: &[u8], pattern: &str) -> Result<bool, CompileError> {
    Ok(Regex::new(pattern)?.is_match(line))
}
