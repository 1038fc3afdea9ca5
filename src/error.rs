use thiserror::Error;

/// Reasons a pattern is rejected by [`compile`](crate::parser::compile).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unterminated character class: missing `]`")]
    UnterminatedCharacterClass,
    #[error("unterminated group: missing `)`")]
    UnterminatedGroup,
    #[error("quantifier has no preceding expression to repeat")]
    DanglingQuantifier,
    #[error("quantified groups are not supported")]
    QuantifiedGroup,
    #[error("backreference \\{0} refers to a group that does not precede it")]
    UnknownGroupReference(usize),
}
