use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("planning graph already created; construct a new planning graph for each new state")]
    InvalidState,

    #[error("encoded state has {found} fluents but the problem defines {expected}")]
    StateLength { expected: usize, found: usize },

    #[error("invalid fluent value {0:?} in encoded state, expected 'T' or 'F'")]
    InvalidStateValue(char),

    #[error("invalid literal: {0:?}")]
    InvalidLiteral(String),

    #[error("unknown problem: {0}")]
    UnknownProblem(String),

    #[error("fluent {0} is listed more than once in the initial state")]
    DuplicateFluent(String),

    #[error("fluent {0} is not part of the initial state")]
    UnknownFluent(String),
}
