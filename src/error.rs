use thiserror::Error;

use crate::formula::{AssignmentError, Connective};

/// Errors raised when a formula node cannot be built from the given parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("{0} requires at least one operand")]
    EmptyOperands(Connective),

    #[error("invalid variable name {0:?}")]
    InvalidVariableName(String),
}

/// Errors raised while reading formula text.
/// Positions are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty formula")]
    Empty,

    #[error("unmatched '(' at position {0}")]
    UnmatchedOpen(usize),

    #[error("unmatched ')' at position {0}")]
    UnmatchedClose(usize),

    #[error("parentheses nested too deeply at position {0}")]
    TooDeep(usize),

    #[error("empty parentheses at position {0}")]
    EmptyGroup(usize),

    #[error("NOT must be used with brackets (e.g. \"NOT(p)\" rather than \"NOT p\")")]
    NotWithoutGroup,

    #[error("missing connective between two operands")]
    AdjacentOperands,

    #[error("missing operand between two connectives")]
    AdjacentConnectives,

    #[error("formula cannot begin or end with a connective")]
    DanglingConnective,

    #[error("ambiguous formula: {0} and {1} at the same level need parentheses")]
    MixedConnectives(Connective, Connective),

    #[error("{connective} takes exactly 2 operands, found {operands}")]
    Arity {
        connective: Connective,
        operands: usize,
    },

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// Errors raised while evaluating formulas or enumerating their assignments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("truth assignment missing variable: {0}")]
    MissingVariable(String),

    #[error("formula has {count} variables, the enumeration limit is {limit}")]
    TooManyVariables { count: usize, limit: usize },
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error(#[from] pub ErrorRepr);

#[derive(Debug, Error)]
pub enum ErrorRepr {
    #[error("failed to parse formula: {0}")]
    Parse(ParseError),

    #[error("failed to construct formula: {0}")]
    Construction(ConstructionError),

    #[error("failed to evaluate formula: {0}")]
    Evaluation(EvaluationError),

    #[error("invalid truth assignment: {0}")]
    Assignment(AssignmentError),
}

// Resolve transitive conversion

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error(ErrorRepr::Parse(err))
    }
}

impl From<ConstructionError> for Error {
    fn from(err: ConstructionError) -> Self {
        Error(ErrorRepr::Construction(err))
    }
}

impl From<EvaluationError> for Error {
    fn from(err: EvaluationError) -> Self {
        Error(ErrorRepr::Evaluation(err))
    }
}

impl From<AssignmentError> for Error {
    fn from(err: AssignmentError) -> Self {
        Error(ErrorRepr::Assignment(err))
    }
}
