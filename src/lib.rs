//! Propositional logic formulas: parsing, evaluation, semantic queries, and normal forms.

mod error;
mod formula;
mod options;
mod parse;

pub mod graph;
pub mod nf;
pub mod random;
pub mod semantics;

pub use error::{ConstructionError, Error, ErrorRepr, EvaluationError, ParseError};
pub use formula::{Assignment, AssignmentError, Connective, Formula, FormulaKind};
pub use nf::{maxterm, minterm, to_cnf, to_dnf, to_nnf};
pub use options::Options;
pub use parse::{parse, MAX_NESTING};
pub use semantics::{
    equivalent, implies, is_fallacy, is_satisfiable, is_tautology, truth_table, Analyzer,
    TruthTable,
};
