//! Canonical text of formulas.
//!
//! The text is what the parser reads, and it is also the identity of a formula:
//! equality and hashing of [Formula]s compare their rendered text.

use std::fmt::Display;

use itertools::Itertools;

use super::{Formula, FormulaKind};

/// An operand of a connective.
/// Variables and negations are written bare, everything else is parenthesized.
struct Operand<'a>(&'a Formula);

impl Display for Operand<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.kind() {
            FormulaKind::Var(_) | FormulaKind::Not(_) => write!(f, "{}", self.0),
            _ => write!(f, "({})", self.0),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            FormulaKind::Var(name) => write!(f, "{}", name),
            FormulaKind::Not(fm) => write!(f, "NOT({})", fm),
            FormulaKind::And(fs) => write!(f, "{}", fs.iter().map(Operand).format(" AND ")),
            FormulaKind::Or(fs) => write!(f, "{}", fs.iter().map(Operand).format(" OR ")),
            FormulaKind::Implies(hyp, concl) => {
                write!(f, "{} IMPLIES {}", Operand(hyp), Operand(concl))
            }
            FormulaKind::Iff(l, r) => write!(f, "{} IFF {}", Operand(l), Operand(r)),
        }
    }
}
