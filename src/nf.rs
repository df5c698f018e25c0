//! Transforms formulas into negation, conjunctive, and disjunctive normal form.
//!
//! CNF and DNF are read off the truth table, so they cost 2^n evaluations for n variables
//! and produce one clause (resp. term) per falsifying (resp. satisfying) assignment.

use crate::{
    error::{ConstructionError, Error},
    formula::{Assignment, Connective, Formula},
    semantics::Analyzer,
};

/// Transforms `formula` into negation normal form (see [Formula::to_nnf]).
pub fn to_nnf(formula: &Formula) -> Formula {
    formula.to_nnf()
}

fn literal(name: &str, positive: bool) -> Result<Formula, ConstructionError> {
    let var = Formula::var(name)?;
    Ok(if positive { var } else { Formula::not(var) })
}

/// Builds the conjunction of literals that is true exactly under `assignment`.
///
/// # Errors
/// Fails if the assignment is empty.
pub fn minterm(assignment: &Assignment) -> Result<Formula, ConstructionError> {
    let literals = assignment
        .iter()
        .map(|(name, value)| literal(name, value))
        .collect::<Result<Vec<_>, _>>()?;
    Formula::and(literals)
}

/// Builds the disjunction of literals that is false exactly under `assignment`.
///
/// # Errors
/// Fails if the assignment is empty.
pub fn maxterm(assignment: &Assignment) -> Result<Formula, ConstructionError> {
    let literals = assignment
        .iter()
        .map(|(name, value)| literal(name, !value))
        .collect::<Result<Vec<_>, _>>()?;
    Formula::or(literals)
}

/// For every variable, builds `v OR NOT(v)` (for [Connective::Or]) or `v AND NOT(v)` (for [Connective::And]).
fn trivial_terms<'a>(
    variables: impl Iterator<Item = &'a String>,
    connective: Connective,
) -> Result<Vec<Formula>, ConstructionError> {
    variables
        .map(|v| {
            let pair = vec![literal(v, true)?, literal(v, false)?];
            match connective {
                Connective::And => Formula::and(pair),
                _ => Formula::or(pair),
            }
        })
        .collect()
}

impl Analyzer {
    /// Transforms `formula` into an equivalent formula in conjunctive normal form.
    /// Each assignment falsifying `formula` contributes the clause that is false exactly under it.
    /// A tautology yields the clauses `v OR NOT(v)`, one per variable.
    ///
    /// # Errors
    /// Fails if `formula` has more variables than the enumeration limit.
    pub fn to_cnf(&self, formula: &Formula) -> Result<Formula, Error> {
        let table = self.truth_table(formula)?;
        let mut clauses = table
            .assignments_with(false)
            .map(maxterm)
            .collect::<Result<Vec<_>, _>>()?;
        if clauses.is_empty() {
            clauses = trivial_terms(table.variables().iter(), Connective::Or)?;
        }
        log::debug!("CNF with {} clauses", clauses.len());
        Ok(Formula::and(clauses)?)
    }

    /// Transforms `formula` into an equivalent formula in disjunctive normal form.
    /// Each assignment satisfying `formula` contributes the term that is true exactly under it.
    /// A fallacy yields the terms `v AND NOT(v)`, one per variable.
    ///
    /// # Errors
    /// Fails if `formula` has more variables than the enumeration limit.
    pub fn to_dnf(&self, formula: &Formula) -> Result<Formula, Error> {
        let table = self.truth_table(formula)?;
        let mut terms = table
            .assignments_with(true)
            .map(minterm)
            .collect::<Result<Vec<_>, _>>()?;
        if terms.is_empty() {
            terms = trivial_terms(table.variables().iter(), Connective::And)?;
        }
        log::debug!("DNF with {} terms", terms.len());
        Ok(Formula::or(terms)?)
    }
}

/// Transforms `formula` into conjunctive normal form with the default options.
pub fn to_cnf(formula: &Formula) -> Result<Formula, Error> {
    Analyzer::default().to_cnf(formula)
}

/// Transforms `formula` into disjunctive normal form with the default options.
pub fn to_dnf(formula: &Formula) -> Result<Formula, Error> {
    Analyzer::default().to_dnf(formula)
}
