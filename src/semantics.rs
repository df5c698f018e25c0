//! Truth tables and the semantic queries built on them.
//!
//! Every query enumerates all 2^n assignments of the formula's n variables.
//! This is exponential by nature; [Options::max_variables] bounds n.

use std::fmt::Display;

use indexmap::IndexSet;
use itertools::Itertools;

use crate::{
    error::EvaluationError,
    formula::{Assignment, Formula},
    options::Options,
};

/// Iterates over all complete assignments of a set of variables.
/// The first assignment maps every variable to `true`; the last variable alternates fastest.
#[derive(Debug, Clone)]
pub struct Assignments {
    variables: Vec<String>,
    next: u64,
    end: u64,
}

impl Assignments {
    fn new(variables: Vec<String>) -> Self {
        let end = 1u64 << variables.len();
        Self {
            variables,
            next: 0,
            end,
        }
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }
}

impl Iterator for Assignments {
    type Item = Assignment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let row = self.next;
        self.next += 1;
        let n = self.variables.len();
        Some(
            self.variables
                .iter()
                .enumerate()
                .map(|(i, v)| (v.clone(), row & (1 << (n - 1 - i)) == 0))
                .collect(),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Assignments {}

/// A row of a truth table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub assignment: Assignment,
    pub value: bool,
}

/// The truth table of a formula: one row per assignment of its variables, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<String>,
    rows: Vec<Row>,
}

impl TruthTable {
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// The assignments under which the formula evaluates to `value`.
    pub fn assignments_with(&self, value: bool) -> impl Iterator<Item = &Assignment> {
        self.rows
            .iter()
            .filter(move |r| r.value == value)
            .map(|r| &r.assignment)
    }
}

impl Display for TruthTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let widths: Vec<usize> = self.variables.iter().map(|v| v.len().max(1)).collect();
        writeln!(
            f,
            "{} | result",
            self.variables
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{:w$}", v, w = *w))
                .join(" ")
        )?;
        for row in &self.rows {
            let cells = self
                .variables
                .iter()
                .zip(&widths)
                .map(|(v, w)| {
                    let cell = match row.assignment.get(v) {
                        Some(true) => "T",
                        Some(false) => "F",
                        None => "?",
                    };
                    format!("{:w$}", cell, w = *w)
                })
                .join(" ");
            writeln!(f, "{} | {}", cells, if row.value { "T" } else { "F" })?;
        }
        Ok(())
    }
}

/// Answers semantic questions about formulas by exhaustive enumeration.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    options: Options,
}

impl Analyzer {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Enumerates all complete assignments of the given variables.
    ///
    /// # Errors
    /// Fails if there are more variables than [Options::max_variables] allows.
    pub fn assignments_of(
        &self,
        variables: &IndexSet<String>,
    ) -> Result<Assignments, EvaluationError> {
        let count = variables.len();
        // shifting by 64 or more is not representable
        let limit = self.options.max_variables.min(63);
        if count > limit {
            return Err(EvaluationError::TooManyVariables { count, limit });
        }
        if self.options.is_near_limit(count) {
            log::warn!(
                "Enumerating 2^{} assignments (limit is {} variables)",
                count,
                limit
            );
        } else {
            log::debug!("Enumerating 2^{} assignments", count);
        }
        Ok(Assignments::new(variables.iter().cloned().collect()))
    }

    /// Enumerates all complete assignments of the variables of `formula`.
    pub fn assignments(&self, formula: &Formula) -> Result<Assignments, EvaluationError> {
        self.assignments_of(&formula.variables())
    }

    /// Builds the truth table of `formula`.
    pub fn truth_table(&self, formula: &Formula) -> Result<TruthTable, EvaluationError> {
        let assignments = self.assignments(formula)?;
        let variables = assignments.variables().to_vec();
        let rows = assignments
            .map(|assignment| {
                let value = formula.evaluate(&assignment)?;
                Ok(Row { assignment, value })
            })
            .collect::<Result<Vec<_>, EvaluationError>>()?;
        Ok(TruthTable { variables, rows })
    }

    /// Returns true if `formula` evaluates to true under all assignments.
    pub fn is_tautology(&self, formula: &Formula) -> Result<bool, EvaluationError> {
        for a in self.assignments(formula)? {
            if !formula.evaluate(&a)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns true if `formula` evaluates to true under some assignment.
    pub fn is_satisfiable(&self, formula: &Formula) -> Result<bool, EvaluationError> {
        for a in self.assignments(formula)? {
            if formula.evaluate(&a)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Returns true if `formula` evaluates to false under all assignments.
    pub fn is_fallacy(&self, formula: &Formula) -> Result<bool, EvaluationError> {
        Ok(!self.is_satisfiable(formula)?)
    }

    /// Returns true if both formulas evaluate to the same value under every assignment.
    pub fn equivalent(&self, f1: &Formula, f2: &Formula) -> Result<bool, EvaluationError> {
        self.is_tautology(&Formula::iff(f1.clone(), f2.clone()))
    }

    /// Returns true if every assignment satisfying `f1` also satisfies `f2`.
    pub fn implies(&self, f1: &Formula, f2: &Formula) -> Result<bool, EvaluationError> {
        self.is_tautology(&Formula::implies(f1.clone(), f2.clone()))
    }
}

/// Builds the truth table of `formula` with the default options.
pub fn truth_table(formula: &Formula) -> Result<TruthTable, EvaluationError> {
    Analyzer::default().truth_table(formula)
}

pub fn is_tautology(formula: &Formula) -> Result<bool, EvaluationError> {
    Analyzer::default().is_tautology(formula)
}

pub fn is_satisfiable(formula: &Formula) -> Result<bool, EvaluationError> {
    Analyzer::default().is_satisfiable(formula)
}

pub fn is_fallacy(formula: &Formula) -> Result<bool, EvaluationError> {
    Analyzer::default().is_fallacy(formula)
}

/// Checks logical equivalence of two formulas with the default options.
pub fn equivalent(f1: &Formula, f2: &Formula) -> Result<bool, EvaluationError> {
    Analyzer::default().equivalent(f1, f2)
}

/// Checks logical implication between two formulas with the default options.
pub fn implies(f1: &Formula, f2: &Formula) -> Result<bool, EvaluationError> {
    Analyzer::default().implies(f1, f2)
}
