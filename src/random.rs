//! Seeded generation of random formulas and truth assignments.
//!
//! Generation never touches process-wide random state: every generator owns its RNG, so the
//! same seed always yields the same sequence of formulas.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::formula::{Assignment, Formula, FormulaKind};

const DEFAULT_VARIABLES: usize = 5;
const DEFAULT_MAX_DEPTH: usize = 5;
const DEFAULT_MAX_OPERANDS: usize = 4;
const DEFAULT_LEAF_PROBABILITY: f64 = 0.3;

const NAMES: &str = "pqrstuvwxyzabcdefghijklmno";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// The number of distinct variable names to draw from (at least one is always used)
    pub variables: usize,
    /// The maximal nesting depth of connectives
    pub max_depth: usize,
    /// The maximal number of operands of a conjunction or disjunction (at least two)
    pub max_operands: usize,
    /// The probability of stopping at a variable before `max_depth` is reached
    pub leaf_probability: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variables: DEFAULT_VARIABLES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_operands: DEFAULT_MAX_OPERANDS,
            leaf_probability: DEFAULT_LEAF_PROBABILITY,
        }
    }
}

/// The name of the `i`-th generated variable: `p`, `q`, ..., then `x26`, `x27`, ...
fn variable_name(i: usize) -> String {
    NAMES
        .chars()
        .nth(i)
        .map(String::from)
        .unwrap_or_else(|| format!("x{}", i))
}

/// Generates random formulas that the parser accepts.
pub struct FormulaGenerator {
    config: GeneratorConfig,
    names: Vec<String>,
    rng: StdRng,
}

impl FormulaGenerator {
    pub fn new(config: GeneratorConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator drawing from `rng`.
    /// A leaf probability outside `[0, 1]` is clamped; NaN falls back to the default.
    pub fn from_rng(mut config: GeneratorConfig, rng: StdRng) -> Self {
        config.leaf_probability = if config.leaf_probability.is_nan() {
            DEFAULT_LEAF_PROBABILITY
        } else {
            config.leaf_probability.clamp(0.0, 1.0)
        };
        let names = (0..config.variables.max(1)).map(variable_name).collect();
        Self { config, names, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates the next formula.
    pub fn generate(&mut self) -> Formula {
        self.generate_at(self.config.max_depth)
    }

    /// Generates the next formula and returns its text.
    pub fn generate_text(&mut self) -> String {
        self.generate().to_string()
    }

    fn generate_at(&mut self, depth: usize) -> Formula {
        if depth == 0 || self.rng.gen_bool(self.config.leaf_probability) {
            let name = self.names[self.rng.gen_range(0..self.names.len())].clone();
            return Formula::from_kind(FormulaKind::Var(name));
        }
        match self.rng.gen_range(0..5) {
            0 => Formula::not(self.generate_at(depth - 1)),
            1 | 2 => {
                let n = self.rng.gen_range(2..=self.config.max_operands.max(2));
                let operands: Vec<Formula> = (0..n).map(|_| self.generate_at(depth - 1)).collect();
                if self.rng.gen_bool(0.5) {
                    Formula::from_kind(FormulaKind::And(operands))
                } else {
                    Formula::from_kind(FormulaKind::Or(operands))
                }
            }
            3 => {
                let hyp = self.generate_at(depth - 1);
                Formula::implies(hyp, self.generate_at(depth - 1))
            }
            _ => {
                let left = self.generate_at(depth - 1);
                Formula::iff(left, self.generate_at(depth - 1))
            }
        }
    }
}

/// Picks a uniformly random complete assignment of the variables of `formula`.
pub fn random_assignment<R: Rng>(formula: &Formula, rng: &mut R) -> Assignment {
    formula
        .variables()
        .into_iter()
        .map(|name| (name, rng.gen_bool(0.5)))
        .collect()
}
