const DEFAULT_MAX_VARIABLES: usize = 20;
const DEFAULT_NEAR_LIMIT_MARGIN: usize = 4;

#[derive(Debug, Clone)]
pub struct Options {
    /// The maximum number of distinct variables a formula may contain before enumerating its truth assignments is refused.
    /// Enumeration visits 2^n assignments, so every query built on the truth table (tautology, satisfiability, equivalence, CNF, DNF) is bounded by this value.
    /// Formulas with at most this many variables behave exactly as without the guard.
    pub max_variables: usize,
    /// A warning is logged when a formula has at least `max_variables - near_limit_margin` variables.
    pub near_limit_margin: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_variables: DEFAULT_MAX_VARIABLES,
            near_limit_margin: DEFAULT_NEAR_LIMIT_MARGIN,
        }
    }
}

impl Options {
    pub fn set_max_variables(&mut self, max: usize) {
        self.max_variables = max;
    }

    /// Returns true if a formula over `count` variables is close to the enumeration limit.
    pub fn is_near_limit(&self, count: usize) -> bool {
        count + self.near_limit_margin >= self.max_variables
    }
}
