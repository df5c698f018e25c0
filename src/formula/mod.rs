//! Representation of propositional formulas.

mod assignment;
mod display;

use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use indexmap::IndexSet;
use quickcheck::{Arbitrary, Gen};

use crate::error::{ConstructionError, EvaluationError};

pub use assignment::{Assignment, AssignmentError};

/// A logical connective.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Connective {
    Not,
    And,
    Or,
    Implies,
    Iff,
}

impl Connective {
    /// The keyword used for this connective in formula text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Connective::Not => "NOT",
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::Implies => "IMPLIES",
            Connective::Iff => "IFF",
        }
    }

    /// Returns the connective whose keyword is exactly `word`, if any.
    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "NOT" => Some(Connective::Not),
            "AND" => Some(Connective::And),
            "OR" => Some(Connective::Or),
            "IMPLIES" => Some(Connective::Implies),
            "IFF" => Some(Connective::Iff),
            _ => None,
        }
    }
}

impl Display for Connective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// The shape of a formula node.
#[derive(Clone, Debug)]
pub enum FormulaKind {
    /// A propositional variable
    Var(String),
    /// A negation
    Not(Box<Formula>),
    /// A conjunction of at least one formula
    And(Vec<Formula>),
    /// A disjunction of at least one formula
    Or(Vec<Formula>),
    /// An implication from the hypothesis (left) to the conclusion (right)
    Implies(Box<Formula>, Box<Formula>),
    /// A biconditional
    Iff(Box<Formula>, Box<Formula>),
}

/// A propositional formula.
/// A formula is inductively defined as follows:
/// - A variable `p` is a formula
/// - If `f` is a formula, then `NOT(f)` is a formula
/// - If `f1, ..., fk` are formulas (k >= 1), then `f1 AND ... AND fk` and `f1 OR ... OR fk` are formulas
/// - If `f` and `g` are formulas, then `f IMPLIES g` and `f IFF g` are formulas
///
/// Formulas are immutable; every transformation returns a new tree.
/// Each node may carry a descriptive label, which never takes part in evaluation, rendering, equality or hashing.
/// Two formulas are equal if and only if their canonical text (see [Display]) is equal.
#[derive(Clone, Debug)]
pub struct Formula {
    kind: FormulaKind,
    label: Option<String>,
}

impl Formula {
    pub(crate) fn from_kind(kind: FormulaKind) -> Self {
        Self { kind, label: None }
    }

    /// Creates a new variable.
    /// Fails if the name is empty or consists only of whitespace.
    pub fn var(name: impl Into<String>) -> Result<Self, ConstructionError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConstructionError::InvalidVariableName(name));
        }
        Ok(Self::from_kind(FormulaKind::Var(name)))
    }

    /// Creates the negation of the given formula.
    /// Unlike [Formula::negate], this always adds a `NOT` node.
    pub fn not(f: Formula) -> Self {
        Self::from_kind(FormulaKind::Not(Box::new(f)))
    }

    /// Creates the conjunction of the given formulas, in the given order.
    /// Fails if `fs` is empty.
    pub fn and(fs: Vec<Formula>) -> Result<Self, ConstructionError> {
        if fs.is_empty() {
            return Err(ConstructionError::EmptyOperands(Connective::And));
        }
        Ok(Self::from_kind(FormulaKind::And(fs)))
    }

    /// Creates the disjunction of the given formulas, in the given order.
    /// Fails if `fs` is empty.
    pub fn or(fs: Vec<Formula>) -> Result<Self, ConstructionError> {
        if fs.is_empty() {
            return Err(ConstructionError::EmptyOperands(Connective::Or));
        }
        Ok(Self::from_kind(FormulaKind::Or(fs)))
    }

    /// Creates the implication `hyp IMPLIES concl`.
    pub fn implies(hyp: Formula, concl: Formula) -> Self {
        Self::from_kind(FormulaKind::Implies(Box::new(hyp), Box::new(concl)))
    }

    /// Creates the biconditional `left IFF right`.
    pub fn iff(left: Formula, right: Formula) -> Self {
        Self::from_kind(FormulaKind::Iff(Box::new(left), Box::new(right)))
    }

    /// Attaches a descriptive label to this node.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn kind(&self) -> &FormulaKind {
        &self.kind
    }

    /// The connective at the root of this formula, or `None` for a variable.
    pub fn connective(&self) -> Option<Connective> {
        match &self.kind {
            FormulaKind::Var(_) => None,
            FormulaKind::Not(_) => Some(Connective::Not),
            FormulaKind::And(_) => Some(Connective::And),
            FormulaKind::Or(_) => Some(Connective::Or),
            FormulaKind::Implies(_, _) => Some(Connective::Implies),
            FormulaKind::Iff(_, _) => Some(Connective::Iff),
        }
    }

    /// Returns true if this formula is a variable or the negation of a variable.
    pub fn is_literal(&self) -> bool {
        match &self.kind {
            FormulaKind::Var(_) => true,
            FormulaKind::Not(f) => matches!(f.kind, FormulaKind::Var(_)),
            _ => false,
        }
    }

    /// The direct subformulas of this node, in order.
    pub fn children(&self) -> Vec<&Formula> {
        match &self.kind {
            FormulaKind::Var(_) => vec![],
            FormulaKind::Not(f) => vec![f.as_ref()],
            FormulaKind::And(fs) | FormulaKind::Or(fs) => fs.iter().collect(),
            FormulaKind::Implies(l, r) | FormulaKind::Iff(l, r) => vec![l.as_ref(), r.as_ref()],
        }
    }

    /// Evaluate the formula under the given truth assignment.
    /// Fails if any variable of this formula is not assigned, even if its value would not matter.
    pub fn evaluate(&self, assignment: &Assignment) -> Result<bool, EvaluationError> {
        match &self.kind {
            FormulaKind::Var(name) => assignment
                .get(name)
                .ok_or_else(|| EvaluationError::MissingVariable(name.clone())),
            FormulaKind::Not(f) => f.evaluate(assignment).map(|v| !v),
            FormulaKind::And(fs) => fs
                .iter()
                .try_fold(true, |acc, f| -> Result<bool, EvaluationError> {
                    Ok(f.evaluate(assignment)? && acc)
                }),
            FormulaKind::Or(fs) => fs
                .iter()
                .try_fold(false, |acc, f| -> Result<bool, EvaluationError> {
                    Ok(f.evaluate(assignment)? || acc)
                }),
            FormulaKind::Implies(hyp, concl) => {
                let h = hyp.evaluate(assignment)?;
                let c = concl.evaluate(assignment)?;
                Ok(!h || c)
            }
            FormulaKind::Iff(l, r) => Ok(l.evaluate(assignment)? == r.evaluate(assignment)?),
        }
    }

    /// Returns the names of all variables in this formula, in order of first occurrence.
    pub fn variables(&self) -> IndexSet<String> {
        let mut vars = IndexSet::new();
        let mut stack = vec![self];
        while let Some(f) = stack.pop() {
            match &f.kind {
                FormulaKind::Var(name) => {
                    vars.insert(name.clone());
                }
                _ => stack.extend(f.children().into_iter().rev()),
            }
        }
        vars
    }

    /// Counts the connectives in this formula.
    /// A conjunction or disjunction of `k` operands counts as `k - 1` connectives.
    pub fn connective_count(&self) -> usize {
        match &self.kind {
            FormulaKind::Var(_) => 0,
            FormulaKind::Not(f) => f.connective_count() + 1,
            FormulaKind::And(fs) | FormulaKind::Or(fs) => {
                fs.len() - 1 + fs.iter().map(Self::connective_count).sum::<usize>()
            }
            FormulaKind::Implies(l, r) | FormulaKind::Iff(l, r) => {
                l.connective_count() + r.connective_count() + 1
            }
        }
    }

    /// The nesting depth of connectives; a variable has depth 0.
    pub fn depth(&self) -> usize {
        self.children()
            .into_iter()
            .map(|f| f.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns a formula equivalent to the negation of this formula.
    /// The rewrite only touches the root:
    /// - `p` becomes `NOT(p)`
    /// - `NOT(f)` becomes `f`
    /// - conjunctions and disjunctions are dualized by De Morgan's laws, negating each operand
    /// - `h IMPLIES c` becomes `h AND negate(c)`
    /// - `a IFF b` becomes `(a AND negate(b)) OR (negate(a) AND b)`
    ///
    /// Use [Formula::to_nnf] on the result to push negations down to the variables.
    pub fn negate(&self) -> Formula {
        match &self.kind {
            FormulaKind::Var(_) => Formula::not(self.clone()),
            FormulaKind::Not(f) => f.as_ref().clone(),
            FormulaKind::And(fs) => {
                Self::from_kind(FormulaKind::Or(fs.iter().map(Self::negate).collect()))
            }
            FormulaKind::Or(fs) => {
                Self::from_kind(FormulaKind::And(fs.iter().map(Self::negate).collect()))
            }
            FormulaKind::Implies(hyp, concl) => Self::from_kind(FormulaKind::And(vec![
                hyp.as_ref().clone(),
                concl.negate(),
            ])),
            FormulaKind::Iff(l, r) => {
                let left = Self::from_kind(FormulaKind::And(vec![l.as_ref().clone(), r.negate()]));
                let right = Self::from_kind(FormulaKind::And(vec![l.negate(), r.as_ref().clone()]));
                Self::from_kind(FormulaKind::Or(vec![left, right]))
            }
        }
    }

    /// Returns the number of directly nested negations at the root and the first formula below them.
    fn strip_negations(&self) -> (usize, &Formula) {
        let mut count = 0;
        let mut current = self;
        while let FormulaKind::Not(f) = &current.kind {
            count += 1;
            current = f.as_ref();
        }
        (count, current)
    }

    /// Transforms this formula into negation normal form, i.e., negation is only applied to variables.
    /// Implications and biconditionals are kept; only negations are pushed down.
    pub fn to_nnf(&self) -> Formula {
        match &self.kind {
            FormulaKind::Var(_) => self.clone(),
            FormulaKind::Not(_) => {
                let (count, inner) = self.strip_negations();
                if count % 2 == 0 {
                    return inner.to_nnf();
                }
                match &inner.kind {
                    FormulaKind::Var(_) | FormulaKind::Not(_) => Formula::not(inner.clone()),
                    FormulaKind::And(fs) => Self::from_kind(FormulaKind::Or(
                        fs.iter().map(|f| f.negate().to_nnf()).collect(),
                    )),
                    FormulaKind::Or(fs) => Self::from_kind(FormulaKind::And(
                        fs.iter().map(|f| f.negate().to_nnf()).collect(),
                    )),
                    FormulaKind::Implies(_, _) | FormulaKind::Iff(_, _) => inner.negate().to_nnf(),
                }
            }
            FormulaKind::And(fs) => {
                Self::from_kind(FormulaKind::And(fs.iter().map(Self::to_nnf).collect()))
            }
            FormulaKind::Or(fs) => {
                Self::from_kind(FormulaKind::Or(fs.iter().map(Self::to_nnf).collect()))
            }
            FormulaKind::Implies(hyp, concl) => Formula::implies(hyp.to_nnf(), concl.to_nnf()),
            FormulaKind::Iff(l, r) => Formula::iff(l.to_nnf(), r.to_nnf()),
        }
    }

    /// Returns true if negation is only applied to variables in this formula.
    pub fn is_nnf(&self) -> bool {
        match &self.kind {
            FormulaKind::Var(_) => true,
            FormulaKind::Not(f) => matches!(f.kind, FormulaKind::Var(_)),
            _ => self.children().into_iter().all(Self::is_nnf),
        }
    }

    /// Returns true if this formula is a conjunction of disjunctions of literals.
    /// Single literals and single clauses count as degenerate conjunctions.
    pub fn is_cnf(&self) -> bool {
        let is_clause = |f: &Formula| match &f.kind {
            FormulaKind::Or(ls) => ls.iter().all(Self::is_literal),
            _ => f.is_literal(),
        };
        match &self.kind {
            FormulaKind::And(cs) => cs.iter().all(is_clause),
            _ => is_clause(self),
        }
    }

    /// Returns true if this formula is a disjunction of conjunctions of literals.
    /// Single literals and single terms count as degenerate disjunctions.
    pub fn is_dnf(&self) -> bool {
        let is_term = |f: &Formula| match &f.kind {
            FormulaKind::And(ls) => ls.iter().all(Self::is_literal),
            _ => f.is_literal(),
        };
        match &self.kind {
            FormulaKind::Or(ts) => ts.iter().all(is_term),
            _ => is_term(self),
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}

impl Eq for Formula {}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

/// The variables used by generated formulas, kept small so that truth tables stay cheap.
const ARBITRARY_VARIABLES: [&str; 4] = ["p", "q", "r", "s"];
const ARBITRARY_MAX_DEPTH: usize = 4;
const ARBITRARY_MAX_OPERANDS: usize = 3;

fn arbitrary_formula(g: &mut Gen, depth: usize) -> Formula {
    let pick = |g: &mut Gen, n: usize| usize::arbitrary(g) % n;
    if depth == 0 || pick(g, 3) == 0 {
        let name = ARBITRARY_VARIABLES[pick(g, ARBITRARY_VARIABLES.len())];
        return Formula::from_kind(FormulaKind::Var(name.to_string()));
    }
    let operands = |g: &mut Gen| -> Vec<Formula> {
        let n = 2 + pick(g, ARBITRARY_MAX_OPERANDS - 1);
        (0..n).map(|_| arbitrary_formula(g, depth - 1)).collect()
    };
    match pick(g, 5) {
        0 => Formula::not(arbitrary_formula(g, depth - 1)),
        1 => Formula::from_kind(FormulaKind::And(operands(g))),
        2 => Formula::from_kind(FormulaKind::Or(operands(g))),
        3 => Formula::implies(arbitrary_formula(g, depth - 1), arbitrary_formula(g, depth - 1)),
        _ => Formula::iff(arbitrary_formula(g, depth - 1), arbitrary_formula(g, depth - 1)),
    }
}

impl Arbitrary for Formula {
    fn arbitrary(g: &mut Gen) -> Self {
        let depth = g.size().min(ARBITRARY_MAX_DEPTH);
        arbitrary_formula(g, depth)
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        let children: Vec<Formula> = self.children().into_iter().cloned().collect();
        Box::new(children.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use quickcheck_macros::quickcheck;

    use super::*;

    fn var(name: &str) -> Formula {
        Formula::var(name).unwrap()
    }

    fn assignment(values: &[(&str, bool)]) -> Assignment {
        values.iter().map(|(n, v)| (n.to_string(), *v)).collect()
    }

    #[test]
    fn var_rejects_blank_names() {
        assert_eq!(
            Formula::var("  "),
            Err(ConstructionError::InvalidVariableName("  ".to_string()))
        );
        assert!(Formula::var("").is_err());
    }

    #[test]
    fn and_or_reject_empty_operands() {
        assert_eq!(
            Formula::and(vec![]),
            Err(ConstructionError::EmptyOperands(Connective::And))
        );
        assert_eq!(
            Formula::or(vec![]),
            Err(ConstructionError::EmptyOperands(Connective::Or))
        );
    }

    #[test]
    fn single_operand_conjunction_degenerates() {
        let f = Formula::and(vec![var("p")]).unwrap();
        assert!(f.evaluate(&assignment(&[("p", true)])).unwrap());
        assert!(!f.evaluate(&assignment(&[("p", false)])).unwrap());
        assert_eq!(f.connective_count(), 0);
    }

    #[test]
    fn evaluate_implies() {
        let f = Formula::implies(var("p"), var("q"));
        assert!(f.evaluate(&assignment(&[("p", false), ("q", false)])).unwrap());
        assert!(f.evaluate(&assignment(&[("p", false), ("q", true)])).unwrap());
        assert!(!f.evaluate(&assignment(&[("p", true), ("q", false)])).unwrap());
        assert!(f.evaluate(&assignment(&[("p", true), ("q", true)])).unwrap());
    }

    #[test]
    fn evaluate_iff() {
        let f = Formula::iff(var("p"), var("q"));
        assert!(f.evaluate(&assignment(&[("p", false), ("q", false)])).unwrap());
        assert!(!f.evaluate(&assignment(&[("p", true), ("q", false)])).unwrap());
    }

    #[test]
    fn evaluate_missing_variable() {
        // `q` is irrelevant once `p` is false, but it must still be assigned
        let f = Formula::and(vec![var("p"), var("q")]).unwrap();
        assert_eq!(
            f.evaluate(&assignment(&[("p", false)])),
            Err(EvaluationError::MissingVariable("q".to_string()))
        );
    }

    #[test]
    fn variables_in_order_of_occurrence() {
        let f = Formula::or(vec![
            Formula::not(var("q")),
            Formula::implies(var("p"), var("q")),
            var("r"),
        ])
        .unwrap();
        let vars: Vec<_> = f.variables().into_iter().collect();
        assert_eq!(vars, vec!["q", "p", "r"]);
    }

    #[test]
    fn connective_count() {
        let f = Formula::and(vec![
            var("a"),
            var("b"),
            Formula::not(Formula::or(vec![var("c"), var("d")]).unwrap()),
        ])
        .unwrap();
        // 2 ANDs, 1 NOT, 1 OR
        assert_eq!(f.connective_count(), 4);
        assert_eq!(var("a").connective_count(), 0);
    }

    #[test]
    fn negate_var_and_not() {
        assert_eq!(var("p").negate(), Formula::not(var("p")));
        assert_eq!(Formula::not(var("p")).negate(), var("p"));
    }

    #[test]
    fn negate_de_morgan() {
        let f = Formula::and(vec![var("p"), Formula::not(var("q"))]).unwrap();
        assert_eq!(f.negate().to_string(), "NOT(p) OR q");
        let f = Formula::or(vec![var("p"), var("q")]).unwrap();
        assert_eq!(f.negate().to_string(), "NOT(p) AND NOT(q)");
    }

    #[test]
    fn negate_implies_and_iff() {
        let f = Formula::implies(var("p"), var("q"));
        assert_eq!(f.negate().to_string(), "p AND NOT(q)");
        let f = Formula::iff(var("p"), var("q"));
        assert_eq!(
            f.negate().to_string(),
            "(p AND NOT(q)) OR (NOT(p) AND q)"
        );
    }

    #[test]
    fn negate_is_local() {
        let inner = Formula::or(vec![var("q"), var("r")]).unwrap();
        let f = Formula::implies(var("p"), Formula::not(Formula::not(inner)));
        assert_eq!(f.negate().to_string(), "p AND NOT(q OR r)");
    }

    #[test]
    fn nnf_cancels_even_negations() {
        let f = Formula::not(Formula::not(Formula::not(Formula::not(var("p")))));
        assert_eq!(f.to_nnf(), var("p"));
        let f = Formula::not(Formula::not(Formula::not(var("p"))));
        assert_eq!(f.to_nnf(), Formula::not(var("p")));
    }

    #[test]
    fn nnf_pushes_through_and_or() {
        let f = Formula::not(
            Formula::and(vec![var("p"), Formula::or(vec![var("q"), var("r")]).unwrap()]).unwrap(),
        );
        assert_eq!(f.to_nnf().to_string(), "NOT(p) OR (NOT(q) AND NOT(r))");
    }

    #[test]
    fn nnf_keeps_implies() {
        let f = Formula::implies(Formula::not(Formula::not(var("p"))), var("q"));
        assert_eq!(f.to_nnf().to_string(), "p IMPLIES q");
        let f = Formula::not(Formula::implies(var("p"), var("q")));
        assert_eq!(f.to_nnf().to_string(), "p AND NOT(q)");
    }

    #[test]
    fn nnf_of_negated_iff() {
        let f = Formula::not(Formula::iff(var("p"), Formula::not(var("q"))));
        assert_eq!(f.to_nnf().to_string(), "(p AND q) OR (NOT(p) AND NOT(q))");
        assert!(f.to_nnf().is_nnf());
    }

    #[test]
    fn labels_are_ignored() {
        let a = var("p").with_label("first");
        let b = var("p").with_label("second");
        assert_eq!(a.label(), Some("first"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "p");
    }

    #[test]
    fn equality_is_position_sensitive() {
        let ab = Formula::or(vec![var("a"), var("b")]).unwrap();
        let ba = Formula::or(vec![var("b"), var("a")]).unwrap();
        assert_ne!(ab, ba);
        let ab = Formula::and(vec![var("a"), var("b")]).unwrap();
        let ba = Formula::and(vec![var("b"), var("a")]).unwrap();
        assert_ne!(ab, ba);
    }

    #[test]
    fn normal_form_predicates() {
        let clause = Formula::or(vec![var("p"), Formula::not(var("q"))]).unwrap();
        let cnf = Formula::and(vec![clause.clone(), var("r")]).unwrap();
        assert!(cnf.is_cnf());
        assert!(!cnf.is_dnf());
        assert!(clause.is_cnf());
        assert!(clause.is_dnf());
        assert!(!Formula::implies(var("p"), var("q")).is_cnf());
    }

    #[quickcheck]
    fn nnf_only_negates_variables(f: Formula) -> bool {
        f.to_nnf().is_nnf()
    }

    #[quickcheck]
    fn nnf_preserves_variables(f: Formula) -> bool {
        let mut before: Vec<_> = f.variables().into_iter().collect();
        let mut after: Vec<_> = f.to_nnf().variables().into_iter().collect();
        before.sort();
        after.sort();
        before == after
    }
}
