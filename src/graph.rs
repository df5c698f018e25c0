//! Node/edge description of formula trees for visualization.
//!
//! The graph has one node per formula node and one edge per parent-child relation, pointing
//! from the parent to the child. It knows nothing about how it is drawn; [FormulaGraph::to_dot]
//! is a convenience for Graphviz.

use std::fmt::Display;

use petgraph::{
    dot::{Config, Dot},
    graph::{DiGraph, NodeIndex},
    visit::EdgeRef,
    Direction,
};

use crate::{
    error::EvaluationError,
    formula::{Assignment, Formula, FormulaKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// `VAR-<name>` for variables, the connective keyword otherwise
    pub kind: String,
    /// The descriptive label of the formula node, if any
    pub label: Option<String>,
    /// The value of the subformula rooted here, if the graph was built with an assignment
    pub value: Option<bool>,
}

impl Display for GraphNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

fn kind_of(formula: &Formula) -> String {
    match formula.kind() {
        FormulaKind::Var(name) => format!("VAR-{}", name),
        _ => formula
            .connective()
            .map(|c| c.keyword().to_string())
            .unwrap_or_default(),
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// A formula tree as a directed graph.
/// Edge weights are the position of the child among its parent's operands.
#[derive(Debug, Clone)]
pub struct FormulaGraph {
    graph: DiGraph<GraphNode, usize>,
    root: NodeIndex,
}

impl FormulaGraph {
    /// Builds the graph of `formula` without truth values.
    pub fn new(formula: &Formula) -> Self {
        let mut graph = DiGraph::new();
        let (root, _) = Self::insert(&mut graph, formula);
        Self { graph, root }
    }

    /// Builds the graph of `formula` and annotates every node with the value of its subformula under `assignment`.
    ///
    /// # Errors
    /// Fails if `assignment` does not assign every variable of `formula`.
    pub fn with_assignment(
        formula: &Formula,
        assignment: &Assignment,
    ) -> Result<Self, EvaluationError> {
        let mut graph = DiGraph::new();
        let (root, order) = Self::insert(&mut graph, formula);
        let mut result = Self { graph, root };
        // children are inserted after their parents, so reversing visits them first
        for (index, f) in order.into_iter().rev() {
            let operands: Vec<bool> = result
                .children(index)
                .into_iter()
                .filter_map(|c| result.graph[c].value)
                .collect();
            let value = match (f.kind(), operands.as_slice()) {
                (FormulaKind::Var(name), _) => assignment
                    .get(name)
                    .ok_or_else(|| EvaluationError::MissingVariable(name.clone()))?,
                (FormulaKind::Not(_), [v]) => !v,
                (FormulaKind::And(_), vs) => vs.iter().all(|v| *v),
                (FormulaKind::Or(_), vs) => vs.iter().any(|v| *v),
                (FormulaKind::Implies(_, _), [h, c]) => !h || *c,
                (FormulaKind::Iff(_, _), [l, r]) => l == r,
                _ => f.evaluate(assignment)?,
            };
            result.graph[index].value = Some(value);
        }
        Ok(result)
    }

    /// Inserts the tree below `formula` iteratively.
    /// Returns the index of its root node and every inserted node with its subformula, in insertion order.
    fn insert<'a>(
        graph: &mut DiGraph<GraphNode, usize>,
        formula: &'a Formula,
    ) -> (NodeIndex, Vec<(NodeIndex, &'a Formula)>) {
        let mut order = Vec::new();
        let mut stack: Vec<(&Formula, Option<(NodeIndex, usize)>)> = vec![(formula, None)];
        while let Some((f, parent)) = stack.pop() {
            let node = graph.add_node(GraphNode {
                kind: kind_of(f),
                label: f.label().map(str::to_string),
                value: None,
            });
            if let Some((p, position)) = parent {
                graph.add_edge(p, node, position);
            }
            order.push((node, f));
            for (position, child) in f.children().into_iter().enumerate().rev() {
                stack.push((child, Some((node, position))));
            }
        }
        let root = order.first().map_or(NodeIndex::new(0), |(n, _)| *n);
        (root, order)
    }

    pub fn graph(&self) -> &DiGraph<GraphNode, usize> {
        &self.graph
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(index)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// The children of `index`, ordered by operand position.
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut edges: Vec<_> = self
            .graph
            .edges_directed(index, Direction::Outgoing)
            .map(|e| (*e.weight(), e.target()))
            .collect();
        edges.sort();
        edges.into_iter().map(|(_, target)| target).collect()
    }

    /// Renders the graph in Graphviz DOT format.
    /// Nodes evaluating to true are filled green, nodes evaluating to false red.
    pub fn to_dot(&self) -> String {
        format!(
            "{}",
            Dot::with_attr_getters(
                &self.graph,
                &[Config::NodeNoLabel, Config::EdgeNoLabel],
                &|_, _| String::new(),
                &|_, (_, node)| node_attributes(node),
            )
        )
    }
}

fn node_attributes(node: &GraphNode) -> String {
    let mut attrs = format!("label = \"{}\"", escape(&node.kind));
    if let Some(label) = &node.label {
        attrs.push_str(&format!(", xlabel = \"{}\"", escape(label)));
    }
    match node.value {
        Some(true) => attrs.push_str(", style = filled, fillcolor = palegreen"),
        Some(false) => attrs.push_str(", style = filled, fillcolor = lightpink"),
        None => {}
    }
    attrs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;

    #[test]
    fn one_node_per_formula_node() {
        let f = parse("c AND d AND NOT(g OR e)").unwrap();
        let graph = FormulaGraph::new(&f);
        assert_eq!(graph.node_count(), 7);
        assert_eq!(graph.edge_count(), 6);
        let root = graph.node(graph.root()).unwrap();
        assert_eq!(root.kind, "AND");
        assert_eq!(root.value, None);
    }

    #[test]
    fn children_keep_operand_order() {
        let f = parse("p IMPLIES NOT(q)").unwrap();
        let graph = FormulaGraph::new(&f);
        let kinds: Vec<_> = graph
            .children(graph.root())
            .into_iter()
            .map(|c| graph.node(c).unwrap().kind.clone())
            .collect();
        assert_eq!(kinds, vec!["VAR-p", "NOT"]);
    }

    #[test]
    fn values_under_assignment() {
        let f = parse("p IMPLIES NOT(q)").unwrap();
        let a: Assignment = vec![("p", true), ("q", true)].into_iter().collect();
        let graph = FormulaGraph::with_assignment(&f, &a).unwrap();
        assert_eq!(graph.node(graph.root()).unwrap().value, Some(false));
        let children = graph.children(graph.root());
        assert_eq!(graph.node(children[0]).unwrap().value, Some(true));
        assert_eq!(graph.node(children[1]).unwrap().value, Some(false));
    }

    #[test]
    fn missing_variable() {
        let f = parse("p OR q").unwrap();
        let a: Assignment = vec![("p", true)].into_iter().collect();
        assert_eq!(
            FormulaGraph::with_assignment(&f, &a).err(),
            Some(EvaluationError::MissingVariable("q".to_string()))
        );
    }

    #[test]
    fn values_match_evaluation() {
        let f = parse("(p IFF (q OR NOT(r))) IMPLIES (NOT(p AND q) AND r)").unwrap();
        for bits in 0..8u8 {
            let a: Assignment = vec![
                ("p", bits & 1 != 0),
                ("q", bits & 2 != 0),
                ("r", bits & 4 != 0),
            ]
            .into_iter()
            .collect();
            let graph = FormulaGraph::with_assignment(&f, &a).unwrap();
            assert_eq!(
                graph.node(graph.root()).unwrap().value,
                Some(f.evaluate(&a).unwrap())
            );
            assert!(graph.graph().node_weights().all(|n| n.value.is_some()));
        }
    }

    #[test]
    fn labels_are_carried() {
        let f = Formula::not(Formula::var("p").unwrap()).with_label("negated premise");
        let graph = FormulaGraph::new(&f);
        assert_eq!(
            graph.node(graph.root()).unwrap().label.as_deref(),
            Some("negated premise")
        );
    }

    #[test]
    fn dot_output() {
        let f = parse("p AND q").unwrap();
        let a: Assignment = vec![("p", true), ("q", false)].into_iter().collect();
        let dot = FormulaGraph::with_assignment(&f, &a).unwrap().to_dot();
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains("label = \"AND\""));
        assert!(dot.contains("label = \"VAR-q\", style = filled, fillcolor = lightpink"));
        assert!(dot.contains("0 -> 1"));
        assert!(dot.contains("0 -> 2"));
    }
}
