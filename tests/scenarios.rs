use propform::{
    graph::FormulaGraph,
    is_tautology, parse,
    random::{FormulaGenerator, GeneratorConfig},
    to_cnf, to_dnf, Assignment, Connective, Formula, FormulaKind, ParseError,
};

#[test]
fn parse_implication() {
    let f = parse("p IMPLIES q").unwrap();
    match f.kind() {
        FormulaKind::Implies(hyp, concl) => {
            assert_eq!(**hyp, Formula::var("p").unwrap());
            assert_eq!(**concl, Formula::var("q").unwrap());
        }
        other => panic!("expected an implication, got {:?}", other),
    }
    assert_eq!(f.to_string(), "p IMPLIES q");
}

#[test]
fn evaluate_conjunction() {
    let f = parse("c AND d AND NOT(g OR e)").unwrap();
    let a: Assignment = "c=true, d=true, g=false, e=false".parse().unwrap();
    assert!(f.evaluate(&a).unwrap());
}

#[test]
fn cnf_of_repeated_variable() {
    let cnf = to_cnf(&parse("p AND p").unwrap()).unwrap();
    assert_eq!(cnf.connective(), Some(Connective::And));
    assert_eq!(cnf.children().len(), 1);
    assert_eq!(cnf.to_string(), "(p)");
}

#[test]
fn dnf_of_excluded_middle() {
    let dnf = to_dnf(&parse("p OR NOT(p)").unwrap()).unwrap();
    assert_eq!(dnf.connective(), Some(Connective::Or));
    assert_eq!(dnf.children().len(), 2);
    assert!(is_tautology(&dnf).unwrap());
}

#[test]
fn contrapositive_law() {
    let f = parse("(p IMPLIES q) IFF (NOT(q) IMPLIES NOT(p))").unwrap();
    assert!(is_tautology(&f).unwrap());
}

#[test]
fn rejected_inputs() {
    assert_eq!(
        parse("p OR q AND r"),
        Err(ParseError::MixedConnectives(Connective::Or, Connective::And))
    );
    assert_eq!(parse("NOT p"), Err(ParseError::NotWithoutGroup));
    assert!(matches!(parse("()"), Err(ParseError::EmptyGroup(_))));
    assert!(matches!(parse("(p"), Err(ParseError::UnmatchedOpen(_))));
    assert!(matches!(parse("p)"), Err(ParseError::UnmatchedClose(_))));
}

#[test]
fn graph_of_parsed_formula() {
    let f = parse("p IMPLIES NOT(q)").unwrap();
    let a: Assignment = "p=1 q=0".parse().unwrap();
    let graph = FormulaGraph::with_assignment(&f, &a).unwrap();
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.node(graph.root()).unwrap().value, Some(true));
}

#[test]
fn generated_formulas_are_analyzable() {
    let mut generator = FormulaGenerator::new(GeneratorConfig::default(), 2024);
    for _ in 0..20 {
        let f = generator.generate();
        let cnf = to_cnf(&f).unwrap();
        assert!(propform::equivalent(&f, &cnf).unwrap(), "failed on {}", f);
    }
}
