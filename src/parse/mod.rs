//! Reads formulas from bracketed infix text.
//!
//! Parsing works in two phases. First, the token stream of each nesting level is split into
//! plain tokens and parenthesized groups, descending recursively into every group. Second, the
//! items of a level are resolved into a single formula. Connectives have no precedence: all
//! connectives at one level must be the same, otherwise the text is rejected as ambiguous.

mod lexer;

use std::str::FromStr;

use crate::{
    error::ParseError,
    formula::{Connective, Formula},
};

use lexer::{tokenize, Spanned, Token};

/// An element of a single nesting level.
#[derive(Debug)]
enum Item {
    /// A variable
    Ident(Formula),
    /// A fully parsed parenthesized group
    Group(Formula),
    /// A `NOT` that still needs its group
    Not,
    /// A binary or n-ary connective
    Connective(Connective),
}

/// Parses a formula from the given text.
///
/// # Errors
/// Returns a [ParseError] if
/// - the text contains no formula, or a pair of parentheses encloses nothing
/// - parentheses are unbalanced
/// - `NOT` is not immediately followed by a parenthesized formula
/// - two operands or two connectives are adjacent, or a level begins or ends with a connective
/// - a level mixes different connectives without parentheses (e.g. `p OR q AND r`)
/// - `IMPLIES` or `IFF` has more or fewer than two operands
/// - parentheses are nested more than [MAX_NESTING] levels deep
pub fn parse(text: &str) -> Result<Formula, ParseError> {
    let tokens = tokenize(text);
    let (formula, consumed) = parse_level(&tokens, 0, None, 0)?;
    debug_assert_eq!(consumed, tokens.len());
    log::debug!("Parsed formula: {}", formula);
    Ok(formula)
}

impl FromStr for Formula {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// The maximal nesting depth of parentheses.
pub const MAX_NESTING: usize = 256;

/// Parses one nesting level starting at token index `start`.
/// `open` is the position of the opening parenthesis of this level, or `None` at the top level.
/// `depth` is the number of enclosing parentheses.
/// Returns the parsed formula and the index of the first token after this level, including its closing parenthesis.
fn parse_level(
    tokens: &[Spanned<'_>],
    start: usize,
    open: Option<usize>,
    depth: usize,
) -> Result<(Formula, usize), ParseError> {
    let mut items = Vec::new();
    let mut cursor = start;
    while cursor < tokens.len() {
        let Spanned { pos, token } = tokens[cursor];
        match token {
            Token::Open => {
                if depth >= MAX_NESTING {
                    return Err(ParseError::TooDeep(pos));
                }
                let (group, next) = parse_level(tokens, cursor + 1, Some(pos), depth + 1)?;
                items.push(Item::Group(group));
                cursor = next;
            }
            Token::Close => match open {
                Some(open) => {
                    let formula = resolve(items, Some(open))?;
                    return Ok((formula, cursor + 1));
                }
                None => return Err(ParseError::UnmatchedClose(pos)),
            },
            Token::Keyword(Connective::Not) => {
                items.push(Item::Not);
                cursor += 1;
            }
            Token::Keyword(c) => {
                items.push(Item::Connective(c));
                cursor += 1;
            }
            Token::Ident(name) => {
                items.push(Item::Ident(Formula::var(name)?));
                cursor += 1;
            }
        }
    }
    match open {
        Some(open) => Err(ParseError::UnmatchedOpen(open)),
        None => Ok((resolve(items, None)?, cursor)),
    }
}

/// Resolves the items of one nesting level into a formula.
fn resolve(items: Vec<Item>, open: Option<usize>) -> Result<Formula, ParseError> {
    log::trace!("Resolving level {:?}", items);
    if items.is_empty() {
        return Err(match open {
            Some(pos) => ParseError::EmptyGroup(pos),
            None => ParseError::Empty,
        });
    }

    let mut operands = Vec::new();
    let mut connective: Option<Connective> = None;
    let mut expect_operand = true;

    let mut items = items.into_iter();
    while let Some(item) = items.next() {
        let operand = match item {
            Item::Ident(f) | Item::Group(f) => f,
            Item::Not => match items.next() {
                Some(Item::Group(f)) => Formula::not(f),
                _ => return Err(ParseError::NotWithoutGroup),
            },
            Item::Connective(c) => {
                if expect_operand {
                    return Err(if operands.is_empty() {
                        ParseError::DanglingConnective
                    } else {
                        ParseError::AdjacentConnectives
                    });
                }
                match connective {
                    Some(prev) if prev != c => return Err(ParseError::MixedConnectives(prev, c)),
                    _ => connective = Some(c),
                }
                expect_operand = true;
                continue;
            }
        };
        if !expect_operand {
            return Err(ParseError::AdjacentOperands);
        }
        operands.push(operand);
        expect_operand = false;
    }
    if expect_operand {
        return Err(ParseError::DanglingConnective);
    }

    match connective {
        None => operands.pop().ok_or(ParseError::Empty),
        Some(Connective::And) => Ok(Formula::and(operands)?),
        Some(Connective::Or) => Ok(Formula::or(operands)?),
        Some(c @ (Connective::Implies | Connective::Iff)) => {
            if operands.len() != 2 {
                return Err(ParseError::Arity {
                    connective: c,
                    operands: operands.len(),
                });
            }
            let mut operands = operands.into_iter();
            match (operands.next(), operands.next()) {
                (Some(l), Some(r)) if c == Connective::Implies => Ok(Formula::implies(l, r)),
                (Some(l), Some(r)) => Ok(Formula::iff(l, r)),
                _ => Err(ParseError::Arity {
                    connective: c,
                    operands: 0,
                }),
            }
        }
        Some(Connective::Not) => Err(ParseError::NotWithoutGroup),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{Assignment, FormulaKind};

    fn var(name: &str) -> Formula {
        Formula::var(name).unwrap()
    }

    #[test]
    fn parse_single_var() {
        assert_eq!(parse("p").unwrap(), var("p"));
        assert_eq!(parse("  ((p))  ").unwrap(), var("p"));
    }

    #[test]
    fn parse_implies() {
        let f = parse("p IMPLIES q").unwrap();
        match f.kind() {
            FormulaKind::Implies(hyp, concl) => {
                assert_eq!(**hyp, var("p"));
                assert_eq!(**concl, var("q"));
            }
            other => panic!("expected implication, got {:?}", other),
        }
        assert_eq!(f.to_string(), "p IMPLIES q");
    }

    #[test]
    fn parse_and_with_not() {
        let f = parse("c AND d AND NOT(g OR e)").unwrap();
        assert_eq!(f.to_string(), "c AND d AND NOT(g OR e)");
        let a: Assignment = vec![("c", true), ("d", true), ("g", false), ("e", false)]
            .into_iter()
            .collect();
        assert!(f.evaluate(&a).unwrap());
    }

    #[test]
    fn parse_keeps_operand_order() {
        let f = parse("p AND NOT(q)").unwrap();
        assert_eq!(f.to_string(), "p AND NOT(q)");
        let f = parse("NOT(q) OR p").unwrap();
        assert_eq!(f.to_string(), "NOT(q) OR p");
    }

    #[test]
    fn parse_groups() {
        let f = parse("c AND (d OR e) AND f AND (g OR h)").unwrap();
        assert_eq!(f.to_string(), "c AND (d OR e) AND f AND (g OR h)");
        assert_eq!(f.children().len(), 4);
    }

    #[test]
    fn parse_nested_groups_are_not_flattened() {
        let f = parse(" (  ( r  )  AND s AND (c OR d OR (e OR f))) AND t AND p AND q").unwrap();
        assert_eq!(
            f.to_string(),
            "(r AND s AND (c OR d OR (e OR f))) AND t AND p AND q"
        );
        assert_eq!(f.children().len(), 4);
        let f = parse("(a AND b) AND c").unwrap();
        assert_eq!(f.children().len(), 2);
    }

    #[test]
    fn parse_binary_with_groups() {
        let f = parse("(p IMPLIES q) IFF (r)").unwrap();
        assert_eq!(f.to_string(), "(p IMPLIES q) IFF r");
        assert_eq!(f.connective(), Some(Connective::Iff));
    }

    #[test]
    fn parse_nested_not() {
        let f = parse("NOT(NOT(p))").unwrap();
        assert_eq!(f, Formula::not(Formula::not(var("p"))));
        let f = parse("NOT((p))").unwrap();
        assert_eq!(f.to_string(), "NOT(p)");
    }

    #[test]
    fn parse_from_str() {
        let f: Formula = "a OR b OR c".parse().unwrap();
        assert_eq!(f.connective(), Some(Connective::Or));
        assert_eq!(f.children().len(), 3);
    }

    #[test]
    fn reject_mixed_connectives() {
        assert_eq!(
            parse("p OR q AND r"),
            Err(ParseError::MixedConnectives(Connective::Or, Connective::And))
        );
        assert_eq!(
            parse("(p) IMPLIES q IFF r"),
            Err(ParseError::MixedConnectives(
                Connective::Implies,
                Connective::Iff
            ))
        );
    }

    #[test]
    fn reject_not_without_group() {
        assert_eq!(parse("NOT p"), Err(ParseError::NotWithoutGroup));
        assert_eq!(parse("q AND NOT p"), Err(ParseError::NotWithoutGroup));
        assert_eq!(parse("NOT NOT(p)"), Err(ParseError::NotWithoutGroup));
        assert_eq!(parse("p AND NOT"), Err(ParseError::NotWithoutGroup));
    }

    #[test]
    fn reject_parentheses() {
        assert_eq!(parse("()"), Err(ParseError::EmptyGroup(0)));
        assert_eq!(parse("(p AND q"), Err(ParseError::UnmatchedOpen(0)));
        assert_eq!(parse("p AND q)"), Err(ParseError::UnmatchedClose(7)));
        assert_eq!(parse("p AND ((q)"), Err(ParseError::UnmatchedOpen(6)));
    }

    #[test]
    fn reject_empty() {
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn reject_adjacent() {
        assert_eq!(parse("p q"), Err(ParseError::AdjacentOperands));
        assert_eq!(parse("(p AND q)(q OR p)"), Err(ParseError::AdjacentOperands));
        assert_eq!(parse("p AND AND q"), Err(ParseError::AdjacentConnectives));
    }

    #[test]
    fn reject_dangling_connective() {
        assert_eq!(parse("AND p"), Err(ParseError::DanglingConnective));
        assert_eq!(parse("p OR"), Err(ParseError::DanglingConnective));
        assert_eq!(parse("p AND (q OR)"), Err(ParseError::DanglingConnective));
    }

    #[test]
    fn reject_arity() {
        assert_eq!(
            parse("p IMPLIES q IMPLIES r"),
            Err(ParseError::Arity {
                connective: Connective::Implies,
                operands: 3
            })
        );
        assert_eq!(
            parse("a IFF b IFF c IFF d"),
            Err(ParseError::Arity {
                connective: Connective::Iff,
                operands: 4
            })
        );
    }

    #[test]
    fn reject_deep_nesting() {
        let n = 100_000;
        let text = format!("{}p{}", "(".repeat(n), ")".repeat(n));
        assert_eq!(parse(&text), Err(ParseError::TooDeep(MAX_NESTING)));
        let text = format!("{}p{}", "NOT(".repeat(n), ")".repeat(n));
        assert!(matches!(parse(&text), Err(ParseError::TooDeep(_))));
    }

    #[test]
    fn accept_nesting_up_to_limit() {
        let text = format!("{}p{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert_eq!(parse(&text).unwrap(), var("p"));
        let text = format!("{}p{}", "NOT(".repeat(100), ")".repeat(100));
        assert_eq!(parse(&text).unwrap().depth(), 100);
    }
}
