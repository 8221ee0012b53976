//! Parser for LTLf formula text
//!
//! The parser uses the [pest](https://pest.rs/) parser generator, with the
//! grammar defined in `ltlf_format.pest`. It accepts exactly the textual
//! formula language the `Display` implementation of
//! [`LTLfExpression`] emits, so rendering and re-parsing a formula yields
//! a structurally identical tree.

use anyhow::{Error, anyhow};
use pest::{
    Parser,
    iterators::{Pair, Pairs},
    pratt_parser::{Assoc, PrattParser},
};
use pest_derive::Parser;

use codeclare_model::ltlf::LTLfExpression;

// Location of the grammar file and generation of parser
#[allow(missing_docs)]
#[derive(Parser)]
#[grammar = "./ltlf_format.pest"]
struct PestLTLfParser;

// Pratt parser responsible for maintaining operator precedence
//
// Precedence is defined lowest to highest: implication, then the until
// operators, then disjunction, then conjunction, then the unary
// operators. Implication and the until operators are right associative,
// the boolean connectives left associative.
lazy_static::lazy_static! {
    static ref PRATT_PARSER: PrattParser<Rule> = {
        use pest::pratt_parser::Op;

        PrattParser::new()
            .op(Op::infix(Rule::implication, Assoc::Right))
            .op(Op::infix(Rule::until, Assoc::Right)
                | Op::infix(Rule::weak_until, Assoc::Right))
            .op(Op::infix(Rule::or, Assoc::Left))
            .op(Op::infix(Rule::and, Assoc::Left))
            .op(Op::prefix(Rule::not)
                | Op::prefix(Rule::next)
                | Op::prefix(Rule::globally)
                | Op::prefix(Rule::eventually))
    };
}

/// Parse LTLf formula text into an [`LTLfExpression`]
///
/// # Example
///
/// ```
/// use codeclare_parser::parse_ltlf;
///
/// let formula = parse_ltlf("G (pay -> F ship)").unwrap();
/// assert_eq!(formula.to_string(), "G (pay -> F ship)");
/// ```
pub fn parse_ltlf(input: &str) -> Result<LTLfExpression, Error> {
    let mut pairs = PestLTLfParser::parse(Rule::ltlf_formula, input)?;

    let pair = pairs
        .next()
        .ok_or_else(|| anyhow!("No formula found in input"))?;

    Ok(parse_ltlf_expr(pair))
}

/// Parse an LTLf expression with operator precedence
fn parse_ltlf_expr(pair: Pair<'_, Rule>) -> LTLfExpression {
    debug_assert!(
        pair.as_rule() == Rule::ltlf_expr,
        "Expected an LTLf expression, got rule {:?} for {}",
        pair.as_rule(),
        pair.as_str()
    );

    pratt_parse(pair.into_inner())
}

fn pratt_parse(pairs: Pairs<'_, Rule>) -> LTLfExpression {
    PRATT_PARSER
        .map_primary(parse_ltlf_primary)
        .map_infix(|lhs, op, rhs| match op.as_rule() {
            Rule::and => LTLfExpression::And(Box::new(lhs), Box::new(rhs)),
            Rule::or => LTLfExpression::Or(Box::new(lhs), Box::new(rhs)),
            Rule::implication => LTLfExpression::Implies(Box::new(lhs), Box::new(rhs)),
            Rule::until => LTLfExpression::Until(Box::new(lhs), Box::new(rhs)),
            Rule::weak_until => LTLfExpression::WeakUntil(Box::new(lhs), Box::new(rhs)),
            _ => unreachable!(
                "Unknown rule for binary LTLf operator {:?}: {}",
                op.as_rule(),
                op.as_str()
            ),
        })
        .map_prefix(|op, rhs| match op.as_rule() {
            Rule::not => LTLfExpression::Not(Box::new(rhs)),
            Rule::next => LTLfExpression::Next(Box::new(rhs)),
            Rule::globally => LTLfExpression::Globally(Box::new(rhs)),
            Rule::eventually => LTLfExpression::Eventually(Box::new(rhs)),
            _ => unreachable!(
                "Unknown rule for unary LTLf operator {:?}: {}",
                op.as_rule(),
                op.as_str()
            ),
        })
        .parse(pairs)
}

/// Parse a primary token, either a constant, an atom or a parenthesized
/// subexpression
fn parse_ltlf_primary(pair: Pair<'_, Rule>) -> LTLfExpression {
    match pair.as_rule() {
        Rule::bool_true => LTLfExpression::True,
        Rule::bool_false => LTLfExpression::False,
        Rule::identifier => LTLfExpression::atom(pair.as_str()),
        Rule::ltlf_expr => parse_ltlf_expr(pair),
        _ => unreachable!(
            "Unknown rule for LTLf primary {:?}: {}",
            pair.as_rule(),
            pair.as_str()
        ),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn a() -> LTLfExpression {
        LTLfExpression::atom("a")
    }

    fn b() -> LTLfExpression {
        LTLfExpression::atom("b")
    }

    fn c() -> LTLfExpression {
        LTLfExpression::atom("c")
    }

    #[test]
    fn test_parse_atoms_and_constants() {
        assert_eq!(parse_ltlf("a").unwrap(), a());
        assert_eq!(parse_ltlf("true").unwrap(), LTLfExpression::True);
        assert_eq!(parse_ltlf("false").unwrap(), LTLfExpression::False);
    }

    #[test]
    fn test_identifiers_starting_with_operator_letters() {
        // `F`, `G`, `X`, `U`, `W` are operators only at a word boundary
        assert_eq!(parse_ltlf("Foo").unwrap(), LTLfExpression::atom("Foo"));
        assert_eq!(parse_ltlf("Gate").unwrap(), LTLfExpression::atom("Gate"));
        assert_eq!(
            parse_ltlf("F Foo").unwrap(),
            LTLfExpression::eventually(LTLfExpression::atom("Foo"))
        );
        assert_eq!(
            parse_ltlf("a U Until").unwrap(),
            LTLfExpression::until(a(), LTLfExpression::atom("Until"))
        );
        assert_eq!(
            parse_ltlf("truely").unwrap(),
            LTLfExpression::atom("truely")
        );
    }

    #[test]
    fn test_parse_unary_operators() {
        assert_eq!(parse_ltlf("!a").unwrap(), !a());
        assert_eq!(parse_ltlf("X a").unwrap(), LTLfExpression::next(a()));
        assert_eq!(
            parse_ltlf("X G !a").unwrap(),
            LTLfExpression::next(LTLfExpression::globally(!a()))
        );
    }

    #[test]
    fn test_parse_binary_precedence() {
        assert_eq!(parse_ltlf("a && b || c").unwrap(), (a() & b()) | c());
        assert_eq!(parse_ltlf("a || b && c").unwrap(), a() | (b() & c()));
        assert_eq!(parse_ltlf("(a || b) && c").unwrap(), (a() | b()) & c());
        assert_eq!(
            parse_ltlf("a && b U c").unwrap(),
            LTLfExpression::until(a() & b(), c())
        );
        assert_eq!(
            parse_ltlf("a U b -> c").unwrap(),
            LTLfExpression::implies(LTLfExpression::until(a(), b()), c())
        );
    }

    #[test]
    fn test_parse_right_associative_chains() {
        assert_eq!(
            parse_ltlf("a -> b -> c").unwrap(),
            LTLfExpression::implies(a(), LTLfExpression::implies(b(), c()))
        );
        assert_eq!(
            parse_ltlf("a U b W c").unwrap(),
            LTLfExpression::until(a(), LTLfExpression::weak_until(b(), c()))
        );
    }

    #[test]
    fn test_parse_template_shaped_formulas() {
        assert_eq!(
            parse_ltlf("!b W a").unwrap(),
            LTLfExpression::weak_until(!b(), a())
        );
        assert_eq!(
            parse_ltlf("G (a -> X G !a)").unwrap(),
            LTLfExpression::globally(LTLfExpression::implies(
                a(),
                LTLfExpression::next(LTLfExpression::globally(!a()))
            ))
        );
        assert_eq!(
            parse_ltlf("!(F a && F b)").unwrap(),
            !(LTLfExpression::eventually(a()) & LTLfExpression::eventually(b()))
        );
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert!(parse_ltlf("").is_err());
        assert!(parse_ltlf("a &&").is_err());
        assert!(parse_ltlf("(a").is_err());
        assert!(parse_ltlf("a b").is_err());
        assert!(parse_ltlf("U a").is_err());
    }
}
