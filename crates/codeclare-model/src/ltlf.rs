//! LTLf formula trees over process activities
//!
//! This module defines [`LTLfExpression`], the tree representation of a
//! formula in linear temporal logic over finite traces. Atoms are
//! [`Activity`] names, holding in a step exactly when the activity occurs
//! in that step.
//!
//! The `Display` implementation renders a formula into the canonical LTLf
//! text accepted by TLSF-consuming synthesis tools. Rendering inserts only
//! the parentheses required by operator precedence, so re-parsing the text
//! yields a structurally identical tree. Precedence from loosest to
//! tightest binding:
//!
//! 1. `->` (right associative)
//! 2. `U` / `W` (right associative)
//! 3. `||` (left associative)
//! 4. `&&` (left associative)
//! 5. `!`, `X`, `G`, `F`
//!
//! # Example
//!
//! ```
//! use codeclare_model::Activity;
//! use codeclare_model::ltlf::LTLfExpression;
//!
//! // G (pay -> F ship)
//! let response = LTLfExpression::globally(LTLfExpression::implies(
//!     LTLfExpression::atom("pay"),
//!     LTLfExpression::eventually(LTLfExpression::atom("ship")),
//! ));
//! assert_eq!(response.to_string(), "G (pay -> F ship)");
//! ```

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use crate::Activity;

/// LTLf formula over process activities
///
/// The operators carry their standard finite-trace semantics: `Next` is
/// false in the last step of a trace, `Globally` and `Eventually` range
/// from the current step to the end of the trace, `Until` is strong (the
/// right operand must eventually hold) and `WeakUntil` additionally allows
/// the left operand to hold until the trace ends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LTLfExpression {
    /// Atomic proposition, true when the activity occurs in the current step
    Atom(Activity),
    /// Always true
    True,
    /// Always false
    False,
    /// Negation ¬
    Not(Box<LTLfExpression>),
    /// Conjunction ∧
    And(Box<LTLfExpression>, Box<LTLfExpression>),
    /// Disjunction ∨
    Or(Box<LTLfExpression>, Box<LTLfExpression>),
    /// Implication ⟹
    Implies(Box<LTLfExpression>, Box<LTLfExpression>),
    /// Next step ○ (false in the last step of a finite trace)
    Next(Box<LTLfExpression>),
    /// Globally □
    Globally(Box<LTLfExpression>),
    /// Eventually ◇
    Eventually(Box<LTLfExpression>),
    /// Strong until
    Until(Box<LTLfExpression>, Box<LTLfExpression>),
    /// Weak until
    WeakUntil(Box<LTLfExpression>, Box<LTLfExpression>),
}

// Binding strength of each operator, higher binds tighter. Atoms and
// constants never need parentheses.
const PREC_IMPLIES: u8 = 1;
const PREC_UNTIL: u8 = 2;
const PREC_OR: u8 = 3;
const PREC_AND: u8 = 4;
const PREC_UNARY: u8 = 5;
const PREC_ATOM: u8 = 6;

impl LTLfExpression {
    /// Atomic proposition for the given activity
    pub fn atom(activity: impl Into<Activity>) -> Self {
        LTLfExpression::Atom(activity.into())
    }

    /// Implication `lhs -> rhs`
    pub fn implies(lhs: LTLfExpression, rhs: LTLfExpression) -> Self {
        LTLfExpression::Implies(Box::new(lhs), Box::new(rhs))
    }

    /// Next step `X expr`
    pub fn next(expr: LTLfExpression) -> Self {
        LTLfExpression::Next(Box::new(expr))
    }

    /// Globally `G expr`
    pub fn globally(expr: LTLfExpression) -> Self {
        LTLfExpression::Globally(Box::new(expr))
    }

    /// Eventually `F expr`
    pub fn eventually(expr: LTLfExpression) -> Self {
        LTLfExpression::Eventually(Box::new(expr))
    }

    /// Strong until `lhs U rhs`
    pub fn until(lhs: LTLfExpression, rhs: LTLfExpression) -> Self {
        LTLfExpression::Until(Box::new(lhs), Box::new(rhs))
    }

    /// Weak until `lhs W rhs`
    pub fn weak_until(lhs: LTLfExpression, rhs: LTLfExpression) -> Self {
        LTLfExpression::WeakUntil(Box::new(lhs), Box::new(rhs))
    }

    /// Binding strength of the outermost operator
    fn precedence(&self) -> u8 {
        match self {
            LTLfExpression::Atom(_) | LTLfExpression::True | LTLfExpression::False => PREC_ATOM,
            LTLfExpression::Not(_)
            | LTLfExpression::Next(_)
            | LTLfExpression::Globally(_)
            | LTLfExpression::Eventually(_) => PREC_UNARY,
            LTLfExpression::And(_, _) => PREC_AND,
            LTLfExpression::Or(_, _) => PREC_OR,
            LTLfExpression::Until(_, _) | LTLfExpression::WeakUntil(_, _) => PREC_UNTIL,
            LTLfExpression::Implies(_, _) => PREC_IMPLIES,
        }
    }

    /// Render the expression, parenthesized if its operator binds looser
    /// than the surrounding context requires
    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min_prec: u8) -> fmt::Result {
        if self.precedence() < min_prec {
            write!(f, "(")?;
            self.fmt_prec(f, 0)?;
            return write!(f, ")");
        }

        match self {
            LTLfExpression::Atom(activity) => write!(f, "{activity}"),
            LTLfExpression::True => write!(f, "true"),
            LTLfExpression::False => write!(f, "false"),
            LTLfExpression::Not(expr) => {
                write!(f, "!")?;
                expr.fmt_prec(f, PREC_UNARY)
            }
            LTLfExpression::Next(expr) => {
                write!(f, "X ")?;
                expr.fmt_prec(f, PREC_UNARY)
            }
            LTLfExpression::Globally(expr) => {
                write!(f, "G ")?;
                expr.fmt_prec(f, PREC_UNARY)
            }
            LTLfExpression::Eventually(expr) => {
                write!(f, "F ")?;
                expr.fmt_prec(f, PREC_UNARY)
            }
            LTLfExpression::And(lhs, rhs) => {
                lhs.fmt_prec(f, PREC_AND)?;
                write!(f, " && ")?;
                rhs.fmt_prec(f, PREC_AND + 1)
            }
            LTLfExpression::Or(lhs, rhs) => {
                lhs.fmt_prec(f, PREC_OR)?;
                write!(f, " || ")?;
                rhs.fmt_prec(f, PREC_OR + 1)
            }
            LTLfExpression::Until(lhs, rhs) => {
                lhs.fmt_prec(f, PREC_UNTIL + 1)?;
                write!(f, " U ")?;
                rhs.fmt_prec(f, PREC_UNTIL)
            }
            LTLfExpression::WeakUntil(lhs, rhs) => {
                lhs.fmt_prec(f, PREC_UNTIL + 1)?;
                write!(f, " W ")?;
                rhs.fmt_prec(f, PREC_UNTIL)
            }
            LTLfExpression::Implies(lhs, rhs) => {
                lhs.fmt_prec(f, PREC_IMPLIES + 1)?;
                write!(f, " -> ")?;
                rhs.fmt_prec(f, PREC_IMPLIES)
            }
        }
    }
}

impl fmt::Display for LTLfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

// Overload operators for easier construction of expressions

impl Not for LTLfExpression {
    type Output = LTLfExpression;

    fn not(self) -> LTLfExpression {
        LTLfExpression::Not(Box::new(self))
    }
}

impl BitAnd for LTLfExpression {
    type Output = LTLfExpression;

    // Overload the `&` operator to represent conjunction
    fn bitand(self, other: LTLfExpression) -> LTLfExpression {
        LTLfExpression::And(Box::new(self), Box::new(other))
    }
}

impl BitOr for LTLfExpression {
    type Output = LTLfExpression;

    // Overload the `|` operator to represent disjunction
    fn bitor(self, other: LTLfExpression) -> LTLfExpression {
        LTLfExpression::Or(Box::new(self), Box::new(other))
    }
}

impl From<Activity> for LTLfExpression {
    fn from(activity: Activity) -> Self {
        LTLfExpression::Atom(activity)
    }
}
