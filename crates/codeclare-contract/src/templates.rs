//! Catalog of DECLARE constraint templates
//!
//! A DECLARE template is a named, parameterized temporal constraint pattern
//! over process activities. The [`TemplateCatalog`] maps template names to
//! builder functions that expand an instance into an [`LTLfExpression`].
//!
//! The built-in templates are enumerated by [`TemplateId`] and use the
//! standard DECLARE-to-LTLf encodings over finite traces:
//!
//! | Template | Arity | Encoding |
//! |---|---|---|
//! | `precedence(a, b)` | 2 | `!b W a` |
//! | `responded_existence(a, b)` | 2 | `F a -> F b` |
//! | `absence2(a)` | 1 | `G (a -> X G !a)` |
//! | `neg_succession(a, b)` | 2 | `G (a -> G !b)` |
//! | `response(a, b, ...)` | ≥ 2 | `G (a -> F (b || ...))` |
//! | `not_coexistence(a, b)` | 2 | `!(F a && F b)` |
//! | `succession(a, b)` | 2 | `(!b W a) && (F a -> F b)` |
//!
//! The catalog is an explicit registry rather than a dispatch chain: new
//! templates can be registered at startup via
//! [`TemplateCatalog::register`] without touching the built-in entries.

use std::collections::HashMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use codeclare_model::ltlf::LTLfExpression;
use codeclare_model::Activity;

/// Identifiers of the built-in DECLARE templates
///
/// The `Display`/`FromStr` pair maps each identifier to the template name
/// used in coDECLARE model documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateId {
    /// `b` may occur only after `a` has occurred
    Precedence,
    /// if `a` occurs at some point, `b` occurs at some point
    RespondedExistence,
    /// `a` occurs at most once
    Absence2,
    /// once `a` occurs, `b` never occurs afterwards
    NegSuccession,
    /// every occurrence of `a` forces a later occurrence of one of the
    /// remaining activities
    Response,
    /// `a` and `b` never both occur
    NotCoexistence,
    /// precedence and responded existence combined
    Succession,
}

impl TemplateId {
    /// All built-in template identifiers
    pub const ALL: [TemplateId; 7] = [
        TemplateId::Precedence,
        TemplateId::RespondedExistence,
        TemplateId::Absence2,
        TemplateId::NegSuccession,
        TemplateId::Response,
        TemplateId::NotCoexistence,
        TemplateId::Succession,
    ];

    /// Template name as used in model documents
    pub fn name(self) -> &'static str {
        match self {
            TemplateId::Precedence => "precedence",
            TemplateId::RespondedExistence => "responded_existence",
            TemplateId::Absence2 => "absence2",
            TemplateId::NegSuccession => "neg_succession",
            TemplateId::Response => "response",
            TemplateId::NotCoexistence => "not_coexistence",
            TemplateId::Succession => "succession",
        }
    }

    /// Number of activities an instance of this template takes
    pub fn arity(self) -> Arity {
        match self {
            TemplateId::Absence2 => Arity::Exact(1),
            TemplateId::Response => Arity::AtLeast(2),
            TemplateId::Precedence
            | TemplateId::RespondedExistence
            | TemplateId::NegSuccession
            | TemplateId::NotCoexistence
            | TemplateId::Succession => Arity::Exact(2),
        }
    }

    /// Builder function expanding an instance into a formula
    ///
    /// The builder may assume that the activity slice matches
    /// [`TemplateId::arity`]; the catalog checks this before dispatching.
    fn builder(self) -> TemplateBuilder {
        match self {
            TemplateId::Precedence => precedence,
            TemplateId::RespondedExistence => responded_existence,
            TemplateId::Absence2 => absence2,
            TemplateId::NegSuccession => neg_succession,
            TemplateId::Response => response,
            TemplateId::NotCoexistence => not_coexistence,
            TemplateId::Succession => succession,
        }
    }
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for TemplateId {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| TemplateError::UnknownTemplate {
                template: s.to_string(),
            })
    }
}

/// Number of activity arguments a template accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` activities
    Exact(usize),
    /// `n` or more activities
    AtLeast(usize),
}

impl Arity {
    /// Check whether an argument count satisfies this arity
    pub fn matches(self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "exactly {n}"),
            Arity::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

/// Function expanding a correctly-sized activity list into a formula
pub type TemplateBuilder = fn(&[Activity]) -> LTLfExpression;

/// A registered template: its arity and its builder function
#[derive(Debug, Clone, Copy)]
struct TemplateDef {
    arity: Arity,
    build: TemplateBuilder,
}

/// Registry mapping template names to formula builders
///
/// # Example
///
/// ```
/// use codeclare_contract::templates::TemplateCatalog;
/// use codeclare_model::Activity;
///
/// let catalog = TemplateCatalog::with_builtins();
/// let formula = catalog
///     .build("precedence", &[Activity::new("a"), Activity::new("b")])
///     .unwrap();
/// assert_eq!(formula.to_string(), "!b W a");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: HashMap<String, TemplateDef>,
}

impl TemplateCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        TemplateCatalog {
            templates: HashMap::new(),
        }
    }

    /// Create a catalog containing all built-in templates
    pub fn with_builtins() -> Self {
        let mut catalog = TemplateCatalog::new();
        for id in TemplateId::ALL {
            catalog
                .register(id.name(), id.arity(), id.builder())
                .expect("built-in template names are unique");
        }
        catalog
    }

    /// Register a template under the given name
    ///
    /// Registration never replaces an existing entry; registering a name
    /// twice is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use codeclare_contract::templates::{Arity, TemplateCatalog};
    /// use codeclare_model::ltlf::LTLfExpression;
    /// use codeclare_model::Activity;
    ///
    /// let mut catalog = TemplateCatalog::with_builtins();
    /// catalog
    ///     .register("existence", Arity::Exact(1), |activities| {
    ///         LTLfExpression::eventually(LTLfExpression::Atom(activities[0].clone()))
    ///     })
    ///     .unwrap();
    ///
    /// let formula = catalog
    ///     .build("existence", &[Activity::new("pay")])
    ///     .unwrap();
    /// assert_eq!(formula.to_string(), "F pay");
    /// ```
    pub fn register(
        &mut self,
        name: impl ToString,
        arity: Arity,
        build: TemplateBuilder,
    ) -> Result<(), TemplateError> {
        let name = name.to_string();
        if self.templates.contains_key(&name) {
            return Err(TemplateError::AlreadyRegistered { template: name });
        }
        self.templates.insert(name, TemplateDef { arity, build });
        Ok(())
    }

    /// Check whether a template with the given name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Expand a template instance into a formula
    ///
    /// Fails if no template with the given name is registered or if the
    /// number of activities does not match the template's arity.
    pub fn build(
        &self,
        template: &str,
        activities: &[Activity],
    ) -> Result<LTLfExpression, TemplateError> {
        let def = self
            .templates
            .get(template)
            .ok_or_else(|| TemplateError::UnknownTemplate {
                template: template.to_string(),
            })?;

        if !def.arity.matches(activities.len()) {
            return Err(TemplateError::ArityMismatch {
                template: template.to_string(),
                expected: def.arity,
                found: activities.len(),
            });
        }

        Ok((def.build)(activities))
    }
}

/// Errors that can occur when registering or expanding templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// No template with this name is registered
    UnknownTemplate {
        /// Name of the unknown template
        template: String,
    },
    /// The number of activities does not match the template's arity
    ArityMismatch {
        /// Name of the template
        template: String,
        /// Arity declared by the template
        expected: Arity,
        /// Number of activities supplied
        found: usize,
    },
    /// A template with this name is already registered
    AlreadyRegistered {
        /// Name of the clashing template
        template: String,
    },
}

impl std::error::Error for TemplateError {}

impl Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnknownTemplate { template } => {
                write!(f, "Unknown template: '{template}' is not registered")
            }
            TemplateError::ArityMismatch {
                template,
                expected,
                found,
            } => write!(
                f,
                "Arity mismatch for template '{template}': expected {expected} activities, found {found}"
            ),
            TemplateError::AlreadyRegistered { template } => {
                write!(f, "Template '{template}' is already registered")
            }
        }
    }
}

fn atom(activity: &Activity) -> LTLfExpression {
    LTLfExpression::Atom(activity.clone())
}

/// `precedence(a, b)`: `b` may occur only after `a` has occurred
fn precedence(activities: &[Activity]) -> LTLfExpression {
    LTLfExpression::weak_until(!atom(&activities[1]), atom(&activities[0]))
}

/// `responded_existence(a, b)`: if `a` occurs, `b` occurs at some point
fn responded_existence(activities: &[Activity]) -> LTLfExpression {
    LTLfExpression::implies(
        LTLfExpression::eventually(atom(&activities[0])),
        LTLfExpression::eventually(atom(&activities[1])),
    )
}

/// `absence2(a)`: `a` occurs at most once
fn absence2(activities: &[Activity]) -> LTLfExpression {
    LTLfExpression::globally(LTLfExpression::implies(
        atom(&activities[0]),
        LTLfExpression::next(LTLfExpression::globally(!atom(&activities[0]))),
    ))
}

/// `neg_succession(a, b)`: once `a` occurs, `b` never occurs afterwards
fn neg_succession(activities: &[Activity]) -> LTLfExpression {
    LTLfExpression::globally(LTLfExpression::implies(
        atom(&activities[0]),
        LTLfExpression::globally(!atom(&activities[1])),
    ))
}

/// `response(a, b, ...)`: every `a` forces a later occurrence of one of
/// the remaining activities
fn response(activities: &[Activity]) -> LTLfExpression {
    let alternatives = activities[1..]
        .iter()
        .map(atom)
        .reduce(|acc, alt| acc | alt)
        .expect("arity check guarantees at least one alternative");

    LTLfExpression::globally(LTLfExpression::implies(
        atom(&activities[0]),
        LTLfExpression::eventually(alternatives),
    ))
}

/// `not_coexistence(a, b)`: `a` and `b` never both occur
fn not_coexistence(activities: &[Activity]) -> LTLfExpression {
    !(LTLfExpression::eventually(atom(&activities[0]))
        & LTLfExpression::eventually(atom(&activities[1])))
}

/// `succession(a, b)`: precedence and responded existence combined
fn succession(activities: &[Activity]) -> LTLfExpression {
    precedence(activities) & responded_existence(activities)
}
