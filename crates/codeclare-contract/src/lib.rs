//! Assume-guarantee contract construction for coDECLARE models
//!
//! This crate turns a validated [`ProcessModel`] into an LTLf
//! assume-guarantee [`Contract`]. The assumption and guarantee template
//! instances of the model are expanded through a [`TemplateCatalog`],
//! conjoined in declaration order, and combined into the single formula
//!
//! ```text
//! G (assumptions) -> G (guarantees)
//! ```
//!
//! which is the realizability objective handed to the synthesis backend.

#![warn(missing_docs)]

use std::fmt::{self, Display};

use codeclare_model::ltlf::LTLfExpression;
use codeclare_model::{ProcessModel, TemplateInstance};

pub mod templates;

use templates::{TemplateCatalog, TemplateError};

/// An LTLf assume-guarantee contract derived from a process model
///
/// The contract keeps the folded assumption and guarantee conjunctions
/// next to the combined formula so that callers can inspect or render the
/// parts separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contract {
    assumption: LTLfExpression,
    guarantee: LTLfExpression,
    formula: LTLfExpression,
    text: String,
}

impl Contract {
    /// Conjunction of all assumption formulas, `true` if there are none
    pub fn assumption(&self) -> &LTLfExpression {
        &self.assumption
    }

    /// Conjunction of all guarantee formulas, `true` if there are none
    pub fn guarantee(&self) -> &LTLfExpression {
        &self.guarantee
    }

    /// The combined formula `G (assumptions) -> G (guarantees)`
    pub fn formula(&self) -> &LTLfExpression {
        &self.formula
    }

    /// Rendered text of the combined formula
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Build the contract of a process model using the built-in templates
///
/// Equivalent to [`build_contract_with_catalog`] with
/// [`TemplateCatalog::with_builtins`].
///
/// # Example
///
/// ```
/// use codeclare_contract::build_contract;
/// use codeclare_model::builder::ProcessModelBuilder;
/// use codeclare_model::{Activity, TemplateInstance};
///
/// let model = ProcessModelBuilder::new()
///     .with_environment_activity(Activity::new("pay"))
///     .unwrap()
///     .with_system_activity(Activity::new("ship"))
///     .unwrap()
///     .with_guarantee(TemplateInstance::new(
///         "succession",
///         vec![Activity::new("pay"), Activity::new("ship")],
///     ))
///     .build();
///
/// let contract = build_contract(&model).unwrap();
/// assert_eq!(
///     contract.text(),
///     "G true -> G ((!ship W pay) && (F pay -> F ship))"
/// );
/// ```
pub fn build_contract(model: &ProcessModel) -> Result<Contract, ContractError> {
    build_contract_with_catalog(model, &TemplateCatalog::with_builtins())
}

/// Build the contract of a process model using the given template catalog
///
/// The model is validated before any template is expanded: the model must
/// declare at least one activity, and every activity referenced by a
/// template instance must be declared in one of the two activity sets.
/// Template expansion itself fails on unknown template names and arity
/// mismatches.
///
/// Assumptions and guarantees are each folded left-to-right with `&&` in
/// declaration order; an empty list folds to `true`.
pub fn build_contract_with_catalog(
    model: &ProcessModel,
    catalog: &TemplateCatalog,
) -> Result<Contract, ContractError> {
    if model.is_empty() {
        return Err(ContractError::EmptyModel);
    }

    for instance in model.assumptions().iter().chain(model.guarantees()) {
        for activity in instance.activities() {
            if !model.is_declared(activity) {
                return Err(ContractError::InvalidActivityReference {
                    instance: instance.clone(),
                    activity: activity.name().to_string(),
                });
            }
        }
    }

    let assumption = fold_instances(model.assumptions(), catalog)?;
    let guarantee = fold_instances(model.guarantees(), catalog)?;

    let formula = LTLfExpression::implies(
        LTLfExpression::globally(assumption.clone()),
        LTLfExpression::globally(guarantee.clone()),
    );
    let text = formula.to_string();

    Ok(Contract {
        assumption,
        guarantee,
        formula,
        text,
    })
}

/// Expand the instances and conjoin them in declaration order
fn fold_instances(
    instances: &[TemplateInstance],
    catalog: &TemplateCatalog,
) -> Result<LTLfExpression, ContractError> {
    let mut folded: Option<LTLfExpression> = None;
    for instance in instances {
        let formula = catalog
            .build(instance.template(), instance.activities())
            .map_err(|source| ContractError::from_template_error(source, instance))?;
        folded = Some(match folded {
            Some(acc) => acc & formula,
            None => formula,
        });
    }
    Ok(folded.unwrap_or(LTLfExpression::True))
}

/// Errors that can occur when building a contract from a process model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// The model declares no activities at all
    EmptyModel,
    /// A template instance references an activity that is not declared
    InvalidActivityReference {
        /// The offending template instance
        instance: TemplateInstance,
        /// Name of the undeclared activity
        activity: String,
    },
    /// A template instance names a template the catalog does not know
    UnknownTemplate {
        /// The offending template instance
        instance: TemplateInstance,
    },
    /// A template instance has the wrong number of activities
    ArityMismatch {
        /// The offending template instance
        instance: TemplateInstance,
        /// Arity declared by the template
        expected: templates::Arity,
        /// Number of activities supplied
        found: usize,
    },
}

impl ContractError {
    fn from_template_error(source: TemplateError, instance: &TemplateInstance) -> Self {
        match source {
            TemplateError::UnknownTemplate { .. } | TemplateError::AlreadyRegistered { .. } => {
                ContractError::UnknownTemplate {
                    instance: instance.clone(),
                }
            }
            TemplateError::ArityMismatch {
                expected, found, ..
            } => ContractError::ArityMismatch {
                instance: instance.clone(),
                expected,
                found,
            },
        }
    }
}

impl std::error::Error for ContractError {}

impl Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContractError::EmptyModel => {
                write!(f, "Empty model: at least one activity must be declared")
            }
            ContractError::InvalidActivityReference { instance, activity } => write!(
                f,
                "Invalid activity reference in '{instance}': '{activity}' is not a declared activity"
            ),
            ContractError::UnknownTemplate { instance } => write!(
                f,
                "Unknown template: '{}' in '{instance}' is not registered",
                instance.template()
            ),
            ContractError::ArityMismatch {
                instance,
                expected,
                found,
            } => write!(
                f,
                "Arity mismatch in '{instance}': template '{}' expects {expected} activities, found {found}",
                instance.template()
            ),
        }
    }
}
