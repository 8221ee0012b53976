//! Type definitions for coDECLARE process models
//!
//! A coDECLARE model splits the activities of a business process into two
//! disjoint sets: activities controlled by the *environment* and activities
//! controlled by the *system* under synthesis. Temporal constraints over these
//! activities are given as instances of named DECLARE templates and are again
//! split into two lists:
//! - *assumptions*, constraints the environment is expected to respect, and
//! - *guarantees*, constraints the system has to enforce whenever the
//!   assumptions hold.
//!
//! This crate contains the model types ([`ProcessModel`],
//! [`TemplateInstance`], [`Activity`]) together with a validating
//! [`builder::ProcessModelBuilder`], and the [`ltlf`] module defining the
//! LTLf formula trees the templates expand into.

#![warn(missing_docs)]

use std::fmt::{self, Debug, Display};

pub mod builder;
pub mod ltlf;

/// Activity of a business process
///
/// Activities are the atomic events of the process. Each activity is owned
/// either by the environment or by the system, and its name doubles as the
/// atomic proposition used in LTLf formulas over the process. Names must be
/// unique across both activity sets.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord)]
pub struct Activity(String);

impl Activity {
    /// Create a new activity with given name
    pub fn new(name: impl ToString) -> Self {
        Activity(name.to_string())
    }

    /// Returns the name of the activity
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Activity {
    fn from(s: &str) -> Self {
        Activity::new(s)
    }
}

impl Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Instance of a named DECLARE template applied to concrete activities
///
/// A template instance pairs the name of a DECLARE template (e.g.
/// `precedence` or `response`) with the ordered list of activities the
/// template is applied to. Whether the name is known and the activity list
/// has the right length is checked by the template catalog when the
/// instance is expanded into a formula.
///
/// # Example
///
/// ```
/// use codeclare_model::{Activity, TemplateInstance};
///
/// let instance = TemplateInstance::new(
///     "precedence",
///     vec![Activity::new("regaddr"), Activity::new("ship")],
/// );
/// assert_eq!(instance.template(), "precedence");
/// assert_eq!(instance.to_string(), "precedence(regaddr, ship)");
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TemplateInstance {
    template: String,
    activities: Vec<Activity>,
}

impl TemplateInstance {
    /// Create a new instance of the template with given name over the given
    /// activities
    pub fn new(template: impl ToString, activities: Vec<Activity>) -> Self {
        TemplateInstance {
            template: template.to_string(),
            activities,
        }
    }

    /// Name of the instantiated template
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Activities the template is applied to, in argument order
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }
}

impl Display for TemplateInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args = self
            .activities
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({})", self.template, args)
    }
}

/// A coDECLARE process model
///
/// The model declares the environment and system activities and the
/// assumption and guarantee constraints over them. Use the
/// [`builder::ProcessModelBuilder`] to construct a model; the builder
/// guarantees that activity names are legal LTLf identifiers and that the
/// two activity sets are disjoint and free of duplicates. Template
/// instances are *not* resolved here; arity and reference checks happen
/// when the contract is built.
///
/// # Example
///
/// ```
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
/// assert!(model.is_declared(&Activity::new("pay")));
/// assert!(!model.is_declared(&Activity::new("refund")));
/// ```
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ProcessModel {
    pub(crate) environment: Vec<Activity>,
    pub(crate) system: Vec<Activity>,
    pub(crate) assumptions: Vec<TemplateInstance>,
    pub(crate) guarantees: Vec<TemplateInstance>,
}

impl ProcessModel {
    /// Environment activities in declaration order
    pub fn environment(&self) -> impl Iterator<Item = &Activity> {
        self.environment.iter()
    }

    /// System activities in declaration order
    pub fn system(&self) -> impl Iterator<Item = &Activity> {
        self.system.iter()
    }

    /// Assumption template instances in declaration order
    pub fn assumptions(&self) -> &[TemplateInstance] {
        &self.assumptions
    }

    /// Guarantee template instances in declaration order
    pub fn guarantees(&self) -> &[TemplateInstance] {
        &self.guarantees
    }

    /// Check whether the activity is declared in either activity set
    pub fn is_declared(&self, activity: &Activity) -> bool {
        self.environment.contains(activity) || self.system.contains(activity)
    }

    /// Check whether both activity sets are empty
    pub fn is_empty(&self) -> bool {
        self.environment.is_empty() && self.system.is_empty()
    }
}

impl Display for ProcessModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = |activities: &[Activity]| {
            activities
                .iter()
                .map(|a| a.name())
                .collect::<Vec<_>>()
                .join(", ")
        };

        writeln!(f, "environment: {}", names(&self.environment))?;
        writeln!(f, "system: {}", names(&self.system))?;

        writeln!(f, "assumptions ({}) {{", self.assumptions.len())?;
        for instance in &self.assumptions {
            writeln!(f, "    {instance};")?;
        }
        writeln!(f, "}}")?;

        writeln!(f, "guarantees ({}) {{", self.guarantees.len())?;
        for instance in &self.guarantees {
            writeln!(f, "    {instance};")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ProcessModelBuilder;

    #[test]
    fn test_activity_new() {
        let activity = Activity::new("pay");
        assert_eq!(activity.name(), "pay");
        assert_eq!(activity.to_string(), "pay");
    }

    #[test]
    fn test_template_instance_display() {
        let instance = TemplateInstance::new(
            "response",
            vec![
                Activity::new("reqc"),
                Activity::new("cancel"),
                Activity::new("refund"),
            ],
        );
        assert_eq!(instance.to_string(), "response(reqc, cancel, refund)");
    }

    #[test]
    fn test_model_declaration_order() {
        let model = ProcessModelBuilder::new()
            .with_environment_activities(vec![Activity::new("pay"), Activity::new("reqc")])
            .unwrap()
            .with_system_activity(Activity::new("ship"))
            .unwrap()
            .build();

        let env: Vec<_> = model.environment().map(|a| a.name()).collect();
        assert_eq!(env, vec!["pay", "reqc"]);
        let sys: Vec<_> = model.system().map(|a| a.name()).collect();
        assert_eq!(sys, vec!["ship"]);
    }

    #[test]
    fn test_model_is_empty() {
        let model = ProcessModelBuilder::new().build();
        assert!(model.is_empty());

        let model = ProcessModelBuilder::new()
            .with_environment_activity(Activity::new("pay"))
            .unwrap()
            .build();
        assert!(!model.is_empty());
    }

    #[test]
    fn test_model_display() {
        let model = ProcessModelBuilder::new()
            .with_environment_activity(Activity::new("pay"))
            .unwrap()
            .with_system_activity(Activity::new("ship"))
            .unwrap()
            .with_guarantee(TemplateInstance::new(
                "succession",
                vec![Activity::new("pay"), Activity::new("ship")],
            ))
            .build();

        let expected = "\
environment: pay
system: ship
assumptions (0) {
}
guarantees (1) {
    succession(pay, ship);
}";
        assert_eq!(model.to_string(), expected);
    }
}
