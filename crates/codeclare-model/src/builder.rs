//! Factory methods for building a valid [`ProcessModel`]
//!
//! This module contains the builder [`ProcessModelBuilder`] for a
//! [`ProcessModel`]. The builder ensures that the activity declarations are
//! well formed: every activity name is a legal LTLf identifier, no name is
//! declared twice, and the environment and system sets stay disjoint.
//!
//! Template instances are attached without further checks; whether a
//! template is known, has the right arity and only references declared
//! activities is validated when the contract is built.

use std::fmt::{self, Display};

use crate::{Activity, ProcessModel, TemplateInstance};

/// Words that are part of the LTLf syntax and therefore illegal as
/// activity names
const RESERVED_WORDS: [&str; 7] = ["true", "false", "U", "W", "X", "G", "F"];

/// Check whether a name is a legal LTLf identifier
///
/// Identifiers start with an ASCII letter or underscore and continue with
/// ASCII letters, digits or underscores. Activity names are emitted
/// verbatim as atomic propositions, so this is checked at declaration time
/// instead of escaping at rendering time.
fn is_legal_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let leading_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');

    leading_ok
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !RESERVED_WORDS.contains(&name)
}

/// Builder for constructing a [`ProcessModel`]
///
/// Activities are added one set at a time and validated on insertion,
/// template instances are attached afterwards. The builder is consumed by
/// [`ProcessModelBuilder::build`].
///
/// # Example
///
/// ```
/// use codeclare_model::builder::ProcessModelBuilder;
/// use codeclare_model::{Activity, TemplateInstance};
///
/// let model = ProcessModelBuilder::new()
///     .with_environment_activities(vec![
///         Activity::new("regaddr"),
///         Activity::new("pay"),
///     ])
///     .unwrap()
///     .with_system_activity(Activity::new("ship"))
///     .unwrap()
///     .with_assumption(TemplateInstance::new(
///         "precedence",
///         vec![Activity::new("regaddr"), Activity::new("ship")],
///     ))
///     .build();
///
/// assert_eq!(model.assumptions().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProcessModelBuilder {
    model: ProcessModel,
}

impl ProcessModelBuilder {
    /// Create a new empty process model builder
    pub fn new() -> Self {
        ProcessModelBuilder {
            model: ProcessModel::default(),
        }
    }

    /// Check that the activity can be declared at all
    fn check_activity(&self, activity: &Activity) -> Result<(), BuilderError> {
        if !is_legal_identifier(activity.name()) {
            return Err(BuilderError::InvalidActivityName(activity.clone()));
        }
        if self.model.is_declared(activity) {
            return Err(BuilderError::DuplicateActivity(activity.clone()));
        }
        Ok(())
    }

    /// Declare an activity controlled by the environment
    ///
    /// Returns an error if the name is not a legal identifier or is already
    /// declared in either activity set.
    pub fn with_environment_activity(mut self, activity: Activity) -> Result<Self, BuilderError> {
        self.check_activity(&activity)?;
        self.model.environment.push(activity);
        Ok(self)
    }

    /// Declare multiple environment activities, preserving their order
    pub fn with_environment_activities(
        mut self,
        activities: impl IntoIterator<Item = Activity>,
    ) -> Result<Self, BuilderError> {
        for activity in activities {
            self = self.with_environment_activity(activity)?;
        }
        Ok(self)
    }

    /// Declare an activity controlled by the system under synthesis
    ///
    /// Returns an error if the name is not a legal identifier or is already
    /// declared in either activity set.
    pub fn with_system_activity(mut self, activity: Activity) -> Result<Self, BuilderError> {
        self.check_activity(&activity)?;
        self.model.system.push(activity);
        Ok(self)
    }

    /// Declare multiple system activities, preserving their order
    pub fn with_system_activities(
        mut self,
        activities: impl IntoIterator<Item = Activity>,
    ) -> Result<Self, BuilderError> {
        for activity in activities {
            self = self.with_system_activity(activity)?;
        }
        Ok(self)
    }

    /// Attach an assumption template instance
    pub fn with_assumption(mut self, instance: TemplateInstance) -> Self {
        self.model.assumptions.push(instance);
        self
    }

    /// Attach multiple assumption template instances, preserving their order
    pub fn with_assumptions(mut self, instances: impl IntoIterator<Item = TemplateInstance>) -> Self {
        self.model.assumptions.extend(instances);
        self
    }

    /// Attach a guarantee template instance
    pub fn with_guarantee(mut self, instance: TemplateInstance) -> Self {
        self.model.guarantees.push(instance);
        self
    }

    /// Attach multiple guarantee template instances, preserving their order
    pub fn with_guarantees(mut self, instances: impl IntoIterator<Item = TemplateInstance>) -> Self {
        self.model.guarantees.extend(instances);
        self
    }

    /// Build the process model
    pub fn build(self) -> ProcessModel {
        self.model
    }
}

/// Errors that can occur during the construction of a process model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// An activity name is not a legal LTLf identifier
    InvalidActivityName(Activity),
    /// An activity with the same name was declared multiple times, in the
    /// same activity set or across the two sets
    DuplicateActivity(Activity),
}

impl std::error::Error for BuilderError {}

impl Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuilderError::InvalidActivityName(activity) => write!(
                f,
                "Activity name '{activity}' is not a legal identifier. Names must start with a letter or underscore, continue with letters, digits or underscores, and must not be an LTLf keyword"
            ),
            BuilderError::DuplicateActivity(activity) => {
                write!(f, "Duplicate activity: '{activity}' is already declared")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_identifiers() {
        assert!(is_legal_identifier("pay"));
        assert!(is_legal_identifier("_skip"));
        assert!(is_legal_identifier("reqc2"));
        assert!(is_legal_identifier("Gate"));

        assert!(!is_legal_identifier(""));
        assert!(!is_legal_identifier("2pay"));
        assert!(!is_legal_identifier("pay ship"));
        assert!(!is_legal_identifier("pay-ship"));
    }

    #[test]
    fn test_reserved_words_rejected() {
        for word in RESERVED_WORDS {
            assert!(!is_legal_identifier(word), "'{word}' must be rejected");
        }
    }

    #[test]
    fn test_builder_rejects_invalid_name() {
        let result = ProcessModelBuilder::new().with_environment_activity(Activity::new("G"));
        assert_eq!(
            result.unwrap_err(),
            BuilderError::InvalidActivityName(Activity::new("G"))
        );
    }

    #[test]
    fn test_builder_rejects_duplicate_in_same_set() {
        let result = ProcessModelBuilder::new()
            .with_environment_activities(vec![Activity::new("pay"), Activity::new("pay")]);
        assert_eq!(
            result.unwrap_err(),
            BuilderError::DuplicateActivity(Activity::new("pay"))
        );
    }

    #[test]
    fn test_builder_rejects_duplicate_across_sets() {
        let result = ProcessModelBuilder::new()
            .with_environment_activity(Activity::new("pay"))
            .unwrap()
            .with_system_activity(Activity::new("pay"));
        assert_eq!(
            result.unwrap_err(),
            BuilderError::DuplicateActivity(Activity::new("pay"))
        );
    }

    #[test]
    fn test_builder_keeps_instances_in_order() {
        let model = ProcessModelBuilder::new()
            .with_environment_activity(Activity::new("pay"))
            .unwrap()
            .with_guarantees(vec![
                TemplateInstance::new("absence2", vec![Activity::new("pay")]),
                TemplateInstance::new("not_coexistence", vec![Activity::new("pay")]),
            ])
            .build();

        let names: Vec<_> = model.guarantees().iter().map(|i| i.template()).collect();
        assert_eq!(names, vec!["absence2", "not_coexistence"]);
    }
}
