//! Parser for coDECLARE model documents
//!
//! Models are given as JSON documents with four optional top-level
//! fields, all defaulting to empty:
//!
//! ```json
//! {
//!   "environment": ["regaddr", "pay"],
//!   "system": ["ship"],
//!   "assumptions": [
//!     { "template": "precedence", "activities": ["regaddr", "ship"] }
//!   ],
//!   "guarantees": [
//!     { "template": "succession", "activities": ["pay", "ship"] }
//!   ]
//! }
//! ```
//!
//! Unknown top-level fields are ignored. The parsed document is fed
//! through the [`ProcessModelBuilder`], so activity name and duplicate
//! validation happens here; template resolution does not.

use anyhow::{Context, Error};
use serde::Deserialize;

use codeclare_model::builder::ProcessModelBuilder;
use codeclare_model::{Activity, ProcessModel, TemplateInstance};

/// Serde image of a model document
#[derive(Debug, Deserialize)]
struct ModelDocument {
    #[serde(default)]
    environment: Vec<String>,
    #[serde(default)]
    system: Vec<String>,
    #[serde(default)]
    assumptions: Vec<InstanceDocument>,
    #[serde(default)]
    guarantees: Vec<InstanceDocument>,
}

/// Serde image of a template instance
#[derive(Debug, Deserialize)]
struct InstanceDocument {
    template: String,
    activities: Vec<String>,
}

impl From<InstanceDocument> for TemplateInstance {
    fn from(doc: InstanceDocument) -> Self {
        TemplateInstance::new(
            doc.template,
            doc.activities.iter().map(Activity::new).collect(),
        )
    }
}

/// Parse a JSON model document into a validated [`ProcessModel`]
///
/// # Example
///
/// ```
/// use codeclare_parser::parse_model;
///
/// let model = parse_model(
///     r#"{
///         "environment": ["pay"],
///         "system": ["ship"],
///         "guarantees": [
///             { "template": "succession", "activities": ["pay", "ship"] }
///         ]
///     }"#,
/// )
/// .unwrap();
/// assert_eq!(model.guarantees().len(), 1);
/// ```
pub fn parse_model(input: &str) -> Result<ProcessModel, Error> {
    let document: ModelDocument =
        serde_json::from_str(input).with_context(|| "Failed to parse model document")?;

    let model = ProcessModelBuilder::new()
        .with_environment_activities(document.environment.iter().map(Activity::new))
        .with_context(|| "Failed to validate environment activities")?
        .with_system_activities(document.system.iter().map(Activity::new))
        .with_context(|| "Failed to validate system activities")?
        .with_assumptions(document.assumptions.into_iter().map(Into::into))
        .with_guarantees(document.guarantees.into_iter().map(Into::into))
        .build();

    Ok(model)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let model = parse_model(
            r#"{
                "environment": ["regaddr", "pay"],
                "system": ["ship", "cancel"],
                "assumptions": [
                    { "template": "precedence", "activities": ["regaddr", "ship"] }
                ],
                "guarantees": [
                    { "template": "succession", "activities": ["pay", "ship"] },
                    { "template": "response", "activities": ["pay", "ship", "cancel"] }
                ]
            }"#,
        )
        .unwrap();

        let env: Vec<_> = model.environment().map(|a| a.name()).collect();
        assert_eq!(env, vec!["regaddr", "pay"]);
        let sys: Vec<_> = model.system().map(|a| a.name()).collect();
        assert_eq!(sys, vec!["ship", "cancel"]);
        assert_eq!(model.assumptions().len(), 1);
        assert_eq!(model.guarantees().len(), 2);
        assert_eq!(
            model.guarantees()[1].to_string(),
            "response(pay, ship, cancel)"
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let model = parse_model(r#"{ "environment": ["pay"] }"#).unwrap();
        assert_eq!(model.environment().count(), 1);
        assert_eq!(model.system().count(), 0);
        assert!(model.assumptions().is_empty());
        assert!(model.guarantees().is_empty());

        let model = parse_model("{}").unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_unknown_top_level_fields_ignored() {
        let model = parse_model(
            r#"{ "environment": ["pay"], "comment": "first draft" }"#,
        )
        .unwrap();
        assert_eq!(model.environment().count(), 1);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(parse_model("not json").is_err());
        assert!(parse_model(r#"{ "environment": "pay" }"#).is_err());
    }

    #[test]
    fn test_error_context_renders_without_double_separator() {
        let err = parse_model("not json").unwrap_err();
        assert_eq!(err.to_string(), "Failed to parse model document");
        assert!(!format!("{err:#}").contains(": :"));

        let err = parse_model(r#"{ "environment": ["G"] }"#).unwrap_err();
        assert_eq!(err.to_string(), "Failed to validate environment activities");
        assert!(!format!("{err:#}").contains(": :"));
    }

    #[test]
    fn test_builder_validation_applies() {
        // reserved word as activity name
        assert!(parse_model(r#"{ "environment": ["G"] }"#).is_err());
        // same activity in both sets
        assert!(parse_model(r#"{ "environment": ["pay"], "system": ["pay"] }"#).is_err());
    }
}
