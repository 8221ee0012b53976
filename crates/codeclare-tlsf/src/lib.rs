//! TLSF serialization of LTLf assume-guarantee contracts
//!
//! TLSF (Temporal Logic Synthesis Format) is the input format of
//! LTLf synthesis tools such as LydiaSyft. A TLSF document declares the
//! input and output signals of the system under synthesis and the formula
//! it has to realize. This crate maps a [`ProcessModel`] and its
//! [`Contract`] onto that format: environment activities become inputs,
//! system activities become outputs, and the combined contract formula
//! becomes the single guarantee.

#![warn(missing_docs)]

use std::collections::HashSet;
use std::fmt::{self, Display};

use codeclare_contract::Contract;
use codeclare_model::ProcessModel;

/// A TLSF document ready to be written to disk
///
/// Construct it with [`TlsfDocument::new`] or derive it from a contract
/// with [`export_tlsf`]. The `Display` implementation renders the
/// complete document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsfDocument {
    title: String,
    description: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
    guarantee: String,
}

impl TlsfDocument {
    /// Create a TLSF document from its parts
    ///
    /// Signal names are emitted in the order given. Every signal must be
    /// declared exactly once; a name appearing twice, in one list or
    /// across both, is an error.
    pub fn new(
        title: impl ToString,
        description: impl ToString,
        inputs: Vec<String>,
        outputs: Vec<String>,
        guarantee: impl ToString,
    ) -> Result<Self, TlsfError> {
        let mut seen = HashSet::new();
        for signal in inputs.iter().chain(&outputs) {
            if !seen.insert(signal.as_str()) {
                return Err(TlsfError::DuplicateSignal(signal.clone()));
            }
        }

        Ok(TlsfDocument {
            title: title.to_string(),
            description: description.to_string(),
            inputs,
            outputs,
            guarantee: guarantee.to_string(),
        })
    }

    /// Title of the document
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Input signal names in declaration order
    pub fn inputs(&self) -> &[String] {
        &self.inputs
    }

    /// Output signal names in declaration order
    pub fn outputs(&self) -> &[String] {
        &self.outputs
    }

    /// The guarantee formula text
    pub fn guarantee(&self) -> &str {
        &self.guarantee
    }
}

impl Display for TlsfDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "INFO {{")?;
        writeln!(f, "  TITLE:       \"{}\"", self.title)?;
        writeln!(f, "  DESCRIPTION: \"{}\"", self.description)?;
        writeln!(f, "  SEMANTICS:   Mealy")?;
        writeln!(f, "  TARGET:      Mealy")?;
        writeln!(f, "}}")?;
        writeln!(f)?;
        writeln!(f, "MAIN {{")?;
        writeln!(f, "  INPUTS {{")?;
        for signal in &self.inputs {
            writeln!(f, "    {signal};")?;
        }
        writeln!(f, "  }}")?;
        writeln!(f, "  OUTPUTS {{")?;
        for signal in &self.outputs {
            writeln!(f, "    {signal};")?;
        }
        writeln!(f, "  }}")?;
        writeln!(f, "  GUARANTEE {{")?;
        writeln!(f, "    {};", self.guarantee)?;
        writeln!(f, "  }}")?;
        write!(f, "}}")
    }
}

/// Serialize a contract and its process model into a TLSF document
///
/// Environment activities become the inputs, system activities the
/// outputs, the combined contract formula the guarantee. The activity
/// sets are checked for disjointness again here since the document is
/// handed to an external tool.
///
/// # Example
///
/// ```
/// use codeclare_contract::build_contract;
/// use codeclare_model::builder::ProcessModelBuilder;
/// use codeclare_model::{Activity, TemplateInstance};
/// use codeclare_tlsf::export_tlsf;
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
/// let contract = build_contract(&model).unwrap();
///
/// let document = export_tlsf(&contract, &model, "shipping contract").unwrap();
/// assert_eq!(document.inputs(), ["pay"]);
/// assert_eq!(document.outputs(), ["ship"]);
/// ```
pub fn export_tlsf(
    contract: &Contract,
    model: &ProcessModel,
    title: impl ToString,
) -> Result<TlsfDocument, TlsfError> {
    TlsfDocument::new(
        title,
        "Assume-guarantee contract generated from a coDECLARE process model",
        model.environment().map(|a| a.name().to_string()).collect(),
        model.system().map(|a| a.name().to_string()).collect(),
        contract.text(),
    )
}

/// Errors that can occur when building a TLSF document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TlsfError {
    /// A signal name is declared more than once across inputs and outputs
    DuplicateSignal(String),
}

impl std::error::Error for TlsfError {}

impl Display for TlsfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TlsfError::DuplicateSignal(signal) => {
                write!(f, "Duplicate signal: '{signal}' is declared more than once")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeclare_contract::build_contract;
    use codeclare_model::builder::ProcessModelBuilder;
    use codeclare_model::{Activity, TemplateInstance};

    fn instance(template: &str, activities: &[&str]) -> TemplateInstance {
        TemplateInstance::new(template, activities.iter().map(Activity::new).collect())
    }

    fn order_fulfilment_model() -> ProcessModel {
        ProcessModelBuilder::new()
            .with_environment_activities(vec![
                Activity::new("regaddr"),
                Activity::new("pay"),
                Activity::new("reqc"),
                Activity::new("open"),
            ])
            .unwrap()
            .with_system_activities(vec![
                Activity::new("skip"),
                Activity::new("ship"),
                Activity::new("cancel"),
                Activity::new("refund"),
            ])
            .unwrap()
            .with_assumptions(vec![
                instance("precedence", &["regaddr", "ship"]),
                instance("responded_existence", &["open", "regaddr"]),
                instance("absence2", &["pay"]),
            ])
            .with_guarantees(vec![
                instance("neg_succession", &["reqc", "pay"]),
                instance("response", &["reqc", "cancel", "refund"]),
                instance("not_coexistence", &["cancel", "refund"]),
                instance("succession", &["pay", "ship"]),
            ])
            .build()
    }

    #[test]
    fn test_order_fulfilment_document() {
        let model = order_fulfilment_model();
        let contract = build_contract(&model).unwrap();
        let document = export_tlsf(&contract, &model, "coDECLARE contract (order)").unwrap();

        let expected = r#"INFO {
  TITLE:       "coDECLARE contract (order)"
  DESCRIPTION: "Assume-guarantee contract generated from a coDECLARE process model"
  SEMANTICS:   Mealy
  TARGET:      Mealy
}

MAIN {
  INPUTS {
    regaddr;
    pay;
    reqc;
    open;
  }
  OUTPUTS {
    skip;
    ship;
    cancel;
    refund;
  }
  GUARANTEE {
    G ((!ship W regaddr) && (F open -> F regaddr) && G (pay -> X G !pay)) -> G (G (reqc -> G !pay) && G (reqc -> F (cancel || refund)) && !(F cancel && F refund) && ((!ship W pay) && (F pay -> F ship)));
  }
}"#;
        assert_eq!(document.to_string(), expected);
    }

    #[test]
    fn test_signals_preserve_declaration_order() {
        let model = order_fulfilment_model();
        let contract = build_contract(&model).unwrap();
        let document = export_tlsf(&contract, &model, "order").unwrap();

        assert_eq!(document.inputs(), ["regaddr", "pay", "reqc", "open"]);
        assert_eq!(document.outputs(), ["skip", "ship", "cancel", "refund"]);
    }

    #[test]
    fn test_duplicate_signal_across_lists_rejected() {
        let result = TlsfDocument::new(
            "t",
            "d",
            vec!["pay".to_string(), "reqc".to_string()],
            vec!["ship".to_string(), "pay".to_string()],
            "G true",
        );
        assert_eq!(
            result.unwrap_err(),
            TlsfError::DuplicateSignal("pay".to_string())
        );
    }

    #[test]
    fn test_duplicate_signal_within_list_rejected() {
        let result = TlsfDocument::new(
            "t",
            "d",
            vec!["pay".to_string(), "pay".to_string()],
            vec![],
            "G true",
        );
        assert_eq!(
            result.unwrap_err(),
            TlsfError::DuplicateSignal("pay".to_string())
        );
    }

    #[test]
    fn test_empty_signal_lists_render() {
        let document = TlsfDocument::new("t", "d", vec![], vec![], "true").unwrap();
        let text = document.to_string();
        assert!(text.contains("  INPUTS {\n  }\n"));
        assert!(text.contains("  OUTPUTS {\n  }\n"));
        assert!(text.contains("    true;\n"));
    }
}
