//! Parsers for the coDECLARE toolchain
//!
//! This crate contains the two textual front ends:
//! - [`parse_model`] reads a JSON model document into a validated
//!   [`ProcessModel`](codeclare_model::ProcessModel), and
//! - [`parse_ltlf`] reads LTLf formula text into an
//!   [`LTLfExpression`](codeclare_model::ltlf::LTLfExpression) tree.
//!
//! Both parsers report failures through [`anyhow::Error`] with enough
//! context to point at the offending part of the input.

#![warn(missing_docs)]

pub mod ltlf;
pub mod model;

pub use ltlf::parse_ltlf;
pub use model::parse_model;
