//! Grammar artifact loading and validation for the Rout language.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::multiple_crate_versions)]

/// Core structures and parsing logic for compiled grammar artifacts.
///
/// This module defines how the loader understands the declarative shape of
/// a language: the rule graph an external grammar compiler emits. Everything
/// else in the crate builds upon these types.
pub mod grammar;

/// The language object a parsing engine consumes.
///
/// Construction from a parsed artifact is the load boundary this crate
/// validates: a valid artifact must always yield a non-empty language.
pub mod language;

/// The embedded Rout grammar artifact and its loading entry point.
pub mod rout;

/// Grammar validation and consistency checking utilities.
///
/// Validation exists to protect parsing engines from malformed artifacts.
/// It enforces the artifact format's invariants and hosts the smoke check
/// that the embedded Rout artifact loads.
pub mod validate;

pub use grammar::{parse_grammar, Grammar, LoadError, Rule};
pub use language::Language;
pub use validate::{validate, validate_grammar_loads, ValidationError};
