//! Core structures and parsing logic for compiled grammar artifacts.
//!
//! This module defines the internal representation of a grammar artifact as
//! parsed from the JSON rule graph an external grammar compiler emits. It
//! uses [`serde_json`] for deserialization and provides accessors for the
//! pieces a loader interrogates: the rule table, the entry point, and the
//! auxiliary symbol lists.

mod rules;

pub use rules::{Rule, RuleType, RuleValue};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The conventional name of a grammar's entry-point rule.
///
/// The artifact format defines the entry point positionally (the first rule
/// in the source definition), but JSON objects parsed into a map lose that
/// order, so loaders fall back on the convention every grammar in practice
/// follows.
pub const ENTRY_RULE: &str = "source_file";

/// A full compiled grammar artifact.
///
/// This structure directly mirrors the serialized JSON format produced by
/// the external grammar compiler. It captures the complete rule set along
/// with auxiliary metadata such as precedences, conflicts, and supertypes.
///
/// `Grammar` is the root artifact in the loading pipeline: it is parsed
/// once, borrowed by validation, and consumed by
/// [`Language::load`](crate::language::Language::load).
///
/// See <https://tree-sitter.github.io/tree-sitter/assets/schemas/grammar.schema.json>
#[derive(Debug, Clone, Deserialize)]
pub struct Grammar {
    /// Optional `$schema` field from the JSON, typically used for schema
    /// validation or editor integration.
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// The short name of the grammar (e.g. `"rout"`).
    pub name: String,

    /// Map of all rule identifiers to their corresponding definitions.
    pub rules: HashMap<String, Rule>,

    /// "Extras" that may appear between other tokens, such as whitespace.
    pub extras: Option<Vec<Rule>>,

    /// Rules implemented externally via a scanner.
    pub externals: Option<Vec<Rule>>,

    /// Names of rules that should be inlined into other rules.
    pub inline: Option<Vec<String>>,

    /// Precedence declarations that control operator binding order.
    pub precedences: Option<Vec<Vec<Precedence>>>,

    /// Explicit conflict groups expected during parsing.
    pub conflicts: Option<Vec<Vec<String>>>,

    /// The special rule name used to identify word tokens.
    pub word: Option<String>,

    /// A list of node supertypes, grouping related syntactic forms.
    pub supertypes: Option<Vec<String>>,
}

/// A single precedence entry, either a named symbol or a literal string value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Precedence {
    /// A literal precedence string.
    String(String),

    /// A symbolic precedence name.
    Symbol {
        /// The identifier of the referenced symbol.
        name: String,
    },
}

impl Grammar {
    /// Parse a grammar artifact from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, or
    /// [`LoadError::JsonParse`] if its contents are not a valid artifact.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)?;
        parse_grammar(&json)
    }

    /// Looks up a rule definition by name.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    /// Returns the name of the grammar's entry-point rule.
    ///
    /// Prefers the conventional [`ENTRY_RULE`] when defined, otherwise any
    /// defined rule. `None` only for an empty (unloadable) rule set.
    #[must_use]
    pub fn entry_point(&self) -> Option<&str> {
        if self.rules.contains_key(ENTRY_RULE) {
            Some(ENTRY_RULE)
        } else {
            self.rules.keys().next().map(String::as_str)
        }
    }
}

/// Parse a JSON grammar artifact into a strongly typed [`Grammar`] structure.
///
/// # Errors
///
/// Returns [`LoadError::JsonParse`] if the provided string is not valid JSON
/// or fails schema deserialization.
pub fn parse_grammar(json: &str) -> Result<Grammar, LoadError> {
    serde_json::from_str(json).map_err(|e| LoadError::JsonParse(e.to_string()))
}

/// Possible errors raised while loading a grammar artifact.
#[derive(Debug)]
pub enum LoadError {
    /// The artifact file could not be read.
    Io(std::io::Error),

    /// The input JSON was syntactically invalid or structurally mismatched.
    JsonParse(String),

    /// The artifact parsed but no usable language object could be
    /// constructed from it, signaling a corrupted or version-incompatible
    /// grammar artifact.
    GrammarLoad(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::JsonParse(e) => write!(f, "JSON parse error: {e}"),
            LoadError::GrammarLoad(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::JsonParse(_) | LoadError::GrammarLoad(_) => None,
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_grammar() {
        let json = r#"{
            "name": "test",
            "rules": {
                "source_file": {
                    "type": "SYMBOL",
                    "name": "word"
                },
                "word": {
                    "type": "CHOICE",
                    "members": [
                        {
                            "type": "STRING",
                            "value": "TRUE"
                        },
                        {
                            "type": "PATTERN",
                            "value": "[0-9]+"
                        }
                    ]
                }
            }
        }"#;

        let grammar = parse_grammar(json).unwrap();
        assert_eq!(grammar.name, "test");
        assert_eq!(grammar.rules.len(), 2);
        assert_eq!(grammar.entry_point(), Some("source_file"));
    }

    #[test]
    fn test_entry_point_falls_back_without_source_file() {
        let json = r#"{
            "name": "test",
            "rules": {
                "document": {"type": "STRING", "value": "x"}
            }
        }"#;

        let grammar = parse_grammar(json).unwrap();
        assert_eq!(grammar.entry_point(), Some("document"));
    }

    #[test]
    fn test_optional_artifact_keys_may_be_absent() {
        // Compiled artifacts only emit the keys they use; `word`, `inline`,
        // and friends are frequently absent (the embedded Rout artifact has
        // no `word` key, for one).
        let json = r#"{"name": "test", "rules": {"source_file": {"type": "BLANK"}}}"#;

        let grammar = parse_grammar(json).unwrap();
        assert!(grammar.schema.is_none());
        assert!(grammar.extras.is_none());
        assert!(grammar.word.is_none());
        assert!(grammar.supertypes.is_none());
    }

    #[test]
    fn test_parse_rejects_malformed_artifact() {
        let err = parse_grammar("not a grammar").unwrap_err();
        assert!(matches!(err, LoadError::JsonParse(_)));
    }

    #[test]
    fn test_rule_lookup() {
        let json = r#"{
            "name": "test",
            "rules": {
                "source_file": {
                    "type": "TOKEN",
                    "content": {
                        "type": "PREC",
                        "value": 8,
                        "content": {"type": "PATTERN", "value": "\\d+"}
                    }
                }
            }
        }"#;

        let grammar = parse_grammar(json).unwrap();
        let rule = grammar.rule("source_file").unwrap();
        assert!(rule.is_token_wrapper());
        assert!(grammar.rule("missing").is_none());
    }
}
