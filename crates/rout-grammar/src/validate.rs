//! Validation routines for compiled grammar artifacts.
//!
//! This module performs the structural checks a loader runs before handing a
//! [`Grammar`](crate::grammar::Grammar) to a parsing engine: verifying symbol
//! references, confirming extras and token wrappers obey the artifact
//! format's constraints, and reporting unreachable rules. It also hosts
//! [`validate_grammar_loads`], the smoke check that the embedded Rout
//! artifact yields a usable language object.

use crate::grammar::{parse_grammar, Grammar, LoadError, Rule};
use crate::language::Language;
use crate::rout;
use std::collections::HashSet;

/// Represents a validation failure encountered when checking a grammar.
///
/// Validation errors indicate issues such as undefined symbols or symbol
/// references inside token wrappers — artifacts that parsed as JSON but
/// violate the format's structural constraints.
#[derive(Debug)]
pub struct ValidationError {
    /// The descriptive human-readable error message.
    pub message: String,
}

impl ValidationError {
    /// Creates a new [`ValidationError`] from a message string.
    fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Verifies that the embedded Rout grammar artifact loads.
///
/// Parses the compiled artifact shipped with this crate, constructs a
/// [`Language`] from it, and runs structural validation. Succeeds silently;
/// no I/O, no mutation, and repeated calls always produce the same result.
///
/// # Errors
///
/// Returns [`LoadError::GrammarLoad`] with a message beginning
/// `"Error loading Rout grammar"` if the artifact is corrupted or
/// incompatible. This is a terminal failure signal for build or version
/// skew between the compiled artifact and this loader.
pub fn validate_grammar_loads() -> Result<(), LoadError> {
    validate_artifact_loads(rout::GRAMMAR_JSON, "Rout")
}

/// Verifies that an arbitrary grammar artifact loads.
///
/// The same check as [`validate_grammar_loads`], applied to caller-supplied
/// artifact JSON. `language_name` is the display name used in the failure
/// diagnostic.
///
/// # Errors
///
/// Returns [`LoadError::GrammarLoad`] with a message beginning
/// `"Error loading <language_name> grammar"` on any parse, construction, or
/// validation failure.
pub fn validate_artifact_loads(json: &str, language_name: &str) -> Result<(), LoadError> {
    try_load(json).map_err(|cause| {
        LoadError::GrammarLoad(format!("Error loading {language_name} grammar: {cause}"))
    })
}

fn try_load(json: &str) -> Result<(), String> {
    let grammar = parse_grammar(json).map_err(|e| e.to_string())?;
    let _language = Language::load(&grammar).map_err(|e| e.to_string())?;
    validate(&grammar).map_err(|e| e.message)
}

/// Performs structural validation of a parsed [`Grammar`](crate::grammar::Grammar).
///
/// This function runs several consistency passes over the grammar:
///
/// - Checks that the rule set is non-empty.
/// - Checks that all referenced symbols are defined.
/// - Checks that extras are token-like.
/// - Checks that token wrappers contain no symbol references.
/// - Warns about unreachable rules.
///
/// # Errors
///
/// Returns a [`ValidationError`] if any structural constraint is violated.
pub fn validate(grammar: &Grammar) -> Result<(), ValidationError> {
    if grammar.rules.is_empty() {
        return Err(ValidationError::new("grammar has no rules"));
    }

    // Check for undefined symbol references
    check_undefined_symbols(grammar)?;

    // Extras lex between tokens, so they must be token-like themselves
    check_extras(grammar)?;

    // Token wrappers lex as one unit and cannot reference other rules
    check_token_contents(grammar)?;

    // Check for unreachable rules (non-fatal)
    check_unreachable_rules(grammar);

    Ok(())
}

fn check_undefined_symbols(grammar: &Grammar) -> Result<(), ValidationError> {
    let defined: HashSet<&str> = grammar.rules.keys().map(String::as_str).collect();

    for (rule_name, rule) in &grammar.rules {
        check_rule_symbols(rule, &defined, rule_name)?;
    }
    if let Some(extras) = &grammar.extras {
        for extra in extras {
            check_rule_symbols(extra, &defined, "extras")?;
        }
    }

    Ok(())
}

fn check_rule_symbols(
    rule: &Rule,
    defined: &HashSet<&str>,
    context: &str,
) -> Result<(), ValidationError> {
    if let Some(name) = rule.symbol_name() {
        if !defined.contains(name) {
            return Err(ValidationError::new(format!(
                "undefined symbol '{name}' referenced in rule '{context}'"
            )));
        }
    }
    for child in rule.children() {
        check_rule_symbols(child, defined, context)?;
    }
    Ok(())
}

fn check_extras(grammar: &Grammar) -> Result<(), ValidationError> {
    let Some(extras) = &grammar.extras else {
        return Ok(());
    };

    for extra in extras {
        if let Some(name) = extra.symbol_name() {
            // Symbol extras must resolve to token-like rules. Undefined
            // names are reported by the symbol pass, which runs first.
            if let Some(target) = grammar.rule(name) {
                if !(target.is_terminal() || target.is_token_wrapper()) {
                    return Err(ValidationError::new(format!(
                        "non-token extra: rule '{name}' is of type {}, but extras \
                         must reference terminals or token wrappers",
                        target.type_name()
                    )));
                }
            }
        } else if !(extra.is_terminal() || extra.is_token_wrapper()) {
            return Err(ValidationError::new(format!(
                "non-token extra of type {}: extras must be terminals, token \
                 wrappers, or references to token rules",
                extra.type_name()
            )));
        }
    }
    Ok(())
}

fn check_token_contents(grammar: &Grammar) -> Result<(), ValidationError> {
    for (rule_name, rule) in &grammar.rules {
        find_token_violations(rule, false, rule_name)?;
    }
    Ok(())
}

fn find_token_violations(
    rule: &Rule,
    inside_token: bool,
    context: &str,
) -> Result<(), ValidationError> {
    if inside_token {
        if let Some(name) = rule.symbol_name() {
            return Err(ValidationError::new(format!(
                "symbol '{name}' referenced inside a token wrapper in rule '{context}'"
            )));
        }
    }
    let inside_token = inside_token || rule.is_token_wrapper();
    for child in rule.children() {
        find_token_violations(child, inside_token, context)?;
    }
    Ok(())
}

fn check_unreachable_rules(grammar: &Grammar) {
    let Some(entry_point) = grammar.entry_point() else {
        return;
    };

    let mut reachable = HashSet::new();
    let mut to_visit = vec![entry_point.to_string()];

    while let Some(rule_name) = to_visit.pop() {
        if !reachable.insert(rule_name.clone()) {
            continue; // Already visited
        }

        if let Some(rule) = grammar.rule(&rule_name) {
            collect_referenced_symbols(rule, &mut to_visit);
        }
    }

    for rule_name in grammar.rules.keys() {
        let inline_contains = grammar
            .inline
            .as_ref()
            .is_some_and(|v| v.contains(rule_name));

        if !reachable.contains(rule_name) && !inline_contains {
            eprintln!("warning: unreachable rule '{rule_name}'");
        }
    }
}

fn collect_referenced_symbols(rule: &Rule, symbols: &mut Vec<String>) {
    if let Some(name) = rule.symbol_name() {
        symbols.push(name.to_string());
    }
    for child in rule.children() {
        collect_referenced_symbols(child, symbols);
    }
}
