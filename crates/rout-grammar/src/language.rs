//! The language object constructed from a compiled grammar artifact.
//!
//! A [`Language`] is what a parsing engine actually consumes: a symbol table
//! of node kinds, a field-name table, and the counts and version metadata
//! the engine checks before parsing. Construction is the load boundary the
//! rest of this crate exists to validate: a valid artifact must always yield
//! a non-empty `Language`, and failure to construct one signals a corrupted
//! or version-incompatible artifact.

use crate::grammar::{Grammar, LoadError, Rule, RuleType};
use std::collections::BTreeSet;

/// The artifact format version this loader understands.
///
/// Grammar artifacts compiled against a different major format revision are
/// not guaranteed to load; consumers compare this constant against their
/// engine's supported range before parsing.
pub const ABI_VERSION: usize = 14;

/// A runtime handle wrapping a compiled grammar artifact.
///
/// Constructed by [`Language::load`]. Immutable after construction: repeated
/// loads of the same artifact produce identical objects.
#[derive(Debug, Clone)]
pub struct Language {
    name: String,
    node_kinds: Vec<NodeKind>,
    fields: Vec<String>,
    external_count: usize,
    entry: String,
}

/// One entry in the node-kind table: the kind string plus whether nodes of
/// this kind are named (rule-backed) or anonymous (literal tokens).
#[derive(Debug, Clone)]
struct NodeKind {
    kind: String,
    named: bool,
}

impl Language {
    /// Constructs a language object from a parsed grammar artifact.
    ///
    /// Named node kinds come from the artifact's visible rules (those whose
    /// names do not start with `_`); anonymous kinds come from literal
    /// tokens appearing outside `TOKEN` wrappers, in rule bodies or extras.
    /// Field names are collected from `FIELD` nodes.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::GrammarLoad`] when the artifact defines no rules
    /// at all, or when it yields no node kinds — either way the resulting
    /// object would be empty and unusable by a parsing engine.
    pub fn load(grammar: &Grammar) -> Result<Self, LoadError> {
        let entry = grammar
            .entry_point()
            .ok_or_else(|| LoadError::GrammarLoad("grammar has no rules".into()))?
            .to_string();

        let mut named: BTreeSet<&str> = BTreeSet::new();
        let mut anonymous: BTreeSet<&str> = BTreeSet::new();
        let mut fields: BTreeSet<&str> = BTreeSet::new();

        for (rule_name, rule) in &grammar.rules {
            if !rule_name.starts_with('_') {
                named.insert(rule_name);
            }
            collect_node_info(rule, &mut anonymous, &mut fields);
        }
        if let Some(extras) = &grammar.extras {
            for extra in extras {
                collect_node_info(extra, &mut anonymous, &mut fields);
            }
        }

        let mut node_kinds: Vec<NodeKind> = named
            .iter()
            .map(|kind| NodeKind {
                kind: (*kind).to_string(),
                named: true,
            })
            .collect();
        node_kinds.extend(anonymous.iter().map(|kind| NodeKind {
            kind: (*kind).to_string(),
            named: false,
        }));

        if node_kinds.is_empty() {
            return Err(LoadError::GrammarLoad(
                "grammar defines no visible node kinds".into(),
            ));
        }

        Ok(Self {
            name: grammar.name.clone(),
            node_kinds,
            fields: fields.iter().map(|f| (*f).to_string()).collect(),
            external_count: grammar.externals.as_ref().map_or(0, Vec::len),
            entry,
        })
    }

    /// The short name of the language (e.g. `"rout"`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The name of the entry-point rule a parse starts from.
    #[must_use]
    pub fn entry_point(&self) -> &str {
        &self.entry
    }

    /// Total number of distinct node kinds (named plus anonymous).
    #[must_use]
    pub fn node_kind_count(&self) -> usize {
        self.node_kinds.len()
    }

    /// The kind string for the node-kind id, if it is in range.
    ///
    /// Ids are dense and stable for a given artifact: named kinds first in
    /// lexicographic order, then anonymous kinds.
    #[must_use]
    pub fn node_kind_for_id(&self, id: usize) -> Option<&str> {
        self.node_kinds.get(id).map(|k| k.kind.as_str())
    }

    /// Whether the node-kind id refers to a named (rule-backed) kind.
    #[must_use]
    pub fn node_kind_is_named(&self, id: usize) -> Option<bool> {
        self.node_kinds.get(id).map(|k| k.named)
    }

    /// Number of distinct field names the grammar defines.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The field name for the field id, if it is in range.
    #[must_use]
    pub fn field_name_for_id(&self, id: usize) -> Option<&str> {
        self.fields.get(id).map(String::as_str)
    }

    /// Number of tokens the grammar delegates to an external scanner.
    #[must_use]
    pub fn external_count(&self) -> usize {
        self.external_count
    }

    /// The artifact format version this object was loaded under.
    #[must_use]
    pub fn abi_version(&self) -> usize {
        ABI_VERSION
    }
}

/// Walks a rule body collecting anonymous literal kinds and field names.
///
/// Token wrappers are opaque: their subtrees lex as a single token, so
/// literals beneath them never surface as anonymous node kinds.
fn collect_node_info<'g>(
    rule: &'g Rule,
    anonymous: &mut BTreeSet<&'g str>,
    fields: &mut BTreeSet<&'g str>,
) {
    if rule.is_token_wrapper() {
        return;
    }
    if let Some(literal) = rule.string_value() {
        anonymous.insert(literal);
    }
    if matches!(rule.rule_type, RuleType::Field) {
        if let Some(name) = rule.name.as_deref() {
            fields.insert(name);
        }
    }
    for child in rule.children() {
        collect_node_info(child, anonymous, fields);
    }
}
