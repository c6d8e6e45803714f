//! Core types for representing rule nodes in a compiled grammar artifact.
//!
//! This module contains the types used to model individual rule nodes in the
//! JSON rule graph emitted by the external grammar compiler. The root
//! [`Grammar`](crate::grammar::Grammar) structure lives one level up.

use serde::Deserialize;

/// A single rule node in the compiled artifact's rule graph.
///
/// Each node is identified by a [`RuleType`] discriminant and carries the
/// type-specific payload fields the artifact format defines: `value` for
/// literals and precedence levels, `name` for symbol references, `content`
/// for unary wrappers, and `members` for compound constructs.
///
/// A `Rule` can be atomic (a literal or regex token) or composite (a
/// sequence, choice, or precedence group). Together the nodes form a
/// self-describing syntax graph that a parsing engine loads.
#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    /// The discriminant identifying what kind of rule node this is.
    #[serde(rename = "type")]
    pub rule_type: RuleType,

    /// Optional literal or numeric value, depending on rule kind.
    pub value: Option<RuleValue>,

    /// Optional name used by `SYMBOL`, `FIELD`, or `ALIAS` nodes.
    pub name: Option<String>,

    /// Optional nested rule for unary constructs such as `REPEAT` or `TOKEN`.
    pub content: Option<Box<Rule>>,

    /// Optional list of child rules for compound constructs (`SEQ`, `CHOICE`).
    pub members: Option<Vec<Rule>>,

    /// Whether the node produced by this rule is named.
    pub named: Option<bool>,
}

/// A literal or numeric value attached to a rule node.
///
/// `RuleValue` abstracts the small scalar payloads the artifact attaches to
/// nodes, such as precedence numbers or literal match text. The artifact
/// stores both as bare JSON scalars under the same `value` key, so the two
/// variants are distinguished by JSON type alone.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleValue {
    /// A string literal or pattern source (e.g. `"TRUE"`, `"\d+"`).
    String(String),

    /// An integer numeric value (used by precedence wrappers).
    Integer(i32),
}

/// The enumeration of all rule-node types the artifact format defines.
///
/// Each variant corresponds to one of the `type` strings found in the JSON
/// rule graph. A loader must recognize every variant even when a particular
/// grammar (like Rout) uses only a handful of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    /// An empty (ε) production.
    Blank,
    /// A literal string token.
    String,
    /// A regular-expression pattern token.
    Pattern,
    /// A reference to another named rule.
    Symbol,
    /// A rule that matches one of several alternatives.
    Choice,
    /// A sequential composition of member rules.
    Seq,
    /// A zero-or-more repetition of a rule.
    Repeat,
    /// A one-or-more repetition of a rule.
    Repeat1,
    /// A generic precedence wrapper.
    Prec,
    /// A left-associative precedence wrapper.
    PrecLeft,
    /// A right-associative precedence wrapper.
    PrecRight,
    /// A dynamic (runtime) precedence wrapper.
    PrecDynamic,
    /// A named field applied to a subrule.
    Field,
    /// An alias providing an alternate node name.
    Alias,
    /// A tokenization wrapper: the subtree lexes as a single token.
    Token,
    /// A token that must appear immediately without leading trivia.
    ImmediateToken,
    /// A reserved internal placeholder.
    Reserved,
}

impl Rule {
    /// Returns the canonical string name of this rule type, as spelled in
    /// the artifact JSON.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.rule_type {
            RuleType::Blank => "BLANK",
            RuleType::String => "STRING",
            RuleType::Pattern => "PATTERN",
            RuleType::Symbol => "SYMBOL",
            RuleType::Choice => "CHOICE",
            RuleType::Seq => "SEQ",
            RuleType::Repeat => "REPEAT",
            RuleType::Repeat1 => "REPEAT1",
            RuleType::Prec => "PREC",
            RuleType::PrecLeft => "PREC_LEFT",
            RuleType::PrecRight => "PREC_RIGHT",
            RuleType::PrecDynamic => "PREC_DYNAMIC",
            RuleType::Field => "FIELD",
            RuleType::Alias => "ALIAS",
            RuleType::Token => "TOKEN",
            RuleType::ImmediateToken => "IMMEDIATE_TOKEN",
            RuleType::Reserved => "RESERVED",
        }
    }

    /// Returns `true` if this node represents a terminal (lexical) token.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self.rule_type, RuleType::String | RuleType::Pattern)
    }

    /// Returns `true` if this node is a symbol reference.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        matches!(self.rule_type, RuleType::Symbol)
    }

    /// Returns `true` if this node is a `TOKEN` or `IMMEDIATE_TOKEN` wrapper.
    ///
    /// Everything beneath a token wrapper lexes as one opaque token, so
    /// loaders treat such subtrees differently: literals inside them do not
    /// become anonymous node kinds and symbol references inside them are
    /// rejected outright.
    #[must_use]
    pub fn is_token_wrapper(&self) -> bool {
        matches!(self.rule_type, RuleType::Token | RuleType::ImmediateToken)
    }

    /// Returns the referenced symbol name, if applicable.
    #[must_use]
    pub fn symbol_name(&self) -> Option<&str> {
        if self.is_symbol() {
            self.name.as_deref()
        } else {
            None
        }
    }

    /// Returns the numeric precedence level if this node is a precedence
    /// wrapper.
    #[must_use]
    pub fn precedence(&self) -> Option<i32> {
        match self.rule_type {
            RuleType::Prec | RuleType::PrecLeft | RuleType::PrecRight | RuleType::PrecDynamic => {
                self.value.as_ref().and_then(|v| match v {
                    RuleValue::Integer(i) => Some(*i),
                    RuleValue::String(_) => None,
                })
            }
            _ => None,
        }
    }

    /// Returns the literal string value if this is a `STRING` node.
    #[must_use]
    pub fn string_value(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::String) {
            self.value.as_ref().and_then(|v| match v {
                RuleValue::String(s) => Some(s.as_str()),
                RuleValue::Integer(_) => None,
            })
        } else {
            None
        }
    }

    /// Returns the pattern source if this is a `PATTERN` node.
    #[must_use]
    pub fn pattern_value(&self) -> Option<&str> {
        if matches!(self.rule_type, RuleType::Pattern) {
            self.value.as_ref().and_then(|v| match v {
                RuleValue::String(s) => Some(s.as_str()),
                RuleValue::Integer(_) => None,
            })
        } else {
            None
        }
    }

    /// Returns every direct child node of this rule.
    ///
    /// Unary wrappers contribute their `content`; compound constructs
    /// contribute their `members`. Terminal nodes yield nothing. All of the
    /// loader's traversals (symbol resolution, reachability, node-kind
    /// collection) are built on this.
    #[must_use]
    pub fn children(&self) -> Vec<&Rule> {
        let mut out = Vec::new();
        if let Some(content) = &self.content {
            out.push(content.as_ref());
        }
        if let Some(members) = &self.members {
            out.extend(members.iter());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_wrapper() {
        let json = r#"{
            "type": "TOKEN",
            "content": {
                "type": "PREC",
                "value": 9,
                "content": {"type": "STRING", "value": "TRUE"}
            }
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.is_token_wrapper());

        let prec = rule.content.as_ref().unwrap();
        assert_eq!(prec.precedence(), Some(9));
        assert_eq!(prec.content.as_ref().unwrap().string_value(), Some("TRUE"));
    }

    #[test]
    fn test_value_accepts_string_and_integer_payloads() {
        // The artifact stores precedence levels and literal text under the
        // same `value` key, as bare scalars of different JSON types.
        let prec: Rule =
            serde_json::from_str(r#"{"type": "PREC", "value": 1, "content": {"type": "BLANK"}}"#)
                .unwrap();
        assert_eq!(prec.precedence(), Some(1));

        let literal: Rule =
            serde_json::from_str(r#"{"type": "STRING", "value": "TRUE"}"#).unwrap();
        assert_eq!(literal.string_value(), Some("TRUE"));
    }

    #[test]
    fn test_children_of_compound_rule() {
        let json = r#"{
            "type": "SEQ",
            "members": [
                {"type": "PATTERN", "value": "\\d+"},
                {"type": "STRING", "value": "."},
                {"type": "SYMBOL", "name": "exponent"}
            ]
        }"#;

        let rule: Rule = serde_json::from_str(json).unwrap();

        let children = rule.children();
        assert_eq!(children.len(), 3);
        assert!(children[0].is_terminal());
        assert_eq!(children[0].pattern_value(), Some("\\d+"));
        assert_eq!(children[1].string_value(), Some("."));
        assert_eq!(children[2].symbol_name(), Some("exponent"));
        assert_eq!(children[2].type_name(), "SYMBOL");
    }

    #[test]
    fn test_terminals_have_no_children() {
        let json = r#"{"type": "PATTERN", "value": "\\s+"}"#;

        let rule: Rule = serde_json::from_str(json).unwrap();
        assert!(rule.is_terminal());
        assert!(rule.children().is_empty());
        assert_eq!(rule.precedence(), None);
    }
}
