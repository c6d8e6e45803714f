//! The compiled Rout grammar artifact shipped with this crate.
//!
//! Rout is the transcript output format of the R statistical environment:
//! `.Rout` files interleave echoed commands, numeric output, and console
//! punctuation. The grammar tokenizes that stream into words, numbers,
//! logical constants, and punctuation so editors can highlight it.
//!
//! This module plays the role a per-language binding plays in other
//! ecosystems: it owns the compiled artifact and exposes one function that
//! hands a loaded [`Language`] to the consumer.

use crate::grammar::{parse_grammar, LoadError};
use crate::language::Language;

/// The compiled Rout grammar artifact, as emitted by the external grammar
/// compiler. Statically included so loading involves no I/O.
pub const GRAMMAR_JSON: &str = include_str!("../grammar/rout.json");

/// Loads the Rout language from the embedded artifact.
///
/// # Errors
///
/// Returns [`LoadError`] if the embedded artifact fails to parse or yields
/// an empty language object. For a correctly built crate this never fails;
/// a failure here signals a corrupted artifact or version skew between the
/// artifact and this loader.
pub fn language() -> Result<Language, LoadError> {
    let grammar = parse_grammar(GRAMMAR_JSON)?;
    Language::load(&grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_is_rout() {
        let language = language().unwrap();
        assert_eq!(language.name(), "rout");
        assert_eq!(language.entry_point(), "source_file");
    }

    #[test]
    fn test_rout_node_kinds() {
        let language = language().unwrap();

        // Ten named rules; every literal sits inside a token wrapper, so
        // there are no anonymous kinds.
        assert_eq!(language.node_kind_count(), 10);
        for id in 0..language.node_kind_count() {
            assert_eq!(language.node_kind_is_named(id), Some(true));
        }

        let kinds: Vec<_> = (0..language.node_kind_count())
            .filter_map(|id| language.node_kind_for_id(id))
            .collect();
        assert!(kinds.contains(&"source_file"));
        assert!(kinds.contains(&"routNumber"));
        assert!(kinds.contains(&"routTrue"));
        assert!(kinds.contains(&"routInf"));
    }

    #[test]
    fn test_rout_has_no_fields_or_externals() {
        let language = language().unwrap();
        assert_eq!(language.field_count(), 0);
        assert_eq!(language.external_count(), 0);
    }
}
