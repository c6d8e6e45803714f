//! Python bindings for the Rout grammar loader.
//!
//! Exposes the load check and the loaded language's symbol table as the
//! `_rout_grammar` extension module, so Python test suites can assert the
//! compiled artifact loads without linking a native parser.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Returns `True` when the embedded Rout grammar artifact loads cleanly.
#[pyfunction]
fn language_loads() -> bool {
    rout_grammar::validate_grammar_loads().is_ok()
}

/// Returns the node-kind table of the loaded Rout language, in id order.
#[pyfunction]
fn node_kinds() -> PyResult<Vec<String>> {
    let language =
        rout_grammar::rout::language().map_err(|e| PyValueError::new_err(e.to_string()))?;
    Ok((0..language.node_kind_count())
        .filter_map(|id| language.node_kind_for_id(id).map(str::to_string))
        .collect())
}

/// Returns the artifact format version the loader was built against.
#[pyfunction]
fn abi_version() -> usize {
    rout_grammar::language::ABI_VERSION
}

#[pymodule]
fn _rout_grammar(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(language_loads, m)?)?;
    m.add_function(wrap_pyfunction!(node_kinds, m)?)?;
    m.add_function(wrap_pyfunction!(abi_version, m)?)?;
    Ok(())
}
