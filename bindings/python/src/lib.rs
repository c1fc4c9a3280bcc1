//! Python bindings for the molecular formula comparator
//!
//! Thin wrapper around `molcmp-core` — ZERO logic here.
//! All behavior comes from the Rust implementation.

use molcmp_core::IgnoreSet;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn ignore_set(ignore: Option<&str>) -> IgnoreSet {
    ignore.map(IgnoreSet::from).unwrap_or_default()
}

/// Normalize a formula to its canonical form.
///
/// Args:
///     formula: formula text, e.g. "C6H8N2O2R2'"
///     ignore: characters to drop before parsing (default: ")(n'")
///
/// Returns:
///     Canonical string: each element repeated by its count, sorted
///
/// Raises:
///     ValueError: If the canonical form would exceed the length limit
#[pyfunction]
#[pyo3(signature = (formula, ignore=None))]
fn normalize(formula: &str, ignore: Option<&str>) -> PyResult<String> {
    molcmp_core::try_normalize(formula, &ignore_set(ignore))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Check whether two formulas describe the same element multiset.
///
/// Args:
///     a: first formula
///     b: second formula
///     ignore: characters to drop before parsing (default: ")(n'")
///
/// Returns:
///     True when both canonical forms are equal
#[pyfunction]
#[pyo3(signature = (a, b, ignore=None))]
fn is_equivalent(a: &str, b: &str, ignore: Option<&str>) -> bool {
    molcmp_core::is_equivalent(a, b, &ignore_set(ignore))
}

/// Parse a formula into element groups.
///
/// Args:
///     formula: formula text
///     ignore: characters to drop before parsing (default: ")(n'")
///
/// Returns:
///     JSON string: [{"symbol": "C", "count": 6}, ...] in canonical order
///
/// Raises:
///     ValueError: If the groups cannot be serialized
#[pyfunction]
#[pyo3(signature = (formula, ignore=None))]
fn element_groups(formula: &str, ignore: Option<&str>) -> PyResult<String> {
    let groups = molcmp_core::element_groups(formula, &ignore_set(ignore));
    serde_json::to_string(&groups)
        .map_err(|e| PyValueError::new_err(format!("Serialization error: {}", e)))
}

/// molcmp Python module — molecular formula comparison
#[pymodule]
fn molcmp(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(is_equivalent, m)?)?;
    m.add_function(wrap_pyfunction!(element_groups, m)?)?;
    Ok(())
}
