use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::config::ConvertConfig;
use crate::convert::convert_with;
use crate::metrics::METRICS;

// ──────────────────────────────────────────────────────────────────────────────
// Python-API
// ──────────────────────────────────────────────────────────────────────────────

/// TCX-tekst -> Turtle (eller N-Triples via config). Feil blir ValueError.
#[pyfunction]
#[pyo3(signature = (tcx, config_json = None))]
fn convert_tcx(py: Python<'_>, tcx: &str, config_json: Option<&str>) -> PyResult<String> {
    let config = match config_json {
        Some(text) => ConvertConfig::from_json(text).map_err(|e| PyValueError::new_err(e.to_string()))?,
        None => ConvertConfig::default(),
    };

    // Konverteringen holder ingen Python-objekter; slipp GIL-en
    py.allow_threads(|| convert_with(tcx, &config, &METRICS))
        .map(|c| c.text)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Prosessens tellere i Prometheus-tekstformat.
#[pyfunction]
fn metrics_text() -> PyResult<String> {
    METRICS
        .render()
        .map_err(|e| PyValueError::new_err(format!("metrics render failed: {e}")))
}

#[pymodule]
fn tcxgraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_tcx, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
