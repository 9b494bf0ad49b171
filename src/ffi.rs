//! Python FFI bindings via PyO3.
//!
//! Exposes [`FockState`] and [`Annotation`] to Python.
//!
//! # Building the Python extension
//!
//! ```bash
//! pip install maturin
//! maturin develop --features python-ffi
//! ```
//!
//! # Usage
//!
//! ```python
//! from fock_core import FockState
//!
//! s = FockState("|2,0,1>")
//! print(s.m, s.n, s[0])          # 3 3 2
//! print(s * FockState([0, 1]))   # |2,0,1,0,1>
//! while s.is_defined:
//!     print(s)
//!     s.next_state()
//! parts = FockState("|{_:0},{_:1}>").separate_state()
//! ```

#![allow(non_snake_case)]

use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::annotation::Annotation as RustAnnotation;
use crate::error::FockError;
use crate::state::FockState as RustFockState;

fn to_py_err(err: FockError) -> PyErr {
    match err {
        FockError::OutOfRange { .. } | FockError::InvalidPhoton { .. } => {
            PyIndexError::new_err(err.to_string())
        }
        _ => PyValueError::new_err(err.to_string()),
    }
}

// ── Annotation ────────────────────────────────────────────────────────────────

/// Photon distinguishability tag, e.g. `Annotation("P:H")`.
#[pyclass(name = "Annotation")]
#[derive(Clone)]
pub struct PyAnnotation {
    inner: RustAnnotation,
}

#[pymethods]
impl PyAnnotation {
    /// Parse a `key:value[,key:value...]` token.
    #[new]
    #[pyo3(signature = (token=""))]
    pub fn new(token: &str) -> PyResult<Self> {
        let inner = RustAnnotation::parse(token).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Merge with `other` if compatible, else `None`.
    pub fn compatible_annotation(&self, other: &PyAnnotation) -> Option<PyAnnotation> {
        self.inner
            .compatible_annotation(&other.inner)
            .map(|inner| PyAnnotation { inner })
    }

    /// Python str: canonical token text.
    pub fn __str__(&self) -> String {
        self.inner.to_str()
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("Annotation('{}')", self.inner.to_str())
    }

    /// Equality by tag set.
    pub fn __eq__(&self, other: &PyAnnotation) -> bool {
        self.inner == other.inner
    }
}

// ── FockState ─────────────────────────────────────────────────────────────────

/// A distribution of photons over modes.
///
/// Construct from notation (`FockState("|1,0>")`), from an occupation list
/// (`FockState([1, 0])`), or with no argument for the undefined state.
#[pyclass(name = "FockState")]
#[derive(Clone)]
pub struct PyFockState {
    inner: RustFockState,
}

fn wrap(inner: RustFockState) -> PyFockState {
    PyFockState { inner }
}

#[pymethods]
impl PyFockState {
    /// Create a FockState from a string, an occupation list, or nothing.
    #[new]
    #[pyo3(signature = (state=None))]
    pub fn new(state: Option<&Bound<'_, PyAny>>) -> PyResult<Self> {
        let Some(state) = state else {
            return Ok(wrap(RustFockState::new()));
        };
        if let Ok(text) = state.extract::<String>() {
            return RustFockState::parse(&text).map(wrap).map_err(to_py_err);
        }
        let occupation: Vec<usize> = state.extract()?;
        Ok(wrap(RustFockState::from_occupation(&occupation)))
    }

    /// Number of modes.
    #[getter]
    pub fn m(&self) -> usize {
        self.inner.m()
    }

    /// Number of photons.
    #[getter]
    pub fn n(&self) -> usize {
        self.inner.n()
    }

    /// `False` for the undefined (past-the-end) state.
    #[getter]
    pub fn is_defined(&self) -> bool {
        self.inner.is_defined()
    }

    /// Occupation list, e.g. `[2, 0, 1]`.
    pub fn to_list(&self) -> PyResult<Vec<usize>> {
        self.inner.to_occupation().map_err(to_py_err)
    }

    /// Mode of photon `photon`.
    pub fn photon2mode(&self, photon: usize) -> PyResult<usize> {
        self.inner.photon_to_mode(photon).map_err(to_py_err)
    }

    /// Step in place to the next basis state.
    pub fn next_state(&mut self) -> PyResult<()> {
        self.inner.next_state().map_err(to_py_err)
    }

    /// Product of occupation factorials.
    pub fn prodnfact(&self) -> PyResult<u64> {
        self.inner.prodnfact().map_err(to_py_err)
    }

    /// Sub-state over `start:end:step`.
    #[pyo3(signature = (start, end, step=1))]
    pub fn slice(&self, start: isize, end: isize, step: usize) -> PyResult<Self> {
        self.inner.slice(start, end, step).map(wrap).map_err(to_py_err)
    }

    /// Copy with modes `start:end` replaced by `fs`.
    pub fn set_slice(&self, fs: &PyFockState, start: isize, end: isize) -> PyResult<Self> {
        self.inner.set_slice(&fs.inner, start, end).map(wrap).map_err(to_py_err)
    }

    /// Split into mutually distinguishable sub-states.
    pub fn separate_state(&self) -> Vec<PyFockState> {
        self.inner.separate_state().into_iter().map(wrap).collect()
    }

    /// Tags carried by photons in `mode`.
    pub fn get_mode_annotations(&self, mode: usize) -> PyResult<Vec<PyAnnotation>> {
        let tags = self.inner.get_mode_annotations(mode).map_err(to_py_err)?;
        Ok(tags.into_iter().map(|inner| PyAnnotation { inner }).collect())
    }

    /// Replace the tags of photons in `mode`.
    pub fn set_mode_annotations(&mut self, mode: usize, annotations: Vec<PyAnnotation>) -> PyResult<()> {
        let tags: Vec<RustAnnotation> = annotations.into_iter().map(|a| a.inner).collect();
        self.inner.set_mode_annotations(mode, &tags).map_err(to_py_err)
    }

    /// Drop every annotation.
    pub fn clear_annotations(&mut self) {
        self.inner.clear_annotations();
    }

    /// Python len: number of modes.
    pub fn __len__(&self) -> usize {
        self.inner.m()
    }

    /// Occupation of `mode`; negative indices count from the end.
    pub fn __getitem__(&self, mode: isize) -> PyResult<usize> {
        let m = self.inner.m() as isize;
        let resolved = if mode < 0 { mode + m } else { mode };
        if resolved < 0 {
            return Err(PyIndexError::new_err(format!("mode {mode} out of range")));
        }
        self.inner.occupation(resolved as usize).map_err(to_py_err)
    }

    /// Tensor product.
    pub fn __mul__(&self, other: &PyFockState) -> PyResult<Self> {
        self.inner.tensor(&other.inner).map(wrap).map_err(to_py_err)
    }

    /// Equality on the canonical encoding (annotations ignored).
    pub fn __eq__(&self, other: &PyFockState) -> bool {
        self.inner == other.inner
    }

    /// Stable hash of the rendering.
    pub fn __hash__(&self) -> u64 {
        self.inner.hash64()
    }

    /// Python str: notation with annotations.
    pub fn __str__(&self) -> String {
        self.inner.to_str(true)
    }

    /// Python repr string.
    pub fn __repr__(&self) -> String {
        format!("FockState('{}')", self.inner.to_str(true))
    }
}

// ── Module entry point ────────────────────────────────────────────────────────

/// Fock state encoding Python bindings.
#[pymodule]
pub fn fock_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyAnnotation>()?;
    m.add_class::<PyFockState>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
