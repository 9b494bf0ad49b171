//! Error taxonomy for Fock state parsing and algebra.
//!
//! Every failure is caller-visible and non-fatal. Operations either succeed
//! and leave the canonical encoding intact, or fail before mutating anything.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, FockError>;

/// Defect found while decoding the textual notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The first non-blank character is not `[`, `(` or `|`.
    #[error("bad opening delimiter")]
    BadOpen,
    /// A `{...}` annotation was attached to an explicit zero count.
    #[error("annotation on 0 photons")]
    AnnotationOnZero,
    /// A `{` was never closed.
    #[error("no annotation close")]
    UnterminatedAnnotation,
    /// The annotation token between braces is malformed.
    #[error("malformed annotation")]
    InvalidAnnotation,
    /// The closing delimiter does not match the opener.
    #[error("bad close")]
    BadClose,
    /// Characters remain after the closing delimiter.
    #[error("extra chars at byte {position}")]
    TrailingCharacters {
        /// Byte offset of the first offending character.
        position: usize,
    },
    /// An occupation count does not fit in `usize`.
    #[error("occupation count overflow")]
    CountOverflow,
}

/// Any failure raised by a [`FockState`](crate::FockState) operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FockError {
    /// Malformed textual notation.
    #[error("invalid fock state representation ({0})")]
    Parse(#[from] ParseError),
    /// Algebra, indexing or slicing attempted on an Undefined state.
    #[error("cannot make operation on undefined state")]
    UndefinedState,
    /// Occupation query outside `[0, modes)`.
    #[error("mode {mode} out of range for {modes} modes")]
    OutOfRange {
        /// Requested mode.
        mode: usize,
        /// Mode count of the state.
        modes: usize,
    },
    /// Annotation accessor called with a mode outside `[0, modes)`.
    #[error("invalid mode index {mode} for {modes} modes")]
    InvalidMode {
        /// Requested mode.
        mode: usize,
        /// Mode count of the state.
        modes: usize,
    },
    /// Photon index outside `[0, n)`.
    #[error("invalid photon index {photon} for {photons} photons")]
    InvalidPhoton {
        /// Requested photon.
        photon: usize,
        /// Photon count of the state.
        photons: usize,
    },
    /// More annotations supplied than photons occupy the mode.
    #[error("{given} annotations for {occupied} photons in mode {mode}")]
    TooManyAnnotations {
        /// Target mode.
        mode: usize,
        /// Number of annotations supplied.
        given: usize,
        /// Photons present in the mode.
        occupied: usize,
    },
    /// Replacement state in `set_slice` has the wrong number of modes.
    #[error("invalid fockstate to replace in slice: expected {expected} modes, found {found}")]
    SliceWidthMismatch {
        /// Width of the slice being replaced.
        expected: usize,
        /// Mode count of the replacement.
        found: usize,
    },
    /// Slice step of zero.
    #[error("slice step must be at least 1")]
    InvalidStep,
    /// Raw mode buffer is unsorted or references a mode `>= modes`.
    #[error("invalid mode encoding at particle {particle}")]
    InvalidEncoding {
        /// Index of the first offending particle.
        particle: usize,
    },
}
