//! # fock-core
//!
//! Canonical encoding of photonic Fock states: `n` photons spread over `m`
//! discrete modes.
//!
//! ---
//!
//! ## One encoding, three shapes
//!
//! A state is stored as the sorted list of the mode each photon occupies.
//! Sorting makes the encoding canonical, so equality, hashing and ordering of
//! basis states all reduce to comparing short integer lists.
//!
//! | Shape | Example | Meaning |
//! |-------|---------|---------|
//! | Populated | `\|2,0,1>` | photons present, encoding `[0, 0, 2]` |
//! | Empty-defined | `\|0,0,0>` | vacuum over a known number of modes |
//! | Undefined | `\|,,>` | no such state; end of a basis walk |
//!
//! ## The pipeline
//!
//! ```text
//! "|{P:H}1,0,2>" ──parse──→ FockState ──next_state / Basis──→ enumeration
//!                              │
//!                              ├── tensor (⊗), occupation, prodnfact, hash64
//!                              ├── slice / set_slice
//!                              └── separate_state ──→ Vec<FockState>
//!                                         ↑
//!                                     Annotation (distinguishability tags)
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`state`] | [`FockState`] | Canonical encoding, equality, rendering, annotation storage |
//! | [`parse`] | [`FockState::parse`] | Textual notation decoder |
//! | [`algebra`] | [`Basis`], [`basis_size`] | Successor, basis walk, tensor product, weights |
//! | [`slice`](mod@slice) | [`FockState::slice`] | Mode-range extraction and replacement |
//! | [`partition`] | [`FockState::separate_state`] | Split into mutually distinguishable sub-states |
//! | [`annotation`] | [`Annotation`] | Reference `key:value` photon tags |
//! | [`error`] | [`FockError`], [`ParseError`] | Error taxonomy |
//!
//! ## Example
//!
//! ```rust
//! use fock_core::FockState;
//!
//! let s = FockState::parse("|2,0,1>").unwrap();
//! assert_eq!((s.m(), s.n()), (3, 3));
//! assert_eq!(s.prodnfact().unwrap(), 2);
//!
//! let all: Vec<_> = FockState::basis(3, 2).map(|s| s.to_string()).collect();
//! assert_eq!(all, ["|2,0,0>", "|1,1,0>", "|1,0,1>", "|0,2,0>", "|0,1,1>", "|0,0,2>"]);
//! ```
//!
//! ## `no_std`
//!
//! This crate is `#![no_std]` by default and needs only `alloc`. Enable the
//! `std` feature to link std, `serde` to (de)serialise states as their
//! textual notation, and `python-ffi` for the PyO3 bindings.
//!
//! ## License
//!
//! Business Source License 1.1.

#![cfg_attr(not(any(feature = "std", feature = "python-ffi")), no_std)]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

#[cfg(any(feature = "std", feature = "python-ffi"))]
extern crate std;

pub mod annotation;
pub mod error;
pub mod state;
pub mod parse;
pub mod algebra;
pub mod slice;
pub mod partition;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use algebra::{basis_size, hash_function, Basis};
pub use annotation::Annotation;
pub use error::{FockError, ParseError, Result};
pub use state::FockState;
