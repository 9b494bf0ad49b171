/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Basis enumeration and state algebra.
//!
//! # Successor order
//!
//! For fixed `(m, n)` the canonical encodings are the non-decreasing
//! `n`-tuples over `[0, m)`. [`FockState::next_state`] steps to the next such
//! tuple in lexicographic order:
//!
//! ```text
//!   m = 3, n = 2
//!   [0,0] → [0,1] → [0,2] → [1,1] → [1,2] → [2,2] → Undefined
//!   |2,0,0> |1,1,0> |1,0,1> |0,2,0> |0,1,1> |0,0,2>
//! ```
//!
//! Every occupation vector appears exactly once and the walk ends in the
//! Undefined state after `C(n+m-1, m-1)` steps. [`Basis`] wraps the walk as
//! an iterator with an explicit `Exhausted` terminal state.
//!
//! # Tensor product
//!
//! `a ⊗ b` concatenates the encodings, shifting every mode of `b` by `a.m()`.

use alloc::vec::Vec;
use core::ops::Mul;

use crate::error::{FockError, Result};
use crate::state::{Encoding, FockState};

const FNV_OFFSET_BASIS: u64 = 14_695_981_039_346_656_037;
const FNV_PRIME: u64 = 1_099_511_628_211;

/// 64-bit FNV-1a over raw bytes.
pub fn hash_function(bytes: &[u8]) -> u64 {
    let mut h = FNV_OFFSET_BASIS;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Number of states in the `(m, n)` basis: `C(n+m-1, m-1)`.
///
/// Saturates at `u64::MAX`.
pub fn basis_size(m: usize, n: usize) -> u64 {
    if m == 0 {
        return u64::from(n == 0);
    }
    let a = match n.checked_add(m - 1) {
        Some(a) => a as u128,
        None => return u64::MAX,
    };
    let k = n.min(m - 1) as u128;
    let mut r: u128 = 1;
    for i in 1..=k {
        r = match r.checked_mul(a - k + i) {
            Some(v) => v / i,
            None => return u64::MAX,
        };
    }
    u64::try_from(r).unwrap_or(u64::MAX)
}

impl FockState {
    // ── Successor ──────────────────────────────────────────────────────────

    /// Step in place to the lexicographic successor.
    ///
    /// Once every photon sits in the last mode the state becomes Undefined
    /// (keeping `m`). Annotations are dropped, since photons move.
    pub fn next_state(&mut self) -> Result<()> {
        let m = self.m;
        let code = match &mut self.encoding {
            Encoding::Defined(code) => code,
            Encoding::Undefined => return Err(FockError::UndefinedState),
        };
        match code.iter().rposition(|&c| c + 1 < m) {
            Some(i) => {
                let next = code[i] + 1;
                for c in &mut code[i..] {
                    *c = next;
                }
            }
            None => {
                tracing::trace!(m, "basis exhausted");
                self.encoding = Encoding::Undefined;
            }
        }
        self.annotations.clear();
        Ok(())
    }

    /// Apply [`next_state`](Self::next_state) `count` times.
    ///
    /// Stepping past exhaustion fails and leaves `self` untouched.
    pub fn advance(&mut self, count: usize) -> Result<()> {
        *self = self.plus(count)?;
        Ok(())
    }

    /// The state `count` successor steps after this one.
    pub fn plus(&self, count: usize) -> Result<FockState> {
        if self.is_undefined() {
            return Err(FockError::UndefinedState);
        }
        let mut state = self.clone();
        for _ in 0..count {
            state.next_state()?;
        }
        Ok(state)
    }

    /// Iterate the full `(m, n)` basis in successor order.
    pub fn basis(m: usize, n: usize) -> Basis {
        Basis::from(FockState::with_particles(m, n))
    }

    // ── Products and queries ───────────────────────────────────────────────

    /// Tensor product `self ⊗ other`.
    pub fn tensor(&self, other: &FockState) -> Result<FockState> {
        let a = self.defined_modes()?;
        let b = other.defined_modes()?;
        let mut code = Vec::with_capacity(a.len() + b.len());
        code.extend_from_slice(a);
        code.extend(b.iter().map(|&c| c + self.m));
        let mut state = FockState::from_encoding(self.m + other.m, code);
        if self.has_annotations() || other.has_annotations() {
            state.annotations = (0..a.len())
                .map(|k| self.annotation_of(k))
                .chain((0..b.len()).map(|k| other.annotation_of(k)))
                .collect();
        }
        Ok(state)
    }

    /// Number of photons in `mode`.
    pub fn occupation(&self, mode: usize) -> Result<usize> {
        if mode >= self.m {
            return Err(FockError::OutOfRange { mode, modes: self.m });
        }
        let code = self.defined_modes()?;
        Ok(code
            .iter()
            .take_while(|&&c| c <= mode)
            .filter(|&&c| c == mode)
            .count())
    }

    /// Product of the factorials of the per-mode occupations.
    ///
    /// Saturates at `u64::MAX`.
    pub fn prodnfact(&self) -> Result<u64> {
        let code = self.defined_modes()?;
        let mut p: u64 = 1;
        for run in code.chunk_by(|a, b| a == b) {
            for k in 2..=run.len() as u64 {
                p = p.saturating_mul(k);
            }
        }
        Ok(p)
    }

    /// Stable 64-bit hash of the annotation-free rendering.
    ///
    /// Equal states render identically and therefore hash equal.
    pub fn hash64(&self) -> u64 {
        hash_function(self.to_str(false).as_bytes())
    }
}

impl Mul for &FockState {
    type Output = Result<FockState>;

    fn mul(self, rhs: Self) -> Result<FockState> {
        self.tensor(rhs)
    }
}

// ─── Basis iterator ─────────────────────────────────────────────────────────

enum Walk {
    Active(FockState),
    Exhausted,
}

/// Iterator over successive basis states, ending when the walk is exhausted.
pub struct Basis {
    walk: Walk,
}

impl From<FockState> for Basis {
    /// Start the walk at `start`. An Undefined start yields nothing.
    fn from(start: FockState) -> Self {
        let walk = if start.is_defined() {
            Walk::Active(start)
        } else {
            Walk::Exhausted
        };
        Self { walk }
    }
}

impl Iterator for Basis {
    type Item = FockState;

    fn next(&mut self) -> Option<FockState> {
        match core::mem::replace(&mut self.walk, Walk::Exhausted) {
            Walk::Exhausted => None,
            Walk::Active(current) => {
                let mut successor = current.clone();
                if successor.next_state().is_ok() && successor.is_defined() {
                    self.walk = Walk::Active(successor);
                }
                Some(current)
            }
        }
    }
}

impl core::iter::FusedIterator for Basis {}
