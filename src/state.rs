/*
 * This source code is licensed under the Business Source License 1.1.
 * See LICENSE in the root directory for full details.
 */

//! Canonical Fock state encoding and lifecycle.
//!
//! A [`FockState`] records `n` photons over `m` modes as the ordered list of
//! the mode each photon occupies. The list is kept in non-decreasing mode
//! order, which makes it canonical: two defined states with the same `m`
//! are equal exactly when their lists are equal.
//!
//! ```text
//!   occupation [2, 0, 1]   →   encoding [0, 0, 2]
//!   occupation [0, 0, 0]   →   encoding []          (empty-defined)
//!   "|,,>"                 →   Undefined, m = 3     (no encoding at all)
//! ```
//!
//! # Invariants
//!
//! - every particle mode is `< m`
//! - particle modes are non-decreasing
//! - `n` equals the sum of the occupation vector
//! - an Undefined state carries no particles and no annotations
//! - `annotations` is either empty or holds exactly one entry per particle

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::hash::{Hash, Hasher};
use core::ops::Range;

use crate::annotation::Annotation;
use crate::error::{FockError, Result};

// ─── Encoding ───────────────────────────────────────────────────────────────

/// Tri-state encoding: Undefined, or an ordered (possibly empty) mode list.
#[derive(Clone, Debug)]
pub(crate) enum Encoding {
    /// No such state. Past-the-end marker of basis enumeration.
    Undefined,
    /// Mode index of each photon, non-decreasing.
    Defined(Vec<usize>),
}

// ─── FockState ──────────────────────────────────────────────────────────────

/// A distribution of photons across a fixed number of modes.
///
/// See the [module documentation](self) for the encoding.
#[derive(Clone, Debug)]
pub struct FockState {
    pub(crate) m: usize,
    pub(crate) encoding: Encoding,
    /// Empty, or one entry per photon in encoding order.
    pub(crate) annotations: Vec<Annotation>,
}

impl FockState {
    /// Undefined state with zero modes.
    pub fn new() -> Self {
        Self::undefined(0)
    }

    /// Undefined state with a known mode count.
    pub fn undefined(m: usize) -> Self {
        Self {
            m,
            encoding: Encoding::Undefined,
            annotations: Vec::new(),
        }
    }

    /// The zero-photon (vacuum) state over `m` modes.
    pub fn with_modes(m: usize) -> Self {
        Self {
            m,
            encoding: Encoding::Defined(Vec::new()),
            annotations: Vec::new(),
        }
    }

    /// `n` photons all in mode 0: the first state of the `(m, n)` basis.
    ///
    /// With `m == 0` and `n > 0` no such state exists and the result is
    /// Undefined.
    pub fn with_particles(m: usize, n: usize) -> Self {
        if m == 0 && n > 0 {
            return Self::undefined(0);
        }
        Self::from_encoding(m, vec![0; n])
    }

    /// Build from per-mode photon counts.
    pub fn from_occupation(occupation: &[usize]) -> Self {
        let n = occupation.iter().sum();
        let mut code = Vec::with_capacity(n);
        for (mode, &count) in occupation.iter().enumerate() {
            code.extend(core::iter::repeat(mode).take(count));
        }
        Self::from_encoding(occupation.len(), code)
    }

    /// Build from per-mode counts, then attach annotation tokens per mode.
    pub fn from_occupation_annotated(
        occupation: &[usize],
        annotations: &BTreeMap<usize, Vec<String>>,
    ) -> Result<Self> {
        let mut state = Self::from_occupation(occupation);
        state.apply_annotation_map(annotations)?;
        Ok(state)
    }

    /// Build from an explicit ordered mode buffer.
    ///
    /// Fails with [`FockError::InvalidEncoding`] if the buffer is not
    /// non-decreasing or references a mode `>= m`.
    pub fn from_modes(m: usize, modes: Vec<usize>) -> Result<Self> {
        let mut previous = 0;
        for (particle, &mode) in modes.iter().enumerate() {
            if mode >= m || mode < previous {
                return Err(FockError::InvalidEncoding { particle });
            }
            previous = mode;
        }
        Ok(Self::from_encoding(m, modes))
    }

    /// Internal constructor for buffers already known to be canonical.
    pub(crate) fn from_encoding(m: usize, code: Vec<usize>) -> Self {
        debug_assert!(code.windows(2).all(|w| w[0] <= w[1]));
        debug_assert!(code.iter().all(|&c| c < m));
        Self {
            m,
            encoding: Encoding::Defined(code),
            annotations: Vec::new(),
        }
    }

    pub(crate) fn apply_annotation_map(
        &mut self,
        annotations: &BTreeMap<usize, Vec<String>>,
    ) -> Result<()> {
        for (&mode, tokens) in annotations {
            let parsed = tokens
                .iter()
                .map(|t| Annotation::parse(t))
                .collect::<Result<Vec<_>>>()?;
            self.set_mode_annotations(mode, &parsed)?;
        }
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────────────────

    /// Number of modes.
    pub fn m(&self) -> usize {
        self.m
    }

    /// Number of photons. Always 0 for an Undefined state.
    pub fn n(&self) -> usize {
        self.modes().len()
    }

    /// `true` unless this is the Undefined state.
    pub fn is_defined(&self) -> bool {
        matches!(self.encoding, Encoding::Defined(_))
    }

    /// `true` for the Undefined state.
    pub fn is_undefined(&self) -> bool {
        !self.is_defined()
    }

    /// Ordered per-photon mode indices (empty when Undefined).
    pub fn modes(&self) -> &[usize] {
        match &self.encoding {
            Encoding::Defined(code) => code,
            Encoding::Undefined => &[],
        }
    }

    pub(crate) fn defined_modes(&self) -> Result<&[usize]> {
        match &self.encoding {
            Encoding::Defined(code) => Ok(code),
            Encoding::Undefined => Err(FockError::UndefinedState),
        }
    }

    /// Mode occupied by photon `photon`.
    pub fn photon_to_mode(&self, photon: usize) -> Result<usize> {
        self.modes()
            .get(photon)
            .copied()
            .ok_or(FockError::InvalidPhoton { photon, photons: self.n() })
    }

    /// Per-mode photon counts.
    pub fn to_occupation(&self) -> Result<Vec<usize>> {
        let code = self.defined_modes()?;
        let mut occupation = vec![0; self.m];
        for &mode in code {
            occupation[mode] += 1;
        }
        Ok(occupation)
    }

    /// Index range of the photons sitting in `mode`.
    pub(crate) fn mode_range(&self, mode: usize) -> Range<usize> {
        let code = self.modes();
        code.partition_point(|&c| c < mode)..code.partition_point(|&c| c <= mode)
    }

    /// Annotation of photon `k`, or the empty annotation if none is set.
    pub(crate) fn annotation_of(&self, k: usize) -> Annotation {
        self.annotations.get(k).cloned().unwrap_or_default()
    }

    // ── Annotations ────────────────────────────────────────────────────────

    /// Non-empty annotations carried by photons in `mode`, in photon order.
    pub fn get_mode_annotations(&self, mode: usize) -> Result<Vec<Annotation>> {
        self.check_mode(mode)?;
        if self.annotations.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.annotations[self.mode_range(mode)]
            .iter()
            .filter(|a| !a.is_empty())
            .cloned()
            .collect())
    }

    /// Replace the annotations of the photons in `mode`.
    ///
    /// The first `annotations.len()` photons of the mode receive the given
    /// tags; the rest are left untagged.
    pub fn set_mode_annotations(&mut self, mode: usize, annotations: &[Annotation]) -> Result<()> {
        self.check_mode(mode)?;
        let range = self.mode_range(mode);
        if annotations.len() > range.len() {
            return Err(FockError::TooManyAnnotations {
                mode,
                given: annotations.len(),
                occupied: range.len(),
            });
        }
        if self.annotations.is_empty() {
            if annotations.iter().all(Annotation::is_empty) {
                return Ok(());
            }
            self.annotations = vec![Annotation::default(); self.n()];
        }
        for (offset, slot) in self.annotations[range].iter_mut().enumerate() {
            *slot = annotations.get(offset).cloned().unwrap_or_default();
        }
        if self.annotations.iter().all(Annotation::is_empty) {
            self.annotations.clear();
        }
        Ok(())
    }

    /// Annotation of photon `photon` (empty if untagged).
    pub fn get_photon_annotation(&self, photon: usize) -> Result<Annotation> {
        if photon >= self.n() {
            return Err(FockError::InvalidPhoton { photon, photons: self.n() });
        }
        Ok(self.annotation_of(photon))
    }

    /// `true` if any photon carries a non-empty annotation.
    pub fn has_annotations(&self) -> bool {
        !self.annotations.is_empty()
    }

    /// `true` if any photon carries a polarization tag.
    pub fn has_polarization(&self) -> bool {
        self.annotations.iter().any(Annotation::has_polarization)
    }

    /// Drop every annotation, making all photons indistinguishable.
    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    fn check_mode(&self, mode: usize) -> Result<()> {
        if mode >= self.m {
            return Err(FockError::InvalidMode { mode, modes: self.m });
        }
        Ok(())
    }

    // ── Rendering ──────────────────────────────────────────────────────────

    /// Render as `|c0,c1,...>`.
    ///
    /// With `show_annotations`, a tagged mode renders each distinct tag as
    /// `k{tag}` (count omitted when 1) followed by the untagged count when
    /// nonzero, e.g. `|2{P:H}1,0>`. An Undefined state renders `m - 1`
    /// bare commas.
    pub fn to_str(&self, show_annotations: bool) -> String {
        let mut out = String::from("|");
        match &self.encoding {
            Encoding::Undefined => {
                for _ in 1..self.m {
                    out.push(',');
                }
            }
            Encoding::Defined(_) => {
                for mode in 0..self.m {
                    if mode > 0 {
                        out.push(',');
                    }
                    let range = self.mode_range(mode);
                    if show_annotations && self.has_annotations() {
                        self.render_annotated_mode(range, &mut out);
                    } else {
                        out.push_str(&range.len().to_string());
                    }
                }
            }
        }
        out.push('>');
        out
    }

    fn render_annotated_mode(&self, range: Range<usize>, out: &mut String) {
        let mut groups: Vec<(String, usize)> = Vec::new();
        let mut untagged = 0;
        for annotation in &self.annotations[range] {
            let token = annotation.to_str();
            if token.is_empty() {
                untagged += 1;
            } else if let Some(group) = groups.iter_mut().find(|(t, _)| *t == token) {
                group.1 += 1;
            } else {
                groups.push((token, 1));
            }
        }
        for (token, count) in &groups {
            if *count > 1 {
                out.push_str(&count.to_string());
            }
            out.push('{');
            out.push_str(token);
            out.push('}');
        }
        if untagged > 0 || groups.is_empty() {
            out.push_str(&untagged.to_string());
        }
    }
}

impl Default for FockState {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for FockState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_str(true))
    }
}

// ─── Equality and hashing ───────────────────────────────────────────────────

impl PartialEq for FockState {
    /// Annotations are ignored. Two zero-mode states are always equal; two
    /// Undefined states with the same `m` are equal; an Undefined state
    /// never equals a defined one with `m > 0`.
    fn eq(&self, other: &Self) -> bool {
        if self.m != other.m || self.n() != other.n() {
            return false;
        }
        if self.m == 0 {
            return true;
        }
        match (&self.encoding, &other.encoding) {
            (Encoding::Undefined, Encoding::Undefined) => true,
            (Encoding::Defined(a), Encoding::Defined(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FockState {}

impl Hash for FockState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.m.hash(state);
        self.n().hash(state);
        if self.m == 0 {
            return;
        }
        match &self.encoding {
            Encoding::Undefined => 0u8.hash(state),
            Encoding::Defined(code) => {
                1u8.hash(state);
                code.hash(state);
            }
        }
    }
}

// ─── serde ──────────────────────────────────────────────────────────────────

/// An Undefined single-mode state renders as `|>`, which reads back as the
/// defined zero-mode state, so it has no notation and refuses to serialise.
#[cfg(feature = "serde")]
impl serde::Serialize for FockState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if self.m == 1 && self.is_undefined() {
            return Err(serde::ser::Error::custom(
                "undefined single-mode state has no textual notation",
            ));
        }
        serializer.serialize_str(&self.to_str(true))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for FockState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let text = <String as serde::Deserialize>::deserialize(deserializer)?;
        FockState::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;
    use hashbrown::HashSet;

    #[test]
    fn test_default_is_undefined_with_no_modes() {
        let s = FockState::default();
        assert!(s.is_undefined());
        assert_eq!(s.m(), 0);
        assert_eq!(s.n(), 0);
    }

    #[test]
    fn test_with_modes_is_empty_defined() {
        let s = FockState::with_modes(4);
        assert!(s.is_defined());
        assert_eq!(s.n(), 0);
        assert_eq!(s.to_occupation().unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_from_occupation_sorts_by_mode() {
        let s = FockState::from_occupation(&[2, 0, 1]);
        assert_eq!(s.m(), 3);
        assert_eq!(s.n(), 3);
        assert_eq!(s.modes(), &[0, 0, 2]);
        assert_eq!(s.to_occupation().unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn test_from_modes_validates() {
        assert!(FockState::from_modes(3, vec![0, 1, 1, 2]).is_ok());
        assert_eq!(
            FockState::from_modes(3, vec![0, 2, 1]),
            Err(FockError::InvalidEncoding { particle: 2 })
        );
        assert_eq!(
            FockState::from_modes(2, vec![0, 2]),
            Err(FockError::InvalidEncoding { particle: 1 })
        );
    }

    #[test]
    fn test_with_particles_starts_in_mode_zero() {
        let s = FockState::with_particles(3, 2);
        assert_eq!(s.to_occupation().unwrap(), vec![2, 0, 0]);
        assert!(FockState::with_particles(0, 2).is_undefined());
        assert!(FockState::with_particles(0, 0).is_defined());
    }

    #[test]
    fn test_clone_is_independent() {
        let a = FockState::from_occupation(&[1, 1]);
        let mut b = a.clone();
        b.next_state().unwrap();
        assert_ne!(a, b);
        assert_eq!(a.to_occupation().unwrap(), vec![1, 1]);
    }

    #[test]
    fn test_equality_rules() {
        // zero modes: always equal, and hash alike
        assert_eq!(FockState::new(), FockState::with_modes(0));
        let zero: HashSet<FockState> = [FockState::new(), FockState::with_modes(0)].into_iter().collect();
        assert_eq!(zero.len(), 1);
        // both undefined, same m
        assert_eq!(FockState::undefined(3), FockState::undefined(3));
        // undefined vs vacuum with m > 0
        assert_ne!(FockState::undefined(3), FockState::with_modes(3));
        // m mismatch
        assert_ne!(FockState::with_modes(2), FockState::with_modes(3));
        // same counts, different placement
        assert_ne!(
            FockState::from_occupation(&[1, 0]),
            FockState::from_occupation(&[0, 1])
        );
    }

    #[test]
    fn test_equality_ignores_annotations() {
        let plain = FockState::from_occupation(&[1, 0]);
        let mut tagged = plain.clone();
        tagged
            .set_mode_annotations(0, &[Annotation::tag("P", "H").unwrap()])
            .unwrap();
        assert_eq!(plain, tagged);
    }

    #[test]
    fn test_to_str_defined_and_undefined() {
        assert_eq!(FockState::from_occupation(&[2, 0, 1]).to_str(false), "|2,0,1>");
        assert_eq!(FockState::undefined(3).to_str(false), "|,,>");
        assert_eq!(FockState::with_modes(0).to_str(false), "|>");
    }

    #[test]
    fn test_to_str_with_annotations() {
        let mut s = FockState::from_occupation(&[3, 0]);
        s.set_mode_annotations(0, &[Annotation::tag("P", "H").unwrap(), Annotation::tag("P", "H").unwrap()])
            .unwrap();
        assert_eq!(s.to_str(true), "|2{P:H}1,0>");
        assert_eq!(s.to_str(false), "|3,0>");
        assert_eq!(s.to_string(), "|2{P:H}1,0>");
    }

    #[test]
    fn test_mode_annotations_roundtrip() {
        let mut s = FockState::from_occupation(&[0, 2]);
        let tags = [Annotation::tag("_", "0").unwrap(), Annotation::tag("_", "1").unwrap()];
        s.set_mode_annotations(1, &tags).unwrap();
        assert_eq!(s.get_mode_annotations(1).unwrap(), tags.to_vec());
        assert!(s.get_mode_annotations(0).unwrap().is_empty());
        assert_eq!(s.get_photon_annotation(1).unwrap(), tags[1]);
    }

    #[test]
    fn test_annotation_accessor_errors() {
        let mut s = FockState::from_occupation(&[1, 0]);
        assert_eq!(
            s.set_mode_annotations(2, &[]),
            Err(FockError::InvalidMode { mode: 2, modes: 2 })
        );
        assert_eq!(
            s.set_mode_annotations(1, &[Annotation::tag("P", "H").unwrap()]),
            Err(FockError::TooManyAnnotations { mode: 1, given: 1, occupied: 0 })
        );
        assert_eq!(
            s.get_photon_annotation(1),
            Err(FockError::InvalidPhoton { photon: 1, photons: 1 })
        );
    }

    #[test]
    fn test_clear_annotations() {
        let mut s = FockState::from_occupation(&[1]);
        s.set_mode_annotations(0, &[Annotation::tag("P", "V").unwrap()]).unwrap();
        assert!(s.has_annotations());
        assert!(s.has_polarization());
        s.clear_annotations();
        assert!(!s.has_annotations());
        assert!(!s.has_polarization());
    }

    #[test]
    fn test_undefined_has_no_occupation() {
        assert_eq!(FockState::undefined(2).to_occupation(), Err(FockError::UndefinedState));
    }
}
