//! Reference distinguishability tag attached to individual photons.
//!
//! An annotation is a set of `key:value` pairs written between braces in the
//! textual notation, e.g. `|{P:H}1,{_:0,P:V}>`. Two photons are mutually
//! indistinguishable when their annotations are *compatible*: no key they
//! share carries different values. Merging two compatible annotations takes
//! the union of their pairs.
//!
//! The empty annotation means "no tag" and is compatible with everything.
//!
//! # Keys
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `P` | polarization (`H`, `V`, `D`, `A`, ...) |
//! | `_` | free-form distinguishability label |
//!
//! Any other `[A-Za-z0-9_]+` key is accepted and compared by value text.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

use crate::error::{ParseError, Result};

/// Key reserved for polarization tags.
pub const POLARIZATION_KEY: &str = "P";

/// A pair is valid when the key is `[A-Za-z0-9_]+` and the value is non-empty,
/// carries no surrounding blanks and holds neither `,` nor `}`.
fn check_pair(key: &str, value: &str) -> Result<()> {
    let key_ok = !key.is_empty() && key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    let value_ok = !value.is_empty()
        && value.trim() == value
        && !value.contains(&[',', '}'][..]);
    if key_ok && value_ok {
        Ok(())
    } else {
        Err(ParseError::InvalidAnnotation.into())
    }
}

/// A canonical set of `key:value` distinguishability tags.
///
/// Keys are kept sorted so that [`Annotation::to_str`] is canonical and two
/// annotations with the same pairs render identically.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Annotation {
    tags: BTreeMap<String, String>,
}

impl Annotation {
    /// The empty annotation (no tag).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw text found between `{` and `}`.
    ///
    /// Pairs are comma separated; surrounding spaces are ignored. An empty
    /// or all-blank token yields the empty annotation.
    pub fn parse(token: &str) -> Result<Self> {
        let mut tags = BTreeMap::new();
        if token.trim().is_empty() {
            return Ok(Self { tags });
        }
        for pair in token.split(',') {
            let (key, value) = pair
                .split_once(':')
                .ok_or(ParseError::InvalidAnnotation)?;
            let (key, value) = (key.trim(), value.trim());
            check_pair(key, value)?;
            if tags.insert(key.to_string(), value.to_string()).is_some() {
                return Err(ParseError::InvalidAnnotation.into());
            }
        }
        Ok(Self { tags })
    }

    /// Single-pair constructor, e.g. `Annotation::tag("P", "H").unwrap()`.
    ///
    /// Applies the same rules as [`Annotation::parse`], so the result always
    /// renders to a token that parses back to it.
    pub fn tag(key: &str, value: &str) -> Result<Self> {
        check_pair(key, value)?;
        let mut tags = BTreeMap::new();
        tags.insert(key.to_string(), value.to_string());
        Ok(Self { tags })
    }

    /// Canonical token text without braces. Empty string means no annotation.
    pub fn to_str(&self) -> String {
        let mut out = String::new();
        for (i, (key, value)) in self.tags.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(key);
            out.push(':');
            out.push_str(value);
        }
        out
    }

    /// `true` when no tag is present.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Value bound to `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// `true` if a polarization tag is present.
    pub fn has_polarization(&self) -> bool {
        self.tags.contains_key(POLARIZATION_KEY)
    }

    /// Compatibility test and merge in one step.
    ///
    /// Returns the union of both tag sets when no shared key disagrees,
    /// `None` otherwise.
    pub fn compatible_annotation(&self, other: &Annotation) -> Option<Annotation> {
        let mut merged = self.tags.clone();
        for (key, value) in &other.tags {
            match merged.get(key) {
                Some(existing) if existing != value => return None,
                Some(_) => {}
                None => {
                    merged.insert(key.clone(), value.clone());
                }
            }
        }
        Some(Annotation { tags: merged })
    }
}

impl core::fmt::Display for Annotation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_str())
    }
}
