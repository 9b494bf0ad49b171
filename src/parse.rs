//! Decoder for the textual Fock state notation.
//!
//! ```text
//! state     := blanks open body close blanks
//! open      := '[' | '(' | '|'
//! close     := ']' | ')' | '>' | '〉'        (must match open)
//! body      := term (',' term)*             defined state
//!            | ','+                         undefined state, m = commas + 1
//!            | ε                            zero-mode state
//! term      := sub_term*                    empty term counts as 0
//! sub_term  := digits ('{' token '}')?
//!            | '{' token '}'                implied count 1
//! ```
//!
//! Sub-terms of one mode whose annotations render to the same non-empty text
//! are merged and their counts summed. Only the space character counts as a
//! blank.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::str::FromStr;

use hashbrown::HashMap;

use crate::annotation::Annotation;
use crate::error::{FockError, ParseError, Result};
use crate::state::FockState;

/// Alternate multi-byte closing bracket accepted after a `|` opener.
const ANGLE_CLOSE: char = '\u{3009}';

/// Tagged photon groups of a single mode, in discovery order.
type ModeTags = Vec<(Annotation, usize)>;

fn skip_blanks(bytes: &[u8], mut pos: usize) -> usize {
    while bytes.get(pos) == Some(&b' ') {
        pos += 1;
    }
    pos
}

impl FockState {
    /// Parse the textual notation, e.g. `"|2,0,1>"`, `"[1,{P:H}]"`, `"|,,>"`.
    pub fn parse(text: &str) -> Result<Self> {
        parse_state(text).inspect_err(|e| {
            tracing::trace!(input = text, error = %e, "rejected fock state notation");
        })
    }

    /// Parse, then attach annotation tokens keyed by mode.
    pub fn parse_annotated(text: &str, annotations: &BTreeMap<usize, Vec<String>>) -> Result<Self> {
        let mut state = Self::parse(text)?;
        state.apply_annotation_map(annotations)?;
        Ok(state)
    }
}

impl FromStr for FockState {
    type Err = FockError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn parse_state(text: &str) -> Result<FockState> {
    let bytes = text.as_bytes();
    let mut pos = skip_blanks(bytes, 0);
    let open = match bytes.get(pos) {
        Some(&c) if matches!(c, b'[' | b'(' | b'|') => c,
        _ => return Err(ParseError::BadOpen.into()),
    };
    pos += 1;

    let mut occupation: Vec<usize> = Vec::new();
    let mut tags: Vec<ModeTags> = Vec::new();
    loop {
        pos = skip_blanks(bytes, pos);
        let c = match bytes.get(pos) {
            Some(&c) if c.is_ascii_digit() || c == b',' || c == b'{' => c,
            _ => break,
        };
        if occupation.is_empty() == (c == b',') {
            break;
        }
        if c == b',' {
            pos = skip_blanks(bytes, pos + 1);
        }
        let (count, groups, next) = parse_term(text, pos)?;
        pos = next;
        occupation.push(count);
        tags.push(groups);
    }

    let mut undefined_modes = None;
    if occupation.is_empty() && bytes.get(pos) == Some(&b',') {
        let mut m = 1;
        loop {
            pos = skip_blanks(bytes, pos);
            if bytes.get(pos) != Some(&b',') {
                break;
            }
            m += 1;
            pos += 1;
        }
        undefined_modes = Some(m);
    }

    pos += closer_len(open, text.get(pos..).unwrap_or(""))?;
    pos = skip_blanks(bytes, pos);
    if pos < bytes.len() {
        return Err(ParseError::TrailingCharacters { position: pos }.into());
    }

    if let Some(m) = undefined_modes {
        return Ok(FockState::undefined(m));
    }
    let mut state = FockState::from_occupation(&occupation);
    if tags.iter().any(|groups| !groups.is_empty()) {
        let mut annotations = vec![Annotation::default(); state.n()];
        for (mode, groups) in tags.into_iter().enumerate() {
            let mut slot = state.mode_range(mode).start;
            for (annotation, count) in groups {
                for _ in 0..count {
                    annotations[slot] = annotation.clone();
                    slot += 1;
                }
            }
        }
        state.annotations = annotations;
    }
    Ok(state)
}

/// Parse the sub-terms of one mode starting at `pos`.
///
/// Returns the total count, the merged tagged groups and the position after
/// the last sub-term.
fn parse_term(text: &str, mut pos: usize) -> Result<(usize, ModeTags, usize)> {
    let bytes = text.as_bytes();
    let mut total: usize = 0;
    let mut groups: ModeTags = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    while let Some(&c) = bytes.get(pos) {
        if !(c.is_ascii_digit() || c == b'{') {
            break;
        }
        let mut count: usize = 0;
        if c == b'{' {
            count = 1;
        } else {
            while let Some(&d) = bytes.get(pos).filter(|d| d.is_ascii_digit()) {
                count = count
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(usize::from(d - b'0')))
                    .ok_or(ParseError::CountOverflow)?;
                pos += 1;
            }
        }
        if bytes.get(pos) == Some(&b'{') {
            if count == 0 {
                return Err(ParseError::AnnotationOnZero.into());
            }
            let close = bytes[pos + 1..]
                .iter()
                .position(|&b| b == b'}')
                .map(|offset| pos + 1 + offset)
                .ok_or(ParseError::UnterminatedAnnotation)?;
            let annotation = Annotation::parse(&text[pos + 1..close])?;
            pos = close + 1;
            let key = annotation.to_str();
            if !key.is_empty() {
                match index.get(&key) {
                    Some(&g) => groups[g].1 += count,
                    None => {
                        index.insert(key, groups.len());
                        groups.push((annotation, count));
                    }
                }
            }
        }
        total = total.checked_add(count).ok_or(ParseError::CountOverflow)?;
    }
    Ok((total, groups, pos))
}

/// Byte length of the closing delimiter matching `open` at the head of `rest`.
fn closer_len(open: u8, rest: &str) -> Result<usize> {
    let expected: &[char] = match open {
        b'[' => &[']'],
        b'(' => &[')'],
        _ => &['>', ANGLE_CLOSE],
    };
    match rest.chars().next() {
        Some(c) if expected.contains(&c) => Ok(c.len_utf8()),
        _ => Err(ParseError::BadClose.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn parse_err(text: &str) -> ParseError {
        match FockState::parse(text) {
            Err(FockError::Parse(e)) => e,
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_parse_simple_state() {
        let s = FockState::parse("|2,0,1>").unwrap();
        assert_eq!(s.m(), 3);
        assert_eq!(s.n(), 3);
        assert_eq!(s.to_occupation().unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn test_alternate_delimiters_and_blanks() {
        let expected = FockState::from_occupation(&[1, 0, 3]);
        for text in ["[1,0,3]", "(1,0,3)", "  | 1 , 0 , 3 >  ", "|1,0,3\u{3009}"] {
            assert_eq!(FockState::parse(text).unwrap(), expected, "input {:?}", text);
        }
    }

    #[test]
    fn test_multi_digit_counts() {
        let s = FockState::parse("|12,0>").unwrap();
        assert_eq!(s.occupation(0).unwrap(), 12);
    }

    #[test]
    fn test_all_zero_is_empty_defined() {
        let s = FockState::parse("|0,0,0>").unwrap();
        assert!(s.is_defined());
        assert_eq!(s.m(), 3);
        assert_eq!(s.n(), 0);
    }

    #[test]
    fn test_bare_commas_are_undefined() {
        let s = FockState::parse("|,,>").unwrap();
        assert!(s.is_undefined());
        assert_eq!(s.m(), 3);
        assert_ne!(s, FockState::parse("|0,0,0>").unwrap());
    }

    #[test]
    fn test_empty_brackets_zero_modes() {
        let s = FockState::parse("[]").unwrap();
        assert!(s.is_defined());
        assert_eq!(s.m(), 0);
    }

    #[test]
    fn test_empty_term_counts_as_zero() {
        let s = FockState::parse("|1,>").unwrap();
        assert_eq!(s.to_occupation().unwrap(), vec![1, 0]);
    }

    #[test]
    fn test_annotations_attach_to_photons() {
        let s = FockState::parse("|{P:H}{P:V},2{_:1}1>").unwrap();
        assert_eq!(s.to_occupation().unwrap(), vec![2, 3]);
        assert_eq!(s.get_photon_annotation(0).unwrap(), Annotation::tag("P", "H").unwrap());
        assert_eq!(s.get_photon_annotation(1).unwrap(), Annotation::tag("P", "V").unwrap());
        assert_eq!(s.get_photon_annotation(3).unwrap(), Annotation::tag("_", "1").unwrap());
        assert!(s.get_photon_annotation(4).unwrap().is_empty());
    }

    #[test]
    fn test_identical_annotations_merge() {
        let s = FockState::parse("|{P:H}2{P:H}>").unwrap();
        assert_eq!(s.n(), 3);
        assert_eq!(s.get_mode_annotations(0).unwrap().len(), 3);
        assert_eq!(s.to_str(true), "|3{P:H}>");
    }

    #[test]
    fn test_empty_annotation_is_untagged() {
        let s = FockState::parse("|{}>").unwrap();
        assert_eq!(s.n(), 1);
        assert!(!s.has_annotations());
    }

    #[test]
    fn test_parse_annotated_map() {
        let mut map = BTreeMap::new();
        map.insert(1, vec![String::from("P:V")]);
        let s = FockState::parse_annotated("|1,1>", &map).unwrap();
        assert_eq!(s.get_mode_annotations(1).unwrap(), vec![Annotation::tag("P", "V").unwrap()]);
        assert!(FockState::parse_annotated("|1,1>", &{
            let mut bad = BTreeMap::new();
            bad.insert(5, vec![String::from("P:V")]);
            bad
        })
        .is_err());
    }

    #[test]
    fn test_from_str() {
        let s: FockState = "|0,1>".parse().unwrap();
        assert_eq!(s.to_occupation().unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_err("1,0>"), ParseError::BadOpen);
        assert_eq!(parse_err(""), ParseError::BadOpen);
        assert_eq!(parse_err("|0{P:H}>"), ParseError::AnnotationOnZero);
        assert_eq!(parse_err("|{P:H>"), ParseError::UnterminatedAnnotation);
        assert_eq!(parse_err("|{P}>"), ParseError::InvalidAnnotation);
        assert_eq!(parse_err("[1,0>"), ParseError::BadClose);
        assert_eq!(parse_err("(1,0]"), ParseError::BadClose);
        assert_eq!(parse_err("|1 2>"), ParseError::BadClose);
        assert_eq!(parse_err("|1,0"), ParseError::BadClose);
        assert_eq!(parse_err("|1,0> x"), ParseError::TrailingCharacters { position: 6 });
        assert_eq!(parse_err("|99999999999999999999999>"), ParseError::CountOverflow);
    }
}
