//! Property-based tests for the Fock state algebra.
//!
//! These tests check the structural laws the encoding promises:
//! notation round-trips, tensor shape, weights, slice/splice inverse, and
//! partition conservation.

use proptest::prelude::*;

use fock_core::{Annotation, FockState};

fn occupation() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..4, 0..7)
}

fn factorial(k: usize) -> u64 {
    (1..=k as u64).product()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn notation_round_trip(occ in occupation()) {
        let text = format!(
            "|{}>",
            occ.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(",")
        );
        let state = FockState::parse(&text).unwrap();
        prop_assert_eq!(state.to_occupation().unwrap(), occ.clone());
        prop_assert_eq!(state.to_str(false), text);
        prop_assert_eq!(state, FockState::from_occupation(&occ));
    }

    #[test]
    fn tensor_adds_shapes(a in occupation(), b in occupation()) {
        let sa = FockState::from_occupation(&a);
        let sb = FockState::from_occupation(&b);
        let ab = sa.tensor(&sb).unwrap();
        prop_assert_eq!(ab.m(), sa.m() + sb.m());
        prop_assert_eq!(ab.n(), sa.n() + sb.n());
        let mut joined = a.clone();
        joined.extend_from_slice(&b);
        prop_assert_eq!(ab.to_occupation().unwrap(), joined);
    }

    #[test]
    fn prodnfact_is_product_of_factorials(occ in occupation()) {
        let expected: u64 = occ.iter().map(|&k| factorial(k)).product();
        prop_assert_eq!(FockState::from_occupation(&occ).prodnfact().unwrap(), expected);
    }

    #[test]
    fn occupation_query_matches_vector(occ in occupation()) {
        let state = FockState::from_occupation(&occ);
        for (mode, &count) in occ.iter().enumerate() {
            prop_assert_eq!(state.occupation(mode).unwrap(), count);
        }
        prop_assert!(state.occupation(occ.len()).is_err());
    }

    #[test]
    fn set_slice_inverts_slice(occ in prop::collection::vec(0usize..4, 1..7), a in 0usize..7, b in 0usize..7) {
        let state = FockState::from_occupation(&occ);
        let m = occ.len();
        let start = a % m;
        let end = start + 1 + b % (m - start);
        let piece = state.slice(start as isize, end as isize, 1).unwrap();
        prop_assert_eq!(piece.to_occupation().unwrap(), occ[start..end].to_vec());
        prop_assert_eq!(state.set_slice(&piece, start as isize, end as isize).unwrap(), state);
    }

    #[test]
    fn stepped_slice_selects_congruent_modes(occ in occupation(), step in 1usize..4) {
        let state = FockState::from_occupation(&occ);
        let expected: Vec<usize> = occ.iter().copied().step_by(step).collect();
        let sliced = state.slice(0, occ.len() as isize, step).unwrap();
        prop_assert_eq!(sliced.to_occupation().unwrap(), expected);
    }

    #[test]
    fn separate_state_conserves_photons(occ in occupation(), labels in prop::collection::vec(0u8..3, 0..12)) {
        let mut state = FockState::from_occupation(&occ);
        let mut label_iter = labels.iter();
        for (mode, &count) in occ.iter().enumerate() {
            let tags: Vec<Annotation> = (0..count)
                .map(|_| match label_iter.next() {
                    Some(l) => Annotation::tag("_", &l.to_string()).unwrap(),
                    None => Annotation::new(),
                })
                .collect();
            state.set_mode_annotations(mode, &tags).unwrap();
        }
        let parts = state.separate_state();
        let total: usize = parts.iter().map(FockState::n).sum();
        prop_assert_eq!(total, state.n());
        let mut summed = vec![0; occ.len()];
        for part in &parts {
            prop_assert_eq!(part.m(), occ.len());
            prop_assert!(!part.has_annotations());
            for (mode, c) in part.to_occupation().unwrap().into_iter().enumerate() {
                summed[mode] += c;
            }
        }
        prop_assert_eq!(summed, occ);
    }
}
