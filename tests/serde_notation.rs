//! serde integration tests.
//!
//! A FockState serialises as its textual notation, so a JSON document holds
//! the same string a user would type.

#[cfg(feature = "serde")]
mod tests {
    use fock_core::FockState;

    #[test]
    fn test_serialises_as_notation() {
        let s = FockState::parse("[2,0,1]").unwrap();
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"|2,0,1>\"");
    }

    #[test]
    fn test_round_trip_preserves_annotations() {
        let s = FockState::parse("|{P:H}1,{_:1}>").unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: FockState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert_eq!(back.to_string(), s.to_string());
    }

    #[test]
    fn test_round_trip_undefined() {
        let u = FockState::undefined(4);
        let back: FockState = serde_json::from_str(&serde_json::to_string(&u).unwrap()).unwrap();
        assert!(back.is_undefined());
        assert_eq!(back.m(), 4);
    }

    #[test]
    fn test_exhausted_single_mode_walk_is_not_serialised() {
        let mut end = FockState::with_particles(1, 2);
        end.next_state().unwrap();
        assert!(end.is_undefined());
        assert_eq!(end.m(), 1);
        let err = serde_json::to_string(&end).unwrap_err();
        assert!(err.to_string().contains("no textual notation"), "{}", err);
        assert!(serde_json::to_string(&FockState::undefined(1)).is_err());
        // the zero-mode state keeps its notation
        assert_eq!(serde_json::to_string(&FockState::with_modes(0)).unwrap(), "\"|>\"");
    }

    #[test]
    fn test_collection_of_states() {
        let basis: Vec<FockState> = FockState::basis(2, 2).collect();
        let json = serde_json::to_string(&basis).unwrap();
        assert_eq!(json, r#"["|2,0>","|1,1>","|0,2>"]"#);
        let back: Vec<FockState> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, basis);
    }

    #[test]
    fn test_malformed_notation_is_a_serde_error() {
        let err = serde_json::from_str::<FockState>("\"|1,0]\"").unwrap_err();
        assert!(err.to_string().contains("bad close"), "{}", err);
    }
}
