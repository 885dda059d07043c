//! Property-based tests for core domain rules.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated inputs.

use proptest::prelude::*;

use modelex::core::naming::{folder_ident, sanitize, synthetic_fn_name};
use modelex::core::types::{Fingerprint, QualifiedName};

/// Strategy for a single qualified-name segment.
fn name_segment() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,11}"
}

/// Strategy for a valid dotted qualified name (2-4 segments).
fn qualified_name() -> impl Strategy<Value = String> {
    prop::collection::vec(name_segment(), 2..=4).prop_map(|segments| segments.join("."))
}

proptest! {
    #[test]
    fn sanitize_output_has_no_spaces_or_periods(name in ".*") {
        let token = sanitize(&name);
        prop_assert!(!token.contains(' '));
        prop_assert!(!token.contains('.'));
    }

    #[test]
    fn sanitize_is_deterministic(name in ".*") {
        prop_assert_eq!(sanitize(&name), sanitize(&name));
    }

    #[test]
    fn sanitize_is_idempotent(name in ".*") {
        let once = sanitize(&name);
        let twice = sanitize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn sanitize_preserves_character_count(name in ".*") {
        prop_assert_eq!(sanitize(&name).chars().count(), name.chars().count());
    }

    #[test]
    fn sanitize_only_rewrites_spaces_and_periods(name in ".*") {
        for (original, sanitized) in name.chars().zip(sanitize(&name).chars()) {
            if original == ' ' || original == '.' {
                prop_assert_eq!(sanitized, '$');
            } else {
                prop_assert_eq!(sanitized, original);
            }
        }
    }

    #[test]
    fn folder_ident_is_prefixed_sanitized_name(name in ".*") {
        let ident = folder_ident(&name);
        prop_assert!(ident.starts_with("folder"));
        prop_assert_eq!(&ident["folder".len()..], sanitize(&name));
    }

    #[test]
    fn synthetic_names_keep_prefix_visually_separate(name in ".*") {
        let synthetic = synthetic_fn_name("DM", &name);
        prop_assert!(synthetic.starts_with("DM$$"));
        prop_assert_eq!(&synthetic["DM$$".len()..], sanitize(&name));
    }

    #[test]
    fn qualified_names_split_into_module_and_local(name in qualified_name()) {
        let qualified = QualifiedName::new(name.clone()).unwrap();
        let (module, local) = name.split_once('.').unwrap();
        prop_assert_eq!(qualified.module(), module);
        prop_assert_eq!(qualified.local(), local);
        prop_assert_eq!(qualified.as_str(), name.as_str());
    }

    #[test]
    fn fingerprints_are_stable_per_input(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        prop_assert_eq!(Fingerprint::of(&bytes), Fingerprint::of(&bytes));
    }
}
