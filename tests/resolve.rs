//! End-to-end tag resolution

use std::cmp::Ordering;

use proptest::prelude::*;
use rstest::rstest;

use tagwatch::tag::{Outcome, Segment, compare, filter, parse_key, resolve, skeleton};

#[rstest]
#[case::sha_tag_excluded("v3.8.0", &["v3.8.0", "v3.9.1", "v3.9.0", "sha-abc123"], "v3.9.1")]
#[case::numeric_ordering("2.0.5", &["2.0.5", "2.0.13", "2.0.9"], "2.0.13")]
#[case::prerelease_stream("2.9.0-beta.1", &["2.9.0-beta.1", "2.11.0-beta.2", "2.11.0"], "2.11.0-beta.2")]
#[case::unchanged("v1.0.0", &["v1.0.0"], "v1.0.0")]
#[case::no_digits("latest", &["latest"], "latest")]
#[case::variant_suffix("1.25.3-alpine", &["1.25.3", "1.27.0-alpine", "1.27.0-bookworm", "1.25.4-alpine"], "1.27.0-alpine")]
#[case::date_stamp("2024.01.15", &["2024.01.15", "2024.02.01", "2023.12.31", "nightly"], "2024.02.01")]
fn resolve_scenarios(#[case] original: &str, #[case] tags: &[&str], #[case] expected: &str) {
    assert_eq!(resolve(original, tags), Outcome::Found(expected.to_string()));
}

#[test]
fn resolve_unchanged_result_equals_original() {
    let outcome = resolve("v1.0.0", &["v1.0.0", "v0.9.0", "latest"]);

    assert!(outcome.is_unchanged("v1.0.0"));
}

#[test]
fn resolve_without_matching_format_reports_no_candidates() {
    assert_eq!(
        resolve("1.2.3", &["latest", "sha-0a1b2c", "v1.2.4"]),
        Outcome::NoCandidates
    );
}

#[test]
fn resolve_treats_empty_original_as_no_tag() {
    assert_eq!(resolve("", &["", "1.0.0", "latest"]), Outcome::NoCandidates);
}

fn tag_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9.-]{1,16}"
}

fn concat_normalized(tag: &str) -> String {
    parse_key(tag)
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Numeric(n) => n.normalized().to_string(),
            Segment::Literal(s) => s.to_string(),
        })
        .collect()
}

proptest! {
    #[test]
    fn skeleton_is_deterministic(tag in ".{0,24}") {
        prop_assert_eq!(skeleton(&tag), skeleton(&tag));
    }

    #[test]
    fn skeleton_equality_is_symmetric(a in tag_strategy(), b in tag_strategy()) {
        prop_assert_eq!(skeleton(&a) == skeleton(&b), skeleton(&b) == skeleton(&a));
    }

    #[test]
    fn skeleton_equality_is_transitive(
        a in "[0-9]{1,3}\\.[0-9]{1,3}(-rc)?",
        b in "[0-9]{1,3}\\.[0-9]{1,3}(-rc)?",
        c in "[0-9]{1,3}\\.[0-9]{1,3}(-rc)?",
    ) {
        if skeleton(&a) == skeleton(&b) && skeleton(&b) == skeleton(&c) {
            prop_assert_eq!(skeleton(&a), skeleton(&c));
        }
    }

    #[test]
    fn parse_key_is_lossless(tag in ".{0,24}") {
        prop_assert_eq!(parse_key(&tag).to_string(), tag);
    }

    /// Re-rendering numbers without leading zeros keeps the segment kinds,
    /// though not necessarily the text.
    #[test]
    fn normalized_key_keeps_kind_sequence(tag in tag_strategy()) {
        let normalized = concat_normalized(&tag);
        let kinds = |t: &str| -> Vec<bool> {
            parse_key(t)
                .segments()
                .iter()
                .map(|s| matches!(s, Segment::Numeric(_)))
                .collect()
        };
        prop_assert_eq!(kinds(&tag), kinds(&normalized));
        prop_assert_eq!(skeleton(&tag), skeleton(&normalized));
    }

    #[test]
    fn filtered_candidates_compare_without_mismatch(
        original in tag_strategy(),
        tags in prop::collection::vec(tag_strategy(), 0..20),
    ) {
        let original_key = parse_key(&original);
        for candidate in filter(&original, &tags) {
            prop_assert!(compare(&original_key, &parse_key(candidate)).is_ok());
        }
    }

    #[test]
    fn resolve_never_returns_older_than_original(
        original in "[0-9]{1,4}\\.[0-9]{1,4}",
        tags in prop::collection::vec("[0-9]{1,4}\\.[0-9]{1,4}", 0..20),
    ) {
        if let Outcome::Found(best) = resolve(&original, &tags) {
            prop_assert_ne!(
                compare(&parse_key(&best), &parse_key(&original))?,
                Ordering::Less
            );
            for tag in &tags {
                prop_assert_ne!(
                    compare(&parse_key(&best), &parse_key(tag))?,
                    Ordering::Less
                );
            }
        }
    }
}
