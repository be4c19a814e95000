//! Structural signature of a tag with digit runs abstracted away

use std::fmt;

use crate::tag::runs::Runs;

/// The literal fragments of a tag, in order, with one implied digit
/// placeholder between every pair of neighbouring fragments.
///
/// A tag with `n` digit runs always has `n + 1` fragments. Tags that start or
/// end with a digit get an empty leading or trailing fragment, so `v2.0.0`
/// (`["v", ".", ".", ""]`) and `2.0.0v` (`["", ".", ".", "v"]`) differ.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Skeleton<'s> {
    fragments: Vec<&'s str>,
}

impl<'s> Skeleton<'s> {
    /// Returns the literal fragments of this skeleton.
    pub fn fragments(&self) -> &[&'s str] {
        &self.fragments
    }

    /// Returns the number of digit placeholders in this skeleton.
    pub fn placeholders(&self) -> usize {
        self.fragments.len() - 1
    }
}

/// Renders the skeleton with `#` standing in for each digit run.
impl fmt::Display for Skeleton<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fragment) in self.fragments.iter().enumerate() {
            if i > 0 {
                f.write_str("#")?;
            }
            f.write_str(fragment)?;
        }
        Ok(())
    }
}

/// Extracts the skeleton of a tag. Total over every string.
pub fn skeleton(tag: &str) -> Skeleton<'_> {
    let mut fragments = vec![""];
    for run in Runs::new(tag) {
        if run.digits {
            fragments.push("");
        } else if let Some(last) = fragments.last_mut() {
            *last = run.text;
        }
    }
    Skeleton { fragments }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("v2.0.0", &["v", ".", ".", ""])]
    #[case("2.0.0v", &["", ".", ".", "v"])]
    #[case("latest", &["latest"])]
    #[case("1759807235", &["", ""])]
    #[case("", &[""])]
    #[case("2.9.0-beta.1", &["", ".", ".", "-beta.", ""])]
    fn skeleton_returns_expected_fragments(#[case] tag: &str, #[case] expected: &[&str]) {
        assert_eq!(skeleton(tag).fragments(), expected);
    }

    #[rstest]
    #[case("v1.0.10", "v3.44.247")]
    #[case("2.1", "10.0")]
    #[case("1.0.0-rc.1", "2.0.0-rc.3")]
    #[case("latest", "latest")]
    #[case("1970-01-01T00-00-00Z", "2025-11-12T13-14-15Z")]
    fn skeleton_matches_for_same_shape(#[case] a: &str, #[case] b: &str) {
        assert_eq!(skeleton(a), skeleton(b), "{a} =~ {b}");
    }

    #[rstest]
    #[case("latest", "2025-11-12T13-14-15Z")]
    #[case(".34", "0.34")]
    #[case("1.1.0", "v1.1.0")]
    #[case("v2.0.0", "2.0.0v")]
    #[case("2.0.0-alpha.1", "2.0.0-beta.1")]
    #[case("v3.8.0", "sha-abc123")]
    fn skeleton_differs_for_different_shape(#[case] a: &str, #[case] b: &str) {
        assert_ne!(skeleton(a), skeleton(b), "{a} !~ {b}");
    }

    #[test]
    fn display_marks_digit_placeholders() {
        assert_eq!(skeleton("v1.20-rc3").to_string(), "v#.#-rc#");
        assert_eq!(skeleton("v1.20-rc3").placeholders(), 3);
    }
}
