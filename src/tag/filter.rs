//! Selection of candidate tags sharing the original tag's shape

use crate::tag::skeleton::skeleton;

/// Returns every candidate whose skeleton equals the skeleton of `original`.
///
/// The original tag itself is never returned, since it cannot be its own
/// newer candidate.
pub fn filter<'c, S: AsRef<str>>(original: &str, candidates: &'c [S]) -> Vec<&'c str> {
    let shape = skeleton(original);
    candidates
        .iter()
        .map(AsRef::as_ref)
        .filter(|candidate| *candidate != original && skeleton(candidate) == shape)
        .collect()
}
