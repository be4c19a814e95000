//! Selection of the newest tag sharing the original tag's format

use std::cmp::Ordering;

use indexmap::IndexSet;
use tracing::{debug, error};

use crate::tag::compare::compare;
use crate::tag::filter::filter;
use crate::tag::key::{VersionKey, parse_key};

/// Result of resolving a tag against a repository's tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The newest tag with the original's format. Equal to the original tag
    /// when nothing newer exists.
    Found(String),
    /// No tag in the list shares the original tag's format, not even the
    /// original tag itself.
    NoCandidates,
}

impl Outcome {
    /// Returns the chosen tag, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Outcome::Found(tag) => Some(tag),
            Outcome::NoCandidates => None,
        }
    }

    /// Returns true when the chosen tag is `original` itself.
    pub fn is_unchanged(&self, original: &str) -> bool {
        self.tag() == Some(original)
    }
}

/// Finds the maximum tag in `tags` with the same format as `original`.
///
/// The original tag always takes part in the comparison, so a repository
/// with nothing newer resolves to the original. Among equal maxima the
/// original wins, otherwise the first one in `tags` does.
///
/// An empty `original` is not a tag and resolves to [`Outcome::NoCandidates`].
pub fn resolve<S: AsRef<str>>(original: &str, tags: &[S]) -> Outcome {
    if original.is_empty() {
        debug!("empty original tag, nothing to resolve");
        return Outcome::NoCandidates;
    }

    let candidates: IndexSet<&str> = filter(original, tags).into_iter().collect();
    let listed = tags.iter().any(|tag| tag.as_ref() == original);

    if candidates.is_empty() && !listed {
        debug!(original, "no tag shares the format of the original tag");
        return Outcome::NoCandidates;
    }

    let original_key = parse_key(original);
    let mut best: (&str, VersionKey<'_>) = (original, original_key);
    for candidate in candidates {
        let key = parse_key(candidate);
        if order_candidates(&key, &best.1) == Ordering::Greater {
            best = (candidate, key);
        }
    }

    debug!(original, best = best.0, "resolved newest tag");
    Outcome::Found(best.0.to_string())
}

fn order_candidates(a: &VersionKey<'_>, b: &VersionKey<'_>) -> Ordering {
    match compare(a, b) {
        Ok(order) => order,
        Err(mismatch) => {
            if cfg!(debug_assertions) {
                panic!("candidate set is inconsistent: {mismatch}");
            }
            error!("candidate set is inconsistent: {}", mismatch);
            a.cmp(b)
        }
    }
}
