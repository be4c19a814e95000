use thiserror::Error;

use crate::tag::key::VersionKey;

/// Two keys that were expected to share a skeleton but do not.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tags `{left}` and `{right}` do not share a format")]
pub struct ShapeMismatch {
    pub left: String,
    pub right: String,
}

impl ShapeMismatch {
    pub(crate) fn new(left: &VersionKey<'_>, right: &VersionKey<'_>) -> Self {
        Self {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}
