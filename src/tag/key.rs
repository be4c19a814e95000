//! Comparable version keys built from tag strings
//!
//! A [`VersionKey`] is the lossless digit/non-digit decomposition of a tag.
//! For example, the key for `v15.010-rc.1` consists of:
//!
//!   - the literal `v`
//!   - the number `15`
//!   - the literal `.`
//!   - the number `010`, with magnitude 10
//!   - the literal `-rc.`
//!   - the number `1`
//!
//! # Ordering
//!
//! Keys derive a lexicographic order over their segments in which numbers sort
//! before literals, numbers compare by magnitude and literals compare by text.
//! That order is total for any two keys, but only meaningful between keys of
//! the same [skeleton](crate::tag::skeleton): `2.0.0 < v1.0.0` holds, and so
//! does `v1.00 < v1.0-beta.1`. Use [`compare`](crate::tag::compare::compare)
//! when both keys are expected to share a shape.

use std::cmp::Ordering;
use std::fmt;

use crate::tag::runs::Runs;

/// A run of ASCII digits compared by numeric magnitude.
///
/// Magnitudes are never converted to fixed-width integers: leading zeros are
/// ignored, a longer remainder is larger, equal lengths compare textually.
/// Digit runs of any length are therefore ordered without overflow.
#[derive(Debug, Clone, Copy)]
pub struct Magnitude<'s>(&'s str);

impl<'s> Magnitude<'s> {
    /// Wraps a digit run, or returns `None` if `digits` is empty or contains
    /// anything other than ASCII digits.
    pub fn new(digits: &'s str) -> Option<Self> {
        (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(Self(digits))
    }

    /// The digits as written in the tag, leading zeros included.
    pub fn as_str(&self) -> &'s str {
        self.0
    }

    /// The digits without leading zeros; `"0"` for an all-zero run.
    pub fn normalized(&self) -> &'s str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }
}

impl Ord for Magnitude<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.normalized(), other.normalized());
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    }
}

impl PartialOrd for Magnitude<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Magnitude<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Magnitude<'_> {}

impl fmt::Display for Magnitude<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single segment of a [`VersionKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Segment<'s> {
    Numeric(Magnitude<'s>),
    Literal(&'s str),
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Numeric(n) => n.fmt(f),
            Segment::Literal(s) => f.write_str(s),
        }
    }
}

/// The ordered segment decomposition of a tag.
///
/// Displaying a key reproduces the source tag exactly.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct VersionKey<'s>(Vec<Segment<'s>>);

impl<'s> VersionKey<'s> {
    pub fn segments(&self) -> &[Segment<'s>] {
        &self.0
    }

    /// Iterates over the numeric segments only.
    pub fn numbers(&self) -> impl Iterator<Item = Magnitude<'s>> + '_ {
        self.0.iter().filter_map(|segment| match segment {
            Segment::Numeric(n) => Some(*n),
            Segment::Literal(_) => None,
        })
    }
}

impl fmt::Display for VersionKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|segment| segment.fmt(f))
    }
}

/// Splits a tag into alternating numeric and literal segments.
pub fn parse_key(tag: &str) -> VersionKey<'_> {
    VersionKey(
        Runs::new(tag)
            .map(|run| {
                if run.digits {
                    Segment::Numeric(Magnitude(run.text))
                } else {
                    Segment::Literal(run.text)
                }
            })
            .collect(),
    )
}
