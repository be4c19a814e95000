//! Ordering of version keys that share a skeleton

use std::cmp::Ordering;

use crate::tag::error::ShapeMismatch;
use crate::tag::key::{Segment, VersionKey};

/// Compares two keys expected to come from tags with the same skeleton.
///
/// Literal segments must agree at every position and only numeric segments
/// decide the order: the first position whose magnitudes differ wins. Keys
/// whose numbers are all equal (including keys without any number) are
/// `Equal`.
///
/// Returns [`ShapeMismatch`] when the keys do not share a shape, which means
/// the candidate filter let through a tag it should have rejected.
pub fn compare(a: &VersionKey<'_>, b: &VersionKey<'_>) -> Result<Ordering, ShapeMismatch> {
    let (xs, ys) = (a.segments(), b.segments());
    if xs.len() != ys.len() {
        return Err(ShapeMismatch::new(a, b));
    }

    let mut order = Ordering::Equal;
    for (x, y) in xs.iter().zip(ys) {
        match (x, y) {
            (Segment::Numeric(x), Segment::Numeric(y)) => order = order.then_with(|| x.cmp(y)),
            (Segment::Literal(x), Segment::Literal(y)) if x == y => {}
            _ => return Err(ShapeMismatch::new(a, b)),
        }
    }

    Ok(order)
}
