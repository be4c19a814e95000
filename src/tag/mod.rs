//! Version resolution for container image tags
//!
//! Given the tag currently in use and every tag of its repository, this module
//! finds the newest tag that follows the same format. Nothing here performs
//! I/O or keeps state between calls.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Skeleton   │────▶│   Filter    │───┐
//! │  (shape)    │     │ (same shape)│   │     ┌─────────────┐
//! └─────────────┘     └─────────────┘   ├────▶│  Selector   │
//! ┌─────────────┐     ┌─────────────┐   │     │  (resolve)  │
//! │     Key     │────▶│   Compare   │───┘     └─────────────┘
//! │  (segments) │     │ (magnitude) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`skeleton`]: literal fragments of a tag with digit runs abstracted away
//! - [`filter`]: candidate tags sharing the original tag's skeleton
//! - [`key`]: numeric/literal segment decomposition of a tag
//! - [`compare`]: ordering of keys that share a skeleton
//! - [`selector`]: the [`resolve`] entry point and its [`Outcome`]
//! - [`error`]: the shape mismatch defect

pub mod compare;
pub mod error;
pub mod filter;
pub mod key;
mod runs;
pub mod selector;
pub mod skeleton;

pub use compare::compare;
pub use error::ShapeMismatch;
pub use filter::filter;
pub use key::{Magnitude, Segment, VersionKey, parse_key};
pub use selector::{Outcome, resolve};
pub use skeleton::{Skeleton, skeleton};
