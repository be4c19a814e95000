//! Shared test utilities

pub mod registry;

pub use registry::{MockRegistry, create_test_cache};
