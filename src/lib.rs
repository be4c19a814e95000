pub mod check;
pub mod config;
pub mod image;
pub mod logging;
pub mod registry;
pub mod report;
pub mod tag;
