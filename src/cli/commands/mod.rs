//! CLI command implementations

pub mod bounds;
pub mod completions;
pub mod compute;
pub mod session;
pub mod sweep;
