//! CLI command implementations

pub mod check;
pub mod completions;
pub mod directory;
pub mod new;
pub mod summary;
