//! CLI command implementations

pub mod chime;
pub mod definition;
pub mod tasks;

pub use definition::{Cli, Commands};
