//! CLI command implementations.

pub mod generate;
pub mod info;
pub mod process;
