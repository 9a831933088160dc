//! Invocation configuration: built-in defaults, cmakew.toml, environment and flags

pub mod context;
pub mod generator;
pub mod project_file;

pub use context::{InvocationContext, Overrides};
