//! Tool detection for the external CMake toolchain

use std::path::PathBuf;

use anyhow::Result;
use which::which;

use crate::error::{hints, WrapperError};

/// CMake executable name
pub const CMAKE: &str = "cmake";

/// CTest executable name
pub const CTEST: &str = "ctest";

/// Resolve a tool on PATH, or fail with an install hint
pub fn require_tool(tool_name: &str, required_for: &str) -> Result<PathBuf> {
    which(tool_name).map_err(|_| {
        WrapperError::missing_tool(tool_name, required_for, get_tool_hint(tool_name)).into()
    })
}

/// Human-readable reason a tool is needed
pub fn purpose_of(tool_name: &str) -> &'static str {
    match tool_name {
        CMAKE => "configuring and building the project",
        CTEST => "running the test suite",
        _ => "running the requested command",
    }
}

/// Get installation hint for a tool
fn get_tool_hint(tool_name: &str) -> String {
    match tool_name {
        CMAKE | CTEST => hints::cmake().to_string(),
        _ => format!("Make sure '{}' is installed and on your PATH", tool_name),
    }
}
