//! Error types and helpers for user-friendly error messages
//!
//! Every failure the wrapper reports falls into one of a few buckets: the
//! user asked for something malformed, an external tool failed, or the build
//! succeeded but its product could not be located. Each bucket maps to a
//! distinct exit code so CI can tell them apart.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code used for usage errors (same as clap's own parse errors)
pub const USAGE_EXIT_CODE: i32 = 2;

/// Exit code used for every failure that has no better code of its own
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Custom error types with helpful context and suggestions
#[derive(Error, Debug)]
pub enum WrapperError {
    /// Required flag missing or flags combined in a way that makes no sense
    #[error("{message}")]
    Usage {
        message: String,
        hint: Option<String>,
    },

    /// An external process exited with a non-zero status
    #[error("{tool} exited with code {code}")]
    ToolFailed { tool: String, code: i32 },

    /// The build finished but the executable for a target was not found
    #[error("executable for target '{target}' not found under {}", .build_dir.display())]
    ArtifactNotFound {
        target: String,
        build_dir: PathBuf,
        searched: Vec<PathBuf>,
    },

    /// An explicitly given executable path does not exist
    #[error("executable not found: {}", .path.display())]
    ExecutableNotFound { path: PathBuf },

    /// Tool/executable not found on PATH
    #[error("missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },
}

impl WrapperError {
    /// Create a usage error
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a usage error with a hint
    pub fn usage_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Usage {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create an error for a tool that exited unsuccessfully.
    ///
    /// `code` is `None` when the child was terminated by a signal.
    pub fn tool_failed(tool: impl Into<String>, code: Option<i32>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            code: code.unwrap_or(FAILURE_EXIT_CODE),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Process exit code the wrapper should terminate with
    pub fn exit_code(&self) -> i32 {
        match self {
            WrapperError::Usage { .. } => USAGE_EXIT_CODE,
            // A tool that "failed" with 0 would be a bug in the caller; never
            // turn a failure into a success exit.
            WrapperError::ToolFailed { code, .. } if *code != 0 => *code,
            _ => FAILURE_EXIT_CODE,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("{} {}", style("ERROR:").red().bold(), self);

        match self {
            WrapperError::Usage { hint: Some(h), .. } => {
                eprintln!("{} {}", style("HINT:").yellow().bold(), h);
            }
            WrapperError::MissingTool {
                required_for, hint, ..
            } => {
                eprintln!("  required for: {}", required_for);
                eprintln!("{} {}", style("HINT:").yellow().bold(), hint);
            }
            WrapperError::ArtifactNotFound { searched, .. } => {
                if !searched.is_empty() {
                    eprintln!("\n{}", style("SEARCHED:").cyan().bold());
                    for path in searched {
                        eprintln!("  • {}", path.display());
                    }
                }
                eprintln!("\n{} {}", style("HINT:").yellow().bold(), hints::artifact_layout());
            }
            _ => {}
        }
    }
}

/// Exit code for an arbitrary error bubbled up to `main`
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WrapperError>()
        .map(WrapperError::exit_code)
        .unwrap_or(FAILURE_EXIT_CODE)
}

/// Print an arbitrary error bubbled up to `main`
pub fn report(err: &anyhow::Error) {
    match err.downcast_ref::<WrapperError>() {
        Some(wrapper_err) => wrapper_err.display_with_hints(),
        None => {
            crate::utils::terminal::print_error(&err.to_string());
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {}", cause);
            }
        }
    }
}

/// Common error hints
pub mod hints {
    /// Get hint for missing CMake (ctest ships with it)
    pub fn cmake() -> &'static str {
        "Install CMake from https://cmake.org/ or use your package manager:\n\
         • macOS: brew install cmake\n\
         • Ubuntu: sudo apt install cmake\n\
         • Windows: winget install Kitware.CMake"
    }

    /// Get hint for an artifact the search could not find
    pub fn artifact_layout() -> &'static str {
        "The build succeeded but the executable was not in any expected location.\n\
         Check that the target name matches the add_executable() name, or pass\n\
         the binary explicitly with: cmakew run --path <exe>"
    }

    /// Get hint for `run` without a target or path
    pub fn run_target() -> &'static str {
        "Use --target <name> to build and run a CMake target,\n\
         or --path <exe> to run an existing executable"
    }

    /// Get hint for `test --direct` without a test target
    pub fn test_target() -> &'static str {
        "Pass --exe-target <name>, set CMAKE_TEST_TARGET,\n\
         or add `test_target = \"<name>\"` under [defaults] in cmakew.toml"
    }
}
