//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod build;
pub mod clean;
pub mod configure;
pub mod info;
pub mod run;
pub mod test;

use std::path::Path;

use anyhow::Result;

use crate::error::WrapperError;
use crate::exec::{absolute_program, run_checked, Invocation, ProcessRunner};

/// Split a passthrough argument string the way a POSIX shell would
pub(crate) fn split_args(flag: &str, value: Option<&str>) -> Result<Vec<String>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    shlex::split(value).ok_or_else(|| {
        WrapperError::usage(format!("could not parse {} value: {}", flag, value)).into()
    })
}

/// Run a built executable from its own directory, passing its exit code through
pub(crate) fn run_executable(
    runner: &mut dyn ProcessRunner,
    executable: &Path,
    args: &[String],
) -> Result<()> {
    if !executable.exists() {
        return Err(WrapperError::ExecutableNotFound {
            path: executable.to_path_buf(),
        }
        .into());
    }

    let program = absolute_program(executable)?;
    let mut invocation = Invocation::new(&program).args(args);
    if let Some(parent) = program.parent() {
        invocation = invocation.current_dir(parent);
    }

    run_checked(runner, &invocation)
}
