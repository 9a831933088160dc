//! External process execution
//!
//! Every call to cmake, ctest or a built executable is described by an
//! [`Invocation`] and handed to a [`ProcessRunner`]. Commands never spawn
//! processes themselves, which keeps them testable with a recording runner.

pub mod subprocess;

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::WrapperError;

pub use subprocess::SystemRunner;

/// One external process call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Bare tool name (looked up on PATH) or path to an executable
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Working directory, inherited from the wrapper when `None`
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// True when the program is a bare name that must be resolved on PATH
    pub fn is_bare_name(&self) -> bool {
        !self.program.is_absolute() && self.program.components().count() == 1
    }

    /// Short name used in error messages
    pub fn display_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Arguments as lossy strings, for display and assertions
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let program = self.program.to_string_lossy();
        write!(f, "{}", quote(&program))?;
        for arg in self.args_lossy() {
            write!(f, " {}", quote(&arg))?;
        }
        if let Some(cwd) = &self.cwd {
            write!(f, "    (cwd: {})", cwd.display())?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    shlex::try_quote(s)
        .map(|q| q.into_owned())
        .unwrap_or_else(|_| s.to_string())
}

/// Runs external processes to completion
pub trait ProcessRunner {
    /// Run the invocation with inherited stdio.
    ///
    /// Returns the exit code, or `None` when the process was killed by a
    /// signal. `Err` means the process could not be started at all.
    fn run(&mut self, invocation: &Invocation) -> Result<Option<i32>>;
}

/// Run an invocation and turn any non-zero exit into [`WrapperError::ToolFailed`]
pub fn run_checked(runner: &mut dyn ProcessRunner, invocation: &Invocation) -> Result<()> {
    match runner.run(invocation)? {
        Some(0) => Ok(()),
        code => Err(WrapperError::tool_failed(invocation.display_name(), code).into()),
    }
}

/// Make an executable path absolute so it survives a working-directory change
pub fn absolute_program(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
