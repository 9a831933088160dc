//! Subprocess execution

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use super::{Invocation, ProcessRunner};
use crate::utils::terminal::{print_command, print_verbose};
use crate::utils::tools::{purpose_of, require_tool};

/// Result of a subprocess execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` if terminated by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code(),
            duration,
        }
    }
}

/// Run a resolved program with inherited stdin/stdout/stderr
pub fn run_command(program: &Path, invocation: &Invocation) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(&invocation.args);
    if let Some(cwd) = &invocation.cwd {
        cmd.current_dir(cwd);
    }

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|| format!("Failed to execute {}", program.display()))?;

    Ok(CommandResult::from_status(status, start.elapsed()))
}

/// Runner that spawns real processes and echoes each command line
#[derive(Debug, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    fn resolve(&self, invocation: &Invocation) -> Result<PathBuf> {
        if !invocation.is_bare_name() {
            return Ok(invocation.program.clone());
        }
        let name = invocation.program.to_string_lossy();
        let resolved = require_tool(&name, purpose_of(&name))?;
        print_verbose(
            self.verbose,
            &format!("Using {}: {}", name, resolved.display()),
        );
        Ok(resolved)
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Option<i32>> {
        let program = self.resolve(invocation)?;
        print_command(invocation);

        let result = run_command(&program, invocation)?;
        print_verbose(
            self.verbose,
            &format!(
                "{} finished in {:.2}s ({})",
                invocation.display_name(),
                result.duration.as_secs_f64(),
                if result.success { "ok" } else { "failed" }
            ),
        );
        Ok(result.exit_code)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_run_command_reports_exit_code() {
        let inv = Invocation::new("sh").args(["-c", "exit 3"]);
        let result = run_command(Path::new("/bin/sh"), &inv).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn test_run_command_honors_cwd() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("sh")
            .args(["-c", "touch here"])
            .current_dir(temp_dir.path());
        let result = run_command(Path::new("/bin/sh"), &inv).unwrap();
        assert!(result.success);
        assert!(temp_dir.path().join("here").exists());
    }

    #[test]
    fn test_missing_program_is_an_error() {
        let inv = Invocation::new("/nonexistent/program");
        assert!(run_command(&inv.program, &inv).is_err());
    }
}
