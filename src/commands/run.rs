//! Run command implementation
//!
//! Builds and runs an executable target, or runs an existing executable by path.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::build::{ArtifactSearch, CMakeConfig};
use crate::commands::configure::prepare;
use crate::commands::{run_executable, split_args};
use crate::config::InvocationContext;
use crate::error::{hints, WrapperError};
use crate::exec::ProcessRunner;
use crate::utils::terminal::print_verbose;

/// Build and run an executable target, or run an executable by path
#[derive(Args, Debug, Default)]
pub struct RunCommand {
    /// Name of the CMake target to build and run
    #[arg(long, conflicts_with = "path")]
    pub target: Option<String>,

    /// Path of an existing executable to run (no build, no search)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Arguments for the executable, as one shell-quoted string
    #[arg(long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Further arguments after `--`, appended after --args
    #[arg(last = true)]
    pub trailing: Vec<String>,
}

impl RunCommand {
    /// Execute the run command
    pub fn execute(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        let mut args = split_args("--args", self.args.as_deref())?;
        args.extend(self.trailing);

        let executable = match (self.path, self.target) {
            (Some(path), _) => path,
            (None, Some(target)) => {
                prepare(ctx, runner, false)?;
                CMakeConfig::from_context(ctx).build(runner, Some(&target))?;
                ArtifactSearch::from_context(ctx).locate(&target)?
            }
            (None, None) => {
                return Err(WrapperError::usage_with_hint(
                    "need --target or --path",
                    hints::run_target(),
                )
                .into());
            }
        };

        print_verbose(
            ctx.verbose,
            &format!("Running: {}", executable.display()),
        );
        run_executable(runner, &executable, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;
    use crate::exec::testing::RecordingRunner;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir, generator: &str) -> InvocationContext {
        let overrides = Overrides {
            generator: Some(generator.to_string()),
            ..Default::default()
        };
        let ctx = InvocationContext::resolve(overrides, temp_dir.path()).unwrap();
        std::fs::create_dir_all(&ctx.build_dir).unwrap();
        std::fs::write(ctx.marker_file(), "").unwrap();
        ctx
    }

    #[test]
    fn test_neither_target_nor_path_is_usage_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::new();

        let err = RunCommand::default().execute(&ctx, &mut runner).unwrap_err();
        let wrapper_err = err.downcast_ref::<WrapperError>().unwrap();
        assert!(matches!(wrapper_err, WrapperError::Usage { .. }));
        assert_eq!(wrapper_err.to_string(), "need --target or --path");
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_missing_artifact_executes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::new();

        let cmd = RunCommand {
            target: Some("app".to_string()),
            args: Some("--flag 1 2".to_string()),
            ..Default::default()
        };
        let err = cmd.execute(&ctx, &mut runner).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WrapperError>(),
            Some(WrapperError::ArtifactNotFound { .. })
        ));
        // Only the build ran
        assert_eq!(runner.programs(), ["cmake"]);
    }

    #[test]
    fn test_target_is_built_then_run_with_split_args() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let exe = ctx.build_dir.join("app");
        std::fs::write(&exe, "").unwrap();
        let mut runner = RecordingRunner::new();

        let cmd = RunCommand {
            target: Some("app".to_string()),
            args: Some("--flag 1 \"a b\"".to_string()),
            trailing: vec!["--last".to_string()],
            ..Default::default()
        };
        cmd.execute(&ctx, &mut runner).unwrap();

        assert_eq!(runner.programs(), ["cmake", "app"]);
        assert_eq!(&runner.calls[0].args_lossy()[2..], ["--target", "app"]);
        assert_eq!(
            runner.calls[1].args_lossy(),
            ["--flag", "1", "a b", "--last"]
        );
        assert_eq!(runner.calls[1].cwd.as_deref(), Some(ctx.build_dir.as_path()));
    }

    #[test]
    fn test_path_skips_build_and_search() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let exe = temp_dir.path().join("tool");
        std::fs::write(&exe, "").unwrap();
        let mut runner = RecordingRunner::new();

        let cmd = RunCommand {
            path: Some(exe.clone()),
            ..Default::default()
        };
        cmd.execute(&ctx, &mut runner).unwrap();

        assert_eq!(runner.calls.len(), 1);
        assert_eq!(runner.calls[0].program, exe);
    }

    #[test]
    fn test_missing_path_is_not_found_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::new();

        let cmd = RunCommand {
            path: Some(temp_dir.path().join("ghost")),
            ..Default::default()
        };
        let err = cmd.execute(&ctx, &mut runner).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<WrapperError>(),
            Some(WrapperError::ExecutableNotFound { .. })
        ));
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_build_failure_is_not_reported_as_missing_artifact() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::with_hook(|_| Some(2));

        let cmd = RunCommand {
            target: Some("app".to_string()),
            ..Default::default()
        };
        let err = cmd.execute(&ctx, &mut runner).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WrapperError>(),
            Some(WrapperError::ToolFailed { code: 2, .. })
        ));
    }
}
