//! Test command implementation

use anyhow::Result;
use clap::Args;

use crate::build::{ArtifactSearch, CMakeConfig, CTestConfig};
use crate::commands::configure::prepare;
use crate::commands::{run_executable, split_args};
use crate::config::InvocationContext;
use crate::error::{hints, WrapperError};
use crate::exec::ProcessRunner;
use crate::utils::terminal::print_verbose;

/// Run the test suite through ctest, or run one test binary directly
#[derive(Args, Debug, Default)]
pub struct TestCommand {
    /// Only run tests whose name matches this regular expression (ctest -R)
    #[arg(long, conflicts_with = "direct")]
    pub regex: Option<String>,

    /// Extra arguments for ctest, as one shell-quoted string
    #[arg(long, allow_hyphen_values = true, conflicts_with = "direct")]
    pub ctest_args: Option<String>,

    /// Build the test executable and run it directly instead of via ctest
    #[arg(long)]
    pub direct: bool,

    /// Test executable target used with --direct
    #[arg(long, env = "CMAKE_TEST_TARGET")]
    pub exe_target: Option<String>,

    /// Arguments after `--` go to the test binary (or to ctest)
    #[arg(last = true)]
    pub args: Vec<String>,
}

impl TestCommand {
    /// Execute the test command
    pub fn execute(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        if self.direct {
            self.run_direct(ctx, runner)
        } else {
            self.run_ctest(ctx, runner)
        }
    }

    fn run_ctest(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        let mut extra = split_args("--ctest-args", self.ctest_args.as_deref())?;
        extra.extend(self.args);

        prepare(ctx, runner, false)?;

        CTestConfig::from_context(ctx)
            .regex(self.regex)
            .extra_args(extra)
            .run(runner)
    }

    fn run_direct(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        let target = self
            .exe_target
            .or_else(|| ctx.test_target.clone())
            .ok_or_else(|| {
                WrapperError::usage_with_hint(
                    "--direct needs a test executable target",
                    hints::test_target(),
                )
            })?;

        prepare(ctx, runner, false)?;
        CMakeConfig::from_context(ctx).build(runner, Some(&target))?;

        let executable = ArtifactSearch::from_context(ctx).locate(&target)?;
        print_verbose(
            ctx.verbose,
            &format!("Test executable: {}", executable.display()),
        );

        run_executable(runner, &executable, &self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::context::MARKER_FILE;
    use crate::config::Overrides;
    use crate::exec::testing::RecordingRunner;
    use std::path::Path;
    use tempfile::TempDir;

    fn context(temp_dir: &TempDir, generator: &str) -> InvocationContext {
        let overrides = Overrides {
            generator: Some(generator.to_string()),
            config: Some("Release".to_string()),
            ..Default::default()
        };
        let ctx = InvocationContext::resolve(overrides, temp_dir.path()).unwrap();
        std::fs::create_dir_all(&ctx.build_dir).unwrap();
        std::fs::write(ctx.marker_file(), "").unwrap();
        ctx
    }

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }

    #[test]
    fn test_ctest_single_config_never_passes_config() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::new();

        TestCommand::default().execute(&ctx, &mut runner).unwrap();

        assert_eq!(runner.programs(), ["ctest"]);
        assert!(!runner.calls[0].args_lossy().contains(&"-C".to_string()));
    }

    #[test]
    fn test_ctest_filter_and_passthrough() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Xcode");
        let mut runner = RecordingRunner::new();

        let cmd = TestCommand {
            regex: Some("Stint".to_string()),
            ctest_args: Some("--timeout 30".to_string()),
            args: vec!["-V".to_string()],
            ..Default::default()
        };
        cmd.execute(&ctx, &mut runner).unwrap();

        assert_eq!(
            runner.calls[0].args_lossy(),
            ["--output-on-failure", "-C", "Release", "-R", "Stint", "--timeout", "30", "-V"]
        );
    }

    #[test]
    fn test_direct_without_target_is_usage_error() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        let mut runner = RecordingRunner::new();

        let cmd = TestCommand {
            direct: true,
            ..Default::default()
        };
        let err = cmd.execute(&ctx, &mut runner).unwrap_err();

        assert_eq!(err.downcast_ref::<WrapperError>().unwrap().exit_code(), 2);
        assert!(runner.calls.is_empty());
    }

    #[test]
    fn test_direct_builds_locates_and_runs() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Visual Studio 17 2022");
        let exe = ctx.build_dir.join("tests").join("Release").join("unit_tests.exe");
        touch(&exe);
        let mut runner = RecordingRunner::new();

        let cmd = TestCommand {
            direct: true,
            exe_target: Some("unit_tests".to_string()),
            args: vec!["--gtest_filter=Pit.*".to_string()],
            ..Default::default()
        };
        cmd.execute(&ctx, &mut runner).unwrap();

        assert_eq!(runner.programs(), ["cmake", "unit_tests.exe"]);
        assert_eq!(
            &runner.calls[0].args_lossy()[2..],
            ["--config", "Release", "--target", "unit_tests"]
        );
        assert_eq!(runner.calls[1].program, exe);
        assert_eq!(runner.calls[1].args_lossy(), ["--gtest_filter=Pit.*"]);
    }

    #[test]
    fn test_direct_uses_project_default_target() {
        let temp_dir = TempDir::new().unwrap();
        let mut ctx = context(&temp_dir, "Ninja");
        ctx.test_target = Some("suite".to_string());
        touch(&ctx.build_dir.join("suite"));
        let mut runner = RecordingRunner::new();

        let cmd = TestCommand {
            direct: true,
            ..Default::default()
        };
        cmd.execute(&ctx, &mut runner).unwrap();
        assert_eq!(runner.programs(), ["cmake", "suite"]);
    }

    #[test]
    fn test_direct_propagates_test_failure() {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, "Ninja");
        touch(&ctx.build_dir.join("unit_tests"));
        let mut runner = RecordingRunner::with_hook(|inv| {
            if inv.display_name() == "unit_tests" {
                Some(3)
            } else {
                Some(0)
            }
        });

        let cmd = TestCommand {
            direct: true,
            exe_target: Some("unit_tests".to_string()),
            ..Default::default()
        };
        let err = cmd.execute(&ctx, &mut runner).unwrap_err();
        assert_eq!(err.downcast_ref::<WrapperError>().unwrap().exit_code(), 3);
    }

    #[test]
    fn test_configures_first_when_needed() {
        let temp_dir = TempDir::new().unwrap();
        let overrides = Overrides {
            generator: Some("Ninja".to_string()),
            ..Default::default()
        };
        let ctx = InvocationContext::resolve(overrides, temp_dir.path()).unwrap();
        let marker = ctx.build_dir.join(MARKER_FILE);
        let mut runner = RecordingRunner::with_hook(move |inv| {
            if inv.args_lossy().first().map(String::as_str) == Some("-S") {
                std::fs::write(&marker, "").unwrap();
            }
            Some(0)
        });

        TestCommand::default().execute(&ctx, &mut runner).unwrap();
        assert_eq!(runner.programs(), ["cmake", "ctest"]);
    }
}
