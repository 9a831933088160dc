//! CTest invocation

use std::path::PathBuf;

use anyhow::Result;

use crate::config::InvocationContext;
use crate::exec::{run_checked, Invocation, ProcessRunner};
use crate::utils::tools::CTEST;

/// CTest run configuration
#[derive(Debug, Clone, Default)]
pub struct CTestConfig {
    build_dir: PathBuf,
    config: String,
    multi_config: bool,
    /// Test name filter passed with -R
    regex: Option<String>,
    extra_args: Vec<String>,
}

impl CTestConfig {
    pub fn from_context(ctx: &InvocationContext) -> Self {
        Self {
            build_dir: ctx.build_dir.clone(),
            config: ctx.config.clone(),
            multi_config: ctx.multi_config,
            ..Default::default()
        }
    }

    pub fn regex(mut self, regex: Option<String>) -> Self {
        self.regex = regex;
        self
    }

    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Command line of the test run, executed inside the build directory.
    ///
    /// Uses `-C` rather than `--test-dir`/`--build-config` so older CTest
    /// releases keep working.
    pub fn invocation(&self) -> Invocation {
        let mut cmd = Invocation::new(CTEST)
            .arg("--output-on-failure")
            .current_dir(&self.build_dir);

        if self.multi_config {
            cmd = cmd.arg("-C").arg(&self.config);
        }

        if let Some(regex) = &self.regex {
            cmd = cmd.arg("-R").arg(regex);
        }

        cmd.args(&self.extra_args)
    }

    pub fn run(&self, runner: &mut dyn ProcessRunner) -> Result<()> {
        run_checked(runner, &self.invocation())
    }
}
