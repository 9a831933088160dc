//! CMake configuration and execution
//!
//! This module handles invoking CMake for the configure and build steps.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::context::MARKER_FILE;
use crate::config::generator::accepts_arch_flag;
use crate::config::InvocationContext;
use crate::exec::{run_checked, Invocation, ProcessRunner};
use crate::utils::paths::ensure_dir;
use crate::utils::terminal::print_verbose;
use crate::utils::tools::CMAKE;

/// CMake configuration builder
#[derive(Debug, Clone, Default)]
pub struct CMakeConfig {
    /// Source directory (where CMakeLists.txt is located)
    source_dir: PathBuf,
    /// Build directory
    build_dir: PathBuf,
    /// Generator (e.g., "Ninja", "Visual Studio 17 2022")
    generator: String,
    /// Platform passed with -A to Visual Studio generators
    arch: String,
    /// Configuration selected at build time on multi-config generators
    config: String,
    multi_config: bool,
    /// Number of parallel jobs
    jobs: Option<usize>,
    /// Verbose output
    verbose: bool,
}

impl CMakeConfig {
    /// Create a new CMake configuration
    pub fn new(source_dir: PathBuf, build_dir: PathBuf, generator: impl Into<String>) -> Self {
        Self {
            source_dir,
            build_dir,
            generator: generator.into(),
            ..Default::default()
        }
    }

    /// Create a configuration from the resolved invocation context
    pub fn from_context(ctx: &InvocationContext) -> Self {
        Self::new(ctx.source_dir.clone(), ctx.build_dir.clone(), &ctx.generator)
            .arch(&ctx.arch)
            .config(&ctx.config, ctx.multi_config)
            .verbose(ctx.verbose)
    }

    /// Set the target architecture
    pub fn arch(mut self, arch: impl Into<String>) -> Self {
        self.arch = arch.into();
        self
    }

    /// Set the build configuration and whether the generator is multi-config
    pub fn config(mut self, config: impl Into<String>, multi_config: bool) -> Self {
        self.config = config.into();
        self.multi_config = multi_config;
        self
    }

    /// Set number of parallel jobs
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    fn marker_file(&self) -> PathBuf {
        self.build_dir.join(MARKER_FILE)
    }

    /// Command line of the configure step
    pub fn configure_invocation(&self) -> Invocation {
        let mut cmd = Invocation::new(CMAKE)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir)
            .arg("-G")
            .arg(&self.generator);

        if accepts_arch_flag(&self.generator) {
            cmd = cmd.arg("-A").arg(&self.arch);
        }

        cmd
    }

    /// Run the configure step unless the build directory is already configured.
    ///
    /// Returns whether cmake was invoked.
    pub fn ensure_configured(&self, runner: &mut dyn ProcessRunner) -> Result<bool> {
        if self.marker_file().exists() {
            print_verbose(
                self.verbose,
                &format!("Already configured: {}", self.build_dir.display()),
            );
            return Ok(false);
        }

        ensure_dir(&self.build_dir)?;
        run_checked(runner, &self.configure_invocation())?;
        Ok(true)
    }

    /// Drop the cache marker so the next `ensure_configured` runs cmake again
    pub fn invalidate(&self) -> Result<()> {
        let marker = self.marker_file();
        if marker.exists() {
            std::fs::remove_file(&marker)
                .with_context(|| format!("Failed to remove {}", marker.display()))?;
            print_verbose(self.verbose, &format!("Removed {}", marker.display()));
        }
        Ok(())
    }

    /// Command line of the build step
    pub fn build_invocation(&self, target: Option<&str>) -> Invocation {
        let mut cmd = Invocation::new(CMAKE).arg("--build").arg(&self.build_dir);

        // Single-config generators fix the configuration at configure time
        if self.multi_config {
            cmd = cmd.arg("--config").arg(&self.config);
        }

        if let Some(target) = target {
            cmd = cmd.arg("--target").arg(target);
        }

        if let Some(jobs) = self.jobs {
            cmd = cmd.arg("--parallel").arg(jobs.to_string());
        }

        if self.verbose {
            cmd = cmd.arg("--verbose");
        }

        cmd
    }

    /// Run CMake build step for one target, or all targets when `None`
    pub fn build(&self, runner: &mut dyn ProcessRunner, target: Option<&str>) -> Result<()> {
        run_checked(runner, &self.build_invocation(target))
    }
}
