//! CLI argument parsing using clap derive macros

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::commands::{
    build::BuildCommand, clean::CleanCommand, configure::ConfigureCommand, info::InfoCommand,
    run::RunCommand, test::TestCommand,
};
use crate::config::{InvocationContext, Overrides};
use crate::exec::{ProcessRunner, SystemRunner};

/// cmakew - CMake configure/build/test/run wrapper
///
/// Detects multi-config generators (Visual Studio, Xcode, Ninja Multi-Config)
/// and only passes --config / -C where the generator accepts them.
#[derive(Parser, Debug)]
#[command(name = "cmakew")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Source directory containing CMakeLists.txt [default: current directory]
    #[arg(short = 'S', long, global = true, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Build directory, relative to the source directory [default: build]
    #[arg(short = 'B', long, env = "CMAKE_BUILD_DIR", global = true, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// CMake generator
    #[arg(short = 'G', long, env = "CMAKE_GENERATOR", global = true)]
    pub generator: Option<String>,

    /// Target platform for Visual Studio generators [default: x64]
    #[arg(short = 'A', long, env = "CMAKE_ARCH", global = true)]
    pub arch: Option<String>,

    /// Build configuration (Debug, Release, RelWithDebInfo, MinSizeRel) [default: Debug]
    #[arg(short = 'C', long, env = "CMAKE_CONFIG", global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure the build directory (once)
    Configure(ConfigureCommand),

    /// Build the default target or a named one
    Build(BuildCommand),

    /// Run tests via ctest, or one test binary directly
    Test(TestCommand),

    /// Build and run a target, or run an executable by path
    Run(RunCommand),

    /// Delete the build directory
    Clean(CleanCommand),

    /// Print the resolved configuration
    Info(InfoCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let mut runner = SystemRunner::new(self.verbose);
        self.execute_with(&cwd, &mut runner)
    }

    /// Execute against an explicit working directory and process runner
    pub fn execute_with(self, cwd: &Path, runner: &mut dyn ProcessRunner) -> Result<()> {
        let ctx = InvocationContext::resolve(self.overrides(), cwd)?;

        match self.command {
            Commands::Configure(cmd) => cmd.execute(&ctx, runner),
            Commands::Build(cmd) => cmd.execute(&ctx, runner),
            Commands::Test(cmd) => cmd.execute(&ctx, runner),
            Commands::Run(cmd) => cmd.execute(&ctx, runner),
            Commands::Clean(cmd) => cmd.execute(&ctx),
            Commands::Info(cmd) => cmd.execute(&ctx),
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            source_dir: self.source_dir.clone(),
            build_dir: self.build_dir.clone(),
            generator: self.generator.clone(),
            arch: self.arch.clone(),
            config: self.config.clone(),
            verbose: self.verbose,
        }
    }
}
