//! Build command implementation

use anyhow::Result;
use clap::Args;

use crate::build::CMakeConfig;
use crate::commands::configure::prepare;
use crate::config::InvocationContext;
use crate::exec::ProcessRunner;

/// Build the default target or a named one
#[derive(Args, Debug, Default)]
pub struct BuildCommand {
    /// Target to build (default: all)
    #[arg(long)]
    pub target: Option<String>,

    /// Number of parallel jobs for building
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Delete CMakeCache.txt first so cmake configures from scratch
    #[arg(long)]
    pub reconfigure: bool,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        prepare(ctx, runner, self.reconfigure)?;

        CMakeConfig::from_context(ctx)
            .jobs(self.jobs)
            .build(runner, self.target.as_deref())
    }
}
