//! Configure command implementation

use anyhow::Result;
use clap::Args;

use crate::build::CMakeConfig;
use crate::config::InvocationContext;
use crate::exec::ProcessRunner;
use crate::utils::terminal::print_info;

/// Configure the build directory (no-op when already configured)
#[derive(Args, Debug, Default)]
pub struct ConfigureCommand {
    /// Delete CMakeCache.txt first so cmake configures from scratch
    #[arg(long)]
    pub reconfigure: bool,
}

impl ConfigureCommand {
    /// Execute the configure command
    pub fn execute(self, ctx: &InvocationContext, runner: &mut dyn ProcessRunner) -> Result<()> {
        if !prepare(ctx, runner, self.reconfigure)? {
            print_info(&format!("Already configured: {}", ctx.build_dir.display()));
        }
        Ok(())
    }
}

/// Make sure the build directory is configured before building in it.
///
/// Returns whether cmake's configure step ran.
pub fn prepare(
    ctx: &InvocationContext,
    runner: &mut dyn ProcessRunner,
    reconfigure: bool,
) -> Result<bool> {
    let cmake = CMakeConfig::from_context(ctx);
    if reconfigure {
        cmake.invalidate()?;
    }
    cmake.ensure_configured(runner)
}
