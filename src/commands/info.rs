//! Info command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::config::InvocationContext;

/// Print the resolved configuration
#[derive(Args, Debug, Default)]
pub struct InfoCommand {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct InfoReport<'a> {
    #[serde(flatten)]
    context: &'a InvocationContext,
    configured: bool,
}

impl InfoCommand {
    /// Execute the info command
    pub fn execute(self, ctx: &InvocationContext) -> Result<()> {
        println!("{}", self.render(ctx)?);
        Ok(())
    }

    fn render(&self, ctx: &InvocationContext) -> Result<String> {
        let report = InfoReport {
            context: ctx,
            configured: ctx.is_configured(),
        };

        if self.json {
            return serde_json::to_string_pretty(&report).context("Failed to serialize info");
        }

        Ok([
            format!("Source: {}", ctx.source_dir.display()),
            format!("Build : {}", ctx.build_dir.display()),
            format!("Gen   : {}", ctx.generator),
            format!("Arch  : {}", ctx.arch),
            format!("Config: {}", ctx.config),
            format!("Multi : {}", ctx.multi_config),
            format!("Cache : {}", if report.configured { "present" } else { "absent" }),
        ]
        .join("\n"))
    }
}
