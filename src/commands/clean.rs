//! Clean command implementation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use walkdir::WalkDir;

use crate::config::InvocationContext;
use crate::utils::terminal::{print_info, print_success};

/// Delete the build directory
#[derive(Args, Debug, Default)]
pub struct CleanCommand {
    /// Show what would be deleted
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanCommand {
    /// Execute the clean command
    pub fn execute(self, ctx: &InvocationContext) -> Result<()> {
        let build_dir = &ctx.build_dir;

        if !build_dir.is_dir() {
            print_info(&format!("No build dir at {}", build_dir.display()));
            return Ok(());
        }

        let size = format_size(get_dir_size(build_dir));

        if self.dry_run {
            println!("  [DRY RUN] Would remove: {} ({})", build_dir.display(), size);
            return Ok(());
        }

        fs::remove_dir_all(build_dir)
            .with_context(|| format!("Failed to remove {}", build_dir.display()))?;
        print_success(&format!("Removed {} ({})", build_dir.display(), size));
        Ok(())
    }
}

fn get_dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.metadata().ok())
        .filter(|metadata| metadata.is_file())
        .map(|metadata| metadata.len())
        .sum()
}

fn format_size(size_bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = size_bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_idx])
}
