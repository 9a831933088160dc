//! Path utilities for cmakew

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Resolve a possibly relative path against a base directory
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Ensure a directory exists
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Case-insensitive substring test on a path's textual form
pub fn path_contains_ignore_case(path: &Path, needle: &str) -> bool {
    path.to_string_lossy()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}
