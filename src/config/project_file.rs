//! cmakew.toml parsing
//!
//! An optional file in the source directory that supplies per-project
//! defaults. Every value is overridden by the matching environment variable
//! or command-line flag.
//!
//! ```toml
//! [defaults]
//! build_dir = "out"
//! generator = "Ninja Multi-Config"
//! arch = "x64"
//! config = "Release"
//! test_target = "unit_tests"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// File name looked up in the source directory
pub const PROJECT_FILE_NAME: &str = "cmakew.toml";

/// Root of cmakew.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectFile {
    #[serde(default)]
    pub defaults: ProjectDefaults,
}

/// `[defaults]` section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDefaults {
    pub build_dir: Option<PathBuf>,
    pub generator: Option<String>,
    pub arch: Option<String>,
    pub config: Option<String>,
    pub test_target: Option<String>,
}

impl ProjectFile {
    /// Load cmakew.toml from a source directory; a missing file yields defaults
    pub fn load_from_dir(source_dir: &Path) -> Result<Self> {
        let path = source_dir.join(PROJECT_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load_from_path(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid {}", path.display()))
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse cmakew.toml")
    }
}
