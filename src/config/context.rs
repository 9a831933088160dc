//! Resolved per-invocation configuration

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use super::generator::{default_generator, is_multi_config};
use super::project_file::ProjectFile;
use crate::utils::paths::resolve_against;

/// Marker written by the configure step; its presence means "configured"
pub const MARKER_FILE: &str = "CMakeCache.txt";

pub const DEFAULT_BUILD_DIR: &str = "build";
pub const DEFAULT_ARCH: &str = "x64";
pub const DEFAULT_CONFIG: &str = "Debug";

/// Values given on the command line or through environment variables.
///
/// clap already merges flag and environment (flag wins), so `None` here means
/// neither was given.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub generator: Option<String>,
    pub arch: Option<String>,
    pub config: Option<String>,
    pub verbose: bool,
}

/// Everything a command needs to know about the current invocation
#[derive(Debug, Clone, Serialize)]
pub struct InvocationContext {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub generator: String,
    pub arch: String,
    pub config: String,
    pub multi_config: bool,
    /// Default `test --direct` target from cmakew.toml
    #[serde(skip)]
    pub test_target: Option<String>,
    #[serde(skip)]
    pub verbose: bool,
}

impl InvocationContext {
    /// Layer overrides over cmakew.toml over built-in defaults.
    ///
    /// `cwd` is used when no source directory was given.
    pub fn resolve(overrides: Overrides, cwd: &Path) -> Result<Self> {
        let source_dir = match overrides.source_dir {
            Some(dir) => resolve_against(cwd, &dir),
            None => cwd.to_path_buf(),
        };
        let defaults = ProjectFile::load_from_dir(&source_dir)?.defaults;

        let build_dir = overrides
            .build_dir
            .or(defaults.build_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR));
        let build_dir = resolve_against(&source_dir, &build_dir);

        let generator = overrides
            .generator
            .or(defaults.generator)
            .unwrap_or_else(|| default_generator().to_string());
        let arch = overrides
            .arch
            .or(defaults.arch)
            .unwrap_or_else(|| DEFAULT_ARCH.to_string());
        let config = overrides
            .config
            .or(defaults.config)
            .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

        Ok(Self {
            multi_config: is_multi_config(&generator),
            source_dir,
            build_dir,
            generator,
            arch,
            config,
            test_target: defaults.test_target,
            verbose: overrides.verbose,
        })
    }

    /// Path of the configure marker inside the build directory
    pub fn marker_file(&self) -> PathBuf {
        self.build_dir.join(MARKER_FILE)
    }

    /// Whether the build directory has already been configured
    pub fn is_configured(&self) -> bool {
        self.marker_file().exists()
    }
}
