//! Locating built executables inside a build tree
//!
//! The search runs in two phases:
//!
//! 1. A fixed, ordered list of conventional locations (build root, `tests/`,
//!    `bin/`, each nested under the configuration name on multi-config
//!    generators). For each file name (`<target>.exe` first, then `<target>`)
//!    the locations are tried in order and the first regular file wins. This
//!    phase is deterministic.
//! 2. A bounded recursive walk of the build directory. On multi-config
//!    generators the first hit whose directory mentions the configuration
//!    name wins, otherwise the first hit. Walk order is whatever the
//!    filesystem returns, so when several files share the target name the
//!    choice between them is not deterministic.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

use crate::config::InvocationContext;
use crate::error::WrapperError;
use crate::utils::paths::path_contains_ignore_case;

/// Suffix probed before the bare name
pub const EXE_SUFFIX: &str = ".exe";

/// Deepest directory level visited by the fallback walk
pub const MAX_WALK_DEPTH: usize = 12;

/// Produces one candidate directory from the build dir, config and multi-config flag
type CandidateDir = fn(&Path, &str, bool) -> PathBuf;

/// Candidate directories, highest priority first
const CANDIDATE_DIRS: &[CandidateDir] = &[build_root, tests_subdir, bin_subdir];

fn nested(dir: PathBuf, config: &str, multi_config: bool) -> PathBuf {
    if multi_config {
        dir.join(config)
    } else {
        dir
    }
}

fn build_root(build_dir: &Path, config: &str, multi_config: bool) -> PathBuf {
    nested(build_dir.to_path_buf(), config, multi_config)
}

fn tests_subdir(build_dir: &Path, config: &str, multi_config: bool) -> PathBuf {
    nested(build_dir.join("tests"), config, multi_config)
}

fn bin_subdir(build_dir: &Path, config: &str, multi_config: bool) -> PathBuf {
    nested(build_dir.join("bin"), config, multi_config)
}

/// File names an executable for `target` may have, in probe order
fn file_names(target: &str) -> [String; 2] {
    [format!("{}{}", target, EXE_SUFFIX), target.to_string()]
}

/// Executable lookup for one build tree
#[derive(Debug, Clone)]
pub struct ArtifactSearch {
    build_dir: PathBuf,
    config: String,
    multi_config: bool,
}

impl ArtifactSearch {
    pub fn new(build_dir: PathBuf, config: impl Into<String>, multi_config: bool) -> Self {
        Self {
            build_dir,
            config: config.into(),
            multi_config,
        }
    }

    pub fn from_context(ctx: &InvocationContext) -> Self {
        Self::new(ctx.build_dir.clone(), &ctx.config, ctx.multi_config)
    }

    /// Fixed-phase candidate paths, in priority order
    pub fn candidates(&self, target: &str) -> Vec<PathBuf> {
        file_names(target)
            .iter()
            .flat_map(|name| {
                CANDIDATE_DIRS.iter().map(move |dir| {
                    (*dir)(self.build_dir.as_path(), self.config.as_str(), self.multi_config)
                        .join(name)
                })
            })
            .collect()
    }

    /// Every file under the build directory named like the target, `.exe`
    /// matches first. Order within each group follows the walk.
    pub fn walk(&self, target: &str) -> Vec<PathBuf> {
        let [exe_name, bare_name] = file_names(target);
        let mut exe_hits = Vec::new();
        let mut bare_hits = Vec::new();

        let entries = WalkDir::new(&self.build_dir)
            .max_depth(MAX_WALK_DEPTH)
            .into_iter()
            .filter_map(|entry| entry.ok());

        for entry in entries {
            let name = entry.file_name().to_string_lossy();
            if name != exe_name.as_str() && name != bare_name.as_str() {
                continue;
            }
            if !entry.path().is_file() {
                continue;
            }
            if name == exe_name.as_str() {
                exe_hits.push(entry.into_path());
            } else {
                bare_hits.push(entry.into_path());
            }
        }

        exe_hits.extend(bare_hits);
        exe_hits
    }

    /// Choose among walk hits
    fn pick(&self, hits: Vec<PathBuf>) -> Option<PathBuf> {
        if self.multi_config {
            let preferred = hits.iter().position(|hit| {
                let parent = hit.parent().unwrap_or(hit);
                let relative = parent.strip_prefix(&self.build_dir).unwrap_or(parent);
                path_contains_ignore_case(relative, &self.config)
            });
            if let Some(index) = preferred {
                return hits.into_iter().nth(index);
            }
        }
        hits.into_iter().next()
    }

    /// Find the executable for `target`, if the build produced one
    pub fn find(&self, target: &str) -> Option<PathBuf> {
        if let Some(hit) = self
            .candidates(target)
            .into_iter()
            .find(|candidate| candidate.is_file())
        {
            return Some(hit);
        }
        self.pick(self.walk(target))
    }

    /// Like [`find`](Self::find), but a miss is an [`WrapperError::ArtifactNotFound`]
    pub fn locate(&self, target: &str) -> Result<PathBuf> {
        self.find(target).ok_or_else(|| {
            WrapperError::ArtifactNotFound {
                target: target.to_string(),
                build_dir: self.build_dir.clone(),
                searched: self.candidates(target),
            }
            .into()
        })
    }
}
