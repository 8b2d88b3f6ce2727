// src/config.rs

//! Per-run configuration.
//!
//! Everything that used to be ambient (check mode, relevant roots, the
//! cache location) is one explicit value built from the CLI once and
//! owned by the engine; there is no process-wide mutable state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::CliArgs;
use crate::fingerprint::FingerprintMode;
use crate::scope::RelevantRoots;

#[derive(Debug, Clone)]
pub struct MemoConfig {
    /// Which fingerprint decides staleness this run.
    pub mode: FingerprintMode,
    /// Directory roots whose files count as dependencies.
    pub roots: RelevantRoots,
    /// Where the dependency cache lives.
    pub cache_path: PathBuf,
}

impl MemoConfig {
    /// Build the run configuration from parsed CLI arguments.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("resolving current working directory")?;

        let mut roots = RelevantRoots::new(cwd);
        for dir in &args.dir {
            roots.add(Path::new(dir));
        }

        let mode = if args.use_modtime {
            FingerprintMode::ModTime
        } else {
            FingerprintMode::Content
        };

        Ok(Self {
            mode,
            roots,
            cache_path: PathBuf::from(&args.cache),
        })
    }
}
