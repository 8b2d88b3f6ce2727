// src/cache.rs

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::errors;
use crate::snapshot::Snapshot;

/// Default cache location, relative to the working directory.
pub const CACHE_FILE_PATH: &str = ".memotrace/deps";

/// One persisted command: its literal argument vector (the cache key,
/// compared byte-for-byte, flag order included) and the dependency
/// snapshot from its last successful traced run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEntry {
    pub argv: Vec<String>,
    #[serde(default)]
    pub deps: Snapshot,
}

/// On-disk shape: a TOML array-of-tables, which round-trips entry order
/// and nested snapshot order exactly.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    #[serde(default, rename = "command")]
    commands: Vec<CommandEntry>,
}

/// The persisted mapping from command identity to dependency snapshot.
///
/// Kept as a vector rather than a map so argv keys stay structured
/// (TOML maps require string keys) and file order is stable; the scale
/// is a handful of commands, so linear lookup is fine.
#[derive(Debug, Default)]
pub struct DepCache {
    commands: Vec<CommandEntry>,
}

impl DepCache {
    /// Load the cache, failing open: a missing or undecodable file is
    /// an empty cache, and any prior history in a corrupt file is
    /// discarded.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(Some(cache)) => {
                debug!(path = ?path, commands = cache.commands.len(), "loaded dependency cache");
                cache
            }
            Ok(None) => {
                debug!(path = ?path, "no cache file; starting empty");
                Self::default()
            }
            Err(err) => {
                warn!(path = ?path, error = %err, "unreadable cache file; discarding history");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> errors::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(path)?;
        let file: CacheFile = toml::from_str(&text)?;
        Ok(Some(Self {
            commands: file.commands,
        }))
    }

    /// Tri-state lookup: `None` means this command has never been
    /// recorded and must execute regardless of anything else.
    pub fn lookup(&self, argv: &[String]) -> Option<&Snapshot> {
        self.commands
            .iter()
            .find(|entry| entry.argv == argv)
            .map(|entry| &entry.deps)
    }

    /// Replace (or create) the snapshot for a command, wholesale.
    pub fn insert(&mut self, argv: &[String], deps: Snapshot) {
        match self.commands.iter_mut().find(|entry| entry.argv == argv) {
            Some(entry) => entry.deps = deps,
            None => self.commands.push(CommandEntry {
                argv: argv.to_vec(),
                deps,
            }),
        }
    }

    /// Drop the snapshot for a command, forcing a retrace next time.
    pub fn remove(&mut self, argv: &[String]) {
        self.commands.retain(|entry| entry.argv != argv);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Persist the cache. The file is written to a sibling temp file
    /// and renamed into place, so a concurrent reader sees either the
    /// old contents or the new, never a torn file.
    pub fn store(&self, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating cache directory at {:?}", parent))?;
                parent
            }
            _ => Path::new("."),
        };

        let file = CacheFile {
            commands: self.commands.clone(),
        };
        let text = toml::to_string_pretty(&file).context("encoding dependency cache")?;

        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("creating temporary cache file in {:?}", dir))?;
        tmp.write_all(text.as_bytes())
            .with_context(|| format!("writing temporary cache file at {:?}", tmp.path()))?;
        tmp.persist(path)
            .with_context(|| format!("replacing cache file at {:?}", path))?;

        info!(path = ?path, commands = self.commands.len(), "stored dependency cache");
        Ok(())
    }
}
