// src/record.rs

//! Dependency recording: one traced execution, one snapshot.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::MemoConfig;
use crate::errors::Result;
use crate::fingerprint;
use crate::paths;
use crate::snapshot::{DependencyEntry, Snapshot};
use crate::trace::{TraceBackend, TraceParser};

/// What one traced execution produced.
#[derive(Debug)]
pub struct RecordOutcome {
    /// The traced command's real exit code. A non-zero code does not
    /// make the snapshot structurally wrong, but the engine never
    /// persists a snapshot from a failed run.
    pub exit_code: i32,
    pub snapshot: Snapshot,
}

/// Run `argv` under the tracer and assemble its dependency snapshot.
///
/// The trace log lives in a private temp file owned by this call; it is
/// deleted on every path out (success, parse warnings, errors) when the
/// `NamedTempFile` drops.
pub fn record<B: TraceBackend>(
    config: &MemoConfig,
    backend: &B,
    argv: &[String],
) -> Result<RecordOutcome> {
    info!(cmd = ?argv, "running traced command");

    let log_file = NamedTempFile::new().context("creating temporary trace log")?;
    let exit_code = backend.trace(argv, log_file.path())?;

    // The log may carry arbitrary bytes in paths; parse it lossily
    // rather than refusing the whole trace.
    let raw = fs::read(log_file.path())
        .with_context(|| format!("reading trace log at {:?}", log_file.path()))?;
    let log_text = String::from_utf8_lossy(&raw);

    let snapshot = collect_snapshot(config, &log_text);

    debug!(exit_code, deps = snapshot.len(), "recorded dependency snapshot");
    Ok(RecordOutcome {
        exit_code,
        snapshot,
    })
}

/// Parse a trace log into a snapshot: normalize each candidate path,
/// keep it iff it is relevant, currently a regular file, and not
/// already recorded this run, then fingerprint it both ways.
fn collect_snapshot(config: &MemoConfig, log_text: &str) -> Snapshot {
    let parser = TraceParser::new();
    let mut snapshot = Snapshot::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for candidate in parser.candidate_paths(log_text) {
        let path = paths::normalize(Path::new(candidate));

        if !config.roots.is_relevant(&path) {
            continue;
        }
        if !path.is_file() {
            continue;
        }
        if !seen.insert(path.clone()) {
            continue;
        }

        debug!(path = ?path, "recording dependency");
        snapshot.push(DependencyEntry {
            // Both fingerprints are stored regardless of the active
            // mode, so the mode can change without losing history.
            content: fingerprint::content_hash(&path).ok(),
            modified: fingerprint::mod_time(&path).ok(),
            path,
        });
    }

    snapshot
}
