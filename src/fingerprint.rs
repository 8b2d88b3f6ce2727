// src/fingerprint.rs

//! File fingerprinting: content hashes and modification times.
//!
//! Fingerprinting must never take down the traced command's run, so both
//! functions return `Err(Unreadable)` for any failure (missing file,
//! permission, read race) instead of propagating I/O errors. `Unreadable`
//! is data: callers compare results, they never unwind.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

use blake3::Hasher;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A file could not be read or stat'ed at fingerprint time.
///
/// An unreadable file is treated as changed on every evaluation, so a
/// dependency that was unreadable once stays stale until it can be
/// fingerprinted again.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("file unreadable at fingerprint time")]
pub struct Unreadable;

/// Which fingerprint is compared when evaluating staleness.
///
/// Per-run configuration, never per-file. Both fingerprints are recorded
/// regardless of mode, so the mode can be switched between runs without
/// losing history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintMode {
    /// Full-content hash: correct across copies, costs a full read.
    Content,
    /// Modification timestamp: cheap, equal only under exact match.
    ModTime,
}

/// Exact filesystem modification time, relative to the Unix epoch.
///
/// Seconds are signed so pre-epoch timestamps round-trip; `nanos` is
/// always a positive offset within the second. Compared only for exact
/// equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModTime {
    pub secs: i64,
    pub nanos: u32,
}

impl From<SystemTime> for ModTime {
    fn from(t: SystemTime) -> Self {
        match t.duration_since(SystemTime::UNIX_EPOCH) {
            Ok(d) => ModTime {
                secs: d.as_secs() as i64,
                nanos: d.subsec_nanos(),
            },
            Err(e) => {
                // Pre-epoch: borrow a second so nanos stays a positive offset.
                let d = e.duration();
                if d.subsec_nanos() == 0 {
                    ModTime {
                        secs: -(d.as_secs() as i64),
                        nanos: 0,
                    }
                } else {
                    ModTime {
                        secs: -(d.as_secs() as i64) - 1,
                        nanos: 1_000_000_000 - d.subsec_nanos(),
                    }
                }
            }
        }
    }
}

/// Hash the full content of a file, hex-encoded.
pub fn content_hash(path: &Path) -> Result<String, Unreadable> {
    let mut hasher = Hasher::new();
    let mut file = File::open(path).map_err(|_| Unreadable)?;
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(|_| Unreadable)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Read the exact modification time of a file.
pub fn mod_time(path: &Path) -> Result<ModTime, Unreadable> {
    let meta = fs::metadata(path).map_err(|_| Unreadable)?;
    let mtime = meta.modified().map_err(|_| Unreadable)?;
    Ok(ModTime::from(mtime))
}
