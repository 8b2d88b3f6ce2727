// src/engine.rs

//! The memoization engine: look up, evaluate, skip or re-run, persist.
//!
//! One invocation walks a fixed state machine:
//!
//! LOOKUP → UP_TO_DATE (skip, report 0, cache file untouched)
//!        → STALE → RECORD → RECORD_OK   (replace snapshot, persist, 0)
//!                         → RECORD_FAIL (drop snapshot, persist, real code)

use tracing::{info, warn};

use crate::cache::DepCache;
use crate::config::MemoConfig;
use crate::errors::Result;
use crate::record;
use crate::snapshot;
use crate::trace::TraceBackend;

pub struct Engine<B: TraceBackend> {
    config: MemoConfig,
    backend: B,
}

impl<B: TraceBackend> Engine<B> {
    pub fn new(config: MemoConfig, backend: B) -> Self {
        Self { config, backend }
    }

    /// Memoize one command. Returns the exit code the process should
    /// propagate: 0 for a skip or a clean run, the command's own code
    /// otherwise.
    pub fn memoize(&self, argv: &[String]) -> Result<i32> {
        let mut cache = DepCache::load(&self.config.cache_path);

        // Tri-state: an absent entry means "never run" and always
        // forces execution; only a found snapshot is evaluated.
        if let Some(deps) = cache.lookup(argv) {
            if snapshot::is_up_to_date(deps, self.config.mode) {
                info!(cmd = ?argv, "up to date");
                return Ok(0);
            }
        }

        let outcome = record::record(&self.config, &self.backend, argv)?;

        if outcome.exit_code == 0 {
            cache.insert(argv, outcome.snapshot);
        } else {
            // A snapshot from a failed run is not trustworthy; drop any
            // prior entry so the next invocation retraces.
            warn!(
                cmd = ?argv,
                exit_code = outcome.exit_code,
                "traced command failed; dropping its cache entry"
            );
            cache.remove(argv);
        }

        cache.store(&self.config.cache_path)?;
        Ok(outcome.exit_code)
    }
}
