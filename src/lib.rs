// src/lib.rs

pub mod cache;
pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod fingerprint;
pub mod logging;
pub mod paths;
pub mod record;
pub mod scope;
pub mod snapshot;
pub mod trace;

use anyhow::Result;

use crate::cli::CliArgs;
use crate::config::MemoConfig;
use crate::engine::Engine;
use crate::trace::StraceBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - run configuration (check mode, relevant roots, cache path)
/// - the real `strace` backend
/// - the memoization engine
///
/// Returns the exit code the process should propagate: 0 when the
/// command was skipped (up to date) or ran cleanly, the command's own
/// code otherwise.
pub fn run(args: CliArgs) -> Result<i32> {
    let config = MemoConfig::from_args(&args)?;
    let engine = Engine::new(config, StraceBackend::new());
    let code = engine.memoize(&args.command)?;
    Ok(code)
}
