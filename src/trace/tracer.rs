// src/trace/tracer.rs

//! Pluggable tracer backend abstraction.
//!
//! The recorder talks to a `TraceBackend` instead of spawning `strace`
//! directly. This makes it easy to swap in a fake tracer in tests (one
//! that writes a canned log and returns a scripted exit code) while
//! keeping the production invocation here.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::errors::{MemotraceError, Result};
use crate::trace::syscalls;

/// Trait abstracting how a command is run under syscall tracing.
///
/// Production code uses [`StraceBackend`]; tests provide their own
/// implementation that doesn't spawn real processes.
pub trait TraceBackend {
    /// Run `argv` to completion under the tracer, writing the syscall
    /// log to `log_path`. Returns the traced command's exit code.
    ///
    /// Failing to invoke the tracer itself is the only fatal error in
    /// the system; a failing *traced command* is a normal return with a
    /// non-zero code.
    fn trace(&self, argv: &[String], log_path: &Path) -> Result<i32>;
}

/// Real tracer backend: spawns `strace` with follow-forks, quiet mode,
/// the watched-syscall allowlist, and the log redirected to a private
/// file, followed by the target command verbatim.
#[derive(Debug, Clone)]
pub struct StraceBackend {
    program: PathBuf,
}

impl StraceBackend {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("strace"),
        }
    }

    /// Use a different tracer binary (e.g. an absolute path).
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for StraceBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceBackend for StraceBackend {
    fn trace(&self, argv: &[String], log_path: &Path) -> Result<i32> {
        debug!(tracer = ?self.program, cmd = ?argv, log = ?log_path, "spawning tracer");

        let status = Command::new(&self.program)
            .arg("-f")
            .arg("-q")
            .arg("-e")
            .arg(format!("trace={}", syscalls::trace_filter()))
            .arg("-o")
            .arg(log_path)
            .arg("--")
            .args(argv)
            .status()
            .map_err(|source| MemotraceError::TracerSpawn {
                program: self.program.display().to_string(),
                source,
            })?;

        // Signal deaths have no exit code; map them to -1 like any
        // other failure so the cache entry is invalidated.
        Ok(status.code().unwrap_or(-1))
    }
}
