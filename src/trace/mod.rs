// src/trace/mod.rs

//! Syscall tracing: invoking the tracer and parsing its log.
//!
//! - [`syscalls`] holds the watched/ignored syscall lists as data.
//! - [`parser`] classifies trace log lines and extracts candidate paths.
//! - [`tracer`] provides the `TraceBackend` trait and the concrete
//!   `StraceBackend` used in production; tests substitute a fake backend
//!   that writes a canned log.

pub mod parser;
pub mod syscalls;
pub mod tracer;

pub use parser::{TraceLine, TraceParser};
pub use tracer::{StraceBackend, TraceBackend};
