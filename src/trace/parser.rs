// src/trace/parser.rs

//! Classifier for tracer log lines.
//!
//! The log interleaves lines from the traced process and all its forked
//! children, each optionally prefixed with a pid. We never reconstruct
//! per-process call order; the only thing extracted is the union of
//! quoted paths passed to watched syscalls.
//!
//! Trace formats vary slightly across kernel and tracer versions, so an
//! unrecognised line is a warning, never an abort: partial parsing must
//! still yield a usable dependency set.

use regex::Regex;
use tracing::warn;

use crate::trace::syscalls;

/// One classified trace log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceLine<'a> {
    /// A watched syscall with a double-quoted first argument. The path
    /// is taken as-is; backslash-escaped quotes inside stay escaped,
    /// since the path is only filtered and fingerprinted, never printed.
    WatchedCall { syscall: &'a str, path: &'a str },
    /// A syscall we explicitly match and discard.
    IgnoredCall,
    /// Resumption of a syscall that blocked (`<... open resumed>`).
    Continuation,
    /// Signal delivery (`--- SIGCHLD ... ---`).
    Signal,
    /// Process exit (`+++ exited with 0 +++`).
    Exit,
    /// Anything else; reported and skipped.
    Unparseable,
}

/// Line classifier with its two shape patterns compiled once.
///
/// The syscall allowlist itself lives in [`syscalls`] as plain data and
/// is consulted after the shape match, so the classification logic and
/// the watch-list cannot drift apart.
#[derive(Debug)]
pub struct TraceParser {
    call_re: Regex,
    path_re: Regex,
}

impl TraceParser {
    pub fn new() -> Self {
        let call_re = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\(")
            .expect("syscall head pattern is valid");
        let path_re = Regex::new(r#"^"((?:\\"|[^"])*)""#)
            .expect("quoted path pattern is valid");
        Self { call_re, path_re }
    }

    /// Classify a single log line.
    pub fn classify<'a>(&self, line: &'a str) -> TraceLine<'a> {
        let rest = strip_pid(line);

        if rest.starts_with('<') {
            return TraceLine::Continuation;
        }
        if rest.starts_with("---") {
            return TraceLine::Signal;
        }
        if rest.starts_with("+++") {
            return TraceLine::Exit;
        }

        let Some(caps) = self.call_re.captures(rest) else {
            return TraceLine::Unparseable;
        };
        let name = caps.get(1).expect("group 1 always present").as_str();
        let after = &rest[caps.get(0).expect("whole match").end()..];

        if syscalls::is_ignored(name) {
            return TraceLine::IgnoredCall;
        }
        if syscalls::is_watched(name) {
            // A watched call must open with a double-quoted path; other
            // first arguments (descriptors, addresses) are unparseable.
            return match self.path_re.captures(after) {
                Some(pcaps) => TraceLine::WatchedCall {
                    syscall: name,
                    path: pcaps.get(1).expect("group 1 always present").as_str(),
                },
                None => TraceLine::Unparseable,
            };
        }

        TraceLine::Unparseable
    }

    /// Extract candidate dependency paths from a whole log, in line
    /// order, duplicates included (deduplication happens after lexical
    /// normalization, in the recorder).
    ///
    /// Unparseable lines are warned about and skipped; watched calls
    /// with an empty quoted path are silently discarded.
    pub fn candidate_paths<'a>(&self, log: &'a str) -> Vec<&'a str> {
        let mut candidates = Vec::new();

        for line in log.lines() {
            match self.classify(line) {
                TraceLine::WatchedCall { path, .. } if !path.is_empty() => {
                    candidates.push(path);
                }
                TraceLine::Unparseable => {
                    warn!(line = %line, "failed to parse trace line");
                }
                _ => {}
            }
        }

        candidates
    }
}

impl Default for TraceParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip an optional `pid` prefix: a run of digits followed by
/// whitespace. Digits not followed by whitespace are left in place and
/// fall through to normal classification.
fn strip_pid(line: &str) -> &str {
    let digits = line.bytes().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return line;
    }
    let rest = &line[digits..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    if trimmed.len() < rest.len() { trimmed } else { line }
}
