// src/trace/syscalls.rs

//! The syscall watch-list, kept as data so the parser and the tracer
//! invocation can never drift apart.

/// Filesystem-touching syscalls whose quoted path argument is recorded.
pub const WATCHED_SYSCALLS: &[&str] = &[
    "execve", "open", "openat", "access", "stat", "stat64", "lstat", "statfs",
];

/// Syscalls that may appear in the log but carry no dependency
/// information (timestamp updates and the like). Matched and discarded.
pub const IGNORED_SYSCALLS: &[&str] = &["utimensat"];

pub fn is_watched(name: &str) -> bool {
    WATCHED_SYSCALLS.contains(&name)
}

pub fn is_ignored(name: &str) -> bool {
    IGNORED_SYSCALLS.contains(&name)
}

/// The `-e trace=` argument handed to the tracer.
pub fn trace_filter() -> String {
    WATCHED_SYSCALLS.join(",")
}
