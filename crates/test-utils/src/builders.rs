#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use memotrace::config::MemoConfig;
use memotrace::fingerprint::FingerprintMode;
use memotrace::scope::RelevantRoots;
use tempfile::TempDir;

/// Builder for strace-style log text to simplify test setup.
pub struct TraceLogBuilder {
    lines: Vec<String>,
}

impl TraceLogBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// A watched syscall line with a quoted path argument.
    pub fn call(mut self, syscall: &str, path: &str) -> Self {
        self.lines
            .push(format!(r#"{syscall}("{path}", O_RDONLY) = 3"#));
        self
    }

    /// Same, with a leading pid as written by a follow-forks trace.
    pub fn pid_call(mut self, pid: u32, syscall: &str, path: &str) -> Self {
        self.lines
            .push(format!(r#"{pid}  {syscall}("{path}", O_RDONLY) = 3"#));
        self
    }

    pub fn open(self, path: &str) -> Self {
        self.call("open", path)
    }

    pub fn stat(self, path: &str) -> Self {
        self.call("stat", path)
    }

    pub fn access(self, path: &str) -> Self {
        self.call("access", path)
    }

    pub fn execve(mut self, path: &str) -> Self {
        self.lines
            .push(format!(r#"execve("{path}", ["{path}"], 0x7ffc2e1a2b30 /* 12 vars */) = 0"#));
        self
    }

    pub fn signal(mut self, name: &str) -> Self {
        self.lines
            .push(format!("--- {name} {{si_signo={name}}} ---"));
        self
    }

    pub fn exited(mut self, code: i32) -> Self {
        self.lines.push(format!("+++ exited with {code} +++"));
        self
    }

    /// Any verbatim line, for continuation markers and junk.
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn build(self) -> String {
        let mut log = self.lines.join("\n");
        log.push('\n');
        log
    }
}

impl Default for TraceLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary project directory: input files live under it, the run
/// configuration is rooted at it, and the cache is kept inside it.
pub struct TempProject {
    dir: TempDir,
}

impl TempProject {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("creating temp project dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file under the project root, creating parent directories.
    /// Returns the absolute path.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("creating parent dirs");
        }
        fs::write(&path, contents).expect("writing project file");
        path
    }

    pub fn cache_path(&self) -> PathBuf {
        self.dir.path().join(".memotrace/deps")
    }

    /// A run configuration scoped to this project.
    pub fn config(&self, mode: FingerprintMode) -> MemoConfig {
        MemoConfig {
            mode,
            roots: RelevantRoots::new(self.dir.path()),
            cache_path: self.cache_path(),
        }
    }
}

impl Default for TempProject {
    fn default() -> Self {
        Self::new()
    }
}
