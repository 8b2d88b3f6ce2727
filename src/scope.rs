// src/scope.rs

//! Relevance scoping: which traced paths count as dependencies.
//!
//! The tracer reports everything a process touches, including shared
//! libraries, locale data and other system files that should never make
//! a build stale. A path is relevant only if it lies under one of the
//! configured directory roots.

use std::path::{Path, PathBuf};

use crate::paths::absolutize;

/// The set of directory roots whose files count as dependencies.
///
/// The working directory is always a root; further roots are added
/// before any tracing occurs and are never removed.
#[derive(Debug, Clone)]
pub struct RelevantRoots {
    cwd: PathBuf,
    roots: Vec<PathBuf>,
}

impl RelevantRoots {
    /// Create a root set containing only `cwd`.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = crate::paths::normalize(&cwd.into());
        let roots = vec![cwd.clone()];
        Self { cwd, roots }
    }

    /// Add a directory root. Relative paths are resolved against the
    /// working directory.
    pub fn add(&mut self, dir: &Path) {
        self.roots.push(absolutize(&self.cwd, dir));
    }

    /// True iff the absolute form of `path` lies under at least one root.
    ///
    /// The prefix test is component-wise, so `/proj2` is not "under"
    /// `/proj`.
    pub fn is_relevant(&self, path: &Path) -> bool {
        let abs = absolutize(&self.cwd, path);
        self.roots.iter().any(|root| abs.starts_with(root))
    }

    /// The working directory all relative paths resolve against.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}
