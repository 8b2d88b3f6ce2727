// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::cache::CACHE_FILE_PATH;

/// Command-line arguments for `memotrace`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "memotrace",
    version,
    about = "Memoize a command based on the files it actually reads.",
    long_about = None
)]
pub struct CliArgs {
    /// Compare modification times instead of content hashes.
    ///
    /// Cheap, but equal only under exact match: a copy with a preserved
    /// mtime is indistinguishable from the original.
    #[arg(short = 't', long = "use-modtime")]
    pub use_modtime: bool,

    /// Add a directory whose files count as dependencies (repeatable).
    ///
    /// The current working directory is always included.
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Vec<String>,

    /// Path to the dependency cache file.
    #[arg(long, value_name = "PATH", default_value = CACHE_FILE_PATH)]
    pub cache: String,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `MEMOTRACE_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The command to run (and skip while its inputs are unchanged).
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
