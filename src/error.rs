//! Error type shared by every stage of a run.

use crate::process::Pipe;
use crate::pump::Stream;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Clean end-of-stream: the child closed its output without error and wrote
/// nothing to stderr.
///
/// This is the only successful outcome of a command or a sequence. It is a
/// signal in its own right rather than "no error happened".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfStream;

/// Every way a command (and therefore the whole sequence) can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("command line is empty")]
    EmptyProgram,

    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to open {0} pipe")]
    Pipe(Pipe),

    #[error("failed to read {stream}: {source}")]
    Read {
        stream: Stream,
        #[source]
        source: io::Error,
    },

    /// The child wrote to stderr; carries everything it wrote.
    #[error("{0}")]
    Stderr(String),

    #[error("failed to write response: {0}")]
    Write(#[source] io::Error),

    #[error("undefined variable `{0}` in command line")]
    UndefinedVariable(String),

    #[error("output streams disconnected before end of stream")]
    Disconnected,

    #[error("failed to read config file {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
