//! JSON configuration: the list of commands to run and the prompts each one answers.
//!
//! The top-level entry points are [`parse_str`] and [`parse_file`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One command as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommandConfig {
    /// Command line, may contain `{{.VAR}}` references to environment variables.
    pub cmd: String,
    /// Older config files call this list `io`.
    #[serde(default, alias = "io")]
    pub expectations: Vec<ExpectationConfig>,
}

/// A prompt to watch for and the line to answer it with.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExpectationConfig {
    /// Substring of the child's output that triggers the answer.
    pub input: String,
    /// Line written to the child's stdin.
    pub output: String,
}

/// Parse a config document held in memory.
///
/// # Errors
///
/// Returns [`Error::Config`] if the document is not a JSON array of command
/// objects.
///
/// # Example
///
/// ```
/// let commands = silentinstall::config::parse_str(
///     r#"[{"cmd": "echo hi", "expectations": []}]"#,
/// ).unwrap();
/// assert_eq!(commands[0].cmd, "echo hi");
/// ```
pub fn parse_str(content: &str) -> Result<Vec<CommandConfig>> {
    Ok(serde_json::from_str(content)?)
}

/// Read and parse a config file.
///
/// # Errors
///
/// Returns [`Error::ReadConfig`] if the file cannot be read, or
/// [`Error::Config`] if it is malformed.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Vec<CommandConfig>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| Error::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    parse_str(&content)
}
