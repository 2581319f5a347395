//! [`CommandSpec`]: a resolved program, its arguments, and the prompts it answers.

use crate::config::CommandConfig;
use crate::error::{Error, Result};
use crate::expectation::{Expectation, ExpectationTable};
use crate::template::{self, Environment};

/// A command ready to execute.
///
/// Built from an already-substituted command line. The line is split on single
/// spaces only: there is no quoting, so an argument cannot contain a space.
/// Use [`CommandSpec::new`] when arguments need spaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub expectations: ExpectationTable,
}

impl CommandSpec {
    /// Build a spec from an explicit program and argument list.
    pub fn new<I, S>(program: impl Into<String>, args: I, expectations: Vec<Expectation>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            expectations: ExpectationTable::new(expectations),
        }
    }

    /// Split `line` into program and arguments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyProgram`] if the line holds nothing but spaces.
    pub fn parse(line: &str, expectations: Vec<Expectation>) -> Result<Self> {
        let mut tokens = line.split(' ').filter(|t| !t.is_empty());
        let program = tokens.next().ok_or(Error::EmptyProgram)?;
        Ok(Self::new(program, tokens, expectations))
    }

    /// Substitute `env` into a configured command line, then [`parse`](Self::parse) it.
    ///
    /// # Errors
    ///
    /// Fails on an undefined template variable or an empty command line.
    pub fn from_config(config: CommandConfig, env: &Environment) -> Result<Self> {
        let line = template::render(&config.cmd, env)?;
        let expectations = config.expectations.into_iter().map(Into::into).collect();
        Self::parse(&line, expectations)
    }

    /// The command line as it will be executed, for logging.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
