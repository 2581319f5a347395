//! [`Sequence`]: the configured commands, run one after another.

use crate::command::CommandSpec;
use crate::config::CommandConfig;
use crate::error::{EndOfStream, Result};
use crate::executor::Executor;
use crate::receiver::{OutputHandler, stdout_handler};
use crate::template::Environment;
use log::{error, info};

/// Ordered list of commands making up one automation run.
///
/// Commands never overlap: each must finish cleanly before the next starts,
/// and the first failure ends the run.
pub struct Sequence {
    commands: Vec<CommandConfig>,
    env: Environment,
    output: OutputHandler,
    verbose: bool,
}

impl Sequence {
    /// Build a sequence over `commands`, capturing the current environment for
    /// command-line templating.
    pub fn new(commands: Vec<CommandConfig>) -> Self {
        Sequence {
            commands,
            env: std::env::vars().collect(),
            output: stdout_handler(),
            verbose: false,
        }
    }

    /// Replace the variables available to `{{.NAME}}` references.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Send every command's output to `output` instead of stdout.
    pub fn with_output_handler<F>(mut self, output: F) -> Self
    where
        F: Fn(&[u8]) + Send + Sync + 'static,
    {
        self.output = std::sync::Arc::new(output);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Run every command in order.
    ///
    /// Each command line is templated and split just before it runs, so a bad
    /// line only fails once the commands ahead of it have completed.
    ///
    /// # Errors
    ///
    /// Returns the first command's error verbatim; later commands are not run.
    pub async fn run(self) -> Result<EndOfStream> {
        let total = self.commands.len();
        for (index, config) in self.commands.into_iter().enumerate() {
            info!("command {}/{total}: {}", index + 1, config.cmd);
            let spec = CommandSpec::from_config(config, &self.env)?;
            let mut executor =
                Executor::with_output_handler(spec, self.output.clone()).verbose(self.verbose);
            if let Err(e) = executor.execute().await {
                error!("command {}/{total} failed: {e}", index + 1);
                return Err(e);
            }
        }
        Ok(EndOfStream)
    }
}
