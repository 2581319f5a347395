use crate::command::CommandSpec;
use crate::error::{EndOfStream, Result};
use crate::expectation::ExpectationTable;
use crate::process::ProcessSession;
use crate::pump::{Signal, Stream, spawn_pump};
use crate::receiver::{OutputHandler, ReceiveLoop, stdout_handler};
use log::info;
use std::mem;
use tokio::sync::mpsc;

/// Signals buffered between the pumps and the receive loop.
const SIGNAL_CAPACITY: usize = 64;

/// Runs one command to completion, answering its prompts.
pub struct Executor {
    spec: CommandSpec,
    output: OutputHandler,
    verbose: bool,
}

impl Executor {
    /// Create an executor that copies the child's output to stdout.
    pub fn new(spec: CommandSpec) -> Self {
        Self::with_output_handler(spec, stdout_handler())
    }

    /// Create an executor with a custom sink for the child's output.
    pub fn with_output_handler(spec: CommandSpec, output: OutputHandler) -> Self {
        Executor {
            spec,
            output,
            verbose: false,
        }
    }

    /// Log every stdout chunk at debug level.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn spec(&self) -> &CommandSpec {
        &self.spec
    }

    /// Spawn the command and block until it finishes.
    ///
    /// Both output pumps start before the receive loop so no early output is
    /// lost. Whatever the outcome, stdin is closed, the pumps are stopped and
    /// the child is reaped before this returns. Expectations that fired are
    /// gone from [`spec`](Self::spec) afterwards.
    ///
    /// # Errors
    ///
    /// Spawn and pipe failures, read errors, stderr output and response write
    /// failures are all returned as-is.
    pub async fn execute(&mut self) -> Result<EndOfStream> {
        info!("running `{}`", self.spec.display());
        let (mut session, stdout, stderr) =
            ProcessSession::spawn(&self.spec.program, &self.spec.args)?;

        let (tx, mut rx) = mpsc::channel::<Signal>(SIGNAL_CAPACITY);
        let pumps = [
            spawn_pump(Stream::Stdout, stdout, tx.clone()),
            spawn_pump(Stream::Stderr, stderr, tx),
        ];

        let expectations = mem::take(&mut self.spec.expectations);
        let mut receiver = ReceiveLoop::new(expectations, self.output.clone(), self.verbose);
        let result = receiver.run(&mut rx, session.stdin()).await;
        self.spec.expectations = receiver.into_expectations();

        drop(rx);
        for pump in &pumps {
            pump.abort();
        }
        session.close(result.is_err()).await;

        if !self.spec.expectations.is_empty() {
            info!(
                "{} expectation(s) never matched for `{}`",
                self.spec.expectations.len(),
                self.spec.program
            );
        }
        result
    }

    /// Expectations left unmatched by the last [`execute`](Self::execute).
    pub fn remaining(&self) -> &ExpectationTable {
        &self.spec.expectations
    }
}
