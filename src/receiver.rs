//! The receive loop: matches child output against expectations and answers them.

use crate::error::{EndOfStream, Error, Result};
use crate::expectation::ExpectationTable;
use crate::pump::{Signal, Stream};
use crate::response::write_response;
use log::{debug, info};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc::Receiver;
use tokio::time::{Instant, timeout_at};

/// How long stderr may trail stdout's end of stream before the outcome is decided.
pub const STDERR_GRACE: Duration = Duration::from_millis(100);

/// Sink for the child's stdout, called with every chunk as it arrives.
pub type OutputHandler = Arc<dyn Fn(&[u8]) + Send + Sync>;

/// Handler that copies child output to our own stdout.
pub fn stdout_handler() -> OutputHandler {
    Arc::new(|data: &[u8]| {
        let mut stdout = io::stdout().lock();
        let _ = stdout.write_all(data);
        let _ = stdout.flush();
    })
}

enum State {
    Waiting,
    Matched,
    Done,
    Failed(Error),
}

/// Per-command matching state.
///
/// Owns the receive buffer and the expectation table; only the loop itself
/// touches them, the pumps just feed it [`Signal`]s.
pub struct ReceiveLoop {
    expectations: ExpectationTable,
    buffer: Vec<u8>,
    stderr: Vec<u8>,
    stderr_closed: bool,
    output: OutputHandler,
    verbose: bool,
}

impl ReceiveLoop {
    pub fn new(expectations: ExpectationTable, output: OutputHandler, verbose: bool) -> Self {
        Self {
            expectations,
            buffer: Vec::new(),
            stderr: Vec::new(),
            stderr_closed: false,
            output,
            verbose,
        }
    }

    /// Output accumulated since the last match.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Expectations that have not fired yet.
    pub fn expectations(&self) -> &ExpectationTable {
        &self.expectations
    }

    pub fn into_expectations(self) -> ExpectationTable {
        self.expectations
    }

    /// Consume signals until the command finishes.
    ///
    /// Returns [`EndOfStream`] when stdout reaches end of stream and nothing
    /// was written to stderr. Stderr does not have to close: signals already
    /// queued, and any that arrive within [`STDERR_GRACE`], are still counted,
    /// so a background process holding stderr open cannot stall the command.
    /// There is no timeout before that: a child that never closes stdout keeps
    /// this waiting.
    ///
    /// # Errors
    ///
    /// A read error on either stream, any stderr output, or a failed response
    /// write ends the loop with that error.
    pub async fn run<W>(&mut self, rx: &mut Receiver<Signal>, stdin: &mut W) -> Result<EndOfStream>
    where
        W: AsyncWrite + Unpin,
    {
        loop {
            let Some(signal) = rx.recv().await else {
                return Err(Error::Disconnected);
            };
            match self.handle(signal, stdin).await {
                State::Waiting | State::Matched => {}
                State::Done => return self.finish(rx).await,
                State::Failed(e) => return Err(e),
            }
        }
    }

    async fn handle<W>(&mut self, signal: Signal, stdin: &mut W) -> State
    where
        W: AsyncWrite + Unpin,
    {
        match signal {
            Signal::Chunk {
                stream: Stream::Stdout,
                data,
            } => self.on_stdout(&data, stdin).await,
            Signal::Closed(Stream::Stdout) => {
                debug!("stdout closed");
                State::Done
            }
            signal => match self.on_side_signal(signal) {
                Ok(()) => State::Waiting,
                Err(e) => State::Failed(e),
            },
        }
    }

    /// Stderr traffic and read failures on either stream.
    fn on_side_signal(&mut self, signal: Signal) -> Result<()> {
        match signal {
            Signal::Chunk { data, .. } => self.stderr.extend_from_slice(&data),
            Signal::Closed(_) => {
                debug!("stderr closed");
                self.stderr_closed = true;
                self.check_stderr()?;
            }
            Signal::Failed { stream, source } => return Err(Error::Read { stream, source }),
        }
        Ok(())
    }

    /// Stdout is done: settle stderr without waiting for it to close.
    async fn finish(&mut self, rx: &mut Receiver<Signal>) -> Result<EndOfStream> {
        let deadline = Instant::now() + STDERR_GRACE;
        while !self.stderr_closed {
            match timeout_at(deadline, rx.recv()).await {
                Ok(Some(signal)) => self.on_side_signal(signal)?,
                Ok(None) => break,
                Err(_) => {
                    debug!("stderr still open after stdout closed");
                    break;
                }
            }
        }
        self.check_stderr()?;
        Ok(EndOfStream)
    }

    fn check_stderr(&self) -> Result<()> {
        if self.stderr.is_empty() {
            Ok(())
        } else {
            Err(Error::Stderr(String::from_utf8_lossy(&self.stderr).into_owned()))
        }
    }

    async fn on_stdout<W>(&mut self, data: &[u8], stdin: &mut W) -> State
    where
        W: AsyncWrite + Unpin,
    {
        (self.output)(data);
        if self.verbose {
            debug!("stdout: {:?}", String::from_utf8_lossy(data));
        }
        self.buffer.extend_from_slice(data);
        if self.expectations.is_empty() {
            return State::Waiting;
        }

        // Older output was already checked against every remaining trigger, so
        // a new match must overlap this chunk.
        let reach = data.len() + self.expectations.longest_trigger().saturating_sub(1);
        let start = char_start(&self.buffer, self.buffer.len().saturating_sub(reach));
        let hit = {
            let text = String::from_utf8_lossy(&self.buffer[start..]);
            self.expectations.take_match(&text)
        };
        let Some(hit) = hit else {
            return State::Waiting;
        };

        info!("matched {:?}, answering {:?}", hit.trigger, hit.response);
        if let Err(e) = write_response(stdin, &hit.response).await {
            return State::Failed(e);
        }
        self.buffer.clear();
        State::Matched
    }
}

/// Step `index` back to the first byte of the UTF-8 character containing it.
fn char_start(bytes: &[u8], mut index: usize) -> usize {
    while index > 0 && index < bytes.len() && bytes[index] & 0xC0 == 0x80 {
        index -= 1;
    }
    index
}
