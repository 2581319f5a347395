use std::fmt;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;

/// Bytes requested from a child stream per read.
pub const CHUNK_SIZE: usize = 256;

/// Child output stream a pump reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        })
    }
}

/// Message sent by a pump to the receive loop.
///
/// Both pumps of a command share one channel, so the loop sees a single queue
/// in arrival order. Chunks from one stream keep their read order; nothing is
/// promised about ordering across streams.
#[derive(Debug)]
pub enum Signal {
    Chunk { stream: Stream, data: Vec<u8> },
    Closed(Stream),
    Failed { stream: Stream, source: io::Error },
}

impl Signal {
    /// Whether the pump stops after sending this signal.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Signal::Chunk { .. })
    }
}

/// Spawns a task that reads `reader` until end of stream or error.
///
/// Every successful read is forwarded as a [`Signal::Chunk`]; the task ends
/// after forwarding [`Signal::Closed`] or [`Signal::Failed`], or as soon as the
/// receiving side is gone.
pub fn spawn_pump<R>(stream: Stream, mut reader: R, tx: Sender<Signal>) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buffer = [0u8; CHUNK_SIZE];
        loop {
            let signal = match reader.read(&mut buffer).await {
                Ok(0) => Signal::Closed(stream),
                Ok(n) => Signal::Chunk {
                    stream,
                    data: buffer[..n].to_vec(),
                },
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => Signal::Failed { stream, source },
            };
            let terminal = signal.is_terminal();
            if tx.send(signal).await.is_err() || terminal {
                break;
            }
        }
    })
}
