//! Writing canned answers to the child's stdin.

use crate::error::{Error, Result};
use log::warn;
use std::borrow::Cow;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Terminate `response` with a newline unless it already ends with one.
pub fn normalize(response: &str) -> Cow<'_, str> {
    if response.ends_with('\n') {
        Cow::Borrowed(response)
    } else {
        Cow::Owned(format!("{response}\n"))
    }
}

/// Write one response line to `writer`.
///
/// The line is handed to a single `write` call; a short write is not retried.
///
/// # Errors
///
/// Returns [`Error::Write`] if the write or flush fails.
pub async fn write_response<W>(writer: &mut W, response: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let line = normalize(response);
    let written = writer.write(line.as_bytes()).await.map_err(Error::Write)?;
    if written < line.len() {
        warn!("short write: {written} of {} response bytes", line.len());
    }
    writer.flush().await.map_err(Error::Write)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    struct Closed;

    impl AsyncWrite for Closed {
        fn poll_write(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            Poll::Ready(Err(io::ErrorKind::BrokenPipe.into()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("y"), "y\n");
        assert_eq!(normalize("y\n"), "y\n");
        assert_eq!(normalize(""), "\n");
        assert!(matches!(normalize("done\n"), Cow::Borrowed(_)));
    }

    #[tokio::test]
    async fn test_newline_appended() {
        let mut out = Vec::new();
        write_response(&mut out, "Hello!").await.unwrap();
        assert_eq!(out, b"Hello!\n");
    }

    #[tokio::test]
    async fn test_no_double_newline() {
        let mut out = Vec::new();
        write_response(&mut out, "yes\n").await.unwrap();
        assert_eq!(out, b"yes\n");
    }

    #[tokio::test]
    async fn test_write_error() {
        let err = write_response(&mut Closed, "y").await.unwrap_err();
        assert!(matches!(err, Error::Write(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
