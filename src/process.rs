use crate::error::{Error, Result};
use log::{info, warn};
use std::fmt;
use std::process::Stdio;
use tokio::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command};

/// One of the child's standard pipes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipe {
    Stdin,
    Stdout,
    Stderr,
}

impl fmt::Display for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Pipe::Stdin => "stdin",
            Pipe::Stdout => "stdout",
            Pipe::Stderr => "stderr",
        })
    }
}

/// A child process with its stdin held open for responses.
///
/// The child is killed if the session is dropped before [`close`](Self::close)
/// reaps it.
pub struct ProcessSession {
    program: String,
    child: Child,
    stdin: ChildStdin,
}

impl ProcessSession {
    /// Spawn `program` with piped standard streams, returning the session and
    /// its output streams separately.
    ///
    /// The child inherits our environment.
    pub fn spawn(program: &str, args: &[String]) -> Result<(Self, ChildStdout, ChildStderr)> {
        if program.is_empty() {
            return Err(Error::EmptyProgram);
        }

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| Error::Spawn {
                program: program.to_owned(),
                source,
            })?;

        let stdin = child.stdin.take().ok_or(Error::Pipe(Pipe::Stdin))?;
        let stdout = child.stdout.take().ok_or(Error::Pipe(Pipe::Stdout))?;
        let stderr = child.stderr.take().ok_or(Error::Pipe(Pipe::Stderr))?;

        let session = ProcessSession {
            program: program.to_owned(),
            child,
            stdin,
        };
        Ok((session, stdout, stderr))
    }

    /// The child's stdin.
    pub fn stdin(&mut self) -> &mut ChildStdin {
        &mut self.stdin
    }

    /// Close stdin and reap the child, killing it first if the command failed.
    ///
    /// Reaping problems are logged, never returned: the command's outcome is
    /// already decided by the time this runs.
    pub async fn close(self, failed: bool) {
        let ProcessSession {
            program,
            mut child,
            stdin,
        } = self;
        drop(stdin);

        if failed {
            if let Err(e) = child.start_kill() {
                warn!("failed to kill `{program}`: {e}");
            }
        }

        match child.wait().await {
            Ok(status) if status.success() => info!("`{program}` exited"),
            Ok(status) => warn!("`{program}` exited with {status}"),
            Err(e) => warn!("failed to reap `{program}`: {e}"),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_missing_program() {
        let err = ProcessSession::spawn("silentinstall-no-such-program", &[])
            .err()
            .unwrap();
        match err {
            Error::Spawn { program, .. } => assert_eq!(program, "silentinstall-no-such-program"),
            other => panic!("expected spawn error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_spawn_empty_program() {
        assert!(matches!(
            ProcessSession::spawn("", &[]).err(),
            Some(Error::EmptyProgram)
        ));
    }

    #[test]
    fn test_pipe_display() {
        assert_eq!(Pipe::Stdin.to_string(), "stdin");
        assert_eq!(Error::Pipe(Pipe::Stderr).to_string(), "failed to open stderr pipe");
    }

    #[tokio::test]
    async fn test_close_kills_running_child() {
        let (session, _stdout, _stderr) =
            ProcessSession::spawn("sleep", &["30".to_owned()]).unwrap();
        let started = std::time::Instant::now();
        session.close(true).await;
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
