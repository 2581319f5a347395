//! # SilentInstall
//!
//! Run interactive command-line installers unattended.
//!
//! Each configured command is spawned with piped standard streams. Its stdout
//! is accumulated and searched for known prompts ("triggers"); when one
//! appears, the matching canned response is written to the child's stdin. A
//! run is an ordered list of such commands, executed one at a time.
//!
//! ## Quick start
//!
//! ```no_run
//! use silentinstall::{Sequence, config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let commands = config::parse_str(r#"[
//!         {"cmd": "./install.sh --prefix={{.HOME}}/opt",
//!          "expectations": [{"input": "Continue? [y/n]", "output": "y"}]}
//!     ]"#)?;
//!
//!     Sequence::new(commands).run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Config format
//!
//! | Key | Description |
//! |-----|-------------|
//! | `cmd` | Command line; `{{.VAR}}` is replaced from the environment, then split on spaces |
//! | `expectations` (or `io`) | List of `{"input": trigger, "output": response}` |
//!
//! Splitting does not understand quotes, so arguments cannot contain spaces.
//! A response without a trailing newline gets one.
//!
//! ## Matching rules
//!
//! - A trigger matches when it is a substring of the output received since the
//!   last match.
//! - Each expectation fires at most once.
//! - If several triggers are present at once, the one configured last wins.
//! - After a match the whole receive buffer is discarded.
//!
//! ## Outcome
//!
//! A command succeeds with [`EndOfStream`] once its output streams close and
//! it wrote nothing to stderr. Anything else is an [`Error`] and stops the
//! sequence. There is no timeout; a child that never closes its output blocks
//! the run.
//!
//! ## Single commands
//!
//! [`Executor`] runs one [`CommandSpec`] and can send the child's output to any
//! sink:
//!
//! ```no_run
//! use silentinstall::{CommandSpec, Executor, Expectation};
//! use std::sync::{Arc, Mutex};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let spec = CommandSpec::new(
//!         "sh",
//!         ["-c", "printf 'Proceed? '; read a; echo got $a"],
//!         vec![Expectation::new("Proceed?", "yes")],
//!     );
//!
//!     let captured = Arc::new(Mutex::new(Vec::<u8>::new()));
//!     let sink = captured.clone();
//!     let mut executor = Executor::with_output_handler(
//!         spec,
//!         Arc::new(move |data: &[u8]| sink.lock().unwrap().extend_from_slice(data)),
//!     );
//!
//!     executor.execute().await?;
//!     println!("{}", String::from_utf8_lossy(&captured.lock().unwrap()));
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod expectation;
pub mod process;
pub mod pump;
pub mod receiver;
pub mod response;
pub mod sequence;
pub mod template;
pub mod ui;

pub use command::CommandSpec;
pub use error::{EndOfStream, Error, Result};
pub use executor::Executor;
pub use expectation::{Expectation, ExpectationTable};
pub use receiver::OutputHandler;
pub use sequence::Sequence;
