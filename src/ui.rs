//! Colored status messages for the command-line tool.

use anstyle::{AnsiColor, Style};
use std::io::{self, IsTerminal, Write};

const SAY: Style = Style::new().fg_color(Some(anstyle::Color::Ansi(AnsiColor::Cyan)));
const SUCCESS: Style = Style::new()
    .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Green)))
    .bold();
const ERROR: Style = Style::new()
    .fg_color(Some(anstyle::Color::Ansi(AnsiColor::Red)))
    .bold();

/// Prints status lines, colored on streams that are terminals.
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    stdout_color: bool,
    stderr_color: bool,
}

impl Ui {
    /// Color each stream only when it is attached to a terminal.
    pub fn detect() -> Self {
        Ui {
            stdout_color: io::stdout().is_terminal(),
            stderr_color: io::stderr().is_terminal(),
        }
    }

    /// Informational line on stdout.
    pub fn say(&self, message: &str) {
        let _ = writeln!(io::stdout(), "{}", paint(self.stdout_color, SAY, message));
    }

    /// Success line on stdout.
    pub fn success(&self, message: &str) {
        let _ = writeln!(io::stdout(), "{}", paint(self.stdout_color, SUCCESS, message));
    }

    /// Error line on stderr.
    pub fn error(&self, message: &str) {
        let _ = writeln!(io::stderr(), "{}", paint(self.stderr_color, ERROR, message));
    }
}

fn paint(color: bool, style: Style, message: &str) -> String {
    if color {
        format!("{style}{message}{style:#}")
    } else {
        message.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncolored_is_untouched() {
        assert_eq!(paint(false, ERROR, "boom"), "boom");
    }

    #[test]
    fn test_colored_wraps_and_resets() {
        let painted = paint(true, SUCCESS, "done");
        assert!(painted.starts_with("\x1b["));
        assert!(painted.contains("done"));
        assert!(painted.ends_with("\x1b[0m"));
    }
}
