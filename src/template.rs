//! `{{.NAME}}` substitution of environment variables into command lines.

use crate::error::{Error, Result};
use std::collections::HashMap;

/// Variables available to [`render`], keyed by name.
pub type Environment = HashMap<String, String>;

enum Piece<'a> {
    Text(&'a str),
    Var(&'a str),
}

/// Replace every `{{.NAME}}` in `line` with `env[NAME]`.
///
/// Whitespace inside the braces is allowed (`{{ .HOME }}`). A line whose
/// template actions cannot be parsed (an unterminated `{{`, or an action that
/// is not a `.NAME` reference) is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::UndefinedVariable`] when a referenced name is missing from
/// `env`. A missing name is never rendered as a `<no value>` placeholder, so a
/// command never runs with such an argument.
///
/// # Example
///
/// ```
/// use silentinstall::template::{render, Environment};
///
/// let env = Environment::from([("PREFIX".to_owned(), "/opt".to_owned())]);
/// assert_eq!(render("./install --prefix={{.PREFIX}}", &env).unwrap(), "./install --prefix=/opt");
/// ```
pub fn render(line: &str, env: &Environment) -> Result<String> {
    let Some(pieces) = parse(line) else {
        return Ok(line.to_owned());
    };

    let mut rendered = String::with_capacity(line.len());
    for piece in pieces {
        match piece {
            Piece::Text(text) => rendered.push_str(text),
            Piece::Var(name) => {
                let value = env
                    .get(name)
                    .ok_or_else(|| Error::UndefinedVariable(name.to_owned()))?;
                rendered.push_str(value);
            }
        }
    }
    Ok(rendered)
}

fn parse(line: &str) -> Option<Vec<Piece<'_>>> {
    let mut pieces = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("{{") {
        pieces.push(Piece::Text(&rest[..start]));
        let action = &rest[start + 2..];
        let end = action.find("}}")?;
        let name = action[..end].trim().strip_prefix('.')?;
        if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return None;
        }
        pieces.push(Piece::Var(name));
        rest = &action[end + 2..];
    }
    pieces.push(Piece::Text(rest));
    Some(pieces)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Environment {
        Environment::from([
            ("HOME".to_owned(), "/home/ops".to_owned()),
            ("VERSION".to_owned(), "1.2.3".to_owned()),
        ])
    }

    #[test]
    fn test_plain_line_untouched() {
        assert_eq!(render("echo hi", &env()).unwrap(), "echo hi");
    }

    #[test]
    fn test_substitutes_variables() {
        assert_eq!(
            render("{{.HOME}}/bin/setup-{{.VERSION}}.sh -q", &env()).unwrap(),
            "/home/ops/bin/setup-1.2.3.sh -q"
        );
    }

    #[test]
    fn test_inner_whitespace() {
        assert_eq!(render("cd {{ .HOME }}", &env()).unwrap(), "cd /home/ops");
    }

    #[test]
    fn test_undefined_variable() {
        let err = render("echo {{.NOPE}}", &env()).unwrap_err();
        assert!(matches!(err, Error::UndefinedVariable(ref name) if name == "NOPE"));
        assert!(!err.to_string().contains("<no value>"));
    }

    #[test]
    fn test_unparsable_template_left_alone() {
        assert_eq!(render("echo {{.HOME", &env()).unwrap(), "echo {{.HOME");
        assert_eq!(render("echo {{HOME}}", &env()).unwrap(), "echo {{HOME}}");
        assert_eq!(render("echo {{.}}", &env()).unwrap(), "echo {{.}}");
    }
}
