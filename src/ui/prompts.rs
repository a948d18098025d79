//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode,
//! operations requiring user input either fall back to a safe default or
//! fail with [`PromptError::NotInteractive`].
//!
//! Prompts are written to stderr so that stdout carries only results.
//! The `*_with` functions take any reader/writer pair, which is what the
//! tests and the cost-control menu drive.

use std::io::{self, BufRead, IsTerminal, Write};

use thiserror::Error;

use crate::engine::Confirm;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("not in interactive mode")]
    NotInteractive,

    #[error("IO error: {0}")]
    IoError(String),
}

impl From<io::Error> for PromptError {
    fn from(e: io::Error) -> Self {
        PromptError::IoError(e.to_string())
    }
}

/// True when both stdin and stderr are attached to a terminal.
pub fn terminal_attached() -> bool {
    io::stdin().is_terminal() && io::stderr().is_terminal()
}

/// Read one line; end of input counts as cancellation.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim().to_string())
}

/// Prompt for confirmation (yes/no) over the given streams.
///
/// `y`/`yes` confirm, an empty answer takes `default`, anything else
/// declines.
pub fn confirm_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: bool,
) -> Result<bool, PromptError> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    write!(writer, "{} {} ", message, hint)?;
    writer.flush()?;

    let answer = read_line(reader)?.to_lowercase();
    Ok(match answer.as_str() {
        "" => default,
        "y" | "yes" => true,
        _ => false,
    })
}

/// Prompt for confirmation (yes/no) on the terminal.
///
/// Returns `Err(PromptError::NotInteractive)` if not in interactive mode.
pub fn confirm(message: &str, default: bool, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    confirm_with(&mut io::stdin().lock(), &mut io::stderr(), message, default)
}

/// Prompt for text input over the given streams.
///
/// An empty answer yields `default` when one is given.
pub fn input_with<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
    default: Option<&str>,
) -> Result<String, PromptError> {
    match default {
        Some(d) => write!(writer, "{} [{}]: ", message, d)?,
        None => write!(writer, "{}: ", message)?,
    }
    writer.flush()?;

    let answer = read_line(reader)?;
    Ok(match (answer.is_empty(), default) {
        (true, Some(d)) => d.to_string(),
        _ => answer,
    })
}

/// Prompt for masked input (API keys). The input is not echoed.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    let value = rpassword::prompt_password(format!("{}: ", message))?;
    Ok(value.trim().to_string())
}

/// Confirmation capability backed by the terminal.
///
/// Non-interactive sessions, cancelled prompts and IO errors all decline.
#[derive(Debug, Clone, Copy)]
pub struct TerminalConfirm {
    interactive: bool,
}

impl TerminalConfirm {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, message: &str) -> bool {
        confirm(message, false, self.interactive).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn answer(input: &str, default: bool) -> Result<bool, PromptError> {
        let mut reader = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        confirm_with(&mut reader, &mut out, "Proceed?", default)
    }

    mod confirm {
        use super::*;

        #[test]
        fn yes_variants() {
            assert!(answer("y\n", false).unwrap());
            assert!(answer("YES\n", false).unwrap());
            assert!(answer("  Y  \n", false).unwrap());
        }

        #[test]
        fn no_and_garbage_decline() {
            assert!(!answer("n\n", true).unwrap());
            assert!(!answer("maybe\n", true).unwrap());
        }

        #[test]
        fn empty_takes_default() {
            assert!(answer("\n", true).unwrap());
            assert!(!answer("\n", false).unwrap());
        }

        #[test]
        fn eof_cancels() {
            assert!(matches!(answer("", true), Err(PromptError::Cancelled)));
        }

        #[test]
        fn prompt_shows_default_hint() {
            let mut reader = Cursor::new(b"y\n".to_vec());
            let mut out = Vec::new();
            confirm_with(&mut reader, &mut out, "Go?", false).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), "Go? [y/N] ");
        }

        #[test]
        fn non_interactive_errors() {
            assert!(matches!(
                super::super::confirm("Go?", true, false),
                Err(PromptError::NotInteractive)
            ));
        }

        #[test]
        fn terminal_confirm_declines_when_not_interactive() {
            assert!(!TerminalConfirm::new(false).confirm("Use the API?"));
        }
    }

    mod input {
        use super::*;

        #[test]
        fn returns_trimmed_text() {
            let mut reader = Cursor::new(b"  25.5 \n".to_vec());
            let mut out = Vec::new();
            let value = input_with(&mut reader, &mut out, "Limit", None).unwrap();
            assert_eq!(value, "25.5");
            assert_eq!(String::from_utf8(out).unwrap(), "Limit: ");
        }

        #[test]
        fn empty_uses_default() {
            let mut reader = Cursor::new(b"\n".to_vec());
            let mut out = Vec::new();
            let value = input_with(&mut reader, &mut out, "Choice", Some("9")).unwrap();
            assert_eq!(value, "9");
        }

        #[test]
        fn password_needs_terminal() {
            assert!(matches!(
                password("API key", false),
                Err(PromptError::NotInteractive)
            ));
        }
    }
}
