//! Terminal Prompts
//!
//! When git runs a hook, stdin is not attached to the user's terminal. The
//! prompter then opens the controlling terminal itself for a single line read,
//! leaving the process-wide stdin untouched.

use std::{
    fs::{File, OpenOptions},
    io::{self, BufRead, BufReader, IsTerminal, Write},
    path::{Path, PathBuf},
};

use inquire::{InquireError, Text};
use tracing::{debug, warn};

#[cfg(test)]
use mockall::automock;

use crate::errors::{CocoError, Result};

#[cfg(not(windows))]
const TTY_PATH: &str = "/dev/tty";
#[cfg(windows)]
const TTY_PATH: &str = "CON";

/// Asks the user for a single line of input.
#[cfg_attr(test, automock)]
pub trait Prompter {
    /// Shows `message` and returns the trimmed answer. `help` is an optional
    /// hint displayed with the prompt, empty for none.
    ///
    /// # Errors
    /// * If no terminal is available or reading from it fails
    /// * `CocoError::UserCancelled` if the user interrupts the prompt
    fn ask(&self, message: &str, help: &str) -> Result<String>;
}

/// Prompts on the user's terminal, even when stdin is redirected.
///
/// Without a terminal (GUI clients, CI) every answer is empty, so the commit
/// goes on without the trailers.
#[derive(Debug, Clone)]
pub struct TerminalPrompter {
    device: PathBuf,
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::with_device(TTY_PATH)
    }
}

impl TerminalPrompter {
    /// Reads from `device` instead of the controlling terminal when stdin is
    /// not a terminal.
    pub fn with_device(device: impl Into<PathBuf>) -> Self {
        Self {
            device: device.into(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn ask(&self, message: &str, help: &str) -> Result<String> {
        if !io::stdin().is_terminal() {
            return read_line_from_device(&self.device, message, help);
        }

        let mut text = Text::new(message);
        if !help.is_empty() {
            text = text.with_help_message(help);
        }

        match text.prompt() {
            Ok(answer) => Ok(answer.trim().to_string()),
            Err(InquireError::OperationCanceled) => {
                debug!("prompt skipped by the user");
                Ok(String::new())
            }
            Err(InquireError::OperationInterrupted) => Err(CocoError::UserCancelled),
            Err(InquireError::NotTTY) => read_line_from_device(&self.device, message, help),
            Err(InquireError::IO(error)) => {
                warn!(%error, "terminal unavailable, leaving the answer empty");
                Ok(String::new())
            }
            Err(error) => Err(error.into()),
        }
    }
}

/// Reads one line from the terminal `device`. The device is only open for the
/// duration of this call. A device that cannot be opened gives an empty answer.
fn read_line_from_device(device: &Path, message: &str, help: &str) -> Result<String> {
    let tty: File = match OpenOptions::new().read(true).write(true).open(device) {
        Ok(tty) => tty,
        Err(error) => {
            warn!(
                device = %device.display(),
                %error,
                "no terminal to prompt on, leaving the answer empty"
            );
            return Ok(String::new());
        }
    };

    let mut writer = &tty;
    if !help.is_empty() {
        writeln!(writer, "{help}")?;
    }
    write!(writer, "{message} ")?;
    writer.flush()?;

    read_answer(BufReader::new(&tty))
}

fn read_answer(mut reader: impl BufRead) -> Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;

    Ok(line.trim().to_string())
}
