//! Terminal rendering of a running session.

use std::io::{self, Write};

use super::{Spinner, Style};
use crate::assistant::SessionView;

/// Renders a session to the terminal.
///
/// The answer streams to stdout. The spinner and notices go to stderr.
pub struct TerminalView {
    out: Box<dyn Write>,
    spinner: Option<Spinner>,
    /// Whether anything has been written to stdout for the current request.
    wrote_answer: bool,
    ends_with_newline: bool,
    write_error: Option<io::Error>,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders answers into `out` instead of stdout.
    pub fn with_writer(out: Box<dyn Write>) -> Self {
        Self {
            out,
            spinner: None,
            wrote_answer: false,
            ends_with_newline: false,
            write_error: None,
        }
    }

    /// Takes the first answer write error of the last request, if any.
    ///
    /// A closed pipe (e.g. `langassist ... | head`) shows up here.
    pub fn take_write_error(&mut self) -> Option<io::Error> {
        self.write_error.take()
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.stop();
        }
    }

    /// Writes and flushes `text`, keeping only the first failure.
    fn write_answer(&mut self, text: &str) -> bool {
        if self.write_error.is_some() {
            return false;
        }

        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush());

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "answer write failed");
                self.write_error = Some(e);
                false
            }
        }
    }
}

impl SessionView for TerminalView {
    fn notice(&mut self, message: &str) {
        self.stop_spinner();
        crate::warn!("{}", Style::warning(message));
    }

    fn busy_changed(&mut self, busy: bool) {
        if busy {
            self.wrote_answer = false;
            self.ends_with_newline = false;
            self.spinner = Some(Spinner::new("Thinking..."));
            return;
        }

        self.stop_spinner();
        if self.wrote_answer && !self.ends_with_newline {
            self.write_answer("\n");
        }
    }

    fn append(&mut self, increment: &str, _result_text: &str) {
        self.stop_spinner();

        if self.write_answer(increment) {
            self.wrote_answer = true;
            self.ends_with_newline = increment.ends_with('\n');
        }
    }
}
