//! Terminal implementations of [`Surface`] and [`Confirm`].

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::handlers::{Confirm, Surface};
use crate::notify::{Level, Notification};
use crate::render::ListView;

/// Prints notifications to `out` and alerts to `err`.
///
/// Lists are printed only by explicit list commands, so re-renders after a
/// mutation are just logged.
#[derive(Debug)]
pub struct TerminalSurface<O, E> {
    out: O,
    err: E,
    quiet: bool,
}

impl TerminalSurface<std::io::Stdout, std::io::Stderr> {
    /// A surface on the process's standard streams.
    #[must_use]
    pub fn stdio(quiet: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), quiet)
    }
}

impl<O: Write, E: Write> TerminalSurface<O, E> {
    /// A surface on the given writers. With `quiet`, only warnings and
    /// alerts are printed.
    pub fn new(out: O, err: E, quiet: bool) -> Self {
        Self { out, err, quiet }
    }

    /// Consume the surface, returning its writers.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl<O: Write, E: Write> Surface for TerminalSurface<O, E> {
    fn show(&mut self, view: &ListView) {
        debug!(
            container = view.kind.container_id(),
            cards = view.cards().len(),
            "List re-rendered"
        );
    }

    fn alert(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "error: {message}") {
            warn!(error = %e, "Failed to write alert");
        }
    }

    fn notify(&mut self, notification: &Notification) {
        let result = match notification.level {
            Level::Warning => writeln!(self.err, "warning: {}", notification.message),
            Level::Info | Level::Success if self.quiet => Ok(()),
            Level::Success => writeln!(self.out, "✓ {}", notification.message),
            Level::Info => writeln!(self.out, "{}", notification.message),
        };
        if let Err(e) = result {
            warn!(error = %e, "Failed to write notification");
        }
    }
}

/// Asks on `output` and reads a `y`/`yes` answer from `input`.
#[derive(Debug)]
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// A prompt on the given streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} [y/N] ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}
