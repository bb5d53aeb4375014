use std::io::{self, Write};

use colored::Colorize;
use tracing::warn;

use crate::batch::BatchObserver;
use crate::domain::{ReadError, ResourceId};

/// Prints batch callbacks as terminal lines
///
/// Content is blue, failures magenta, and every batch ends with a plain
/// `done` line.
pub struct ConsoleReporter<W>
where
    W: Write + Send,
{
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W> ConsoleReporter<W>
where
    W: Write + Send,
{
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("Failed to write console output: {}", e);
        }
    }
}

impl<W> BatchObserver for ConsoleReporter<W>
where
    W: Write + Send,
{
    fn on_content(&mut self, _id: &ResourceId, content: &str) {
        self.line(&content.blue().to_string());
    }

    fn on_failure(&mut self, error: &ReadError) {
        self.line(&error.to_string().magenta().to_string());
    }

    fn on_done(&mut self) {
        self.line("done");
    }
}
