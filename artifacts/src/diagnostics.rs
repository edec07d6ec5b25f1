//! Progress and detail reporting.
//!
//! The resolution and extraction pipelines describe what they are doing
//! through a [`Diagnostics`] sink. Messages are purely observational: nothing
//! returned by a sink is consumed, and failures are never routed through it.

use log::{debug, info};
use std::cell::RefCell;
use std::io::Write;

/// Receiver for human-readable progress and detail messages.
pub trait Diagnostics {
    /// Report a step the operator would want to see.
    fn progress(&self, message: &str);

    /// Report supporting detail, such as resolved paths.
    fn detail(&self, message: &str);
}

/// Forwards progress to `log::info!` and detail to `log::debug!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn progress(&self, message: &str) {
        info!("{message}");
    }

    fn detail(&self, message: &str) {
        debug!("{message}");
    }
}

/// Writes messages as lines to a writer, typically stderr.
///
/// Progress lines are suppressed when `quiet` is set. Detail lines are only
/// written when `verbose` is set. Write failures are ignored; a closed
/// stderr should not abort an extraction.
pub struct WriterDiagnostics<W: Write> {
    writer: RefCell<W>,
    quiet: bool,
    verbose: bool,
}

impl<W: Write> WriterDiagnostics<W> {
    /// Create a sink writing to `writer`.
    pub fn new(writer: W, quiet: bool, verbose: bool) -> Self {
        Self {
            writer: RefCell::new(writer),
            quiet,
            verbose,
        }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_line(&self, message: &str) {
        if writeln!(self.writer.borrow_mut(), "{message}").is_err() {
            debug!("diagnostics writer closed; dropped: {message}");
        }
    }
}

impl<W: Write> Diagnostics for WriterDiagnostics<W> {
    fn progress(&self, message: &str) {
        if !self.quiet {
            self.write_line(message);
        }
    }

    fn detail(&self, message: &str) {
        if self.verbose {
            self.write_line(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn written(sink: WriterDiagnostics<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).expect("UTF-8 output")
    }

    #[rstest]
    #[case::default(false, false, "Extracting\n")]
    #[case::quiet(true, false, "")]
    #[case::verbose(false, true, "Extracting\n/tmp/out\n")]
    #[case::quiet_verbose(true, true, "/tmp/out\n")]
    fn writer_honours_flags(
        #[case] quiet: bool,
        #[case] verbose: bool,
        #[case] expected: &str,
    ) {
        let sink = WriterDiagnostics::new(Vec::new(), quiet, verbose);
        sink.progress("Extracting");
        sink.detail("/tmp/out");
        assert_eq!(written(sink), expected);
    }
}
