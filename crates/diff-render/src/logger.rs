//! A `log` sink that prints each record under a `LEVEL: ` header line.
//!
//! Pair it with [`InlineDiff::to_ansi`](crate::InlineDiff::to_ansi) or the
//! `Display` impl to send whole diffs through the `log` macros.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use owo_colors::OwoColorize;

use crate::style::Style;

/// Writes records as a bold `LEVEL: ` line followed by the message
pub struct DiffLogger<W: Write + Send> {
    out: Mutex<W>,
    level: LevelFilter,
    styled: bool,
}

impl DiffLogger<io::Stdout> {
    /// Log to stdout at `Info` and above
    pub fn stdout() -> Self {
        Self::new(io::stdout(), LevelFilter::Info)
    }
}

impl<W: Write + Send> DiffLogger<W> {
    pub fn new(out: W, level: LevelFilter) -> Self {
        Self {
            out: Mutex::new(out),
            level,
            styled: true,
        }
    }

    /// Whether the header is written in bold (on by default)
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_record(&self, record: &Record) -> io::Result<()> {
        let header = format!("{}: ", record.level());
        let message = record.args().to_string();

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if self.styled {
            writeln!(out, "{}", header.style(Style::new().bold().to_owo()))?;
        } else {
            writeln!(out, "{header}")?;
        }
        out.write_all(message.as_bytes())?;
        if !message.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        Ok(())
    }
}

impl<W: Write + Send + 'static> DiffLogger<W> {
    /// Install as the global logger
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl<W: Write + Send> Log for DiffLogger<W> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // A logger has nowhere to report its own write failures
        let _ = self.write_record(record);
    }

    fn flush(&self) {
        let _ = self.out.lock().unwrap_or_else(PoisonError::into_inner).flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline_diff::InlineDiff;
    use crate::options::EXPORT_WIDTH;
    use log::Level;
    use pretty_assertions::assert_eq;

    fn emit(logger: &DiffLogger<Vec<u8>>, level: Level, message: &str) {
        logger.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target("diff")
                .build(),
        );
    }

    #[test]
    fn test_header_then_message() {
        let logger = DiffLogger::new(Vec::new(), LevelFilter::Info).styled(false);
        emit(&logger, Level::Warn, "careful");

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert_eq!(out, "WARN: \ncareful\n");
    }

    #[test]
    fn test_rendered_diff_is_logged_verbatim() {
        let diff = InlineDiff::new("a\nb\n", "a\nx\n");
        let logger = DiffLogger::new(Vec::new(), LevelFilter::Info).styled(false);
        emit(&logger, Level::Info, &diff.to_string());

        let out = String::from_utf8(logger.into_inner()).unwrap();
        let expected = format!("INFO: \n{}", diff.to_plain(EXPORT_WIDTH, false).unwrap());
        assert_eq!(out, expected);
    }

    #[test]
    fn test_records_below_level_are_dropped() {
        let logger = DiffLogger::new(Vec::new(), LevelFilter::Info).styled(false);
        emit(&logger, Level::Debug, "hidden");
        assert!(logger.into_inner().is_empty());
    }

    #[test]
    fn test_styled_header_is_bold() {
        let logger = DiffLogger::new(Vec::new(), LevelFilter::Trace);
        emit(&logger, Level::Error, "boom");

        let out = String::from_utf8(logger.into_inner()).unwrap();
        assert!(out.starts_with("\x1b[1m"), "bold header expected: {out:?}");
        assert!(out.contains("ERROR: "));
        assert!(out.ends_with("boom\n"));
    }
}
