//! Output formatting and writing utilities
//!
//! Status lines (info, success, warnings) go through [`OutputWriter`] so
//! quiet mode and colors are handled in one place. Generated documents and
//! model tables are written verbatim.

use crate::cli::ConfigFormat;
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Serialize a value as YAML or pretty JSON
pub fn format_data<T: Serialize>(value: &T, format: ConfigFormat) -> Result<String> {
    match format {
        ConfigFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        ConfigFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
    }
}

/// Output writer that handles quiet mode and colors
pub struct OutputWriter {
    use_color: bool,
    quiet: bool,
    verbose: u8,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(use_color: bool, quiet: bool, verbose: u8) -> Self {
        Self::with_writer(use_color, quiet, verbose, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(use_color: bool, quiet: bool, verbose: u8, writer: Box<dyn Write>) -> Self {
        Self {
            use_color,
            quiet,
            verbose,
            writer,
        }
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write debug information if verbose mode is enabled
    pub fn debug(&mut self, message: &str) -> Result<()> {
        if self.verbose == 0 || self.quiet {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "DEBUG:".dimmed(), message.dimmed()))
        } else {
            self.writeln(&format!("DEBUG: {}", message))
        }
    }

    /// Write data in the requested format
    pub fn data<T: Serialize>(&mut self, value: &T, format: ConfigFormat) -> Result<()> {
        let formatted = format_data(value, format)?;
        trace!(bytes = formatted.len(), "Outputting data");
        self.write(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Writer that keeps everything written for inspection
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn writer(quiet: bool, verbose: u8) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let output = OutputWriter::with_writer(false, quiet, verbose, Box::new(buffer.clone()));
        (output, buffer)
    }

    #[test]
    fn test_plain_messages() {
        let (mut output, buffer) = writer(false, 0);
        output.info("loading").unwrap();
        output.success("done").unwrap();
        output.warning("careful").unwrap();
        output.debug("hidden").unwrap();
        assert_eq!(buffer.contents(), "INFO: loading\ndone\nWARNING: careful\n");
    }

    #[test]
    fn test_quiet_keeps_warnings_only() {
        let (mut output, buffer) = writer(true, 0);
        output.info("loading").unwrap();
        output.success("done").unwrap();
        output.warning("careful").unwrap();
        assert_eq!(buffer.contents(), "WARNING: careful\n");
    }

    #[test]
    fn test_verbose_debug() {
        let (mut output, buffer) = writer(false, 1);
        output.debug("details").unwrap();
        assert_eq!(buffer.contents(), "DEBUG: details\n");
    }

    #[test]
    fn test_data_formats() {
        #[derive(Serialize)]
        struct Sample {
            lang: &'static str,
        }

        let (mut output, buffer) = writer(false, 0);
        output.data(&Sample { lang: "english" }, ConfigFormat::Yaml).unwrap();
        output.data(&Sample { lang: "english" }, ConfigFormat::Json).unwrap();
        assert_eq!(
            buffer.contents(),
            "lang: english\n{\n  \"lang\": \"english\"\n}\n"
        );
    }
}
