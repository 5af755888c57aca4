use crate::detector::FormatDetector;
use crate::line_parser::LineParser;
use crate::registry::FormatRegistry;
use crate::{BatchResult, ParseError};
use tracing::{debug, info};

/// Parses a whole file's lines under a single detected format.
pub struct BatchParser<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> BatchParser<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    /// Detect the format once, then parse every non-blank line with it.
    /// Lines that do not fit are counted in `failed_lines`; blank lines are
    /// ignored entirely.
    pub fn parse_all<S: AsRef<str>>(&self, lines: &[S]) -> Result<BatchResult, ParseError> {
        let format = FormatDetector::new(self.registry).detect(lines);
        let parser = LineParser::new(self.registry);

        let mut records = Vec::with_capacity(lines.len());
        let mut failed_lines = 0;

        for (index, line) in lines.iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            match parser.parse_line(line, format)? {
                Some(record) => records.push(record),
                None => {
                    debug!("Line {} does not match format '{}'", index + 1, format);
                    failed_lines += 1;
                }
            }
        }

        info!(
            "Parsed {} logs, failed {} lines with format: {}",
            records.len(),
            failed_lines,
            format
        );

        Ok(BatchResult {
            records,
            format: format.to_string(),
            failed_lines,
        })
    }
}
