use crate::formats::DEFAULT_FORMAT;
use crate::registry::FormatRegistry;
use tracing::{debug, info};

/// Picks the layout a batch of lines is written in.
///
/// The first non-blank line that matches any template decides, testing
/// templates in registry precedence (custom, then built-ins). Lines matching
/// nothing are skipped; if no line matches, the batch is `default`.
pub struct FormatDetector<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> FormatDetector<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    pub fn detect<I, S>(&self, lines: I) -> &'r str
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, line) in lines.into_iter().enumerate() {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }

            if let Some(template) = self.registry.templates().find(|t| t.matches(line)) {
                info!("Detected log format '{}' from line {}", template.name(), index + 1);
                return template.name();
            }
            debug!("Line {} matches no known format", index + 1);
        }

        info!("No line matched a known format, falling back to '{}'", DEFAULT_FORMAT);
        DEFAULT_FORMAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{COMBINED_FORMAT, CUSTOM_FORMAT, CUSTOM_WITH_TIMES_FORMAT};

    const DEFAULT_LINE: &str = r#"203.0.113.5 - - [10/Oct/2023:13:55:36 +0000] "GET /index.html HTTP/1.1" 200 612 "-" "curl/7.68.0" "-""#;
    const TIMED_LINE: &str = r#"10.0.0.1 172.16.0.9 - [10/Oct/2023:13:55:36 +0000] "POST /api HTTP/1.1" 201 54 0.012 0.010 "-" "Mozilla/5.0" example.com abc123"#;
    const COMBINED_LINE: &str = r#"192.168.1.10 - frank [10/Oct/2023:13:55:36 +0000] "GET /a HTTP/1.1" 304 0 "http://ref/" "Mozilla/5.0""#;

    #[test]
    fn test_detect_each_builtin() {
        let registry = FormatRegistry::new().unwrap();
        let detector = FormatDetector::new(&registry);

        assert_eq!(detector.detect([DEFAULT_LINE]), DEFAULT_FORMAT);
        assert_eq!(detector.detect([TIMED_LINE]), CUSTOM_WITH_TIMES_FORMAT);
        assert_eq!(detector.detect([COMBINED_LINE]), COMBINED_FORMAT);
    }

    #[test]
    fn test_detect_skips_blank_and_unmatched_lines() {
        let registry = FormatRegistry::new().unwrap();
        let detector = FormatDetector::new(&registry);

        let lines = ["", "   ", "garbage line", COMBINED_LINE, DEFAULT_LINE];
        assert_eq!(detector.detect(lines), COMBINED_FORMAT);
    }

    #[test]
    fn test_detect_first_match_wins() {
        let registry = FormatRegistry::new().unwrap();
        let detector = FormatDetector::new(&registry);

        assert_eq!(detector.detect([COMBINED_LINE, TIMED_LINE]), COMBINED_FORMAT);
    }

    #[test]
    fn test_detect_falls_back_to_default() {
        let registry = FormatRegistry::new().unwrap();
        let detector = FormatDetector::new(&registry);

        assert_eq!(detector.detect(["nothing", "to see", ""]), DEFAULT_FORMAT);
        assert_eq!(detector.detect(Vec::<String>::new()), DEFAULT_FORMAT);
    }

    #[test]
    fn test_detect_custom_has_priority() {
        let spec = r#"{"pattern": "(\\S+) - - \\[([^\\]]+)\\]", "fields": ["ip", "timestamp"]}"#;
        let registry = FormatRegistry::with_custom(Some(spec)).unwrap();
        let detector = FormatDetector::new(&registry);

        assert_eq!(detector.detect([DEFAULT_LINE]), CUSTOM_FORMAT);
    }
}
