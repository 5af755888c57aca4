//! Built-in nginx access-log layouts.
//!
//! Order matters: it is the precedence the detector uses after any custom
//! template. To add a layout, append a `BuiltinFormat` to `BUILTIN_FORMATS`.
//!
//! Digits are spelled `[0-9]`: `\d` in `regex` also matches non-ASCII digits.

use crate::format::FormatTemplate;
use crate::ParseError;
use tracing::info;

pub const DEFAULT_FORMAT: &str = "default";
pub const CUSTOM_WITH_TIMES_FORMAT: &str = "custom_with_times";
pub const COMBINED_FORMAT: &str = "combined";
/// Reserved name of the operator-configured template.
pub const CUSTOM_FORMAT: &str = "custom";

pub struct BuiltinFormat {
    pub name: &'static str,
    pub pattern: &'static str,
    pub fields: &'static [&'static str],
}

pub const BUILTIN_FORMATS: &[BuiltinFormat] = &[
    // `$remote_addr - $remote_user [$time_local] "$request" $status $body_bytes_sent
    //  "$http_referer" "$http_user_agent" "$http_x_forwarded_for"`
    BuiltinFormat {
        name: DEFAULT_FORMAT,
        pattern: r#"^(\S+) \S+ \S+ \[([^\]]+)\] "([^"]*)" ([0-9]+) ([0-9]+) "([^"]*)" "([^"]*)" "([^"]*)""#,
        fields: &["ip", "timestamp", "request", "status", "bytes", "referer", "userAgent", "xff"],
    },
    BuiltinFormat {
        name: CUSTOM_WITH_TIMES_FORMAT,
        pattern: r#"^(\S+) (.+?) (\S+) \[([^\]]+)\] "([^"]*)" ([0-9]+) ([0-9]+) ([0-9.]+|-) ([0-9.]+|-) "([^"]*)" "([^"]*)" (\S+) (\S+)$"#,
        fields: &[
            "ip",
            "proxyAddr",
            "remoteUser",
            "timestamp",
            "request",
            "status",
            "bytes",
            "requestTime",
            "upstreamTime",
            "referer",
            "userAgent",
            "host",
            "requestId",
        ],
    },
    BuiltinFormat {
        name: COMBINED_FORMAT,
        pattern: r#"^(\S+) (\S+) (\S+) \[([^\]]+)\] "([^"]*)" ([0-9]+) ([0-9]+) "([^"]*)" "([^"]*)""#,
        fields: &["ip", "remoteUser", "proxy", "timestamp", "request", "status", "bytes", "referer", "userAgent"],
    },
];

/// Compile every built-in layout, in precedence order.
pub fn builtin_formats() -> Result<Vec<FormatTemplate>, ParseError> {
    info!("Compiling {} built-in log formats", BUILTIN_FORMATS.len());

    BUILTIN_FORMATS
        .iter()
        .map(|f| FormatTemplate::new(f.name, f.pattern, f.fields.iter().copied()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_names() {
        let formats = builtin_formats().unwrap();
        let names: Vec<&str> = formats.iter().map(|f| f.name()).collect();
        assert_eq!(names, [DEFAULT_FORMAT, CUSTOM_WITH_TIMES_FORMAT, COMBINED_FORMAT]);
    }

    #[test]
    fn test_builtins_reject_non_ascii_digits() {
        let line = "1.2.3.4 - - [t] \"GET / HTTP/1.1\" \u{662}\u{660}\u{660} 5 \"-\" \"ua\" \"-\"";
        for format in builtin_formats().unwrap() {
            assert!(!format.matches(line), "format {}", format.name());
        }
        assert!(builtin_formats().unwrap()[0].matches(&line.replace("\u{662}\u{660}\u{660}", "200")));
    }

    #[test]
    fn test_builtin_group_counts_match_fields() {
        for format in builtin_formats().unwrap() {
            assert_eq!(format.group_count(), format.fields().len(), "format {}", format.name());
        }
    }
}
