use crate::format::FieldCaptures;
use crate::registry::FormatRegistry;
use crate::{ParseError, ParsedRecord};

const MISSING: &str = "-";

/// Applies one named template to single lines.
pub struct LineParser<'r> {
    registry: &'r FormatRegistry,
}

impl<'r> LineParser<'r> {
    pub fn new(registry: &'r FormatRegistry) -> Self {
        Self { registry }
    }

    /// Parse `line` under `format`.
    ///
    /// `Ok(None)` means the line does not fit the layout, which is an
    /// ordinary outcome. An unregistered `format` is a caller bug and is
    /// returned as `ParseError::UnknownFormat`.
    pub fn parse_line(&self, line: &str, format: &str) -> Result<Option<ParsedRecord>, ParseError> {
        let template = self
            .registry
            .lookup(format)
            .ok_or_else(|| ParseError::UnknownFormat(format.to_string()))?;

        Ok(template.captures(line).map(|caps| build_record(&caps)))
    }
}

fn build_record(caps: &FieldCaptures<'_, '_>) -> ParsedRecord {
    let client_address = caps.get("ip").or_else(|| caps.get("proxyAddr")).unwrap_or(MISSING);

    let raw_request = caps.get("request").unwrap_or("");
    let (method, path) = split_request(raw_request);

    ParsedRecord {
        client_address: client_address.to_string(),
        timestamp: caps.get("timestamp").unwrap_or("").to_string(),
        method: method.to_string(),
        path: path.to_string(),
        status_code: parse_number(caps.get("status")),
        byte_count: parse_number(caps.get("bytes")),
        user_agent: or_missing(caps.get("userAgent")),
        referer: or_missing(caps.get("referer")),
        request_time: caps.get("requestTime").map(str::to_string),
        upstream_time: caps.get("upstreamTime").map(str::to_string),
        host: or_missing(caps.get("host")),
        request_id: or_missing(caps.get("requestId")),
        raw_request: raw_request.to_string(),
    }
}

/// `"GET /x HTTP/1.1"` -> `("GET", "/x")`. Tokens are split on single
/// spaces, so doubled spaces yield empty tokens, which fall back like
/// missing ones.
fn split_request(request: &str) -> (&str, &str) {
    let mut tokens = request.split(' ');
    let method = tokens.next().filter(|t| !t.is_empty()).unwrap_or("UNKNOWN");
    let path = tokens.next().filter(|t| !t.is_empty()).unwrap_or("/");
    (method, path)
}

/// Leading run of ASCII digits, so `"200ms"` is 200 and `"12.5"` is 12.
/// No digits, a sign, or overflow give the default.
fn parse_number<T: std::str::FromStr + Default>(value: Option<&str>) -> T {
    value
        .map(|v| {
            let v = v.trim_start();
            let end = v.find(|c: char| !c.is_ascii_digit()).unwrap_or(v.len());
            &v[..end]
        })
        .and_then(|digits| digits.parse().ok())
        .unwrap_or_default()
}

fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}
