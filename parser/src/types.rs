use serde::{Deserialize, Serialize};

/// One access-log line broken into fields.
///
/// Serialized keys follow the viewer front end (`ip`, `status`, `bytes`,
/// `fullRequest`, ...) rather than the Rust field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecord {
    #[serde(rename = "ip")]
    pub client_address: String,
    pub timestamp: String,
    pub method: String,
    pub path: String,
    #[serde(rename = "status")]
    pub status_code: u32,
    #[serde(rename = "bytes")]
    pub byte_count: u64,
    #[serde(rename = "userAgent")]
    pub user_agent: String,
    pub referer: String,
    #[serde(rename = "requestTime")]
    pub request_time: Option<String>,
    #[serde(rename = "upstreamTime")]
    pub upstream_time: Option<String>,
    pub host: String,
    #[serde(rename = "requestId")]
    pub request_id: String,
    #[serde(rename = "fullRequest")]
    pub raw_request: String,
}

/// Outcome of parsing a whole file under one detected format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub records: Vec<ParsedRecord>,
    pub format: String,
    pub failed_lines: usize,
}

impl BatchResult {
    pub fn parsed_count(&self) -> usize {
        self.records.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid custom format: {0}")]
    InvalidSpec(#[from] serde_json::Error),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("Unknown log format: {0}")]
    UnknownFormat(String),
}
