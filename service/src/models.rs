use chrono::{DateTime, Utc};
use logscope_parser::{BatchResult, ParsedRecord};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadLogRequest {
    #[serde(default)]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadLogResponse {
    pub success: bool,
    pub logs: Vec<ParsedRecord>,
    pub file_name: String,
    pub file_size: u64,
    pub detected_format: String,
    pub total_lines: usize,
    pub valid_logs: usize,
    pub failed_lines: usize,
}

impl ReadLogResponse {
    pub fn from_batch(file_name: String, file_size: u64, total_lines: usize, batch: BatchResult) -> Self {
        Self {
            success: true,
            valid_logs: batch.parsed_count(),
            failed_lines: batch.failed_lines,
            detected_format: batch.format,
            logs: batch.records,
            file_name,
            file_size,
            total_lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFileInfo {
    pub path: String,
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListLogsResponse {
    pub logs: Vec<LogFileInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
