// Parser crate for nginx-style access logs
// Registry of line formats, batch-level format detection and tolerant line parsing

pub mod types;
pub mod format;
pub mod formats;
pub mod registry;

pub mod detector;
pub mod line_parser;
pub mod batch;

// Re-export main types
pub use types::*;
pub use format::{CustomFormatSpec, FormatTemplate};
pub use formats::{COMBINED_FORMAT, CUSTOM_FORMAT, CUSTOM_WITH_TIMES_FORMAT, DEFAULT_FORMAT};
pub use registry::FormatRegistry;

pub use detector::FormatDetector;
pub use line_parser::LineParser;
pub use batch::BatchParser;
