use crate::error::ApiError;
use crate::models::LogFileInfo;
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// A log file loaded into memory, ready to be split into lines.
pub struct LogFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub content: String,
}

/// Make `raw` absolute against the working directory and collapse `.` and
/// `..` segments, so the checks below see the path that will be opened.
pub fn resolve_path(raw: &str) -> io::Result<PathBuf> {
    let path = Path::new(raw);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut resolved = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            other => resolved.push(other.as_os_str()),
        }
    }
    Ok(resolved)
}

/// Read a regular file no larger than `max_size` bytes. Invalid UTF-8 is
/// replaced rather than rejected.
pub fn read_log_file(path: &Path, max_size: u64) -> Result<LogFile, ApiError> {
    let meta = match fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ApiError::NotFound),
        Err(e) => return Err(e.into()),
    };

    if !meta.is_file() {
        return Err(ApiError::BadRequest("Path is not a file".to_string()));
    }
    if meta.len() > max_size {
        return Err(ApiError::TooLarge(max_size));
    }

    let bytes = fs::read(path)?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    Ok(LogFile {
        path: path.to_path_buf(),
        name: file_name(path),
        size: meta.len(),
        content: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Size and mtime of `path`, or `None` when it is not an existing file.
pub fn describe(path: &Path) -> Option<LogFileInfo> {
    let meta = fs::metadata(path).ok().filter(|m| m.is_file())?;

    Some(LogFileInfo {
        path: path.display().to_string(),
        name: file_name(path),
        size: meta.len(),
        modified: meta.modified().ok().map(DateTime::<Utc>::from),
    })
}

/// Trim surrounding whitespace and split on newlines, dropping a trailing
/// `\r` from each line. Empty content is one blank line.
pub fn split_lines(content: &str) -> Vec<&str> {
    content
        .trim()
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
