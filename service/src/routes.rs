use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use crate::config::Config;
use crate::error::ApiError;
use crate::log_files::{describe, read_log_file, resolve_path, split_lines};
use crate::models::{ListLogsResponse, ReadLogRequest, ReadLogResponse};
use logscope_parser::{BatchParser, FormatRegistry};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{debug, info, instrument};

/// Multipart framing on top of the largest accepted file.
const UPLOAD_OVERHEAD: u64 = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<FormatRegistry>,
    pub known_logs: Arc<[PathBuf]>,
    pub max_file_size: u64,
}

impl AppState {
    pub fn new(registry: FormatRegistry, config: &Config) -> Self {
        Self {
            registry: Arc::new(registry),
            known_logs: config.known_logs().into(),
            max_file_size: config.max_file_size,
        }
    }
}

pub fn create_routes(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let body_limit = usize::try_from(state.max_file_size.saturating_add(UPLOAD_OVERHEAD)).unwrap_or(usize::MAX);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/logs/list", get(list_logs))
        .route("/api/logs/read", post(read_log))
        .route("/api/logs/upload", post(upload_log))
        .layer(DefaultBodyLimit::max(body_limit))
        .fallback_service(ServeDir::new(static_dir))
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn list_logs(State(state): State<AppState>) -> Json<ListLogsResponse> {
    let logs: Vec<_> = state.known_logs.iter().filter_map(|path| describe(path)).collect();
    debug!("{} of {} configured log files present", logs.len(), state.known_logs.len());

    Json(ListLogsResponse { logs })
}

#[instrument(skip(state, req))]
async fn read_log(
    State(state): State<AppState>,
    Json(req): Json<ReadLogRequest>,
) -> Result<Json<ReadLogResponse>, ApiError> {
    let raw_path = req
        .file_path
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("filePath is required".to_string()))?;

    let path = resolve_path(&raw_path)?;
    info!("Reading log file: {}", path.display());

    let registry = Arc::clone(&state.registry);
    let max_size = state.max_file_size;

    let response = tokio::task::spawn_blocking(move || {
        let file = read_log_file(&path, max_size)?;
        debug!("Loaded {} ({} bytes)", file.path.display(), file.size);
        parse_content(&registry, file.name, file.size, &file.content)
    })
    .await??;

    Ok(Json(response))
}

#[instrument(skip(state, multipart))]
async fn upload_log(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReadLogResponse>, ApiError> {
    info!("Received log upload");

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("upload.log").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
            info!("Receiving file: {} ({} bytes)", file_name, data.len());
            upload = Some((file_name, data));
        }
    }

    let (file_name, data) = upload
        .filter(|(_, data)| !data.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No file provided".to_string()))?;

    let size = data.len() as u64;
    if size > state.max_file_size {
        return Err(ApiError::TooLarge(state.max_file_size));
    }

    let registry = Arc::clone(&state.registry);
    let response = tokio::task::spawn_blocking(move || {
        let content = String::from_utf8_lossy(&data);
        parse_content(&registry, file_name, size, &content)
    })
    .await??;

    Ok(Json(response))
}

fn parse_content(
    registry: &FormatRegistry,
    file_name: String,
    file_size: u64,
    content: &str,
) -> Result<ReadLogResponse, ApiError> {
    let lines = split_lines(content);
    let batch = BatchParser::new(registry).parse_all(&lines)?;

    Ok(ReadLogResponse::from_batch(file_name, file_size, lines.len(), batch))
}
