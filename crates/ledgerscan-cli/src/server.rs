//! HTTP surface: `POST /upload` and `GET /health`.

use std::sync::Arc;

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use ledgerscan_core::error::LedgerError;
use ledgerscan_core::extraction::TableDetector;
use ledgerscan_core::model::UploadedFile;
use ledgerscan_core::process_batch;
use ledgerscan_core::upload::UploadConfig;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Multipart field carrying the uploaded files.
const FILES_FIELD: &str = "files";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub upload: UploadConfig,
    pub max_upload_bytes: usize,
}

pub struct AppState {
    pub upload: UploadConfig,
    pub detector: Arc<dyn TableDetector>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors returned by handlers, rendered as `{"error": ...}`.
#[derive(Debug)]
pub enum AppError {
    /// Malformed or oversized multipart body. Carries the status axum
    /// assigns, 413 when the body limit is hit.
    Multipart(MultipartError),
    Ledger(LedgerError),
    /// The blocking extraction task did not complete.
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::Multipart(e) => (e.status(), e.body_text()),
            AppError::Ledger(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::Ledger(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        if status.is_server_error() {
            tracing::error!(%error, "upload failed");
        } else {
            tracing::warn!(%error, "upload rejected");
        }

        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        AppError::Multipart(err)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        AppError::Ledger(err)
    }
}

/// Build the application router.
///
/// - `POST /upload` - extract tables and balance bounds from uploaded files
/// - `GET /health` - liveness check
///
/// CORS is permissive and the body limit is raised to `max_upload_bytes`.
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/upload", post(upload_files))
        .route("/health", get(health_check))
        .with_state(Arc::new(state))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig, detector: Arc<dyn TableDetector>) -> Result<(), LedgerError> {
    let state = AppState {
        upload: config.upload,
        detector,
    };
    let router = app(state, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Accepts `multipart/form-data` with one or more `files` parts and
/// reports the last file's table and balance bounds.
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    // A request that is not multipart carries no files.
    let Ok(multipart) = multipart else {
        return Err(LedgerError::NoFiles.into());
    };
    let files = read_files(multipart).await?;

    let report = tokio::task::spawn_blocking(move || {
        process_batch(&files, &state.upload, state.detector.as_ref())
    })
    .await
    .map_err(|e| AppError::Internal(format!("extraction task failed: {e}")))??;

    Ok((StatusCode::OK, Json(report)).into_response())
}

async fn read_files(mut multipart: Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();
    let mut saw_field = false;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        // Plain form values sharing the field name are not files.
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        saw_field = true;

        let bytes = field.bytes().await?;
        files.push(UploadedFile {
            filename: Some(filename),
            bytes: bytes.to_vec(),
        });
    }

    if !saw_field {
        return Err(LedgerError::NoFiles.into());
    }
    Ok(files)
}
