//! HTTP server for the PDF Digest API.
//!
//! Upload a PDF, summarize it by id, delete it. Uploads are multipart,
//! everything else is JSON. Summarization re-extracts from the stored
//! file on every call; there is no cross-request state beyond the upload
//! directory.

use crate::completion::CompletionClient;
use crate::config::Config;
use crate::model::{
    ApiError, DeleteResponse, HealthResponse, SummarizeRequest, SummarizeResponse,
    UploadResponse,
};
use crate::pdf::{self, ExtractError};
use crate::storage::{DocumentId, StorageError, UploadStore};
use crate::summarize;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use utoipa::OpenApi;

/// OpenAPI documentation for the PDF Digest API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PDF Digest API",
        version = "0.1.0",
        description = "Upload a PDF, extract its text, and produce an \
                       AI-generated summary at one of several verbosity \
                       levels.",
        license(name = "MIT")
    ),
    paths(root, health_check, upload_pdf, summarize_pdf, delete_file),
    components(schemas(
        UploadResponse,
        SummarizeRequest,
        SummarizeResponse,
        DeleteResponse,
        HealthResponse,
        ApiError,
        crate::model::ApiErrorDetail,
        crate::summarize::SummaryMode,
        crate::summarize::SummaryKind,
    )),
    tags(
        (name = "Documents", description = "Upload, summarize and delete PDF documents"),
        (name = "Health", description = "Server health and status")
    )
)]
pub struct ApiDoc;

/// Shared application state, constructed once at startup
pub struct AppState {
    pub config: Config,
    pub client: CompletionClient,
    pub store: UploadStore,
}

impl AppState {
    pub fn new(config: Config, client: CompletionClient, store: UploadStore) -> Self {
        Self {
            config,
            client,
            store,
        }
    }
}

/// Request-level errors. Summarization failures never show up here; they
/// are absorbed into the summary text (see [`crate::summarize`]).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(StorageError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::InvalidId(id) => {
                AppError::InvalidRequest(format!("Invalid file id: {id}"))
            }
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::invalid_request(msg))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::not_found(msg)),
            AppError::Extraction(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::extraction_error(e.to_string()),
            ),
            AppError::Storage(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error(e.to_string()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::internal_error(msg),
            ),
        };

        (status, Json(error)).into_response()
    }
}

/// Create the Axum router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/openapi.json", get(openapi_json))
        .route("/api/upload", post(upload_pdf))
        .route("/api/summarize", post(summarize_pdf))
        .route("/api/files/:file_id", delete(delete_file))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// OpenAPI JSON specification endpoint
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Welcome / discovery endpoint
#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    responses((status = 200, description = "Service description and endpoint map"))
)]
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Welcome to the PDF Digest API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": { "path": "/api/upload", "method": "POST" },
            "summarize": { "path": "/api/summarize", "method": "POST" },
            "delete": { "path": "/api/files/{file_id}", "method": "DELETE" },
            "health": { "path": "/health", "method": "GET" },
            "openapi": { "path": "/openapi.json", "method": "GET" }
        }
    }))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Server health", body = HealthResponse))
)]
async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        mock_mode: !state.client.has_credentials(),
    })
}

/// Upload a PDF document.
///
/// The file is stored under a fresh id and extracted immediately; a file
/// that fails extraction is removed again so nothing orphaned stays
/// behind.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Documents",
    responses(
        (status = 200, description = "File uploaded and processed", body = UploadResponse),
        (status = 400, description = "Not a PDF upload", body = ApiError),
        (status = 422, description = "PDF could not be parsed", body = ApiError)
    )
)]
async fn upload_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        if content_type != "application/pdf" {
            return Err(AppError::InvalidRequest(format!(
                "Invalid file type '{content_type}'. Only PDFs are allowed."
            )));
        }

        let filename = field
            .file_name()
            .unwrap_or("upload.pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Could not read upload: {e}")))?;

        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| AppError::InvalidRequest("Missing 'file' field".to_string()))?;

    let id = state.store.store(&bytes).await?;
    info!("Stored upload {} as {}", filename, id);

    // Extract right away so the caller learns the page count and broken
    // files are rejected at the door.
    let bundle = match pdf::extract(&state.store.path_for(&id)) {
        Ok(bundle) => bundle,
        Err(e) => {
            // No orphaned artifacts for failed uploads
            if let Err(cleanup) = state.store.remove(&id).await {
                error!("Failed to clean up {} after extraction error: {cleanup}", id);
            }
            return Err(e.into());
        }
    };

    Ok(Json(UploadResponse {
        file_id: id.to_string(),
        filename,
        page_count: bundle.page_count(),
        message: "File uploaded and processed successfully".to_string(),
    }))
}

/// Summarize a previously uploaded document.
///
/// Stateless by design: the text is re-extracted from the stored file on
/// every call. Always answers 200 once the file is readable; a failing
/// completion call degrades to an error-describing summary instead of
/// failing the request.
#[utoipa::path(
    post,
    path = "/api/summarize",
    tag = "Documents",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary text", body = SummarizeResponse),
        (status = 400, description = "Invalid file id", body = ApiError),
        (status = 404, description = "No such file", body = ApiError),
        (status = 422, description = "PDF could not be parsed", body = ApiError)
    )
)]
async fn summarize_pdf(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, AppError> {
    let id = DocumentId::parse(&request.file_id)?;
    let mode = request.mode();

    if !state.store.exists(&id) {
        return Err(AppError::NotFound(format!("File not found: {id}")));
    }

    let bundle = match pdf::extract(&state.store.path_for(&id)) {
        Ok(bundle) => bundle,
        // A concurrent delete can win the race after the existence check;
        // the loser reports "not found" rather than a parse failure.
        Err(e) if !state.store.exists(&id) => {
            warn!("File {} vanished during extraction: {e}", id);
            return Err(AppError::NotFound(format!("File not found: {id}")));
        }
        Err(e) => return Err(e.into()),
    };

    let summary = summarize::summarize(&state.client, &bundle, mode).await;
    info!("Summarized {} in {} mode ({:?})", id, mode, summary.kind);

    Ok(Json(SummarizeResponse {
        summary: summary.text,
        kind: summary.kind,
        mode: summary.mode,
    }))
}

/// Delete a stored document. Idempotent: deleting an absent id answers
/// 200 with `deleted: false`.
#[utoipa::path(
    delete,
    path = "/api/files/{file_id}",
    tag = "Documents",
    params(("file_id" = String, Path, description = "Identifier returned by upload")),
    responses(
        (status = 200, description = "Delete outcome", body = DeleteResponse),
        (status = 400, description = "Invalid file id", body = ApiError)
    )
)]
async fn delete_file(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    let id = DocumentId::parse(&file_id)?;

    let deleted = state.store.remove(&id).await?;
    if deleted {
        info!("Deleted {}", id);
    }

    Ok(Json(DeleteResponse {
        deleted,
        message: if deleted {
            "File deleted".to_string()
        } else {
            "File not found".to_string()
        },
    }))
}
