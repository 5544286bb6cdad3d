use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{debug, info};

use crate::agents::SummarizeAgent;
use crate::models::{AppState, SummaryResponse, UploadedFile};
use crate::types::{AppError, AppResult};

/// Multipart field the upload is expected in
const FILE_FIELD: &str = "file";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process-file/", post(process_file))
        .route("/process-file", post(process_file))
        .with_state(state)
}

async fn process_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SummaryResponse>> {
    let mut multipart = multipart.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    let file = read_upload(&mut multipart).await?;

    info!(filename = %file.filename, bytes = file.content.len(), "File upload received");

    let summary = SummarizeAgent::summarize(file, &state.llm, &state.config).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// Pull the uploaded file out of the form. The `file` field wins; otherwise
/// the first field that carries a filename is used.
async fn read_upload(multipart: &mut Multipart) -> AppResult<UploadedFile> {
    let mut fallback: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let is_file_field = field.name() == Some(FILE_FIELD);
        let filename = field.file_name().map(str::to_owned);

        if !is_file_field && (filename.is_none() || fallback.is_some()) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let content = field.bytes().await.map_err(multipart_error)?;
        let upload = UploadedFile::new(filename.unwrap_or_default(), content);

        if is_file_field {
            return Ok(upload);
        }
        fallback = Some(upload);
    }

    fallback.ok_or_else(|| AppError::InvalidRequest("No file uploaded".to_string()))
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::InvalidRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}
