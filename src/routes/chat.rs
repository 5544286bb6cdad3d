use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::info;

use crate::agents::ChatAgent;
use crate::models::{AppState, ChatRequest, ChatResponse};
use crate::types::{AppError, AppResult};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/chat", post(post_chat))
        .with_state(state)
}

pub async fn post_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> AppResult<Json<ChatResponse>> {
    let Json(request) = payload.map_err(|e| AppError::InvalidRequest(e.body_text()))?;
    info!(
        message_len = request.message.as_deref().map(str::len).unwrap_or(0),
        "Received chat request"
    );

    let response = ChatAgent::reply(request.message.as_deref(), &state.llm, &state.config).await?;
    Ok(Json(ChatResponse { response }))
}
