use axum::{extract::State, routing::get, Json, Router};
use crate::models::{AppState, WelcomeResponse};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(welcome))
        .with_state(state)
}

async fn welcome(State(state): State<AppState>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: state.config.server.hosting.welcome_message().to_string(),
    })
}
