use crate::errors::AppError;
use crate::models::{AlertResponse, AnalyticsResponse, ClickRequest, ConfirmRequest, StatusResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};

const MAX_LABEL_CHARS: usize = 64;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let status = state.status().await;
    Html(render_index(&status))
}

pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.status().await)
}

pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsResponse> {
    Json(state.analytics().await)
}

pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let label = payload.label.trim();
    if label.is_empty() {
        return Err(AppError::bad_request("label must not be empty"));
    }
    if label.chars().count() > MAX_LABEL_CHARS {
        return Err(AppError::bad_request(format!(
            "label must be at most {MAX_LABEL_CHARS} characters"
        )));
    }

    Ok(Json(state.click(label.to_string()).await))
}

pub async fn alert(State(state): State<AppState>) -> Json<AlertResponse> {
    let (message, status) = state.alert().await;
    Json(AlertResponse { message, status })
}

pub async fn confirm(
    State(state): State<AppState>,
    Json(payload): Json<ConfirmRequest>,
) -> Json<StatusResponse> {
    Json(state.confirm(payload.confirmed).await)
}

pub async fn start_auto(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.start_auto().await)
}

pub async fn stop_auto(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.stop_auto().await)
}

pub async fn reset(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.reset().await)
}

pub async fn reset_form(State(state): State<AppState>) -> Redirect {
    state.reset().await;
    Redirect::to("/")
}

pub async fn toggle_analytics(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(state.toggle_analytics().await)
}
