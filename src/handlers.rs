use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};

use crate::app::AppState;
use crate::error::ApiError;
use crate::models::{CompletionRequest, FeedbackRequest};
use crate::normalize::normalize;
use crate::router::RouteOutcome;

pub async fn health_check() -> Json<Value> {

    Json(json!({"status": "healthy"}))

}

pub async fn chat_completions(
    State(state): State<AppState>,
    payload: Result<Json<CompletionRequest>, JsonRejection>
) -> Result<Json<RouteOutcome>, ApiError> {

    let Json(request) = payload.map_err(|rejection| {
        let error = ApiError::Validation(rejection.body_text());
        tracing::warn!(endpoint = "/v1/chat/completions", error = %error, "rejected request body");
        error
    })?;

    if request.messages.is_empty() {
        let error = ApiError::Validation("`messages` must contain at least one message".to_string());
        tracing::warn!(endpoint = "/v1/chat/completions", error = %error, "rejected request body");
        return Err(error);
    }

    if request.wants_stream() {
        tracing::debug!("streaming is not supported, answering with a single response");
    }

    let candidates = normalize(&request.model);
    let params = request.generation_params();

    let outcome = state.router
        .route(request.messages, candidates, params)
        .await
        .map_err(|e| {
            tracing::error!(endpoint = "/v1/chat/completions", error = %e, "chat completion failed");
            ApiError::from(e)
        })?;

    Ok(Json(outcome))

}

pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>
) -> Result<Json<Value>, ApiError> {

    let Json(feedback) = payload.map_err(|rejection| {
        let error = ApiError::Validation(rejection.body_text());
        tracing::warn!(endpoint = "/v1/feedback", error = %error, "rejected request body");
        error
    })?;

    // the recorder already logged the failure
    state.feedback.submit(&feedback).await?;

    Ok(Json(json!({"status": "success"})))

}
