use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// `GET /api/topics`
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let topics = state.topics.list().await?;
    Ok(Json(json!({ "topics": topics })))
}

/// `POST /api/topics`
pub async fn create_topic(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let topic = state.topics.create(&body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "newTopic": topic }))))
}
