use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::ApiResult;
use crate::extract::PathParam;
use crate::state::AppState;

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let users = state.users.list().await?;
    Ok(Json(json!({ "users": users })))
}

/// `GET /api/users/{username}`
pub async fn get_user(
    State(state): State<AppState>,
    PathParam(username): PathParam,
) -> ApiResult<Json<Value>> {
    let user = state.users.get(&username).await?;
    Ok(Json(json!({ "user": user })))
}
