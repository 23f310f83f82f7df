use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::errors::ApiResult;
use crate::extract::{JsonBody, PathParam, QueryPairs};
use crate::state::AppState;

/// `GET /api/articles/{article_id}/comments?sort_by=&order=`
pub async fn list_comments(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
    query: QueryPairs,
) -> ApiResult<Json<Value>> {
    let comments = state
        .comments
        .list_for_article(&article_id, query.last("sort_by"), query.last("order"))
        .await?;
    Ok(Json(json!({ "allComments": comments })))
}

/// `POST /api/articles/{article_id}/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let comment = state.comments.create(&article_id, &body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "postedComment": comment }))))
}

/// `PATCH /api/comments/{comment_id}`
pub async fn vote_comment(
    State(state): State<AppState>,
    PathParam(comment_id): PathParam,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Value>> {
    let comment = state.comments.vote(&comment_id, &body).await?;
    Ok(Json(json!({ "updatedComment": comment })))
}

/// `DELETE /api/comments/{comment_id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    PathParam(comment_id): PathParam,
) -> ApiResult<StatusCode> {
    state.comments.delete(&comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
