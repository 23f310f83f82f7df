use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use domains::ArticleListParams;
use serde_json::{json, Value};

use crate::errors::ApiResult;
use crate::extract::{JsonBody, PathParam, QueryPairs};
use crate::state::AppState;

/// `GET /api/articles?topic=&sort_by=&order=&limit=&p=`
pub async fn list_articles(
    State(state): State<AppState>,
    query: QueryPairs,
) -> ApiResult<Json<Value>> {
    let params = ArticleListParams::from_pairs(&query.0);
    let articles = state.articles.list(&params, &query.keys()).await?;
    Ok(Json(json!({ "allArticles": articles })))
}

/// `POST /api/articles`
pub async fn create_article(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let article = state.articles.create(&body).await?;
    Ok((StatusCode::CREATED, Json(json!({ "newArticle": article }))))
}

/// `GET /api/articles/{article_id}`
pub async fn get_article(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
) -> ApiResult<Json<Value>> {
    let article = state.articles.get(&article_id).await?;
    Ok(Json(json!({ "article": article })))
}

/// `PATCH /api/articles/{article_id}`
pub async fn vote_article(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
    JsonBody(body): JsonBody,
) -> ApiResult<Json<Value>> {
    let article = state.articles.vote(&article_id, &body).await?;
    Ok(Json(json!({ "updatedArticle": article })))
}

/// `DELETE /api/articles/{article_id}`
pub async fn delete_article(
    State(state): State<AppState>,
    PathParam(article_id): PathParam,
) -> ApiResult<StatusCode> {
    state.articles.delete(&article_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
