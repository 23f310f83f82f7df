use axum::Json;
use serde_json::{json, Value};

use crate::endpoints::CATALOGUE;

/// `GET /api`
pub async fn endpoints() -> Json<Value> {
    Json(json!({ "endpoints": &*CATALOGUE }))
}
