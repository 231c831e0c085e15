use axum::extract::Path;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::types::RecordCategory;

fn describe(category: RecordCategory) -> Value {
    json!({
        "category": category.slug(),
        "name": category.display_name(),
        "rank_field": category.rank_field(),
        "required_fields": category.required_fields(),
        "levels": category.rank_table().labels(),
    })
}

/// GET /categories - every record category with its ordered labels
pub async fn list() -> ApiResult<Value> {
    let data: Vec<Value> = RecordCategory::ALL.into_iter().map(describe).collect();
    Ok(ApiResponse::success(Value::Array(data)))
}

/// GET /categories/:category/levels - labels for selection lists, highest priority first
pub async fn levels(Path(category): Path<String>) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    Ok(ApiResponse::success(json!({
        "category": category.slug(),
        "levels": category.rank_table().labels(),
    })))
}
