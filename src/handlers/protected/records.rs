use axum::{
    extract::{rejection::JsonRejection, Path},
    Extension, Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::database::{CredentialRecord, DatabaseManager, PgRecordStore};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{RecordChange, RecordService};
use crate::types::RecordCategory;

async fn record_service() -> Result<RecordService<PgRecordStore>, ApiError> {
    let pool = DatabaseManager::pool().await?;
    Ok(RecordService::new(PgRecordStore::new(pool)))
}

fn change_to_json(change: &RecordChange) -> Value {
    json!({
        "record": change.record.to_api_value(),
        "records": CredentialRecord::to_api_array(&change.records),
    })
}

/// GET /api/records/:category - the user's records in display order
pub async fn list(
    Path(category): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    let records = record_service().await?.list(category, auth_user.user_id).await?;
    Ok(ApiResponse::success(CredentialRecord::to_api_array(&records)))
}

/// POST /api/records/:category - create a record; the response carries the
/// new record and the collection with it inserted at its rank position
pub async fn create(
    Path(category): Path<String>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    let Json(payload) = payload?;
    let change = record_service()
        .await?
        .create(category, auth_user.user_id, payload)
        .await?;
    Ok(ApiResponse::created(change_to_json(&change)))
}

/// GET /api/records/:category/:id
pub async fn get(
    Path((category, id)): Path<(String, Uuid)>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    let record = record_service().await?.get(category, auth_user.user_id, id).await?;
    Ok(ApiResponse::success(record.to_api_value()))
}

/// PUT /api/records/:category/:id - replace a record's fields
pub async fn update(
    Path((category, id)): Path<(String, Uuid)>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    let Json(payload) = payload?;
    let change = record_service()
        .await?
        .update(category, auth_user.user_id, id, payload)
        .await?;
    Ok(ApiResponse::success(change_to_json(&change)))
}

/// DELETE /api/records/:category/:id - returns the remaining records in order
pub async fn delete(
    Path((category, id)): Path<(String, Uuid)>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Value> {
    let category: RecordCategory = category.parse()?;
    let records = record_service()
        .await?
        .delete(category, auth_user.user_id, id)
        .await?;
    Ok(ApiResponse::success(CredentialRecord::to_api_array(&records)))
}
