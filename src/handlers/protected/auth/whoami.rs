use axum::Extension;
use serde_json::{json, Value};

use crate::database::users::find_user_by_id;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};

/// GET /api/auth/whoami - current account and login quota
pub async fn whoami_get(Extension(auth_user): Extension<AuthUser>) -> ApiResult<Value> {
    let pool = DatabaseManager::pool().await?;
    let user = find_user_by_id(&pool, auth_user.user_id).await?;

    Ok(ApiResponse::success(json!({
        "id": user.id,
        "username": user.username,
        "login_count": user.login_count,
        "login_limit": user.login_limit,
        "remaining_logins": user.remaining_logins(),
        "last_login_at": user.last_login_at,
        "created_at": user.created_at,
    })))
}
