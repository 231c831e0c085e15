// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::{check_login, generate_jwt, AuthError, Claims};
use crate::config;
use crate::database::users::{find_user_by_username, record_login};
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};

use super::Credentials;

/// POST /auth/login - check credentials and quota, count the login, issue a JWT
///
/// Response data:
/// `{ token, user: { id, username }, login_count, login_limit, remaining_logins, expires_in }`
pub async fn login_post(body: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Value> {
    let Json(body) = body?;
    let pool = DatabaseManager::pool().await?;

    let user = find_user_by_username(&pool, &body.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if let Err(e) = check_login(&user, &body.password) {
        warn!("Login rejected for '{}': {}", body.username, e);
        return Err(e.into());
    }

    // Conditional increment; a concurrent login may have used the last slot
    let user = record_login(&pool, user.id)
        .await?
        .ok_or(AuthError::QuotaExhausted { limit: user.login_limit })?;

    let claims = Claims::new(user.id, user.username.clone());
    let token = generate_jwt(&claims)?;
    let expires_in = config::config().security.jwt_expiry_hours * 3600;

    info!(
        "User '{}' logged in ({}/{} logins used)",
        user.username, user.login_count, user.login_limit
    );

    Ok(ApiResponse::success(json!({
        "token": token,
        "user": {
            "id": user.id,
            "username": user.username,
        },
        "login_count": user.login_count,
        "login_limit": user.login_limit,
        "remaining_logins": user.remaining_logins(),
        "expires_in": expires_in,
    })))
}
