// handlers/public/auth/register.rs - POST /auth/register handler

use axum::{extract::rejection::JsonRejection, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::auth::{hash_password, validate_username, AuthError};
use crate::config;
use crate::database::users::create_user;
use crate::database::DatabaseManager;
use crate::middleware::{ApiResponse, ApiResult};

use super::Credentials;

/// POST /auth/register - create an account with the default login quota
pub async fn register_post(body: Result<Json<Credentials>, JsonRejection>) -> ApiResult<Value> {
    let Json(body) = body?;
    let settings = &config::config().auth;
    if !settings.allow_registration {
        return Err(AuthError::RegistrationDisabled.into());
    }

    validate_username(&body.username)?;
    if body.password.is_empty() {
        return Err(AuthError::EmptyPassword.into());
    }

    let pool = DatabaseManager::pool().await?;
    let user = create_user(
        &pool,
        &body.username,
        &hash_password(&body.password),
        settings.default_login_limit,
    )
    .await?;

    info!("Registered user '{}'", user.username);

    Ok(ApiResponse::created(json!({
        "id": user.id,
        "username": user.username,
        "login_limit": user.login_limit,
    })))
}
