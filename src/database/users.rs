use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::user::User;

const USER_COLUMNS: &str = "id, username, password_hash, login_count, login_limit, created_at, last_login_at";

/// Look up a user by login name
pub async fn find_user_by_username(pool: &PgPool, username: &str) -> Result<Option<User>, DatabaseError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<User, DatabaseError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound(format!("user {} not found", id)))
}

/// Insert a new user; a taken username is reported as a conflict
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
    login_limit: i32,
) -> Result<User, DatabaseError> {
    let sql = format!(
        "INSERT INTO users (id, username, password_hash, login_limit) VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
    );
    let result = sqlx::query_as::<_, User>(&sql)
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .bind(login_limit)
        .fetch_one(pool)
        .await;

    match result {
        Ok(user) => Ok(user),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            Err(DatabaseError::Conflict(format!("username '{}' is already taken", username)))
        }
        Err(other) => Err(other.into()),
    }
}

/// Count one successful login. Returns `None` when the quota is already
/// used up; the check and the increment happen in a single statement.
pub async fn record_login(pool: &PgPool, id: Uuid) -> Result<Option<User>, DatabaseError> {
    let sql = format!(
        "UPDATE users SET login_count = login_count + 1, last_login_at = now()
         WHERE id = $1 AND login_count < login_limit
         RETURNING {USER_COLUMNS}"
    );
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}
