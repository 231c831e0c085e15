use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::config;
use crate::database::models::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, username: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            username,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Login quota exhausted ({limit} logins allowed)")]
    QuotaExhausted { limit: i32 },
    #[error("Registration is disabled")]
    RegistrationDisabled,
    #[error("Invalid username: {0}")]
    InvalidUsername(String),
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("JWT secret not configured")]
    MissingSecret,
    #[error("JWT error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    generate_jwt_with_secret(claims, &config::config().security.jwt_secret)
}

pub fn validate_jwt(token: &str) -> Result<Claims, AuthError> {
    validate_jwt_with_secret(token, &config::config().security.jwt_secret)
}

fn generate_jwt_with_secret(claims: &Claims, secret: &str) -> Result<String, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), claims, &encoding_key)?)
}

fn validate_jwt_with_secret(token: &str, secret: &str) -> Result<Claims, AuthError> {
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Hex SHA-256 digest of a password
pub fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}

/// 3-64 characters of ASCII letters, digits, `_`, `.` or `-`
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    let valid_len = (3..=64).contains(&username.len());
    let valid_chars = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid_len && valid_chars {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername(username.to_string()))
    }
}

/// Check credentials and quota before the login is counted
pub fn check_login(user: &User, password: &str) -> Result<(), AuthError> {
    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }
    if user.login_count >= user.login_limit {
        return Err(AuthError::QuotaExhausted { limit: user.login_limit });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(password: &str, login_count: i32, login_limit: i32) -> User {
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: hash_password(password),
            login_count,
            login_limit,
            created_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn password_digest_is_hex_sha256() {
        let hash = hash_password("secret");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, "2bb80d537b1da3e38bd30361aa855686bde0eacd7162fef6a25fe97bf527a25b");
        assert!(verify_password("secret", &hash));
        assert!(!verify_password("Secret", &hash));
    }

    #[test]
    fn jwt_round_trip() {
        let claims = Claims::new(Uuid::new_v4(), "alice".to_string());
        let token = generate_jwt_with_secret(&claims, "test-secret").unwrap();
        let decoded = validate_jwt_with_secret(&token, "test-secret").unwrap();
        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.username, "alice");
        assert!(validate_jwt_with_secret(&token, "other-secret").is_err());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let claims = Claims::new(Uuid::new_v4(), "alice".to_string());
        assert!(matches!(generate_jwt_with_secret(&claims, ""), Err(AuthError::MissingSecret)));
    }

    #[test]
    fn username_rules() {
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("a.b-c").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("张三").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn login_checks_password_then_quota() {
        assert!(check_login(&user("pw", 0, 3), "pw").is_ok());
        assert!(matches!(check_login(&user("pw", 0, 3), "nope"), Err(AuthError::InvalidCredentials)));
        assert!(matches!(
            check_login(&user("pw", 3, 3), "pw"),
            Err(AuthError::QuotaExhausted { limit: 3 })
        ));
        // wrong password never reveals quota state
        assert!(matches!(check_login(&user("pw", 3, 3), "nope"), Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn remaining_logins_never_negative() {
        assert_eq!(user("pw", 1, 3).remaining_logins(), 2);
        assert_eq!(user("pw", 5, 3).remaining_logins(), 0);
    }
}
