// handlers/public/auth/mod.rs - token acquisition and account creation
use serde::Deserialize;

pub mod login; // POST /auth/login
pub mod register; // POST /auth/register

pub use login::login_post;
pub use register::register_post;

/// Username/password body shared by login and register
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
