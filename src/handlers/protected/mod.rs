// handlers/protected/mod.rs - handlers behind the bearer-token middleware
//
// Every handler here receives the `AuthUser` injected by `jwt_auth_middleware`
// and only ever touches that user's rows.
pub mod auth;
pub mod records;
