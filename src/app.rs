use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;

/// Full application router
pub fn app() -> Router {
    let router = Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .merge(category_routes())
        .merge(auth_public_routes())
        .merge(protected_routes())
        .layer(cors_layer());

    if config::config().server.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn category_routes() -> Router {
    use public::categories;

    Router::new()
        .route("/categories", get(categories::list))
        .route("/categories/:category/levels", get(categories::levels))
}

fn auth_public_routes() -> Router {
    use public::auth;

    Router::new()
        .route("/auth/register", post(auth::register_post))
        .route("/auth/login", post(auth::login_post))
}

fn protected_routes() -> Router {
    use protected::{auth, records};

    Router::new()
        .route("/api/auth/whoami", get(auth::whoami_get))
        .route("/api/records/:category", get(records::list).post(records::create))
        .route(
            "/api/records/:category/:id",
            get(records::get).put(records::update).delete(records::delete),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}
