use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{delete, get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::public;
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/profile", profile_routes(state.clone()))
        // Global middleware
        .layer(cors_layer(&state.config.security))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn profile_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::handlers::protected::profile as own;

    let protected = Router::new()
        .route("/me", get(own::me_get))
        .route("/", post(own::profile_post).delete(own::profile_delete))
        .route("/experience", put(own::experience_put))
        .route("/experience/:exp_id", delete(own::experience_delete))
        .route("/education", put(own::education_put))
        .route("/education/:edu_id", delete(own::education_delete))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware));

    Router::new()
        .route("/", get(public::profile_list))
        .route("/user/:user_id", get(public::profile_by_user))
        .route("/github/:username", get(public::github_repos))
        .merge(protected)
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "DevConnector API",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "profiles": "GET /api/profile, GET /api/profile/user/:user_id (public)",
                "github": "GET /api/profile/github/:username (public)",
                "own_profile": "GET /api/profile/me, POST|DELETE /api/profile (protected)",
                "experience": "PUT /api/profile/experience, DELETE /api/profile/experience/:exp_id (protected)",
                "education": "PUT /api/profile/education, DELETE /api/profile/education/:edu_id (protected)",
            }
        }
    }))
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                    }
                })),
            )
        }
    }
}
