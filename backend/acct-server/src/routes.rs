use crate::{
    AppState, delete_user, get_user, health, reset_password, sign_in, sign_up, update_email,
    update_user,
};

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let users = Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
        .route("/update-email", patch(update_email))
        .route("/reset-password", get(reset_password))
        .route(
            "/{id}",
            get(get_user).patch(update_user).delete(delete_user),
        );

    Router::new()
        .nest("/api/v1/users", users)
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
