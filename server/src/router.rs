use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    company::{create_company, delete_company, get_company, list_companies, update_company},
    reset_token::{change_password, complete_password_reset, request_password_reset},
    user::{delete_me, get_me, login, register_user, update_me},
};
use crate::health::{healthz, readyz};
use crate::middleware::request_id_layer;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Users
        .route("/users", post(register_user))
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        .route("/users/@me", delete(delete_me))
        // Auth
        .route("/auth/login", post(login))
        .route("/auth/password-reset", post(request_password_reset))
        .route("/auth/password-reset", patch(complete_password_reset))
        .route("/auth/password", post(change_password))
        // Companies
        .route("/companies", post(create_company))
        .route("/companies", get(list_companies))
        .route("/companies/{company_id}", get(get_company))
        .route("/companies/{company_id}", patch(update_company))
        .route("/companies/{company_id}", delete(delete_company))
        // Set runs outermost so the id is present for tracing and is copied
        // onto the response by the propagate layer.
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
