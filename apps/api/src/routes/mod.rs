pub mod health;

use axum::{
    routing::{delete, get},
    Router,
};

use crate::state::AppState;
use crate::users::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/users",
            get(handlers::handle_list_users).post(handlers::handle_create_user),
        )
        .route("/api/users/:id", delete(handlers::handle_delete_user))
        .with_state(state)
}
