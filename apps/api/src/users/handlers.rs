use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::user::{NewUser, User};
use crate::state::AppState;

/// POST /api/users
pub async fn handle_create_user(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let Json(new_user) = payload?;
    info!(name = %new_user.name, "Registering user");

    let user = state.users.create(&new_user).await?;
    info!(id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users
pub async fn handle_list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = state.users.list().await?;
    info!("Listing {} user(s)", users.len());
    Ok(Json(users))
}

/// DELETE /api/users/:id
pub async fn handle_delete_user(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;

    if !state.users.delete(id).await? {
        return Err(AppError::NotFound(format!("Usuário {id} não encontrado")));
    }

    info!(id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
