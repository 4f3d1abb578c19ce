use axum::{
    extract::{FromRef, State},
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse},
        jwt::JwtKeys,
        password::verify_password,
    },
    error::ApiError,
    state::AppState,
    users::repo_types::User,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    payload.validate()?;

    let username = payload.username.trim();
    let user = User::find_by_username(&state.db, username)
        .await?
        .ok_or_else(|| {
            warn!(%username, "login against unknown username");
            ApiError::NotFound(format!("User not found: {}", username))
        })?;

    let ok = verify_password(&payload.password, &user.password_hash)?;
    if !ok {
        warn!(user_id = %user.id, %username, "login with invalid password");
        return Err(ApiError::InvalidCredentials);
    }
    if !user.enabled {
        warn!(user_id = %user.id, %username, "login against disabled account");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(&user.username)?;

    info!(user_id = %user.id, %username, "user logged in");
    Ok(Json(LoginResponse { token }))
}
