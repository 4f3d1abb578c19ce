use axum::{extract::State, routing::post, Json, Router};
use tracing::{info, instrument, warn};

use crate::{
    auth::password::hash_password,
    error::ApiError,
    state::AppState,
    users::{
        dto::{PublicUser, RegisterRequest},
        repo_types::User,
    },
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/register", post(register))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<PublicUser>, ApiError> {
    payload.validate()?;

    let username = payload.username.trim();
    let email = {
        let e = payload.email.trim().to_lowercase();
        if e.is_empty() {
            None
        } else {
            Some(e)
        }
    };

    if User::exists_by_username(&state.db, username).await? {
        warn!(%username, "username already in use");
        return Err(ApiError::Duplicate("Username already in use".into()));
    }
    if let Some(email) = email.as_deref() {
        if User::exists_by_email(&state.db, email).await? {
            warn!(%email, "email already in use");
            return Err(ApiError::Duplicate("Email already in use".into()));
        }
    }

    let hash = hash_password(&payload.password)?;

    // A concurrent duplicate can still slip past the checks above; the unique
    // constraints surface it here and From<sqlx::Error> turns it into the
    // same Duplicate error.
    let user = User::create(
        &state.db,
        username,
        &hash,
        email.as_deref(),
        payload.full_name.trim(),
    )
    .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(Json(user.into()))
}
