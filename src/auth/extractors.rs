use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::{error, warn};

use crate::auth::jwt::JwtKeys;
use crate::error::ApiError;
use crate::state::AppState;
use crate::users::repo_types::User;

/// Request gate for protected routes: validates the bearer token and
/// resolves its subject to a live user. Public routes simply do not use
/// this extractor. The authenticated user lives only for this request.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::InvalidToken("Missing Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::InvalidToken("Invalid Authorization header".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = match keys.verify(token) {
            Ok(c) => c,
            Err(_) => {
                warn!("invalid or expired token");
                return Err(ApiError::InvalidToken("Invalid or expired token".into()));
            }
        };

        // Fail closed if the subject no longer maps to a live account.
        let user = User::find_by_username(&state.db, &claims.sub)
            .await
            .map_err(|e| {
                error!(error = %e, username = %claims.sub, "user lookup failed");
                ApiError::Unexpected(e.into())
            })?
            .ok_or_else(|| ApiError::InvalidToken("User not found".into()))?;

        if !user.enabled {
            warn!(username = %user.username, "disabled account presented a valid token");
            return Err(ApiError::InvalidToken("Account disabled".into()));
        }

        Ok(AuthUser(user))
    }
}
