use axum::{routing::get, Router};
use tracing::debug;

use crate::{auth::extractors::AuthUser, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/protected", get(protected))
}

/// Example gated endpoint; reachable only through the AuthUser gate.
async fn protected(AuthUser(user): AuthUser) -> &'static str {
    debug!(username = %user.username, "protected resource accessed");
    "You have successfully accessed a protected resource!"
}
