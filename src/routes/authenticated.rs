use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes for any signed-in role. The whole router is wrapped in
/// `auth_middleware` by `create_router`, so handlers can rely on a resolved
/// `AuthUser`.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/me
        // The identity and role carried by the caller's session token.
        .route("/api/me", get(handlers::get_me))
}
