use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints open to any client. Every content handler here filters to
/// published items before anything leaves the repository boundary.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for the load balancer.
        .route("/health", get(|| async { "ok" }))
        // GET /api/blog?page=&limit=&search=&category=&tag=&sort=&featured=
        .route("/api/blog", get(handlers::list_blog_posts))
        // GET /api/blog/tags
        // Static segment; takes priority over the slug route below.
        .route("/api/blog/tags", get(handlers::list_blog_tags))
        .route("/api/blog/{slug}", get(handlers::get_blog_post))
        // GET /api/news accepts the same parameters plus `urgent`.
        .route("/api/news", get(handlers::list_news_articles))
        .route("/api/news/{slug}", get(handlers::get_news_article))
        // POST /api/contact
        // Validated, rate limited per sender, then mailed to the team inbox.
        .route("/api/contact", post(handlers::submit_contact))
}
