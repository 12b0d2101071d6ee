use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Content administration endpoints, nested under `/api/admin`. Each handler
/// takes a `StaffUser`, which rejects non-staff roles with 403 before the
/// handler body runs.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /api/admin/blog
        // Posts of every status, including drafts awaiting review.
        .route("/blog", get(handlers::admin_list_blog_posts))
        // GET /api/admin/news
        .route("/news", get(handlers::admin_list_news_articles))
        // GET /api/admin/stats
        // Published/draft totals for the dashboard.
        .route("/stats", get(handlers::get_content_stats))
}
