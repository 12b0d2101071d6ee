use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    extract::{FromRef, Request},
    http::HeaderName,
    middleware::{self, Next},
    response::Response,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Request decision logic.
pub mod classifier;
pub mod gate;
pub mod locale;

// Content and its query layer.
pub mod dataset;
pub mod markdown;
pub mod models;
pub mod query;
pub mod repository;

// Services and HTTP plumbing.
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod mailer;
pub mod rate_limit;

// Routing segregated by access tier (Public, Authenticated, Admin).
pub mod routes;
use auth::AuthUser;
use routes::{admin, authenticated, public};

// --- Public Re-exports ---

pub use classifier::{RouteClass, RouteClassifier};
pub use config::AppConfig;
pub use i18n::{CatalogError, MessageCatalog};
pub use locale::{Locale, Negotiation, NegotiationAction, negotiate};
pub use mailer::{HttpMailer, MailerState, MockMailer};
pub use rate_limit::{InMemoryRateLimiter, RateLimitState};
pub use repository::{ContentState, StaticContentRepository};

/// ApiDoc
///
/// OpenAPI document for the JSON API, served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_blog_posts, handlers::get_blog_post, handlers::list_blog_tags,
        handlers::list_news_articles, handlers::get_news_article, handlers::submit_contact,
        handlers::get_me, handlers::admin_list_blog_posts, handlers::admin_list_news_articles,
        handlers::get_content_stats
    ),
    components(
        schemas(
            models::BlogPost, models::NewsArticle, models::BlogCategory, models::NewsCategory,
            models::LocalizedText, models::ContentStatus, models::PaginationMeta,
            models::TagCount, models::ContentStats, models::StatusCounts,
            models::ContactRequest, models::ContactResponse, models::PageContext,
            error::ErrorEnvelope, error::ErrorBody, auth::AuthUser, auth::Role, locale::Locale,
        )
    ),
    tags(
        (name = "site-gateway", description = "Bilingual site content and contact API")
    )
)]
struct ApiDoc;

/// AppState
///
/// The single, immutable container of services shared by every request.
#[derive(Clone)]
pub struct AppState {
    /// Editorial content behind the repository seam.
    pub content: ContentState,
    /// Delivery of contact-form notifications.
    pub mailer: MailerState,
    /// Per-sender throttle for the contact form.
    pub rate_limiter: RateLimitState,
    /// Locale message bundles, parsed at startup.
    pub catalog: Arc<MessageCatalog>,
    /// Public/protected path decisions for the site gate.
    pub classifier: Arc<RouteClassifier>,
    pub config: AppConfig,
}

impl AppState {
    /// Assembles the state with the bundled message catalog, the default
    /// public allow-list and an in-memory limiter sized from `config`.
    pub fn build(
        config: AppConfig,
        content: ContentState,
        mailer: MailerState,
    ) -> Result<Self, CatalogError> {
        let catalog = MessageCatalog::load()?;
        let rate_limiter = InMemoryRateLimiter::new(
            config.contact_rate_limit,
            Duration::from_secs(config.contact_rate_window_secs),
        );
        Ok(Self {
            content,
            mailer,
            rate_limiter: Arc::new(rate_limiter),
            catalog: Arc::new(catalog),
            classifier: Arc::new(RouteClassifier::default()),
            config,
        })
    }
}

// --- Axum FromRef Extractor Implementations ---

impl FromRef<AppState> for ContentState {
    fn from_ref(app_state: &AppState) -> ContentState {
        app_state.content.clone()
    }
}

impl FromRef<AppState> for MailerState {
    fn from_ref(app_state: &AppState) -> MailerState {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// auth_middleware
///
/// Guards `authenticated_routes`. Extracting `AuthUser` rejects the request
/// with the 401 envelope before any handler runs.
async fn auth_middleware(_auth_user: AuthUser, request: Request, next: Next) -> Response {
    next.run(request).await
}

/// create_router
///
/// Assembles the API tiers, the page fallback, the site gate and the
/// observability layers around the shared state.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(public::public_routes())
        .merge(
            authenticated::authenticated_routes()
                .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware)),
        )
        .nest("/api/admin", admin::admin_routes())
        // Every path the API does not claim is a page.
        .fallback(handlers::render_page)
        // The gate runs for all routes, the fallback included; it skips API
        // and asset paths itself.
        .layer(middleware::from_fn_with_state(state.clone(), gate::site_gate))
        .with_state(state);

    base_router
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(trace_span_logger)
                        .on_response(
                            DefaultOnResponse::new()
                                .level(Level::INFO)
                                .latency_unit(tower_http::LatencyUnit::Millis),
                        ),
                )
                .layer(PropagateRequestIdLayer::new(x_request_id)),
        )
        .layer(cors)
}

/// trace_span_logger
///
/// Span for `TraceLayer` carrying the request id, so every log line of one
/// request can be correlated.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
