use axum::{
    Json,
    extract::{Path, Query, Request, State},
};
use serde::Deserialize;

use crate::{
    AppState,
    auth::{AuthUser, StaffUser},
    error::{ApiError, ErrorEnvelope},
    gate,
    locale::Locale,
    mailer::OutboundEmail,
    markdown,
    models::{
        BlogPost, ContactRequest, ContactResponse, ContentItem, ContentStats, ContentStatus,
        DetailResponse, ListResponse, NewsArticle, PageContext, StatusCounts, TagCount,
        TagsResponse,
    },
    query::{self, ContentQuery, DEFAULT_PAGE_SIZE, QueryError, SortKey},
};

/// How many items the "read next" rail shows on detail pages.
const RELATED_LIMIT: usize = 3;

// --- Query Parameters ---

/// ListParams
///
/// Query string accepted by the list endpoints. Values arrive as raw strings
/// so that malformed numbers produce the `INVALID_PARAMS` envelope rather than
/// a generic extractor rejection.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct ListParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size, 1 to 100 (default 9).
    pub limit: Option<String>,
    /// Case-insensitive text matched against both translations.
    pub search: Option<String>,
    /// Category slug, or `all`.
    pub category: Option<String>,
    pub tag: Option<String>,
    /// `latest` (default), `featured` or `reading_time`.
    pub sort: Option<String>,
    /// Only featured items when `true`.
    pub featured: Option<String>,
    /// Only urgent items when `true` (news).
    pub urgent: Option<String>,
    /// `published` or `draft`; honored on admin endpoints only.
    pub status: Option<String>,
}

/// Visibility
///
/// Public callers only ever see published items; staff may filter by status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Staff,
}

impl ListParams {
    pub fn into_query(self, visibility: Visibility) -> Result<ContentQuery, QueryError> {
        let page = parse_bounded("page", self.page.as_deref(), 1)?;
        if page < 1 {
            return Err(QueryError::PageOutOfRange(page));
        }
        let page_size = parse_bounded("limit", self.limit.as_deref(), DEFAULT_PAGE_SIZE.into())?;
        if !(1..=100).contains(&page_size) {
            return Err(QueryError::PageSizeOutOfRange(page_size));
        }

        let status = match visibility {
            Visibility::Public => Some(ContentStatus::Published),
            Visibility::Staff => match self.status.as_deref().map(str::trim) {
                None | Some("") | Some("all") => None,
                Some(value) => Some(ContentStatus::parse(value).ok_or_else(|| {
                    QueryError::Malformed {
                        field: "status",
                        value: value.to_string(),
                    }
                })?),
            },
        };

        Ok(ContentQuery {
            search: self.search,
            category: self.category.filter(|c| !c.trim().is_empty()),
            tag: self.tag.filter(|t| !t.trim().is_empty()),
            featured_only: parse_flag("featured", self.featured.as_deref())?,
            urgent_only: parse_flag("urgent", self.urgent.as_deref())?,
            status,
            sort: SortKey::parse(self.sort.as_deref().unwrap_or_default())?,
            page: page as u32,
            page_size: page_size as u32,
        })
    }
}

fn parse_bounded(field: &'static str, value: Option<&str>, default: i64) -> Result<i64, QueryError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse::<i64>().map_err(|_| QueryError::Malformed {
            field,
            value: raw.to_string(),
        }),
    }
}

fn parse_flag(field: &'static str, value: Option<&str>) -> Result<bool, QueryError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("0") => Ok(false),
        Some("true") | Some("1") => Ok(true),
        Some(other) => Err(QueryError::Malformed {
            field,
            value: other.to_string(),
        }),
    }
}

fn list_response<T: ContentItem>(items: &[T], query: &ContentQuery) -> Result<Json<ListResponse<T>>, ApiError> {
    let page = query::run_query(items, query)?;
    let pagination = page.meta();
    Ok(Json(ListResponse {
        success: true,
        data: page.items,
        pagination,
    }))
}

fn detail_response<T: ContentItem>(all: &[T], item: T) -> Json<DetailResponse<T>> {
    let related = query::related(all, &item, RELATED_LIMIT);
    Json(DetailResponse {
        success: true,
        html: markdown::render_localized(item.body()),
        data: item,
        related,
    })
}

// --- Public Content Handlers ---

/// list_blog_posts
///
/// [Public Route] Filtered, sorted, paginated published blog posts.
#[utoipa::path(
    get,
    path = "/api/blog",
    params(ListParams),
    responses(
        (status = 200, description = "One page of posts", body = [BlogPost]),
        (status = 400, description = "Invalid pagination or filter", body = ErrorEnvelope)
    )
)]
pub async fn list_blog_posts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<BlogPost>>, ApiError> {
    let query = params.into_query(Visibility::Public)?;
    let posts = state.content.blog_posts().await;
    list_response(&posts, &query)
}

/// get_blog_post
///
/// [Public Route] A published post with rendered HTML and related posts.
/// Drafts are reported as not found.
#[utoipa::path(
    get,
    path = "/api/blog/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Found", body = BlogPost),
        (status = 404, description = "Unknown or unpublished", body = ErrorEnvelope)
    )
)]
pub async fn get_blog_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DetailResponse<BlogPost>>, ApiError> {
    let post = state
        .content
        .blog_post(&slug)
        .await
        .filter(|post| post.status == ContentStatus::Published)
        .ok_or(ApiError::NotFound)?;
    let all = state.content.blog_posts().await;
    Ok(detail_response(&all, post))
}

/// list_blog_tags
///
/// [Public Route] Tag usage counts across published posts.
#[utoipa::path(
    get,
    path = "/api/blog/tags",
    responses((status = 200, description = "Tag counts", body = [TagCount]))
)]
pub async fn list_blog_tags(State(state): State<AppState>) -> Json<TagsResponse> {
    let posts = state.content.blog_posts().await;
    Json(TagsResponse {
        success: true,
        data: query::tag_counts(&posts),
    })
}

/// list_news_articles
///
/// [Public Route] Filtered, sorted, paginated published news. Supports the
/// extra `urgent` flag.
#[utoipa::path(
    get,
    path = "/api/news",
    params(ListParams),
    responses(
        (status = 200, description = "One page of articles", body = [NewsArticle]),
        (status = 400, description = "Invalid pagination or filter", body = ErrorEnvelope)
    )
)]
pub async fn list_news_articles(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<NewsArticle>>, ApiError> {
    let query = params.into_query(Visibility::Public)?;
    let articles = state.content.news_articles().await;
    list_response(&articles, &query)
}

#[utoipa::path(
    get,
    path = "/api/news/{slug}",
    params(("slug" = String, Path, description = "Article slug")),
    responses(
        (status = 200, description = "Found", body = NewsArticle),
        (status = 404, description = "Unknown or unpublished", body = ErrorEnvelope)
    )
)]
pub async fn get_news_article(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DetailResponse<NewsArticle>>, ApiError> {
    let article = state
        .content
        .news_article(&slug)
        .await
        .filter(|article| article.status == ContentStatus::Published)
        .ok_or(ApiError::NotFound)?;
    let all = state.content.news_articles().await;
    Ok(detail_response(&all, article))
}

// --- Contact ---

/// submit_contact
///
/// [Public Route] Validates an inquiry, throttles it per sender address and
/// forwards it to the team inbox. The reply message follows the form's locale.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Delivered", body = ContactResponse),
        (status = 400, description = "Invalid form", body = ErrorEnvelope),
        (status = 429, description = "Too many submissions", body = ErrorEnvelope),
        (status = 502, description = "Mail provider failure", body = ErrorEnvelope)
    )
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, ApiError> {
    payload
        .validate()
        .map_err(|reason| ApiError::Validation(reason.to_string()))?;

    let sender = payload.email.trim().to_lowercase();
    if !state.rate_limiter.check_and_record(&sender) {
        tracing::warn!(sender = %sender, "contact form rate limit hit");
        return Err(ApiError::RateLimited);
    }

    let locale = payload.locale.unwrap_or_default();
    let email = OutboundEmail {
        from: state.config.mail_from.clone(),
        to: vec![state.config.contact_recipient.clone()],
        reply_to: Some(sender),
        subject: format!(
            "{}: {}",
            state.catalog.get(Locale::DEFAULT, "contact.subject"),
            payload.name.trim()
        ),
        text: contact_body(&payload, locale),
    };
    state.mailer.send(&email).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: state.catalog.get(locale, "contact.success").to_string(),
    }))
}

fn contact_body(payload: &ContactRequest, locale: Locale) -> String {
    let optional = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("-")
            .to_string()
    };
    format!(
        "Name: {}\nEmail: {}\nCompany: {}\nPhone: {}\nInquiry type: {}\nLocale: {}\n\n{}",
        payload.name.trim(),
        payload.email.trim(),
        optional(&payload.company),
        optional(&payload.phone),
        optional(&payload.inquiry_type),
        locale,
        payload.message.trim(),
    )
}

// --- Authenticated ---

/// get_me
///
/// [Authenticated Route] The identity resolved from the session token.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current user", body = AuthUser),
        (status = 401, description = "No valid session", body = ErrorEnvelope)
    )
)]
pub async fn get_me(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}

// --- Admin ---

/// admin_list_blog_posts
///
/// [Admin Route] Blog posts of every status, with an optional `status` filter.
#[utoipa::path(
    get,
    path = "/api/admin/blog",
    params(ListParams),
    responses(
        (status = 200, description = "One page of posts", body = [BlogPost]),
        (status = 403, description = "Not staff", body = ErrorEnvelope)
    )
)]
pub async fn admin_list_blog_posts(
    StaffUser(_staff): StaffUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<BlogPost>>, ApiError> {
    let query = params.into_query(Visibility::Staff)?;
    let posts = state.content.blog_posts().await;
    list_response(&posts, &query)
}

#[utoipa::path(
    get,
    path = "/api/admin/news",
    params(ListParams),
    responses(
        (status = 200, description = "One page of articles", body = [NewsArticle]),
        (status = 403, description = "Not staff", body = ErrorEnvelope)
    )
)]
pub async fn admin_list_news_articles(
    StaffUser(_staff): StaffUser,
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse<NewsArticle>>, ApiError> {
    let query = params.into_query(Visibility::Staff)?;
    let articles = state.content.news_articles().await;
    list_response(&articles, &query)
}

/// get_content_stats
///
/// [Admin Route] Dashboard totals per content type and status.
#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Stats", body = ContentStats),
        (status = 403, description = "Not staff", body = ErrorEnvelope)
    )
)]
pub async fn get_content_stats(
    StaffUser(staff): StaffUser,
    State(state): State<AppState>,
) -> Json<ContentStats> {
    let posts = state.content.blog_posts().await;
    let articles = state.content.news_articles().await;
    tracing::debug!(user = %staff.id, "admin stats requested");

    Json(ContentStats {
        blog: status_counts(&posts),
        news: status_counts(&articles),
        featured: posts.iter().filter(|p| p.featured).count()
            + articles.iter().filter(|a| a.featured).count(),
        urgent_news: articles
            .iter()
            .filter(|a| a.urgent && a.status == ContentStatus::Published)
            .count(),
    })
}

fn status_counts<T: ContentItem>(items: &[T]) -> StatusCounts {
    items.iter().fold(StatusCounts::default(), |mut counts, item| {
        match item.status() {
            ContentStatus::Published => counts.published += 1,
            ContentStatus::Draft => counts.draft += 1,
        }
        counts
    })
}

// --- Pages ---

/// render_page
///
/// Fallback for every path no API route claims. Page paths the site gate let
/// through get their locale and the site copy for that locale; unknown API
/// and asset paths are 404.
pub async fn render_page(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<PageContext>, ApiError> {
    let path = request.uri().path();
    if !gate::is_page_path(path) {
        return Err(ApiError::NotFound);
    }

    let locale = request
        .extensions()
        .get::<Locale>()
        .copied()
        .unwrap_or_default();

    Ok(Json(PageContext {
        locale,
        path: path.to_string(),
        site_name: state.catalog.get(locale, "site.name").to_string(),
        tagline: state.catalog.get(locale, "site.tagline").to_string(),
    }))
}
