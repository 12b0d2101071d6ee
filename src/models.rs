use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::locale::Locale;

// --- Shared Content Building Blocks ---

/// LocalizedText
///
/// A string available in every supported locale. Both fields are required by
/// construction; the repository additionally rejects empty translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct LocalizedText {
    pub en: String,
    pub ko: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ko: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ko: ko.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ko => &self.ko,
        }
    }

    /// Applies `f` to each translation.
    pub fn map(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            en: f(&self.en),
            ko: f(&self.ko),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.en.trim().is_empty() && !self.ko.trim().is_empty()
    }
}

/// ContentStatus
///
/// Drafts are only visible through the admin API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ContentStatus {
    #[default]
    Published,
    Draft,
}

impl ContentStatus {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "published" => Some(ContentStatus::Published),
            "draft" => Some(ContentStatus::Draft),
            _ => None,
        }
    }
}

/// Category
///
/// A closed, content-type-specific category with a URL slug and a label per
/// locale. Labels take part in free-text search.
pub trait Category: Copy {
    fn slug(self) -> &'static str;
    fn label(self, locale: Locale) -> &'static str;
}

/// ContentItem
///
/// The read-side view the query layer needs from a blog post or news article.
pub trait ContentItem: Clone {
    type Category: Category;

    fn slug(&self) -> &str;
    fn title(&self) -> &LocalizedText;
    fn excerpt(&self) -> &LocalizedText;
    fn body(&self) -> &LocalizedText;
    fn category(&self) -> Self::Category;
    fn tags(&self) -> &[String];
    fn published_at(&self) -> DateTime<Utc>;
    fn is_featured(&self) -> bool;
    fn reading_minutes(&self) -> u32;
    fn status(&self) -> ContentStatus;

    /// Only news articles can be urgent.
    fn is_urgent(&self) -> bool {
        false
    }
}

// --- Blog ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum BlogCategory {
    MarketEntry,
    Regulation,
    Technology,
    Insights,
    CaseStudy,
}

impl Category for BlogCategory {
    fn slug(self) -> &'static str {
        match self {
            BlogCategory::MarketEntry => "market-entry",
            BlogCategory::Regulation => "regulation",
            BlogCategory::Technology => "technology",
            BlogCategory::Insights => "insights",
            BlogCategory::CaseStudy => "case-study",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (BlogCategory::MarketEntry, Locale::En) => "Market Entry",
            (BlogCategory::MarketEntry, Locale::Ko) => "시장 진출",
            (BlogCategory::Regulation, Locale::En) => "Regulation",
            (BlogCategory::Regulation, Locale::Ko) => "규제",
            (BlogCategory::Technology, Locale::En) => "Technology",
            (BlogCategory::Technology, Locale::Ko) => "기술",
            (BlogCategory::Insights, Locale::En) => "Insights",
            (BlogCategory::Insights, Locale::Ko) => "인사이트",
            (BlogCategory::CaseStudy, Locale::En) => "Case Study",
            (BlogCategory::CaseStudy, Locale::Ko) => "사례 연구",
        }
    }
}

/// BlogPost
///
/// A long-form article. `body` holds Markdown in both locales.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BlogPost {
    pub id: u32,
    pub slug: String,
    pub title: LocalizedText,
    pub excerpt: LocalizedText,
    pub body: LocalizedText,
    pub category: BlogCategory,
    pub tags: Vec<String>,
    pub author: String,
    #[ts(type = "string")]
    pub published_at: DateTime<Utc>,
    pub reading_minutes: u32,
    pub featured: bool,
    pub status: ContentStatus,
    pub cover_image: Option<String>,
}

impl ContentItem for BlogPost {
    type Category = BlogCategory;

    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &LocalizedText {
        &self.title
    }
    fn excerpt(&self) -> &LocalizedText {
        &self.excerpt
    }
    fn body(&self) -> &LocalizedText {
        &self.body
    }
    fn category(&self) -> BlogCategory {
        self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
    fn is_featured(&self) -> bool {
        self.featured
    }
    fn reading_minutes(&self) -> u32 {
        self.reading_minutes
    }
    fn status(&self) -> ContentStatus {
        self.status
    }
}

// --- News ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum NewsCategory {
    Announcement,
    Partnership,
    Event,
    Press,
    Industry,
}

impl Category for NewsCategory {
    fn slug(self) -> &'static str {
        match self {
            NewsCategory::Announcement => "announcement",
            NewsCategory::Partnership => "partnership",
            NewsCategory::Event => "event",
            NewsCategory::Press => "press",
            NewsCategory::Industry => "industry",
        }
    }

    fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (NewsCategory::Announcement, Locale::En) => "Announcement",
            (NewsCategory::Announcement, Locale::Ko) => "공지",
            (NewsCategory::Partnership, Locale::En) => "Partnership",
            (NewsCategory::Partnership, Locale::Ko) => "파트너십",
            (NewsCategory::Event, Locale::En) => "Event",
            (NewsCategory::Event, Locale::Ko) => "이벤트",
            (NewsCategory::Press, Locale::En) => "Press",
            (NewsCategory::Press, Locale::Ko) => "보도자료",
            (NewsCategory::Industry, Locale::En) => "Industry",
            (NewsCategory::Industry, Locale::Ko) => "업계 동향",
        }
    }
}

/// NewsArticle
///
/// A short company or industry update. Urgent articles are pinned in the UI.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewsArticle {
    pub id: u32,
    pub slug: String,
    pub title: LocalizedText,
    pub excerpt: LocalizedText,
    pub body: LocalizedText,
    pub category: NewsCategory,
    pub tags: Vec<String>,
    pub author: String,
    #[ts(type = "string")]
    pub published_at: DateTime<Utc>,
    pub reading_minutes: u32,
    pub featured: bool,
    pub urgent: bool,
    pub status: ContentStatus,
    pub source_url: Option<String>,
}

impl ContentItem for NewsArticle {
    type Category = NewsCategory;

    fn slug(&self) -> &str {
        &self.slug
    }
    fn title(&self) -> &LocalizedText {
        &self.title
    }
    fn excerpt(&self) -> &LocalizedText {
        &self.excerpt
    }
    fn body(&self) -> &LocalizedText {
        &self.body
    }
    fn category(&self) -> NewsCategory {
        self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }
    fn is_featured(&self) -> bool {
        self.featured
    }
    fn reading_minutes(&self) -> u32 {
        self.reading_minutes
    }
    fn status(&self) -> ContentStatus {
        self.status
    }
    fn is_urgent(&self) -> bool {
        self.urgent
    }
}

// --- Response Envelopes ---

/// PaginationMeta
///
/// The `pagination` block of list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// ListResponse
///
/// `{ success, data, pagination }` returned by every list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

/// DetailResponse
///
/// A single item with its Markdown body rendered to HTML per locale, and a
/// few related items for the "read next" rail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse<T> {
    pub success: bool,
    pub data: T,
    pub html: LocalizedText,
    pub related: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsResponse {
    pub success: bool,
    pub data: Vec<TagCount>,
}

/// StatusCounts
///
/// Published/draft totals for one content type on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct StatusCounts {
    pub published: usize,
    pub draft: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct ContentStats {
    pub blog: StatusCounts,
    pub news: StatusCounts,
    pub featured: usize,
    pub urgent_news: usize,
}

// --- Contact Form ---

/// ContactRequest
///
/// Payload of `POST /api/contact`.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inquiry_type: Option<String>,
    pub message: String,
    /// Locale of the form the visitor submitted; picks the reply language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<Locale>,
}

pub const NAME_MAX_CHARS: usize = 100;
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 5000;

impl ContactRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("name is required");
        }
        if name.chars().count() > NAME_MAX_CHARS {
            return Err("name is too long");
        }
        if !is_plausible_email(self.email.trim()) {
            return Err("email is invalid");
        }
        let message_len = self.message.trim().chars().count();
        if message_len < MESSAGE_MIN_CHARS {
            return Err("message is too short");
        }
        if message_len > MESSAGE_MAX_CHARS {
            return Err("message is too long");
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace; deliverability is the provider's call.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// PageContext
///
/// What the page renderer receives for a path the site gate let through.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageContext {
    pub locale: Locale,
    pub path: String,
    pub site_name: String,
    pub tagline: String,
}
