use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    dataset,
    models::{BlogPost, ContentItem, NewsArticle},
};

/// ContentRepository
///
/// Read access to the site's editorial content. Handlers only see this trait,
/// so the compiled-in dataset can be swapped for a real store without
/// touching the HTTP layer.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Every blog post, drafts included. Visibility is the caller's filter.
    async fn blog_posts(&self) -> Vec<BlogPost>;
    async fn news_articles(&self) -> Vec<NewsArticle>;
    async fn blog_post(&self, slug: &str) -> Option<BlogPost>;
    async fn news_article(&self, slug: &str) -> Option<NewsArticle>;
}

/// ContentState
///
/// The shared handle stored in `AppState`.
pub type ContentState = Arc<dyn ContentRepository>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("duplicate {kind} slug '{slug}'")]
    DuplicateSlug { kind: &'static str, slug: String },
    #[error("{kind} slug '{slug}' is not URL-safe")]
    InvalidSlug { kind: &'static str, slug: String },
    #[error("{kind} '{slug}' is missing a translation of its {field}")]
    MissingTranslation {
        kind: &'static str,
        slug: String,
        field: &'static str,
    },
}

/// StaticContentRepository
///
/// In-memory repository over data compiled into the binary. Construction
/// validates the dataset, so invariant violations stop the service at startup
/// rather than surfacing per request.
#[derive(Debug, Clone)]
pub struct StaticContentRepository {
    blog: Vec<BlogPost>,
    news: Vec<NewsArticle>,
}

impl StaticContentRepository {
    pub fn new(blog: Vec<BlogPost>, news: Vec<NewsArticle>) -> Result<Self, ContentError> {
        validate_items("blog post", &blog)?;
        validate_items("news article", &news)?;
        Ok(Self { blog, news })
    }

    /// The site's bundled editorial content.
    pub fn bundled() -> Result<Self, ContentError> {
        Self::new(dataset::blog_posts(), dataset::news_articles())
    }
}

#[async_trait]
impl ContentRepository for StaticContentRepository {
    async fn blog_posts(&self) -> Vec<BlogPost> {
        self.blog.clone()
    }

    async fn news_articles(&self) -> Vec<NewsArticle> {
        self.news.clone()
    }

    async fn blog_post(&self, slug: &str) -> Option<BlogPost> {
        self.blog.iter().find(|post| post.slug == slug).cloned()
    }

    async fn news_article(&self, slug: &str) -> Option<NewsArticle> {
        self.news.iter().find(|article| article.slug == slug).cloned()
    }
}

fn validate_items<T: ContentItem>(kind: &'static str, items: &[T]) -> Result<(), ContentError> {
    let mut seen = std::collections::HashSet::new();
    for item in items {
        let slug = item.slug();
        if !is_url_safe(slug) {
            return Err(ContentError::InvalidSlug {
                kind,
                slug: slug.to_string(),
            });
        }
        if !seen.insert(slug) {
            return Err(ContentError::DuplicateSlug {
                kind,
                slug: slug.to_string(),
            });
        }
        for (field, text) in [
            ("title", item.title()),
            ("excerpt", item.excerpt()),
            ("body", item.body()),
        ] {
            if !text.is_complete() {
                return Err(ContentError::MissingTranslation {
                    kind,
                    slug: slug.to_string(),
                    field,
                });
            }
        }
    }
    Ok(())
}

/// Lowercase ASCII letters, digits and single inner hyphens.
fn is_url_safe(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
