use std::collections::BTreeMap;

use crate::{
    locale::Locale,
    models::{Category, ContentItem, ContentStatus, PaginationMeta, TagCount},
};

pub const MIN_PAGE_SIZE: u32 = 1;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Category filter value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// QueryError
///
/// Out-of-range or unparsable query parameters. Always reported to the
/// caller, never clamped, so client bugs surface instead of yielding a
/// silently truncated list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("page must be at least 1 (got {0})")]
    PageOutOfRange(i64),
    #[error("limit must be between 1 and 100 (got {0})")]
    PageSizeOutOfRange(i64),
    #[error("'{value}' is not a valid {field}")]
    Malformed { field: &'static str, value: String },
}

/// SortKey
///
/// `ReadingTime` orders by reading length. It is the stand-in the site uses
/// where a popularity ranking would go, named for what it actually measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Latest,
    Featured,
    ReadingTime,
}

impl SortKey {
    pub fn parse(value: &str) -> Result<Self, QueryError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "latest" => Ok(SortKey::Latest),
            "featured" => Ok(SortKey::Featured),
            "reading_time" | "reading-time" => Ok(SortKey::ReadingTime),
            _ => Err(QueryError::Malformed {
                field: "sort",
                value: value.to_string(),
            }),
        }
    }
}

/// ContentQuery
///
/// Filter, sort and pagination inputs. All filters combine with AND.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub featured_only: bool,
    pub urgent_only: bool,
    /// `None` matches every status.
    pub status: Option<ContentStatus>,
    pub sort: SortKey,
    /// 1-based.
    pub page: u32,
    pub page_size: u32,
}

impl Default for ContentQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            tag: None,
            featured_only: false,
            urgent_only: false,
            status: Some(ContentStatus::Published),
            sort: SortKey::Latest,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ContentQuery {
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page < 1 {
            return Err(QueryError::PageOutOfRange(self.page.into()));
        }
        if !(MIN_PAGE_SIZE..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(QueryError::PageSizeOutOfRange(self.page_size.into()));
        }
        Ok(())
    }

    fn matches<T: ContentItem>(&self, item: &T, needle: Option<&str>) -> bool {
        if let Some(status) = self.status {
            if item.status() != status {
                return false;
            }
        }
        if self.featured_only && !item.is_featured() {
            return false;
        }
        if self.urgent_only && !item.is_urgent() {
            return false;
        }
        if let Some(category) = self.category.as_deref() {
            if category != ALL_CATEGORIES && item.category().slug() != category {
                return false;
            }
        }
        if let Some(tag) = self.tag.as_deref() {
            if !item.tags().iter().any(|t| t == tag) {
                return false;
            }
        }
        match needle {
            Some(needle) => matches_search(item, needle),
            None => true,
        }
    }
}

/// Paginated
///
/// One page of a filtered, sorted result.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    /// Size of the filtered set before slicing.
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> Paginated<T> {
    pub fn meta(&self) -> PaginationMeta {
        PaginationMeta {
            page: self.page,
            limit: self.page_size,
            total: self.total_count,
            total_pages: self.total_pages,
            has_next_page: self.has_next_page,
            has_prev_page: self.has_prev_page,
        }
    }
}

/// run_query
///
/// Filters `items`, sorts the survivors by `query.sort`, and returns the
/// requested page. A page past the end is an empty page, not an error.
pub fn run_query<T: ContentItem>(items: &[T], query: &ContentQuery) -> Result<Paginated<T>, QueryError> {
    query.validate()?;

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<&T> = items
        .iter()
        .filter(|item| query.matches(*item, needle.as_deref()))
        .collect();

    sort_items(&mut filtered, query.sort);

    let page_size = query.page_size as usize;
    let total_count = filtered.len();
    let total_pages = total_count.div_ceil(page_size);
    let start = (query.page as usize - 1).saturating_mul(page_size);

    let page_items = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    Ok(Paginated {
        items: page_items,
        page: query.page,
        page_size: query.page_size,
        total_count,
        total_pages,
        has_next_page: (query.page as usize) < total_pages,
        has_prev_page: query.page > 1,
    })
}

/// Stable sorts; equal keys keep input order.
fn sort_items<T: ContentItem>(items: &mut [&T], sort: SortKey) {
    items.sort_by(|a, b| b.published_at().cmp(&a.published_at()));
    match sort {
        SortKey::Latest => {}
        SortKey::Featured => items.sort_by_key(|item| !item.is_featured()),
        SortKey::ReadingTime => {
            items.sort_by(|a, b| b.reading_minutes().cmp(&a.reading_minutes()))
        }
    }
}

/// Case-insensitive substring match over title and excerpt in every locale,
/// the category slug and labels, and the tags. `needle` is already lowercased.
fn matches_search<T: ContentItem>(item: &T, needle: &str) -> bool {
    let contains = |haystack: &str| haystack.to_lowercase().contains(needle);

    Locale::ALL.iter().any(|&locale| {
        contains(item.title().get(locale))
            || contains(item.excerpt().get(locale))
            || contains(item.category().label(locale))
    }) || contains(item.category().slug())
        || item.tags().iter().any(|tag| contains(tag))
}

/// related
///
/// Published items sharing the category or at least one tag with `item`,
/// newest first, excluding `item` itself.
pub fn related<T: ContentItem>(items: &[T], item: &T, limit: usize) -> Vec<T> {
    let mut candidates: Vec<&T> = items
        .iter()
        .filter(|other| other.slug() != item.slug())
        .filter(|other| other.status() == ContentStatus::Published)
        .filter(|other| {
            other.category().slug() == item.category().slug()
                || other.tags().iter().any(|tag| item.tags().contains(tag))
        })
        .collect();
    sort_items(&mut candidates, SortKey::Latest);
    candidates.into_iter().take(limit).cloned().collect()
}

/// Counts tag usage across published items, most used first, then by name.
pub fn tag_counts<T: ContentItem>(items: &[T]) -> Vec<TagCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items.iter().filter(|i| i.status() == ContentStatus::Published) {
        for tag in item.tags() {
            *counts.entry(tag.as_str()).or_default() += 1;
        }
    }

    let mut tags: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count));
    tags
}
