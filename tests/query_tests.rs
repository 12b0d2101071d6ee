use chrono::{Duration, TimeZone, Utc};
use site_gateway::{
    Locale,
    models::{BlogCategory, BlogPost, ContentStatus, LocalizedText, NewsArticle, NewsCategory},
    query::{ContentQuery, QueryError, SortKey, related, run_query, tag_counts},
};

// --- Fixtures ---

/// Post `id` is published `id` days after the epoch of the fixture, so a
/// higher id is always newer.
fn post(id: u32) -> BlogPost {
    let base = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
    BlogPost {
        id,
        slug: format!("post-{}", id),
        title: LocalizedText::new(format!("Post number {}", id), format!("게시물 {}", id)),
        excerpt: LocalizedText::new("An excerpt", "요약"),
        body: LocalizedText::new("Body", "본문"),
        category: BlogCategory::Insights,
        tags: vec![],
        author: "Test Author".to_string(),
        published_at: base + Duration::days(id as i64),
        reading_minutes: 5,
        featured: false,
        status: ContentStatus::Published,
        cover_image: None,
    }
}

fn posts(count: u32) -> Vec<BlogPost> {
    (1..=count).map(post).collect()
}

fn query(page: u32, page_size: u32) -> ContentQuery {
    ContentQuery {
        page,
        page_size,
        ..ContentQuery::default()
    }
}

fn ids(items: &[BlogPost]) -> Vec<u32> {
    items.iter().map(|p| p.id).collect()
}

// --- Pagination ---

#[test]
fn test_second_page_of_twenty_five() {
    let items = posts(25);
    let q = ContentQuery {
        search: Some(String::new()),
        category: Some("all".to_string()),
        sort: SortKey::Latest,
        ..query(2, 9)
    };

    let page = run_query(&items, &q).unwrap();

    // Positions 10..=18 of the newest-first ordering.
    assert_eq!(ids(&page.items), (8..=16).rev().collect::<Vec<_>>());
    assert_eq!(page.total_count, 25);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_next_page);
    assert!(page.has_prev_page);
}

#[test]
fn test_page_past_the_end_is_empty() {
    let page = run_query(&posts(5), &query(2, 9)).unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total_pages, 1);
    assert!(!page.has_next_page);
    assert!(page.has_prev_page);
}

#[test]
fn test_page_item_count_formula() {
    for total in [0u32, 1, 8, 9, 10, 25] {
        let items = posts(total);
        for page_size in [1u32, 3, 9, 100] {
            for page in 1u32..=5 {
                let result = run_query(&items, &query(page, page_size)).unwrap();
                let expected = (total as i64 - (page as i64 - 1) * page_size as i64)
                    .max(0)
                    .min(page_size as i64) as usize;
                assert_eq!(
                    result.items.len(),
                    expected,
                    "total={} page={} size={}",
                    total,
                    page,
                    page_size
                );
                if page as usize > result.total_pages {
                    assert!(!result.has_next_page);
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_parameters_are_errors() {
    let items = posts(3);
    assert_eq!(
        run_query(&items, &query(1, 0)).unwrap_err(),
        QueryError::PageSizeOutOfRange(0)
    );
    assert_eq!(
        run_query(&items, &query(1, 101)).unwrap_err(),
        QueryError::PageSizeOutOfRange(101)
    );
    assert_eq!(
        run_query(&items, &query(0, 9)).unwrap_err(),
        QueryError::PageOutOfRange(0)
    );
    assert!(run_query(&items, &query(1, 100)).is_ok());
}

#[test]
fn test_meta_mirrors_page() {
    let page = run_query(&posts(10), &query(1, 4)).unwrap();
    let meta = page.meta();
    assert_eq!(meta.page, 1);
    assert_eq!(meta.limit, 4);
    assert_eq!(meta.total, 10);
    assert_eq!(meta.total_pages, 3);
    assert!(meta.has_next_page);
    assert!(!meta.has_prev_page);
}

// --- Filtering ---

#[test]
fn test_search_matches_either_locale() {
    let mut items = posts(3);
    items[1].title = LocalizedText::new("Korean Market Entry", "한국 시장 진출 가이드");

    for needle in ["market entry", "MARKET", "시장 진출", "진출 가이드"] {
        let q = ContentQuery {
            search: Some(needle.to_string()),
            ..ContentQuery::default()
        };
        let page = run_query(&items, &q).unwrap();
        assert_eq!(ids(&page.items), vec![2], "needle: {}", needle);
    }
}

#[test]
fn test_search_finds_exact_title_substring_in_every_locale() {
    let items = posts(12);
    for item in &items {
        for locale in Locale::ALL {
            let title = item.title.get(locale);
            let needle: String = title.chars().skip(1).take(4).collect();
            let q = ContentQuery {
                search: Some(needle.clone()),
                page_size: 100,
                ..ContentQuery::default()
            };
            let page = run_query(&items, &q).unwrap();
            assert!(
                page.items.iter().any(|p| p.id == item.id),
                "'{}' should find post {}",
                needle,
                item.id
            );
        }
    }
}

#[test]
fn test_search_covers_tags_and_category_labels() {
    let mut items = posts(3);
    items[0].tags = vec!["defi".to_string()];
    items[2].category = BlogCategory::Regulation;

    let by_tag = ContentQuery {
        search: Some("DeFi".to_string()),
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &by_tag).unwrap().items), vec![1]);

    let by_label = ContentQuery {
        search: Some("규제".to_string()),
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &by_label).unwrap().items), vec![3]);
}

#[test]
fn test_blank_search_is_no_filter() {
    let q = ContentQuery {
        search: Some("   ".to_string()),
        ..ContentQuery::default()
    };
    assert_eq!(run_query(&posts(4), &q).unwrap().total_count, 4);
}

#[test]
fn test_category_and_tag_filters_combine() {
    let mut items = posts(4);
    items[0].category = BlogCategory::Regulation;
    items[0].tags = vec!["vasp".to_string()];
    items[1].category = BlogCategory::Regulation;
    items[2].tags = vec!["vasp".to_string()];

    let q = ContentQuery {
        category: Some("regulation".to_string()),
        tag: Some("vasp".to_string()),
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &q).unwrap().items), vec![1]);

    let unknown = ContentQuery {
        category: Some("gossip".to_string()),
        ..ContentQuery::default()
    };
    assert_eq!(run_query(&items, &unknown).unwrap().total_count, 0);
}

#[test]
fn test_drafts_hidden_by_default() {
    let mut items = posts(3);
    items[2].status = ContentStatus::Draft;

    assert_eq!(
        ids(&run_query(&items, &ContentQuery::default()).unwrap().items),
        vec![2, 1]
    );

    let every_status = ContentQuery {
        status: None,
        ..ContentQuery::default()
    };
    assert_eq!(run_query(&items, &every_status).unwrap().total_count, 3);

    let drafts = ContentQuery {
        status: Some(ContentStatus::Draft),
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &drafts).unwrap().items), vec![3]);
}

#[test]
fn test_urgent_only_applies_to_news() {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap();
    let article = |id: u32, urgent: bool| NewsArticle {
        id,
        slug: format!("news-{}", id),
        title: LocalizedText::new("News", "뉴스"),
        excerpt: LocalizedText::new("Excerpt", "요약"),
        body: LocalizedText::new("Body", "본문"),
        category: NewsCategory::Announcement,
        tags: vec![],
        author: "Newsroom".to_string(),
        published_at: base + Duration::days(id as i64),
        reading_minutes: 2,
        featured: false,
        urgent,
        status: ContentStatus::Published,
        source_url: None,
    };
    let items = vec![article(1, false), article(2, true), article(3, false)];

    let q = ContentQuery {
        urgent_only: true,
        ..ContentQuery::default()
    };
    let page = run_query(&items, &q).unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].id, 2);

    // Blog posts are never urgent.
    assert_eq!(run_query(&posts(3), &q).unwrap().total_count, 0);
}

// --- Sorting ---

#[test]
fn test_featured_sort_puts_featured_first_then_latest() {
    let mut items = posts(5);
    items[0].featured = true;
    items[2].featured = true;

    let q = ContentQuery {
        sort: SortKey::Featured,
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &q).unwrap().items), vec![3, 1, 5, 4, 2]);
}

#[test]
fn test_equal_timestamps_keep_input_order() {
    let mut items = posts(6);
    let shared = items[0].published_at;
    // Ids 1, 4, 2, 6 end up sharing the oldest timestamp.
    items.swap(1, 3);
    for id in [2, 4, 6] {
        items.iter_mut().find(|p| p.id == id).unwrap().published_at = shared;
    }
    // Input order is now 1, 4, 3, 2, 5, 6.
    assert_eq!(ids(&items), vec![1, 4, 3, 2, 5, 6]);

    let latest = run_query(&items, &ContentQuery::default()).unwrap();
    assert_eq!(ids(&latest.items), vec![5, 3, 1, 4, 2, 6]);

    for id in [4, 6, 5] {
        items.iter_mut().find(|p| p.id == id).unwrap().featured = true;
    }
    let featured = ContentQuery {
        sort: SortKey::Featured,
        ..ContentQuery::default()
    };
    // Featured group: 5, then tied 4, 6. Rest: 3, then tied 1, 2.
    assert_eq!(
        ids(&run_query(&items, &featured).unwrap().items),
        vec![5, 4, 6, 3, 1, 2]
    );
}

#[test]
fn test_featured_only_filter() {
    let mut items = posts(5);
    items[1].featured = true;
    let q = ContentQuery {
        featured_only: true,
        ..ContentQuery::default()
    };
    assert_eq!(ids(&run_query(&items, &q).unwrap().items), vec![2]);
}

#[test]
fn test_reading_time_sort_is_longest_first_and_stable() {
    let mut items = posts(4);
    items[0].reading_minutes = 12;
    items[1].reading_minutes = 3;
    items[2].reading_minutes = 12;
    items[3].reading_minutes = 7;

    let q = ContentQuery {
        sort: SortKey::ReadingTime,
        ..ContentQuery::default()
    };
    // Equal lengths keep newest-first order.
    assert_eq!(ids(&run_query(&items, &q).unwrap().items), vec![3, 1, 4, 2]);
}

#[test]
fn test_sort_key_parsing() {
    assert_eq!(SortKey::parse("").unwrap(), SortKey::Latest);
    assert_eq!(SortKey::parse("Featured").unwrap(), SortKey::Featured);
    assert_eq!(SortKey::parse("reading-time").unwrap(), SortKey::ReadingTime);
    assert!(matches!(
        SortKey::parse("popular"),
        Err(QueryError::Malformed { field: "sort", .. })
    ));
}

// --- Related & Tags ---

#[test]
fn test_related_shares_category_or_tag() {
    let mut items = posts(5);
    for item in items.iter_mut() {
        item.category = BlogCategory::Technology;
    }
    items[0].category = BlogCategory::Regulation;
    items[0].tags = vec!["zk".to_string()];
    items[1].category = BlogCategory::Insights;
    items[1].tags = vec!["zk".to_string()];
    items[2].category = BlogCategory::Regulation;
    items[3].category = BlogCategory::Regulation;
    items[3].status = ContentStatus::Draft;

    let result = related(&items, &items[0], 3);
    // Newest first; self and drafts excluded; post 5 shares nothing.
    assert_eq!(ids(&result), vec![3, 2]);
}

#[test]
fn test_tag_counts_ignore_drafts() {
    let mut items = posts(3);
    items[0].tags = vec!["korea".to_string(), "defi".to_string()];
    items[1].tags = vec!["korea".to_string()];
    items[2].tags = vec!["korea".to_string(), "nft".to_string()];
    items[2].status = ContentStatus::Draft;

    let counts = tag_counts(&items);
    assert_eq!(counts.len(), 2);
    assert_eq!((counts[0].tag.as_str(), counts[0].count), ("korea", 2));
    assert_eq!((counts[1].tag.as_str(), counts[1].count), ("defi", 1));
}
