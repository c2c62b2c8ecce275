//! End-to-end tests for the public JSON API.
//!
//! The real router and services run against in-memory repositories, so the
//! envelope, status mapping, locale fallback and partition behavior are
//! exercised without a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value as JsonValue;
use time::{Date, Duration, OffsetDateTime};
use tower::ServiceExt;
use uuid::Uuid;

use akademi::application::content::ContentService;
use akademi::application::events::EventService;
use akademi::application::repos::{
    CategoriesRepo, ContentPagesRepo, EventWindow, EventsRepo, FaqsRepo, HeroesRepo, PostsRepo,
    RepoError, SettingsRepo, SortDirection, UpsertSettingsParams,
};
use akademi::cache::{CacheConfig, ContentCache};
use akademi::domain::entities::{
    CategoryRecord, ContentPageRecord, FaqRecord, HeroRecord, PostRecord, SiteSettingsRecord,
};
use akademi::domain::locale::Locale;
use akademi::domain::types::{PostStatus, PostType};
use akademi::infra::http::{ApiState, build_router};
use akademi::util::timezone::today_in;

const ZONE: chrono_tz::Tz = chrono_tz::Europe::Istanbul;

fn post(slug: &str, post_type: PostType, locale: Locale, status: PostStatus) -> PostRecord {
    let now = OffsetDateTime::now_utc();
    PostRecord {
        id: Uuid::new_v4(),
        post_type,
        slug: slug.to_string(),
        title: slug.replace('-', " "),
        excerpt: String::new(),
        content_html: String::new(),
        content_raw: None,
        featured_image: None,
        seo_title: None,
        seo_description: None,
        og_image: None,
        youtube_url: None,
        audio_url: None,
        event_date: None,
        event_time: None,
        location: None,
        meta: None,
        status,
        locale,
        category: None,
        created_at: now,
        updated_at: now,
        published_at: (status == PostStatus::Published).then_some(now),
    }
}

fn event(slug: &str, event_date: Option<Date>) -> PostRecord {
    let mut record = post(slug, PostType::Event, Locale::Tr, PostStatus::Published);
    record.event_date = event_date;
    record
}

fn classify(event_date: Option<Date>, today: Date) -> EventWindow {
    match event_date {
        None => EventWindow::Undated,
        Some(date) if date >= today => EventWindow::Upcoming,
        Some(_) => EventWindow::Past,
    }
}

#[derive(Default)]
struct MemoryRepos {
    posts: Vec<PostRecord>,
    settings: Vec<SiteSettingsRecord>,
    fail_settings: bool,
}

impl MemoryRepos {
    fn published(&self) -> impl Iterator<Item = &PostRecord> {
        self.posts
            .iter()
            .filter(|post| post.status == PostStatus::Published)
    }
}

#[async_trait]
impl PostsRepo for MemoryRepos {
    async fn list_published(
        &self,
        post_type: PostType,
        locale: Locale,
        limit: Option<u32>,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut posts: Vec<PostRecord> = self
            .published()
            .filter(|post| post.post_type == post_type && post.locale == locale)
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        if let Some(limit) = limit {
            posts.truncate(limit as usize);
        }
        Ok(posts)
    }

    async fn find_published(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<PostRecord>, RepoError> {
        Ok(self
            .published()
            .find(|post| {
                post.post_type == post_type && post.slug == slug && post.locale == locale
            })
            .cloned())
    }

    async fn list_related(
        &self,
        post_type: PostType,
        locale: Locale,
        exclude: Uuid,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut related: Vec<PostRecord> = self
            .published()
            .filter(|post| {
                post.post_type == post_type && post.locale == locale && post.id != exclude
            })
            .cloned()
            .collect();
        related.truncate(limit as usize);
        Ok(related)
    }

    async fn search_published(
        &self,
        locale: Locale,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let needle = query.to_lowercase();
        let mut hits: Vec<PostRecord> = self
            .published()
            .filter(|post| {
                post.locale == locale
                    && (post.title.to_lowercase().contains(&needle)
                        || post.excerpt.to_lowercase().contains(&needle)
                        || post.content_html.to_lowercase().contains(&needle))
            })
            .cloned()
            .collect();
        hits.truncate(limit as usize);
        Ok(hits)
    }
}

#[async_trait]
impl EventsRepo for MemoryRepos {
    async fn list_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
        direction: SortDirection,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut events: Vec<PostRecord> = self
            .published()
            .filter(|post| {
                post.post_type == PostType::Event
                    && post.locale == locale
                    && classify(post.event_date, today) == window
            })
            .cloned()
            .collect();
        events.sort_by(|a, b| match direction {
            SortDirection::Asc => a.event_date.cmp(&b.event_date),
            SortDirection::Desc => b.event_date.cmp(&a.event_date),
        });
        Ok(events
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
    ) -> Result<u64, RepoError> {
        Ok(self
            .published()
            .filter(|post| {
                post.post_type == PostType::Event
                    && post.locale == locale
                    && classify(post.event_date, today) == window
            })
            .count() as u64)
    }
}

#[async_trait]
impl CategoriesRepo for MemoryRepos {
    async fn list_categories(
        &self,
        _post_type: Option<PostType>,
        _locale: Locale,
    ) -> Result<Vec<CategoryRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_by_slug(
        &self,
        _slug: &str,
        _post_type: PostType,
        _locale: Locale,
    ) -> Result<Option<CategoryRecord>, RepoError> {
        Ok(None)
    }
}

#[async_trait]
impl SettingsRepo for MemoryRepos {
    async fn find_settings(&self, locale: Locale) -> Result<Option<SiteSettingsRecord>, RepoError> {
        if self.fail_settings {
            return Err(RepoError::Timeout);
        }
        Ok(self
            .settings
            .iter()
            .find(|settings| settings.locale == locale)
            .cloned())
    }

    async fn upsert_settings(&self, _params: UpsertSettingsParams) -> Result<(), RepoError> {
        Ok(())
    }
}

#[async_trait]
impl HeroesRepo for MemoryRepos {
    async fn list_heroes(&self, _locale: Locale) -> Result<Vec<HeroRecord>, RepoError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl FaqsRepo for MemoryRepos {
    async fn list_faqs(&self, _locale: Locale) -> Result<Vec<FaqRecord>, RepoError> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl ContentPagesRepo for MemoryRepos {
    async fn list_published_pages(&self) -> Result<Vec<ContentPageRecord>, RepoError> {
        Ok(Vec::new())
    }

    async fn find_published_page(
        &self,
        _slug: &str,
    ) -> Result<Option<ContentPageRecord>, RepoError> {
        Ok(None)
    }
}

fn router_for(repos: MemoryRepos) -> Router {
    let repos = Arc::new(repos);
    let cache = Arc::new(ContentCache::new(CacheConfig::default()));
    let content = Arc::new(ContentService::new(
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
        repos.clone(),
        cache.clone(),
    ));
    let events = Arc::new(EventService::new(repos, cache, ZONE, 12));
    build_router(ApiState { content, events })
}

async fn get(router: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn healthz_responds_ok() {
    let router = router_for(MemoryRepos::default());
    let (status, body) = get(&router, "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn post_listing_is_scoped_to_published_type_and_locale() {
    let router = router_for(MemoryRepos {
        posts: vec![
            post("yayinda", PostType::Blog, Locale::Tr, PostStatus::Published),
            post("taslak", PostType::Blog, Locale::Tr, PostStatus::Draft),
            post("ingilizce", PostType::Blog, Locale::En, PostStatus::Published),
            post("hizmet", PostType::Service, Locale::Tr, PostStatus::Published),
        ],
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/posts?locale=tr").await;
    assert_eq!(status, StatusCode::OK);
    let items = body["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["slug"], "yayinda");
}

#[tokio::test]
async fn unknown_locale_falls_back_to_the_default() {
    let router = router_for(MemoryRepos {
        posts: vec![post(
            "yayinda",
            PostType::Blog,
            Locale::Tr,
            PostStatus::Published,
        )],
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/posts?locale=xx").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_detail_is_a_not_found_envelope() {
    let router = router_for(MemoryRepos::default());
    let (status, body) = get(&router, "/api/v1/posts/tr/yok").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn detail_carries_related_posts_of_the_same_type() {
    let router = router_for(MemoryRepos {
        posts: vec![
            post("ana", PostType::Blog, Locale::Tr, PostStatus::Published),
            post("komsu", PostType::Blog, Locale::Tr, PostStatus::Published),
            post("video", PostType::Video, Locale::Tr, PostStatus::Published),
        ],
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/posts/tr/ana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["post"]["slug"], "ana");
    let related = body["data"]["related"].as_array().unwrap();
    assert_eq!(related.len(), 1);
    assert_eq!(related[0]["slug"], "komsu");
}

#[tokio::test]
async fn settings_fall_back_to_defaults_for_an_unseeded_locale() {
    let router = router_for(MemoryRepos::default());
    let (status, body) = get(&router, "/api/v1/settings?locale=ar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["site_name"], "TARF Akademi");
    assert_eq!(body["data"]["contact_email"], "iletisim@tarf.org");
}

#[tokio::test]
async fn settings_survive_a_failing_repository() {
    let router = router_for(MemoryRepos {
        fail_settings: true,
        ..MemoryRepos::default()
    });
    let (status, body) = get(&router, "/api/v1/settings?locale=tr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["site_name"], "TARF Akademi");
}

#[tokio::test]
async fn event_windows_split_yesterday_and_tomorrow() {
    let today = today_in(ZONE);
    let router = router_for(MemoryRepos {
        posts: vec![
            event("dun", today.previous_day()),
            event("yarin", today.next_day()),
        ],
        ..MemoryRepos::default()
    });

    let (_, upcoming) = get(&router, "/api/v1/events/upcoming?locale=tr").await;
    let upcoming_items = upcoming["data"]["items"].as_array().unwrap();
    assert_eq!(upcoming_items.len(), 1);
    assert_eq!(upcoming_items[0]["slug"], "yarin");

    let (_, past) = get(&router, "/api/v1/events/past?locale=tr").await;
    let past_items = past["data"]["items"].as_array().unwrap();
    assert_eq!(past_items.len(), 1);
    assert_eq!(past_items[0]["slug"], "dun");

    let (_, undated) = get(&router, "/api/v1/events/undated?locale=tr").await;
    assert_eq!(undated["data"]["total"], 0);
}

#[tokio::test]
async fn past_events_clamp_to_the_last_real_page() {
    let today = today_in(ZONE);
    let posts = (0..2)
        .map(|i| event(&format!("gecmis-{i}"), Some(today - Duration::days(i + 1))))
        .collect();
    let router = router_for(MemoryRepos {
        posts,
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/events/past?locale=tr&page=999&per_page=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["total_pages"], 2);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_finds_published_posts_and_skips_drafts() {
    let mut published = post(
        "yapay-zeka-ve-gelecek",
        PostType::Blog,
        Locale::Tr,
        PostStatus::Published,
    );
    published.title = "Yapay Zeka ve Gelecek".to_string();
    let mut draft = post(
        "yapay-zeka-taslak",
        PostType::Blog,
        Locale::Tr,
        PostStatus::Draft,
    );
    draft.title = "Yapay Zeka Taslağı".to_string();

    let router = router_for(MemoryRepos {
        posts: vec![published, draft],
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/search?q=yapay%20zeka&locale=tr").await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["slug"], "yapay-zeka-ve-gelecek");
}

#[tokio::test]
async fn home_aggregates_sections_with_settings() {
    let today = today_in(ZONE);
    let router = router_for(MemoryRepos {
        posts: vec![
            post("yazi", PostType::Blog, Locale::Tr, PostStatus::Published),
            event("yarin", today.next_day()),
            post("hizmet", PostType::Service, Locale::Tr, PostStatus::Published),
        ],
        ..MemoryRepos::default()
    });

    let (status, body) = get(&router, "/api/v1/home?locale=tr").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["blog_posts"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["events"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["services"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["settings"]["site_name"], "TARF Akademi");
}
