//! Content Access Layer: typed, cached, locale-aware reads.
//!
//! Callers get plain view models; persistence types never cross this
//! boundary. Dates are ISO-8601 strings, the metadata bag is reduced to the
//! validated `gallery` field, and every read is wrapped in the tag-keyed
//! cache. Non-critical reads (settings, heroes, FAQs, categories) degrade to
//! defaults or empty lists instead of failing; primary list and detail reads
//! propagate their errors.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::format_description::well_known::Rfc3339;
use tracing::warn;
use uuid::Uuid;

use crate::application::error::ContentError;
use crate::application::repos::{
    CategoriesRepo, ContentPagesRepo, FaqsRepo, HeroesRepo, PostsRepo, SettingsRepo,
};
use crate::cache::{CacheKey, CacheTag, ContentCache};
use crate::domain::entities::{
    ContentPageRecord, FaqRecord, HeroRecord, PostRecord, SiteSettingsRecord,
};
use crate::domain::locale::Locale;
use crate::domain::pages::ContentPageDefinition;
use crate::domain::posts::{PostVariant, format_event_date, gallery_from_meta};
use crate::domain::types::{PageCategory, PostType};

pub const RELATED_LIMIT: u32 = 3;
pub const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryView {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub post_type: PostType,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_raw: Option<String>,
    pub featured_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gallery: Option<Vec<String>>,
    pub category: Option<CategoryView>,
    pub locale: Locale,
    pub created_at: String,
    pub updated_at: String,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDetailView {
    pub post: PostView,
    pub related: Vec<PostView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsView {
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_map_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_content: Option<JsonValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroSlide {
    pub title: String,
    pub subtitle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroVideo {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroView {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub slides: Vec<HeroSlide>,
    pub button_text: String,
    pub button_url: String,
    pub background_image: Option<String>,
    pub videos: Vec<HeroVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqView {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPageView {
    pub slug: String,
    pub category: PageCategory,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    pub definition: ContentPageDefinition,
}

/// Hard-coded settings returned when the locale row is absent or unreadable.
pub fn default_settings() -> SettingsView {
    SettingsView {
        site_name: "TARF Akademi".to_string(),
        site_description:
            "Bilim, teknoloji ve irfanı bir araya getiren çok katmanlı eğitim ve üretim ekosistemi."
                .to_string(),
        contact_email: "iletisim@tarf.org".to_string(),
        contact_phone: "+90 212 000 00 00".to_string(),
        contact_address: "İstanbul, Türkiye".to_string(),
        contact_map_url: None,
        contact_content: None,
    }
}

fn format_timestamp(timestamp: time::OffsetDateTime) -> String {
    timestamp
        .format(&Rfc3339)
        .unwrap_or_else(|_| timestamp.to_string())
}

pub(crate) fn map_post(record: PostRecord) -> PostView {
    let gallery = gallery_from_meta(record.meta.as_ref());
    // Event fields surface only on the event variant; stray values on other
    // rows are dropped here.
    let (event_date, event_time, location) = match record.variant() {
        PostVariant::Event {
            date,
            time,
            location,
        } => (
            date.map(format_event_date),
            time.map(str::to_string),
            location.map(str::to_string),
        ),
        _ => (None, None, None),
    };
    PostView {
        id: record.id,
        post_type: record.post_type,
        slug: record.slug,
        title: record.title,
        excerpt: record.excerpt,
        content: record.content_html,
        content_raw: record.content_raw,
        featured_image: record.featured_image,
        seo_title: record.seo_title,
        seo_description: record.seo_description,
        og_image: record.og_image,
        youtube_url: record.youtube_url,
        audio_url: record.audio_url,
        event_date,
        event_time,
        location,
        gallery,
        category: record.category.map(|category| CategoryView {
            id: category.id,
            slug: category.slug,
            name: category.name,
        }),
        locale: record.locale,
        created_at: format_timestamp(record.created_at),
        updated_at: format_timestamp(record.updated_at),
        published_at: record.published_at.map(format_timestamp),
    }
}

fn map_settings(record: SiteSettingsRecord) -> SettingsView {
    SettingsView {
        site_name: record.site_name,
        site_description: record.site_description,
        contact_email: record.contact_email,
        contact_phone: record.contact_phone,
        contact_address: record.contact_address,
        contact_map_url: record.contact_map_url,
        contact_content: record.contact_content,
    }
}

fn map_hero(record: HeroRecord) -> HeroView {
    // Slides and videos are free-form JSON on the row; malformed lists are
    // dropped rather than failing the read, matching the gallery rule.
    let slides = record
        .slides
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();
    let videos: Vec<HeroVideo> = record
        .videos
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or_default();
    HeroView {
        id: record.id,
        title: record.title,
        subtitle: record.subtitle,
        description: record.description,
        slides,
        button_text: record.button_text,
        button_url: record.button_url,
        background_image: record.background_image,
        videos,
    }
}

fn map_faq(record: FaqRecord) -> FaqView {
    FaqView {
        id: record.id,
        question: record.question,
        answer: record.answer,
        order: record.sort_order,
    }
}

fn map_content_page(record: ContentPageRecord) -> Option<ContentPageView> {
    let definition: ContentPageDefinition = match serde_json::from_value(record.data) {
        Ok(definition) => definition,
        Err(error) => {
            warn!(slug = %record.slug, error = %error, "stored content page definition is malformed");
            return None;
        }
    };
    Some(ContentPageView {
        slug: record.slug,
        category: record.category,
        title: record.title,
        seo_title: record.seo_title,
        seo_description: record.seo_description,
        definition,
    })
}

#[derive(Clone)]
pub struct ContentService {
    posts: Arc<dyn PostsRepo>,
    categories: Arc<dyn CategoriesRepo>,
    settings: Arc<dyn SettingsRepo>,
    heroes: Arc<dyn HeroesRepo>,
    faqs: Arc<dyn FaqsRepo>,
    pages: Arc<dyn ContentPagesRepo>,
    cache: Arc<ContentCache>,
}

impl ContentService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        categories: Arc<dyn CategoriesRepo>,
        settings: Arc<dyn SettingsRepo>,
        heroes: Arc<dyn HeroesRepo>,
        faqs: Arc<dyn FaqsRepo>,
        pages: Arc<dyn ContentPagesRepo>,
        cache: Arc<ContentCache>,
    ) -> Self {
        Self {
            posts,
            categories,
            settings,
            heroes,
            faqs,
            pages,
            cache,
        }
    }

    /// Serve from cache or populate it from `load`. Only successful results
    /// are cached, so an absent detail row is re-checked on every request.
    async fn cached<T, F, Fut>(
        &self,
        key: CacheKey,
        tags: Vec<CacheTag>,
        load: F,
    ) -> Result<T, ContentError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ContentError>>,
    {
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let value = load().await?;
        self.cache.put(key, tags, &value);
        Ok(value)
    }

    pub async fn posts_by_type(
        &self,
        post_type: PostType,
        locale: Locale,
        limit: Option<u32>,
    ) -> Result<Vec<PostView>, ContentError> {
        let key = CacheKey::PostList {
            post_type,
            locale,
            limit,
        };
        self.cached(key, vec![CacheTag::Posts { post_type, locale }], || async {
            let records = self.posts.list_published(post_type, locale, limit).await?;
            Ok(records.into_iter().map(map_post).collect())
        })
        .await
    }

    pub async fn post_detail(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<PostDetailView, ContentError> {
        let key = CacheKey::PostDetail {
            post_type,
            locale,
            slug: slug.to_string(),
        };
        let tags = vec![
            CacheTag::Posts { post_type, locale },
            CacheTag::Post {
                post_type,
                locale,
                slug: slug.to_string(),
            },
        ];
        self.cached(key, tags, || async {
            let record = self
                .posts
                .find_published(post_type, slug, locale)
                .await?
                .ok_or(ContentError::NotFound)?;
            let related = self
                .posts
                .list_related(post_type, locale, record.id, RELATED_LIMIT)
                .await?;
            Ok(PostDetailView {
                post: map_post(record),
                related: related.into_iter().map(map_post).collect(),
            })
        })
        .await
    }

    /// Settings are best-effort: a missing row or a failing repository both
    /// yield the hard-coded defaults, never an error.
    pub async fn settings(&self, locale: Locale) -> SettingsView {
        let key = CacheKey::Settings { locale };
        let loaded = self
            .cached(key, vec![CacheTag::Settings { locale }], || async {
                let record = self.settings.find_settings(locale).await?;
                Ok(record.map(map_settings))
            })
            .await;
        match loaded {
            Ok(Some(view)) => view,
            Ok(None) => default_settings(),
            Err(error) => {
                warn!(%locale, error = %error, "settings read failed; serving defaults");
                default_settings()
            }
        }
    }

    pub async fn heroes(&self, locale: Locale) -> Vec<HeroView> {
        let key = CacheKey::Heroes { locale };
        let loaded = self
            .cached(key, vec![CacheTag::Heroes { locale }], || async {
                let records = self.heroes.list_heroes(locale).await?;
                Ok(records.into_iter().map(map_hero).collect::<Vec<_>>())
            })
            .await;
        loaded.unwrap_or_else(|error| {
            warn!(%locale, error = %error, "heroes read failed; serving empty list");
            Vec::new()
        })
    }

    pub async fn faqs(&self, locale: Locale) -> Vec<FaqView> {
        let key = CacheKey::Faqs { locale };
        let loaded = self
            .cached(key, vec![CacheTag::Faqs { locale }], || async {
                let records = self.faqs.list_faqs(locale).await?;
                Ok(records.into_iter().map(map_faq).collect::<Vec<_>>())
            })
            .await;
        loaded.unwrap_or_else(|error| {
            warn!(%locale, error = %error, "faqs read failed; serving empty list");
            Vec::new()
        })
    }

    pub async fn categories(
        &self,
        post_type: Option<PostType>,
        locale: Locale,
    ) -> Vec<CategoryView> {
        let key = CacheKey::Categories { post_type, locale };
        let loaded = self
            .cached(key, vec![CacheTag::Categories { locale }], || async {
                let records = self.categories.list_categories(post_type, locale).await?;
                Ok(records
                    .into_iter()
                    .map(|record| CategoryView {
                        id: record.id,
                        slug: record.slug,
                        name: record.name,
                    })
                    .collect::<Vec<_>>())
            })
            .await;
        loaded.unwrap_or_else(|error| {
            warn!(%locale, error = %error, "categories read failed; serving empty list");
            Vec::new()
        })
    }

    pub async fn search(&self, query: &str, locale: Locale) -> Result<Vec<PostView>, ContentError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let key = CacheKey::Search {
            locale,
            query: query.to_string(),
        };
        // A search spans every post type, so any type's list tag drops it.
        let tags = PostType::ALL
            .into_iter()
            .map(|post_type| CacheTag::Posts { post_type, locale })
            .collect();
        self.cached(key, tags, || async {
            let records = self
                .posts
                .search_published(locale, query, SEARCH_LIMIT)
                .await?;
            Ok(records.into_iter().map(map_post).collect())
        })
        .await
    }

    pub async fn pages(&self) -> Result<Vec<ContentPageView>, ContentError> {
        self.cached(CacheKey::ContentPages, vec![CacheTag::ContentPages], || async {
            let records = self.pages.list_published_pages().await?;
            Ok(records
                .into_iter()
                .filter_map(map_content_page)
                .collect::<Vec<_>>())
        })
        .await
    }

    pub async fn page_detail(&self, slug: &str) -> Result<ContentPageView, ContentError> {
        let key = CacheKey::ContentPage {
            slug: slug.to_string(),
        };
        let tags = vec![
            CacheTag::ContentPages,
            CacheTag::ContentPage {
                slug: slug.to_string(),
            },
        ];
        self.cached(key, tags, || async {
            let record = self
                .pages
                .find_published_page(slug)
                .await?
                .ok_or(ContentError::NotFound)?;
            map_content_page(record).ok_or(ContentError::NotFound)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;
    use time::OffsetDateTime;

    use super::*;
    use crate::application::repos::{RepoError, UpsertSettingsParams};
    use crate::cache::CacheConfig;
    use crate::domain::entities::CategoryRecord;
    use crate::domain::types::PostStatus;

    fn sample_post(slug: &str, post_type: PostType, locale: Locale, status: PostStatus) -> PostRecord {
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

    #[derive(Default)]
    struct StubRepos {
        posts: Vec<PostRecord>,
        settings: Option<SiteSettingsRecord>,
        heroes: Vec<HeroRecord>,
        fail_settings: bool,
        list_calls: AtomicUsize,
        detail_calls: AtomicUsize,
    }

    #[async_trait]
    impl PostsRepo for StubRepos {
        async fn list_published(
            &self,
            post_type: PostType,
            locale: Locale,
            limit: Option<u32>,
        ) -> Result<Vec<PostRecord>, RepoError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            let mut posts: Vec<PostRecord> = self
                .posts
                .iter()
                .filter(|post| {
                    post.post_type == post_type
                        && post.locale == locale
                        && post.status == PostStatus::Published
                })
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
            self.detail_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .posts
                .iter()
                .find(|post| {
                    post.post_type == post_type
                        && post.slug == slug
                        && post.locale == locale
                        && post.status == PostStatus::Published
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
                .posts
                .iter()
                .filter(|post| {
                    post.post_type == post_type
                        && post.locale == locale
                        && post.status == PostStatus::Published
                        && post.id != exclude
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
                .posts
                .iter()
                .filter(|post| {
                    post.locale == locale
                        && post.status == PostStatus::Published
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
    impl CategoriesRepo for StubRepos {
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
    impl SettingsRepo for StubRepos {
        async fn find_settings(
            &self,
            locale: Locale,
        ) -> Result<Option<SiteSettingsRecord>, RepoError> {
            if self.fail_settings {
                return Err(RepoError::Timeout);
            }
            Ok(self
                .settings
                .clone()
                .filter(|settings| settings.locale == locale))
        }

        async fn upsert_settings(&self, _params: UpsertSettingsParams) -> Result<(), RepoError> {
            Ok(())
        }
    }

    #[async_trait]
    impl HeroesRepo for StubRepos {
        async fn list_heroes(&self, locale: Locale) -> Result<Vec<HeroRecord>, RepoError> {
            Ok(self
                .heroes
                .iter()
                .filter(|hero| hero.locale == locale)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl FaqsRepo for StubRepos {
        async fn list_faqs(&self, _locale: Locale) -> Result<Vec<FaqRecord>, RepoError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl ContentPagesRepo for StubRepos {
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

    fn service_with(repos: StubRepos) -> (ContentService, Arc<StubRepos>) {
        let repos = Arc::new(repos);
        let cache = Arc::new(ContentCache::new(CacheConfig::default()));
        let service = ContentService::new(
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            repos.clone(),
            cache,
        );
        (service, repos)
    }

    #[tokio::test]
    async fn posts_by_type_returns_published_matches_only() {
        let mut repos = StubRepos::default();
        repos.posts = vec![
            sample_post("yayinda", PostType::Blog, Locale::Tr, PostStatus::Published),
            sample_post("taslak", PostType::Blog, Locale::Tr, PostStatus::Draft),
            sample_post("ingilizce", PostType::Blog, Locale::En, PostStatus::Published),
            sample_post("etkinlik", PostType::Event, Locale::Tr, PostStatus::Published),
        ];
        let (service, _) = service_with(repos);

        let posts = service
            .posts_by_type(PostType::Blog, Locale::Tr, None)
            .await
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "yayinda");
    }

    #[tokio::test]
    async fn second_read_within_ttl_is_served_from_cache() {
        let mut repos = StubRepos::default();
        repos.posts = vec![sample_post(
            "yayinda",
            PostType::Blog,
            Locale::Tr,
            PostStatus::Published,
        )];
        let (service, repos) = service_with(repos);

        let first = service
            .posts_by_type(PostType::Blog, Locale::Tr, None)
            .await
            .unwrap();
        let second = service
            .posts_by_type(PostType::Blog, Locale::Tr, None)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(repos.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn detail_not_found_is_distinct_and_never_cached() {
        let (service, repos) = service_with(StubRepos::default());

        for _ in 0..2 {
            let result = service.post_detail(PostType::Blog, "yok", Locale::Tr).await;
            assert!(matches!(result, Err(ContentError::NotFound)));
        }
        assert_eq!(repos.detail_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn detail_relates_same_type_posts_excluding_itself() {
        let mut repos = StubRepos::default();
        repos.posts = vec![
            sample_post("ana", PostType::Blog, Locale::Tr, PostStatus::Published),
            sample_post("komsu-1", PostType::Blog, Locale::Tr, PostStatus::Published),
            sample_post("komsu-2", PostType::Blog, Locale::Tr, PostStatus::Published),
            sample_post("baska-tur", PostType::Video, Locale::Tr, PostStatus::Published),
        ];
        let (service, _) = service_with(repos);

        let detail = service
            .post_detail(PostType::Blog, "ana", Locale::Tr)
            .await
            .unwrap();
        assert_eq!(detail.post.slug, "ana");
        assert!(detail.related.len() <= RELATED_LIMIT as usize);
        assert!(detail.related.iter().all(|post| post.slug != "ana"));
        assert!(detail
            .related
            .iter()
            .all(|post| post.post_type == PostType::Blog));
    }

    #[tokio::test]
    async fn missing_settings_row_yields_hard_coded_defaults() {
        let (service, _) = service_with(StubRepos::default());

        let settings = service.settings(Locale::Ar).await;
        assert_eq!(settings.site_name, "TARF Akademi");
        assert_eq!(settings.contact_email, "iletisim@tarf.org");
    }

    #[tokio::test]
    async fn failing_settings_read_degrades_to_defaults() {
        let repos = StubRepos {
            fail_settings: true,
            ..StubRepos::default()
        };
        let (service, _) = service_with(repos);

        let settings = service.settings(Locale::Tr).await;
        assert_eq!(settings.site_name, "TARF Akademi");
    }

    #[tokio::test]
    async fn search_matches_published_and_skips_drafts() {
        let mut published = sample_post(
            "yapay-zeka-ve-gelecek",
            PostType::Blog,
            Locale::Tr,
            PostStatus::Published,
        );
        published.title = "Yapay Zeka ve Gelecek".to_string();
        let mut draft = sample_post(
            "yapay-zeka-taslak",
            PostType::Blog,
            Locale::Tr,
            PostStatus::Draft,
        );
        draft.title = "Yapay Zeka Taslağı".to_string();

        let repos = StubRepos {
            posts: vec![published, draft],
            ..StubRepos::default()
        };
        let (service, _) = service_with(repos);

        let hits = service.search("yapay zeka", Locale::Tr).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "yapay-zeka-ve-gelecek");
    }

    #[tokio::test]
    async fn stray_event_fields_are_dropped_for_non_event_posts() {
        let mut record = sample_post("yazi", PostType::Blog, Locale::Tr, PostStatus::Published);
        record.event_date = time::Date::from_calendar_date(2026, time::Month::March, 7).ok();
        record.location = Some("İstanbul".to_string());

        let view = map_post(record);
        assert_eq!(view.event_date, None);
        assert_eq!(view.location, None);
    }

    #[tokio::test]
    async fn gallery_metadata_survives_the_mapping_round_trip() {
        let mut record = sample_post("galeri", PostType::Blog, Locale::Tr, PostStatus::Published);
        record.meta = Some(json!({"gallery": ["a.jpg", "b.jpg"]}));
        let view = map_post(record);
        assert_eq!(
            view.gallery,
            Some(vec!["a.jpg".to_string(), "b.jpg".to_string()])
        );
    }

    #[tokio::test]
    async fn malformed_hero_lists_degrade_to_empty() {
        let now = OffsetDateTime::now_utc();
        let repos = StubRepos {
            heroes: vec![HeroRecord {
                id: Uuid::new_v4(),
                locale: Locale::Tr,
                title: "Başlık".to_string(),
                subtitle: "Alt başlık".to_string(),
                description: "Açıklama".to_string(),
                slides: Some(json!("not-a-list")),
                button_text: "Başvur".to_string(),
                button_url: "/tr/contact".to_string(),
                background_image: None,
                videos: Some(json!([{"url": "https://example.com/v.mp4"}])),
                created_at: now,
            }],
            ..StubRepos::default()
        };
        let (service, _) = service_with(repos);

        let heroes = service.heroes(Locale::Tr).await;
        assert_eq!(heroes.len(), 1);
        assert!(heroes[0].slides.is_empty());
        assert_eq!(heroes[0].videos.len(), 1);
    }
}
