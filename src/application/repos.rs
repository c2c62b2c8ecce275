//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::entities::{
    CategoryRecord, ContentPageRecord, FaqRecord, HeroRecord, PostRecord, SiteSettingsRecord,
};
use crate::domain::locale::Locale;
use crate::domain::types::{PageCategory, PostStatus, PostType};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Temporal partition of the event listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventWindow {
    Upcoming,
    Past,
    Undated,
}

impl EventWindow {
    pub fn as_str(self) -> &'static str {
        match self {
            EventWindow::Upcoming => "upcoming",
            EventWindow::Past => "past",
            EventWindow::Undated => "undated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// Published posts of one type for one locale, newest-published-first.
    async fn list_published(
        &self,
        post_type: PostType,
        locale: Locale,
        limit: Option<u32>,
    ) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_published(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<PostRecord>, RepoError>;

    /// Published posts of the same type/locale excluding one post.
    async fn list_related(
        &self,
        post_type: PostType,
        locale: Locale,
        exclude: Uuid,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError>;

    /// Case-insensitive substring search over title, excerpt and content.
    async fn search_published(
        &self,
        locale: Locale,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError>;
}

#[async_trait]
pub trait EventsRepo: Send + Sync {
    async fn list_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
        direction: SortDirection,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PostRecord>, RepoError>;

    async fn count_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
    ) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait CategoriesRepo: Send + Sync {
    async fn list_categories(
        &self,
        post_type: Option<PostType>,
        locale: Locale,
    ) -> Result<Vec<CategoryRecord>, RepoError>;

    async fn find_by_slug(
        &self,
        slug: &str,
        post_type: PostType,
        locale: Locale,
    ) -> Result<Option<CategoryRecord>, RepoError>;
}

#[async_trait]
pub trait SettingsRepo: Send + Sync {
    async fn find_settings(&self, locale: Locale) -> Result<Option<SiteSettingsRecord>, RepoError>;

    async fn upsert_settings(&self, params: UpsertSettingsParams) -> Result<(), RepoError>;
}

#[async_trait]
pub trait HeroesRepo: Send + Sync {
    /// Heroes for the locale, newest first.
    async fn list_heroes(&self, locale: Locale) -> Result<Vec<HeroRecord>, RepoError>;
}

#[async_trait]
pub trait FaqsRepo: Send + Sync {
    /// FAQs for the locale ordered by sort order, newest first within ties.
    async fn list_faqs(&self, locale: Locale) -> Result<Vec<FaqRecord>, RepoError>;
}

#[async_trait]
pub trait ContentPagesRepo: Send + Sync {
    async fn list_published_pages(&self) -> Result<Vec<ContentPageRecord>, RepoError>;

    async fn find_published_page(&self, slug: &str)
    -> Result<Option<ContentPageRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub post_type: PostType,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content_html: String,
    pub content_raw: Option<String>,
    pub featured_image: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub og_image: Option<String>,
    pub youtube_url: Option<String>,
    pub audio_url: Option<String>,
    pub event_date: Option<Date>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub meta: Option<JsonValue>,
    pub status: PostStatus,
    pub locale: Locale,
    pub category_id: Option<Uuid>,
    pub published_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct UpdatePostParams {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub content_html: String,
    pub content_raw: Option<String>,
    pub featured_image: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub og_image: Option<String>,
    pub youtube_url: Option<String>,
    pub audio_url: Option<String>,
    pub event_date: Option<Date>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub meta: Option<JsonValue>,
    pub status: PostStatus,
    pub locale: Locale,
    pub category_id: Option<Uuid>,
    pub published_at: Option<OffsetDateTime>,
}

#[async_trait]
pub trait PostsWriteRepo: Send + Sync {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError>;

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError>;

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError>;

    /// Resolve a post for mutation by its pre-edit coordinates, regardless of
    /// publication status.
    async fn find_for_update(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<PostRecord>, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertCategoryParams {
    pub slug: String,
    pub name: String,
    pub post_type: PostType,
    pub locale: Locale,
}

#[async_trait]
pub trait CategoriesWriteRepo: Send + Sync {
    async fn upsert_category(
        &self,
        params: UpsertCategoryParams,
    ) -> Result<CategoryRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertSettingsParams {
    pub locale: Locale,
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    pub contact_map_url: Option<String>,
    pub contact_content: Option<JsonValue>,
}

#[derive(Debug, Clone)]
pub struct UpsertHeroParams {
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub slides: Option<JsonValue>,
    pub button_text: String,
    pub button_url: String,
    pub background_image: Option<String>,
    pub videos: Option<JsonValue>,
}

#[async_trait]
pub trait HeroesWriteRepo: Send + Sync {
    /// Update the newest hero for the locale, inserting when none exists.
    async fn upsert_hero(&self, params: UpsertHeroParams) -> Result<HeroRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertFaqParams {
    pub locale: Locale,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
}

#[async_trait]
pub trait FaqsWriteRepo: Send + Sync {
    /// Upsert keyed by `(locale, question)`.
    async fn upsert_faq(&self, params: UpsertFaqParams) -> Result<FaqRecord, RepoError>;
}

#[derive(Debug, Clone)]
pub struct UpsertContentPageParams {
    pub slug: String,
    pub category: PageCategory,
    pub title: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub data: JsonValue,
    pub status: PostStatus,
    pub published_at: Option<OffsetDateTime>,
}

#[async_trait]
pub trait ContentPagesWriteRepo: Send + Sync {
    async fn upsert_page(
        &self,
        params: UpsertContentPageParams,
    ) -> Result<ContentPageRecord, RepoError>;
}
