//! Post mutations: create, update, delete.

use std::sync::Arc;

use time::{Date, OffsetDateTime};
use url::Url;
use uuid::Uuid;

use crate::application::admin::AdminError;
use crate::application::repos::{
    CreatePostParams, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::cache::{CacheTag, ContentCache};
use crate::domain::entities::PostRecord;
use crate::domain::locale::Locale;
use crate::domain::posts::meta_with_gallery;
use crate::domain::types::{PostStatus, PostType};

/// Admin-submitted post fields. `gallery` arrives as a comma-separated line
/// from the form and is normalized into the metadata bag on write.
#[derive(Debug, Clone)]
pub struct PostInput {
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
    pub gallery: Option<String>,
    pub status: PostStatus,
    pub locale: Locale,
    pub category_id: Option<Uuid>,
    /// Pre-edit slug; lets an update change the slug without orphaning the row.
    pub original_slug: Option<String>,
}

pub fn parse_gallery(gallery: Option<&str>) -> Option<Vec<String>> {
    let entries: Vec<String> = gallery?
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect();
    (!entries.is_empty()).then_some(entries)
}

fn validate(input: &PostInput) -> Result<(), AdminError> {
    if input.title.trim().is_empty() {
        return Err(AdminError::validation("title must not be empty"));
    }
    if input.slug.trim().is_empty() {
        return Err(AdminError::validation("slug must not be empty"));
    }
    if slug::slugify(&input.slug) != input.slug {
        return Err(AdminError::validation("slug must be a URL-safe slug"));
    }
    if input.post_type == PostType::Video && input.youtube_url.is_none() {
        return Err(AdminError::validation("a video requires a YouTube URL"));
    }
    for (field, value) in [
        ("youtube_url", &input.youtube_url),
        ("audio_url", &input.audio_url),
    ] {
        if let Some(value) = value {
            Url::parse(value)
                .map_err(|_| AdminError::validation(format!("{field} is not a valid URL")))?;
        }
    }
    Ok(())
}

#[derive(Clone)]
pub struct AdminPostService {
    posts: Arc<dyn PostsWriteRepo>,
    cache: Arc<ContentCache>,
}

impl AdminPostService {
    pub fn new(posts: Arc<dyn PostsWriteRepo>, cache: Arc<ContentCache>) -> Self {
        Self { posts, cache }
    }

    pub async fn create(&self, input: PostInput) -> Result<PostRecord, AdminError> {
        validate(&input)?;

        let published_at =
            (input.status == PostStatus::Published).then(OffsetDateTime::now_utc);
        let params = CreatePostParams {
            post_type: input.post_type,
            slug: input.slug.clone(),
            title: input.title.clone(),
            excerpt: input.excerpt.clone(),
            content_html: ammonia::clean(&input.content_html),
            content_raw: input.content_raw.clone(),
            featured_image: input.featured_image.clone(),
            seo_title: input.seo_title.clone(),
            seo_description: input.seo_description.clone(),
            og_image: input.og_image.clone(),
            youtube_url: input.youtube_url.clone(),
            audio_url: input.audio_url.clone(),
            event_date: input.event_date,
            event_time: input.event_time.clone(),
            location: input.location.clone(),
            meta: meta_with_gallery(parse_gallery(input.gallery.as_deref())),
            status: input.status,
            locale: input.locale,
            category_id: input.category_id,
            published_at,
        };

        let record = self.posts.create_post(params).await.map_err(|err| match err {
            RepoError::Duplicate { .. } => {
                AdminError::validation("slug is already in use for this type and locale")
            }
            other => AdminError::from(other),
        })?;

        self.invalidate(record.post_type, record.locale, &record.slug);
        Ok(record)
    }

    pub async fn update(&self, input: PostInput) -> Result<PostRecord, AdminError> {
        validate(&input)?;

        let lookup_slug = input.original_slug.as_deref().unwrap_or(&input.slug);
        let existing = self
            .posts
            .find_for_update(input.post_type, lookup_slug, input.locale)
            .await?
            .ok_or(AdminError::NotFound)?;

        let published_at = match input.status {
            PostStatus::Published => existing
                .published_at
                .or_else(|| Some(OffsetDateTime::now_utc())),
            PostStatus::Draft => None,
        };

        let params = UpdatePostParams {
            id: existing.id,
            slug: input.slug.clone(),
            title: input.title.clone(),
            excerpt: input.excerpt.clone(),
            content_html: ammonia::clean(&input.content_html),
            content_raw: input.content_raw.clone(),
            featured_image: input.featured_image.clone(),
            seo_title: input.seo_title.clone(),
            seo_description: input.seo_description.clone(),
            og_image: input.og_image.clone(),
            youtube_url: input.youtube_url.clone(),
            audio_url: input.audio_url.clone(),
            event_date: input.event_date,
            event_time: input.event_time.clone(),
            location: input.location.clone(),
            meta: meta_with_gallery(parse_gallery(input.gallery.as_deref())),
            status: input.status,
            locale: input.locale,
            category_id: input.category_id,
            published_at,
        };

        let record = self.posts.update_post(params).await.map_err(|err| match err {
            RepoError::Duplicate { .. } => {
                AdminError::validation("slug is already in use for this type and locale")
            }
            other => AdminError::from(other),
        })?;

        self.invalidate(record.post_type, record.locale, &record.slug);
        if existing.slug != record.slug || existing.locale != record.locale {
            self.invalidate(existing.post_type, existing.locale, &existing.slug);
        }
        Ok(record)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AdminError> {
        let existing = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(AdminError::NotFound)?;
        self.posts.delete_post(id).await?;
        self.invalidate(existing.post_type, existing.locale, &existing.slug);
        Ok(())
    }

    fn invalidate(&self, post_type: PostType, locale: Locale, slug: &str) {
        self.cache.invalidate(&CacheTag::Posts { post_type, locale });
        self.cache.invalidate(&CacheTag::Post {
            post_type,
            locale,
            slug: slug.to_string(),
        });
    }
}
