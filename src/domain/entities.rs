//! Domain entities mirrored from persistent storage.

use serde::Serialize;
use serde_json::Value as JsonValue;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::domain::locale::Locale;
use crate::domain::types::{PageCategory, PostStatus, PostType};

/// Category reference embedded in a post row via the eager-loaded join.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostCategoryRef {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostRecord {
    pub id: Uuid,
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
    pub category: Option<PostCategoryRef>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub published_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRecord {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub post_type: PostType,
    pub locale: Locale,
}

/// Singleton-per-locale site configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSettingsRecord {
    pub id: Uuid,
    pub locale: Locale,
    pub site_name: String,
    pub site_description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub contact_address: String,
    pub contact_map_url: Option<String>,
    pub contact_content: Option<JsonValue>,
    pub updated_at: OffsetDateTime,
}

/// Landing page hero. Callers take the most recently created row per locale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroRecord {
    pub id: Uuid,
    pub locale: Locale,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub slides: Option<JsonValue>,
    pub button_text: String,
    pub button_url: String,
    pub background_image: Option<String>,
    pub videos: Option<JsonValue>,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaqRecord {
    pub id: Uuid,
    pub locale: Locale,
    pub question: String,
    pub answer: String,
    pub sort_order: i32,
    pub created_at: OffsetDateTime,
}

/// Static page row. `data` holds the structured definition; the typed shape
/// lives in [`crate::domain::pages`] and is validated at the mapping boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentPageRecord {
    pub id: Uuid,
    pub slug: String,
    pub category: PageCategory,
    pub title: String,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub data: JsonValue,
    pub status: PostStatus,
    pub published_at: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}
