//! Shared domain enumerations aligned with persisted database enums.

use serde::{Deserialize, Serialize};

/// Content variant of a post. Fixed at creation time and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_type", rename_all = "snake_case")]
pub enum PostType {
    Blog,
    Event,
    Video,
    Podcast,
    Service,
}

impl PostType {
    pub const ALL: [PostType; 5] = [
        PostType::Blog,
        PostType::Event,
        PostType::Video,
        PostType::Podcast,
        PostType::Service,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Blog => "blog",
            PostType::Event => "event",
            PostType::Video => "video",
            PostType::Podcast => "podcast",
            PostType::Service => "service",
        }
    }

    /// URL path segment used by the public site for this variant.
    pub fn path_segment(self) -> &'static str {
        match self {
            PostType::Blog => "blog",
            PostType::Event => "events",
            PostType::Video => "videos",
            PostType::Podcast => "podcasts",
            PostType::Service => "services",
        }
    }
}

impl TryFrom<&str> for PostType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "blog" => Ok(PostType::Blog),
            "event" => Ok(PostType::Event),
            "video" => Ok(PostType::Video),
            "podcast" => Ok(PostType::Podcast),
            "service" => Ok(PostType::Service),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "post_status", rename_all = "snake_case")]
pub enum PostStatus {
    Draft,
    Published,
}

/// Fixed grouping for static content pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "page_category", rename_all = "snake_case")]
pub enum PageCategory {
    Kurumsal,
    Dusunce,
    Akademi,
    Yazilim,
    Kulupler,
    Yayinlar,
    Yasal,
}

/// Layout variant for a content-page section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionLayout {
    Grid,
    List,
    Stats,
    Timeline,
    Table,
    Split,
}
