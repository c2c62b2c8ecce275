//! Cache key and invalidation tag definitions.
//!
//! `CacheKey` identifies one cached read: the operation plus every parameter
//! that affects its result, including the partition date for event windows so
//! that yesterday's window is never served today. `CacheTag` is the coarse
//! invalidation contract shared with the admin mutation layer; the `Display`
//! strings are the wire names both sides must agree on.

use std::fmt;

use time::Date;

use crate::application::repos::{EventWindow, SortDirection};
use crate::domain::locale::Locale;
use crate::domain::types::PostType;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    PostList {
        post_type: PostType,
        locale: Locale,
        limit: Option<u32>,
    },
    PostDetail {
        post_type: PostType,
        locale: Locale,
        slug: String,
    },
    Settings {
        locale: Locale,
    },
    Heroes {
        locale: Locale,
    },
    Faqs {
        locale: Locale,
    },
    Categories {
        post_type: Option<PostType>,
        locale: Locale,
    },
    Search {
        locale: Locale,
        query: String,
    },
    EventWindow {
        locale: Locale,
        window: EventWindow,
        today: Date,
        direction: SortDirection,
        page: u32,
        per_page: u32,
    },
    ContentPages,
    ContentPage {
        slug: String,
    },
}

/// Invalidation tag. One tag covers every cached read it was attached to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Posts { post_type: PostType, locale: Locale },
    Post {
        post_type: PostType,
        locale: Locale,
        slug: String,
    },
    Settings { locale: Locale },
    Heroes { locale: Locale },
    Faqs { locale: Locale },
    Categories { locale: Locale },
    ContentPages,
    ContentPage { slug: String },
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheTag::Posts { post_type, locale } => {
                write!(f, "posts:{}:{}", post_type.as_str(), locale)
            }
            CacheTag::Post {
                post_type,
                locale,
                slug,
            } => write!(f, "post:{}:{}:{}", post_type.as_str(), locale, slug),
            CacheTag::Settings { locale } => write!(f, "settings:{locale}"),
            CacheTag::Heroes { locale } => write!(f, "heroes:{locale}"),
            CacheTag::Faqs { locale } => write!(f, "faqs:{locale}"),
            CacheTag::Categories { locale } => write!(f, "categories:{locale}"),
            CacheTag::ContentPages => f.write_str("content-pages"),
            CacheTag::ContentPage { slug } => write!(f, "content-page:{slug}"),
        }
    }
}
