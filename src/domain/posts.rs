//! Post-level helpers: variant projection, metadata bag inspection and date
//! formatting.

use serde_json::{Value as JsonValue, json};
use time::{Date, format_description::FormatItem, macros::format_description};

use crate::domain::entities::PostRecord;
use crate::domain::types::PostType;

/// Tagged projection of a post's type-specific fields.
///
/// The posts table stores one wide row per post; this enum is the checkable
/// view of it. Event fields carried by a row of any other variant are not
/// meaningful and never surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum PostVariant<'a> {
    Blog,
    Event {
        date: Option<Date>,
        time: Option<&'a str>,
        location: Option<&'a str>,
    },
    Video {
        youtube_url: Option<&'a str>,
    },
    Podcast {
        audio_url: Option<&'a str>,
    },
    Service,
}

impl PostRecord {
    pub fn variant(&self) -> PostVariant<'_> {
        match self.post_type {
            PostType::Blog => PostVariant::Blog,
            PostType::Event => PostVariant::Event {
                date: self.event_date,
                time: self.event_time.as_deref(),
                location: self.location.as_deref(),
            },
            PostType::Video => PostVariant::Video {
                youtube_url: self.youtube_url.as_deref(),
            },
            PostType::Podcast => PostVariant::Podcast {
                audio_url: self.audio_url.as_deref(),
            },
            PostType::Service => PostVariant::Service,
        }
    }
}

/// Date-only format used for event dates in view models (ISO-8601 calendar date).
pub const EVENT_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn format_event_date(date: Date) -> String {
    date.format(EVENT_DATE_FORMAT).expect("valid calendar date")
}

/// Extract the gallery list from a post's metadata bag.
///
/// The bag is free-form; `gallery` surfaces on the mapped post only when it is
/// a JSON array consisting entirely of strings. Anything else is treated as
/// absent. Order is preserved.
pub fn gallery_from_meta(meta: Option<&JsonValue>) -> Option<Vec<String>> {
    let entries = meta?.get("gallery")?.as_array()?;
    entries
        .iter()
        .map(|entry| entry.as_str().map(str::to_string))
        .collect()
}

/// Build a metadata bag carrying a gallery list, or nothing when the list is
/// absent or empty.
pub fn meta_with_gallery(gallery: Option<Vec<String>>) -> Option<JsonValue> {
    let gallery = gallery?;
    if gallery.is_empty() {
        return None;
    }
    Some(json!({ "gallery": gallery }))
}
