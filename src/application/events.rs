//! Event partitioning: upcoming / past / undated views.
//!
//! Events are the one post variant whose natural ordering axis (event date)
//! differs from publication recency, so their listing is split into three
//! disjoint windows computed against "start of today" in the organization
//! timezone. Each window paginates and counts independently; nothing is
//! shared across windows beyond the underlying table, and each query is
//! read-committed on its own.

use std::sync::Arc;

use chrono_tz::Tz;
use serde::Serialize;
use serde::de::DeserializeOwned;
use time::Date;

use crate::application::error::ContentError;
use crate::application::pagination::{PageRequest, PagedResult};
use crate::application::repos::{EventsRepo, EventWindow, SortDirection};
use crate::cache::{CacheKey, CacheTag, ContentCache};
use crate::application::content::{PostView, map_post};
use crate::domain::locale::Locale;
use crate::domain::types::PostType;
use crate::util::timezone::today_in;

/// Fixed page size for the admin event listing.
pub const ADMIN_PAGE_SIZE: u32 = 15;

/// Window an event date falls into relative to a reference day. The boundary
/// is inclusive on the upcoming side: an event happening today is upcoming.
pub fn classify(event_date: Option<Date>, today: Date) -> EventWindow {
    match event_date {
        None => EventWindow::Undated,
        Some(date) if date >= today => EventWindow::Upcoming,
        Some(_) => EventWindow::Past,
    }
}

/// Default ordering per window: soonest first for upcoming, most recent past
/// first for past. Undated sorts by last update only.
pub fn default_direction(window: EventWindow) -> SortDirection {
    match window {
        EventWindow::Upcoming => SortDirection::Asc,
        EventWindow::Past | EventWindow::Undated => SortDirection::Desc,
    }
}

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventsRepo>,
    cache: Arc<ContentCache>,
    timezone: Tz,
    public_page_size: u32,
}

impl EventService {
    pub fn new(
        events: Arc<dyn EventsRepo>,
        cache: Arc<ContentCache>,
        timezone: Tz,
        public_page_size: u32,
    ) -> Self {
        Self {
            events,
            cache,
            timezone,
            public_page_size: public_page_size.max(1),
        }
    }

    /// Start of "today" in the organization timezone. Recomputed per request
    /// so a cached window from yesterday is keyed apart from today's.
    pub fn today(&self) -> Date {
        today_in(self.timezone)
    }

    pub fn public_page_size(&self) -> u32 {
        self.public_page_size
    }

    pub async fn window(
        &self,
        locale: Locale,
        window: EventWindow,
        direction: Option<SortDirection>,
        page: PageRequest,
    ) -> Result<PagedResult<PostView>, ContentError> {
        let today = self.today();
        let direction = match window {
            // Undated has a single ordering; a caller-supplied direction is ignored.
            EventWindow::Undated => SortDirection::Desc,
            _ => direction.unwrap_or_else(|| default_direction(window)),
        };

        let key = CacheKey::EventWindow {
            locale,
            window,
            today,
            direction,
            page: page.page(),
            per_page: page.per_page(),
        };
        let tags = vec![CacheTag::Posts {
            post_type: PostType::Event,
            locale,
        }];

        self.cached(key, tags, || async {
            let total = self.events.count_events(locale, window, today).await?;
            let clamped = page.clamp(total);
            let records = self
                .events
                .list_events(
                    locale,
                    window,
                    today,
                    direction,
                    clamped.per_page,
                    clamped.offset,
                )
                .await?;
            let items = records.into_iter().map(map_post).collect();
            Ok(PagedResult::new(items, clamped, total))
        })
        .await
    }

    pub async fn upcoming(
        &self,
        locale: Locale,
        page: PageRequest,
    ) -> Result<PagedResult<PostView>, ContentError> {
        self.window(locale, EventWindow::Upcoming, None, page).await
    }

    pub async fn past(
        &self,
        locale: Locale,
        page: PageRequest,
    ) -> Result<PagedResult<PostView>, ContentError> {
        self.window(locale, EventWindow::Past, None, page).await
    }

    pub async fn undated(
        &self,
        locale: Locale,
        page: PageRequest,
    ) -> Result<PagedResult<PostView>, ContentError> {
        self.window(locale, EventWindow::Undated, None, page).await
    }

    /// First page of upcoming events, used by the home payload and the public
    /// events listing.
    pub async fn upcoming_preview(
        &self,
        locale: Locale,
        limit: u32,
    ) -> Result<Vec<PostView>, ContentError> {
        let page = self
            .upcoming(locale, PageRequest::new(1, limit.max(1)))
            .await?;
        Ok(page.items)
    }

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
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use time::{Duration, OffsetDateTime};
    use uuid::Uuid;

    use super::*;
    use crate::application::repos::RepoError;
    use crate::cache::CacheConfig;
    use crate::domain::entities::PostRecord;
    use crate::domain::types::PostStatus;

    fn event(slug: &str, event_date: Option<Date>) -> PostRecord {
        let now = OffsetDateTime::now_utc();
        PostRecord {
            id: Uuid::new_v4(),
            post_type: PostType::Event,
            slug: slug.to_string(),
            title: slug.to_string(),
            excerpt: String::new(),
            content_html: String::new(),
            content_raw: None,
            featured_image: None,
            seo_title: None,
            seo_description: None,
            og_image: None,
            youtube_url: None,
            audio_url: None,
            event_date,
            event_time: None,
            location: None,
            meta: None,
            status: PostStatus::Published,
            locale: Locale::Tr,
            category: None,
            created_at: now,
            updated_at: now,
            published_at: Some(now),
        }
    }

    /// In-memory events repository partitioning with `classify`.
    struct StubEvents {
        events: Vec<PostRecord>,
    }

    impl StubEvents {
        fn matching(&self, locale: Locale, window: EventWindow, today: Date) -> Vec<PostRecord> {
            self.events
                .iter()
                .filter(|post| post.locale == locale && classify(post.event_date, today) == window)
                .cloned()
                .collect()
        }
    }

    #[async_trait]
    impl EventsRepo for StubEvents {
        async fn list_events(
            &self,
            locale: Locale,
            window: EventWindow,
            today: Date,
            direction: SortDirection,
            limit: u32,
            offset: u64,
        ) -> Result<Vec<PostRecord>, RepoError> {
            let mut matching = self.matching(locale, window, today);
            matching.sort_by(|a, b| match direction {
                SortDirection::Asc => a.event_date.cmp(&b.event_date),
                SortDirection::Desc => b.event_date.cmp(&a.event_date),
            });
            Ok(matching
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
            Ok(self.matching(locale, window, today).len() as u64)
        }
    }

    fn today() -> Date {
        today_in(chrono_tz::Europe::Istanbul)
    }

    fn service(events: Vec<PostRecord>) -> EventService {
        EventService::new(
            Arc::new(StubEvents { events }),
            Arc::new(ContentCache::new(CacheConfig::default())),
            chrono_tz::Europe::Istanbul,
            12,
        )
    }

    #[test]
    fn classification_is_inclusive_on_the_upcoming_side() {
        let today = Date::from_calendar_date(2026, time::Month::March, 7).unwrap();
        assert_eq!(classify(Some(today), today), EventWindow::Upcoming);
        assert_eq!(
            classify(today.previous_day(), today),
            EventWindow::Past
        );
        assert_eq!(
            classify(today.next_day(), today),
            EventWindow::Upcoming
        );
        assert_eq!(classify(None, today), EventWindow::Undated);
    }

    #[test]
    fn windows_partition_without_overlap() {
        let today = Date::from_calendar_date(2026, time::Month::March, 7).unwrap();
        let dates = [
            None,
            Some(today),
            today.previous_day(),
            today.next_day(),
            Some(today - Duration::days(400)),
            Some(today + Duration::days(400)),
        ];
        for date in dates {
            // Exactly one window claims each date.
            let windows = [EventWindow::Upcoming, EventWindow::Past, EventWindow::Undated];
            let claimed: Vec<_> = windows
                .into_iter()
                .filter(|window| classify(date, today) == *window)
                .collect();
            assert_eq!(claimed.len(), 1, "date {date:?} claimed by {claimed:?}");
        }
    }

    #[tokio::test]
    async fn yesterday_and_tomorrow_land_in_their_own_windows() {
        let today = today();
        let service = service(vec![
            event("dun", today.previous_day()),
            event("yarin", today.next_day()),
        ]);

        let upcoming = service
            .upcoming(Locale::Tr, PageRequest::new(1, 12))
            .await
            .unwrap();
        assert_eq!(upcoming.total, 1);
        assert_eq!(upcoming.items[0].slug, "yarin");

        let past = service
            .past(Locale::Tr, PageRequest::new(1, 12))
            .await
            .unwrap();
        assert_eq!(past.total, 1);
        assert_eq!(past.items[0].slug, "dun");
    }

    #[tokio::test]
    async fn out_of_range_page_clamps_to_the_last_page() {
        let today = today();
        let events = (0..30)
            .map(|i| event(&format!("gecmis-{i}"), Some(today - Duration::days(i + 1))))
            .collect();
        let service = service(events);

        let page = service
            .past(Locale::Tr, PageRequest::new(999, ADMIN_PAGE_SIZE))
            .await
            .unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), ADMIN_PAGE_SIZE as usize);
    }

    #[tokio::test]
    async fn undated_events_have_their_own_window() {
        let today = today();
        let service = service(vec![
            event("tarihsiz", None),
            event("yarin", today.next_day()),
        ]);

        let undated = service
            .undated(Locale::Tr, PageRequest::new(1, 12))
            .await
            .unwrap();
        assert_eq!(undated.total, 1);
        assert_eq!(undated.items[0].slug, "tarihsiz");
    }

    #[tokio::test]
    async fn changing_page_of_one_window_leaves_others_alone() {
        let today = today();
        let mut events: Vec<PostRecord> = (0..20)
            .map(|i| event(&format!("gecmis-{i}"), Some(today - Duration::days(i + 1))))
            .collect();
        events.push(event("yarin", today.next_day()));
        let service = service(events);

        let past_second_page = service
            .past(Locale::Tr, PageRequest::new(2, ADMIN_PAGE_SIZE))
            .await
            .unwrap();
        assert_eq!(past_second_page.page, 2);

        let upcoming = service
            .upcoming(Locale::Tr, PageRequest::new(1, ADMIN_PAGE_SIZE))
            .await
            .unwrap();
        assert_eq!(upcoming.page, 1);
        assert_eq!(upcoming.total, 1);
    }
}
