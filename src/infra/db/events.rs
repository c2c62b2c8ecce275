//! Event partition queries.
//!
//! Each window (upcoming / past / undated) is a plain filtered query against
//! the posts table; the windows are disjoint by construction of the filter,
//! and each runs with its own count and offset.

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::Date;

use crate::application::repos::{EventWindow, EventsRepo, RepoError, SortDirection};
use crate::domain::entities::PostRecord;
use crate::domain::locale::Locale;
use crate::domain::types::PostType;

use super::posts::{POST_COLUMNS, POST_FROM, PostRow};
use super::{PostgresRepositories, map_sqlx_error};

fn push_window_filter<'q>(qb: &mut QueryBuilder<'q, Postgres>, window: EventWindow, today: Date) {
    match window {
        EventWindow::Upcoming => {
            qb.push(" AND p.event_date IS NOT NULL AND p.event_date >= ");
            qb.push_bind(today);
        }
        EventWindow::Past => {
            qb.push(" AND p.event_date IS NOT NULL AND p.event_date < ");
            qb.push_bind(today);
        }
        EventWindow::Undated => {
            qb.push(" AND p.event_date IS NULL ");
        }
    }
}

fn push_window_order(qb: &mut QueryBuilder<'_, Postgres>, window: EventWindow, direction: SortDirection) {
    match window {
        // Undated events have no date axis; recency is the only ordering.
        EventWindow::Undated => {
            qb.push(" ORDER BY p.updated_at DESC, p.id DESC ");
        }
        EventWindow::Upcoming => {
            let date_dir = direction.sql();
            qb.push(format!(
                " ORDER BY p.event_date {date_dir}, p.event_time ASC NULLS LAST, p.updated_at DESC, p.id DESC "
            ));
        }
        // Time-of-day ordering mirrors the date direction for past events.
        EventWindow::Past => {
            let dir = direction.sql();
            qb.push(format!(
                " ORDER BY p.event_date {dir}, p.event_time {dir} NULLS LAST, p.updated_at DESC, p.id DESC "
            ));
        }
    }
}

#[async_trait]
impl EventsRepo for PostgresRepositories {
    async fn list_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
        direction: SortDirection,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut qb = QueryBuilder::new("SELECT ");
        qb.push(POST_COLUMNS);
        qb.push(POST_FROM);
        qb.push(" WHERE 1=1 ");
        Self::push_published_scope(&mut qb, PostType::Event, locale);
        push_window_filter(&mut qb, window, today);
        push_window_order(&mut qb, window, direction);
        qb.push(" LIMIT ");
        qb.push_bind(i64::from(limit));
        qb.push(" OFFSET ");
        qb.push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn count_events(
        &self,
        locale: Locale,
        window: EventWindow,
        today: Date,
    ) -> Result<u64, RepoError> {
        let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p WHERE 1=1 ");
        Self::push_published_scope(&mut qb, PostType::Event, locale);
        push_window_filter(&mut qb, window, today);

        let count: i64 = qb
            .build_query_scalar()
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        count
            .try_into()
            .map_err(|_| RepoError::from_persistence("count exceeds supported range"))
    }
}
