use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::QueryBuilder;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::application::repos::{
    CreatePostParams, PostsRepo, PostsWriteRepo, RepoError, UpdatePostParams,
};
use crate::domain::entities::{PostCategoryRef, PostRecord};
use crate::domain::locale::Locale;
use crate::domain::types::{PostStatus, PostType};

use super::{PostgresRepositories, map_sqlx_error};

/// Column list shared by every post read, with the category eager-load.
pub(crate) const POST_COLUMNS: &str = "p.id, p.post_type, p.slug, p.title, p.excerpt, \
 p.content_html, p.content_raw, p.featured_image, p.seo_title, p.seo_description, p.og_image, \
 p.youtube_url, p.audio_url, p.event_date, p.event_time, p.location, p.meta, p.status, \
 p.locale, p.category_id, p.created_at, p.updated_at, p.published_at, \
 c.slug AS category_slug, c.name AS category_name";

pub(crate) const POST_FROM: &str =
    " FROM posts p LEFT JOIN categories c ON c.id = p.category_id ";

#[derive(sqlx::FromRow)]
pub(crate) struct PostRow {
    pub(crate) id: Uuid,
    pub(crate) post_type: PostType,
    pub(crate) slug: String,
    pub(crate) title: String,
    pub(crate) excerpt: String,
    pub(crate) content_html: String,
    pub(crate) content_raw: Option<String>,
    pub(crate) featured_image: Option<String>,
    pub(crate) seo_title: Option<String>,
    pub(crate) seo_description: Option<String>,
    pub(crate) og_image: Option<String>,
    pub(crate) youtube_url: Option<String>,
    pub(crate) audio_url: Option<String>,
    pub(crate) event_date: Option<Date>,
    pub(crate) event_time: Option<String>,
    pub(crate) location: Option<String>,
    pub(crate) meta: Option<JsonValue>,
    pub(crate) status: PostStatus,
    pub(crate) locale: Locale,
    pub(crate) category_id: Option<Uuid>,
    pub(crate) created_at: OffsetDateTime,
    pub(crate) updated_at: OffsetDateTime,
    pub(crate) published_at: Option<OffsetDateTime>,
    pub(crate) category_slug: Option<String>,
    pub(crate) category_name: Option<String>,
}

impl From<PostRow> for PostRecord {
    fn from(row: PostRow) -> Self {
        let category = match (row.category_id, row.category_slug, row.category_name) {
            (Some(id), Some(slug), Some(name)) => Some(PostCategoryRef { id, slug, name }),
            _ => None,
        };
        Self {
            id: row.id,
            post_type: row.post_type,
            slug: row.slug,
            title: row.title,
            excerpt: row.excerpt,
            content_html: row.content_html,
            content_raw: row.content_raw,
            featured_image: row.featured_image,
            seo_title: row.seo_title,
            seo_description: row.seo_description,
            og_image: row.og_image,
            youtube_url: row.youtube_url,
            audio_url: row.audio_url,
            event_date: row.event_date,
            event_time: row.event_time,
            location: row.location,
            meta: row.meta,
            status: row.status,
            locale: row.locale,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
            published_at: row.published_at,
        }
    }
}

fn select_posts<'q>() -> QueryBuilder<'q, sqlx::Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(POST_COLUMNS);
    qb.push(POST_FROM);
    qb.push(" WHERE 1=1 ");
    qb
}

#[async_trait]
impl PostsRepo for PostgresRepositories {
    async fn list_published(
        &self,
        post_type: PostType,
        locale: Locale,
        limit: Option<u32>,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut qb = select_posts();
        Self::push_published_scope(&mut qb, post_type, locale);
        qb.push(" ORDER BY p.published_at DESC NULLS LAST, p.created_at DESC, p.id DESC ");
        if let Some(limit) = limit {
            qb.push(" LIMIT ");
            qb.push_bind(i64::from(limit));
        }

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn find_published(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<PostRecord>, RepoError> {
        let mut qb = select_posts();
        Self::push_published_scope(&mut qb, post_type, locale);
        qb.push(" AND p.slug = ");
        qb.push_bind(slug);

        let row = qb
            .build_query_as::<PostRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn list_related(
        &self,
        post_type: PostType,
        locale: Locale,
        exclude: Uuid,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let mut qb = select_posts();
        Self::push_published_scope(&mut qb, post_type, locale);
        qb.push(" AND p.id <> ");
        qb.push_bind(exclude);
        qb.push(" ORDER BY p.published_at DESC NULLS LAST, p.created_at DESC, p.id DESC LIMIT ");
        qb.push_bind(i64::from(limit));

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }

    async fn search_published(
        &self,
        locale: Locale,
        query: &str,
        limit: u32,
    ) -> Result<Vec<PostRecord>, RepoError> {
        let pattern = format!("%{query}%");
        let mut qb = select_posts();
        qb.push(" AND p.status = ");
        qb.push_bind(PostStatus::Published);
        qb.push(" AND p.locale = ");
        qb.push_bind(locale);
        qb.push(" AND (p.title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.excerpt ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR p.content_html ILIKE ");
        qb.push_bind(pattern);
        qb.push(") ORDER BY p.published_at DESC NULLS LAST, p.created_at DESC, p.id DESC LIMIT ");
        qb.push_bind(i64::from(limit));

        let rows = qb
            .build_query_as::<PostRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(PostRecord::from).collect())
    }
}

#[async_trait]
impl PostsWriteRepo for PostgresRepositories {
    async fn create_post(&self, params: CreatePostParams) -> Result<PostRecord, RepoError> {
        let id = Uuid::new_v4();
        let mut qb = QueryBuilder::new(
            "INSERT INTO posts (id, post_type, slug, title, excerpt, content_html, content_raw, \
             featured_image, seo_title, seo_description, og_image, youtube_url, audio_url, \
             event_date, event_time, location, meta, status, locale, category_id, published_at) ",
        );
        qb.push_values([params], |mut row, params| {
            row.push_bind(id)
                .push_bind(params.post_type)
                .push_bind(params.slug)
                .push_bind(params.title)
                .push_bind(params.excerpt)
                .push_bind(params.content_html)
                .push_bind(params.content_raw)
                .push_bind(params.featured_image)
                .push_bind(params.seo_title)
                .push_bind(params.seo_description)
                .push_bind(params.og_image)
                .push_bind(params.youtube_url)
                .push_bind(params.audio_url)
                .push_bind(params.event_date)
                .push_bind(params.event_time)
                .push_bind(params.location)
                .push_bind(params.meta)
                .push_bind(params.status)
                .push_bind(params.locale)
                .push_bind(params.category_id)
                .push_bind(params.published_at);
        });

        qb.build()
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::from_persistence("inserted post row disappeared"))
    }

    async fn update_post(&self, params: UpdatePostParams) -> Result<PostRecord, RepoError> {
        let mut qb = QueryBuilder::new("UPDATE posts SET slug = ");
        qb.push_bind(params.slug);
        qb.push(", title = ");
        qb.push_bind(params.title);
        qb.push(", excerpt = ");
        qb.push_bind(params.excerpt);
        qb.push(", content_html = ");
        qb.push_bind(params.content_html);
        qb.push(", content_raw = ");
        qb.push_bind(params.content_raw);
        qb.push(", featured_image = ");
        qb.push_bind(params.featured_image);
        qb.push(", seo_title = ");
        qb.push_bind(params.seo_title);
        qb.push(", seo_description = ");
        qb.push_bind(params.seo_description);
        qb.push(", og_image = ");
        qb.push_bind(params.og_image);
        qb.push(", youtube_url = ");
        qb.push_bind(params.youtube_url);
        qb.push(", audio_url = ");
        qb.push_bind(params.audio_url);
        qb.push(", event_date = ");
        qb.push_bind(params.event_date);
        qb.push(", event_time = ");
        qb.push_bind(params.event_time);
        qb.push(", location = ");
        qb.push_bind(params.location);
        qb.push(", meta = ");
        qb.push_bind(params.meta);
        qb.push(", status = ");
        qb.push_bind(params.status);
        qb.push(", locale = ");
        qb.push_bind(params.locale);
        qb.push(", category_id = ");
        qb.push_bind(params.category_id);
        qb.push(", published_at = ");
        qb.push_bind(params.published_at);
        qb.push(", updated_at = now() WHERE id = ");
        qb.push_bind(params.id);

        let result = qb
            .build()
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.find_by_id(params.id)
            .await?
            .ok_or_else(|| RepoError::from_persistence("updated post row disappeared"))
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await
            .map_err(map_sqlx_error)?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PostRecord>, RepoError> {
        let mut qb = select_posts();
        qb.push(" AND p.id = ");
        qb.push_bind(id);

        let row = qb
            .build_query_as::<PostRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }

    async fn find_for_update(
        &self,
        post_type: PostType,
        slug: &str,
        locale: Locale,
    ) -> Result<Option<PostRecord>, RepoError> {
        let mut qb = select_posts();
        qb.push(" AND p.post_type = ");
        qb.push_bind(post_type);
        qb.push(" AND p.slug = ");
        qb.push_bind(slug);
        qb.push(" AND p.locale = ");
        qb.push_bind(locale);

        let row = qb
            .build_query_as::<PostRow>()
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(PostRecord::from))
    }
}
