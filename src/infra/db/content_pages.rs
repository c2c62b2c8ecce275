use async_trait::async_trait;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    ContentPagesRepo, ContentPagesWriteRepo, RepoError, UpsertContentPageParams,
};
use crate::domain::entities::ContentPageRecord;
use crate::domain::types::{PageCategory, PostStatus};

use super::{PostgresRepositories, map_sqlx_error};

const PAGE_COLUMNS: &str = "id, slug, category, title, seo_title, seo_description, data, status, \
 published_at, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ContentPageRow {
    id: Uuid,
    slug: String,
    category: PageCategory,
    title: String,
    seo_title: Option<String>,
    seo_description: Option<String>,
    data: JsonValue,
    status: PostStatus,
    published_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl From<ContentPageRow> for ContentPageRecord {
    fn from(row: ContentPageRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            category: row.category,
            title: row.title,
            seo_title: row.seo_title,
            seo_description: row.seo_description,
            data: row.data,
            status: row.status,
            published_at: row.published_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ContentPagesRepo for PostgresRepositories {
    async fn list_published_pages(&self) -> Result<Vec<ContentPageRecord>, RepoError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM content_pages \
             WHERE status = $1 AND published_at IS NOT NULL \
             ORDER BY updated_at DESC"
        );
        let rows = sqlx::query_as::<_, ContentPageRow>(&sql)
            .bind(PostStatus::Published)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(ContentPageRecord::from).collect())
    }

    async fn find_published_page(
        &self,
        slug: &str,
    ) -> Result<Option<ContentPageRecord>, RepoError> {
        let sql = format!(
            "SELECT {PAGE_COLUMNS} FROM content_pages \
             WHERE slug = $1 AND status = $2 AND published_at IS NOT NULL"
        );
        let row = sqlx::query_as::<_, ContentPageRow>(&sql)
            .bind(slug)
            .bind(PostStatus::Published)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(ContentPageRecord::from))
    }
}

#[async_trait]
impl ContentPagesWriteRepo for PostgresRepositories {
    async fn upsert_page(
        &self,
        params: UpsertContentPageParams,
    ) -> Result<ContentPageRecord, RepoError> {
        let sql = format!(
            "INSERT INTO content_pages (id, slug, category, title, seo_title, seo_description, \
             data, status, published_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             ON CONFLICT (slug) DO UPDATE SET \
                category = EXCLUDED.category, \
                title = EXCLUDED.title, \
                seo_title = EXCLUDED.seo_title, \
                seo_description = EXCLUDED.seo_description, \
                data = EXCLUDED.data, \
                status = EXCLUDED.status, \
                published_at = EXCLUDED.published_at, \
                updated_at = now() \
             RETURNING {PAGE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ContentPageRow>(&sql)
            .bind(Uuid::new_v4())
            .bind(&params.slug)
            .bind(params.category)
            .bind(&params.title)
            .bind(&params.seo_title)
            .bind(&params.seo_description)
            .bind(&params.data)
            .bind(params.status)
            .bind(params.published_at)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(ContentPageRecord::from(row))
    }
}
