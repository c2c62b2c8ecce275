use async_trait::async_trait;
use sqlx::QueryBuilder;
use uuid::Uuid;

use crate::application::repos::{
    CategoriesRepo, CategoriesWriteRepo, RepoError, UpsertCategoryParams,
};
use crate::domain::entities::CategoryRecord;
use crate::domain::locale::Locale;
use crate::domain::types::PostType;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    slug: String,
    name: String,
    post_type: PostType,
    locale: Locale,
}

impl From<CategoryRow> for CategoryRecord {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            slug: row.slug,
            name: row.name,
            post_type: row.post_type,
            locale: row.locale,
        }
    }
}

#[async_trait]
impl CategoriesRepo for PostgresRepositories {
    async fn list_categories(
        &self,
        post_type: Option<PostType>,
        locale: Locale,
    ) -> Result<Vec<CategoryRecord>, RepoError> {
        let mut qb =
            QueryBuilder::new("SELECT id, slug, name, post_type, locale FROM categories WHERE locale = ");
        qb.push_bind(locale);
        if let Some(post_type) = post_type {
            qb.push(" AND post_type = ");
            qb.push_bind(post_type);
        }
        qb.push(" ORDER BY name ASC, slug ASC ");

        let rows = qb
            .build_query_as::<CategoryRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(CategoryRecord::from).collect())
    }

    async fn find_by_slug(
        &self,
        slug: &str,
        post_type: PostType,
        locale: Locale,
    ) -> Result<Option<CategoryRecord>, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, slug, name, post_type, locale FROM categories \
             WHERE slug = $1 AND post_type = $2 AND locale = $3",
        )
        .bind(slug)
        .bind(post_type)
        .bind(locale)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(CategoryRecord::from))
    }
}

#[async_trait]
impl CategoriesWriteRepo for PostgresRepositories {
    async fn upsert_category(
        &self,
        params: UpsertCategoryParams,
    ) -> Result<CategoryRecord, RepoError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (id, slug, name, post_type, locale) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (slug, post_type, locale) DO UPDATE SET name = EXCLUDED.name \
             RETURNING id, slug, name, post_type, locale",
        )
        .bind(Uuid::new_v4())
        .bind(&params.slug)
        .bind(&params.name)
        .bind(params.post_type)
        .bind(params.locale)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(CategoryRecord::from(row))
    }
}
