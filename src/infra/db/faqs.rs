use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{FaqsRepo, FaqsWriteRepo, RepoError, UpsertFaqParams};
use crate::domain::entities::FaqRecord;
use crate::domain::locale::Locale;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct FaqRow {
    id: Uuid,
    locale: Locale,
    question: String,
    answer: String,
    sort_order: i32,
    created_at: OffsetDateTime,
}

impl From<FaqRow> for FaqRecord {
    fn from(row: FaqRow) -> Self {
        Self {
            id: row.id,
            locale: row.locale,
            question: row.question,
            answer: row.answer,
            sort_order: row.sort_order,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl FaqsRepo for PostgresRepositories {
    async fn list_faqs(&self, locale: Locale) -> Result<Vec<FaqRecord>, RepoError> {
        let rows = sqlx::query_as::<_, FaqRow>(
            "SELECT id, locale, question, answer, sort_order, created_at \
             FROM faqs WHERE locale = $1 \
             ORDER BY sort_order ASC, created_at DESC",
        )
        .bind(locale)
        .fetch_all(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(FaqRecord::from).collect())
    }
}

#[async_trait]
impl FaqsWriteRepo for PostgresRepositories {
    async fn upsert_faq(&self, params: UpsertFaqParams) -> Result<FaqRecord, RepoError> {
        let updated = sqlx::query_as::<_, FaqRow>(
            "UPDATE faqs SET answer = $3, sort_order = $4 \
             WHERE locale = $1 AND question = $2 \
             RETURNING id, locale, question, answer, sort_order, created_at",
        )
        .bind(params.locale)
        .bind(&params.question)
        .bind(&params.answer)
        .bind(params.sort_order)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        if let Some(row) = updated {
            return Ok(FaqRecord::from(row));
        }

        let row = sqlx::query_as::<_, FaqRow>(
            "INSERT INTO faqs (id, locale, question, answer, sort_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, locale, question, answer, sort_order, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(params.locale)
        .bind(&params.question)
        .bind(&params.answer)
        .bind(params.sort_order)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(FaqRecord::from(row))
    }
}
