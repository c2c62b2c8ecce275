use async_trait::async_trait;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{HeroesRepo, HeroesWriteRepo, RepoError, UpsertHeroParams};
use crate::domain::entities::HeroRecord;
use crate::domain::locale::Locale;

use super::{PostgresRepositories, map_sqlx_error};

const HERO_COLUMNS: &str = "id, locale, title, subtitle, description, slides, button_text, \
 button_url, background_image, videos, created_at";

#[derive(sqlx::FromRow)]
struct HeroRow {
    id: Uuid,
    locale: Locale,
    title: String,
    subtitle: String,
    description: String,
    slides: Option<JsonValue>,
    button_text: String,
    button_url: String,
    background_image: Option<String>,
    videos: Option<JsonValue>,
    created_at: OffsetDateTime,
}

impl From<HeroRow> for HeroRecord {
    fn from(row: HeroRow) -> Self {
        Self {
            id: row.id,
            locale: row.locale,
            title: row.title,
            subtitle: row.subtitle,
            description: row.description,
            slides: row.slides,
            button_text: row.button_text,
            button_url: row.button_url,
            background_image: row.background_image,
            videos: row.videos,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl HeroesRepo for PostgresRepositories {
    async fn list_heroes(&self, locale: Locale) -> Result<Vec<HeroRecord>, RepoError> {
        let sql =
            format!("SELECT {HERO_COLUMNS} FROM heroes WHERE locale = $1 ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, HeroRow>(&sql)
            .bind(locale)
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(HeroRecord::from).collect())
    }
}

#[async_trait]
impl HeroesWriteRepo for PostgresRepositories {
    async fn upsert_hero(&self, params: UpsertHeroParams) -> Result<HeroRecord, RepoError> {
        // Readers take the newest hero per locale, so the upsert targets that
        // row and only inserts when the locale has none yet.
        let update_sql = format!(
            "UPDATE heroes SET title = $2, subtitle = $3, description = $4, slides = $5, \
             button_text = $6, button_url = $7, background_image = $8, videos = $9 \
             WHERE id = (SELECT id FROM heroes WHERE locale = $1 ORDER BY created_at DESC LIMIT 1) \
             RETURNING {HERO_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, HeroRow>(&update_sql)
            .bind(params.locale)
            .bind(&params.title)
            .bind(&params.subtitle)
            .bind(&params.description)
            .bind(&params.slides)
            .bind(&params.button_text)
            .bind(&params.button_url)
            .bind(&params.background_image)
            .bind(&params.videos)
            .fetch_optional(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        if let Some(row) = updated {
            return Ok(HeroRecord::from(row));
        }

        let insert_sql = format!(
            "INSERT INTO heroes (id, locale, title, subtitle, description, slides, button_text, \
             button_url, background_image, videos) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {HERO_COLUMNS}"
        );
        let row = sqlx::query_as::<_, HeroRow>(&insert_sql)
            .bind(Uuid::new_v4())
            .bind(params.locale)
            .bind(&params.title)
            .bind(&params.subtitle)
            .bind(&params.description)
            .bind(&params.slides)
            .bind(&params.button_text)
            .bind(&params.button_url)
            .bind(&params.background_image)
            .bind(&params.videos)
            .fetch_one(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(HeroRecord::from(row))
    }
}
