use async_trait::async_trait;
use serde_json::Value as JsonValue;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{RepoError, SettingsRepo, UpsertSettingsParams};
use crate::domain::entities::SiteSettingsRecord;
use crate::domain::locale::Locale;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct SiteSettingsRow {
    id: Uuid,
    locale: Locale,
    site_name: String,
    site_description: String,
    contact_email: String,
    contact_phone: String,
    contact_address: String,
    contact_map_url: Option<String>,
    contact_content: Option<JsonValue>,
    updated_at: OffsetDateTime,
}

impl From<SiteSettingsRow> for SiteSettingsRecord {
    fn from(row: SiteSettingsRow) -> Self {
        Self {
            id: row.id,
            locale: row.locale,
            site_name: row.site_name,
            site_description: row.site_description,
            contact_email: row.contact_email,
            contact_phone: row.contact_phone,
            contact_address: row.contact_address,
            contact_map_url: row.contact_map_url,
            contact_content: row.contact_content,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SettingsRepo for PostgresRepositories {
    async fn find_settings(&self, locale: Locale) -> Result<Option<SiteSettingsRecord>, RepoError> {
        let row = sqlx::query_as::<_, SiteSettingsRow>(
            "SELECT id, locale, site_name, site_description, contact_email, contact_phone, \
             contact_address, contact_map_url, contact_content, updated_at \
             FROM site_settings WHERE locale = $1",
        )
        .bind(locale)
        .fetch_optional(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(SiteSettingsRecord::from))
    }

    async fn upsert_settings(&self, params: UpsertSettingsParams) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO site_settings (id, locale, site_name, site_description, contact_email, \
             contact_phone, contact_address, contact_map_url, contact_content, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now()) \
             ON CONFLICT (locale) DO UPDATE SET \
                site_name = EXCLUDED.site_name, \
                site_description = EXCLUDED.site_description, \
                contact_email = EXCLUDED.contact_email, \
                contact_phone = EXCLUDED.contact_phone, \
                contact_address = EXCLUDED.contact_address, \
                contact_map_url = EXCLUDED.contact_map_url, \
                contact_content = EXCLUDED.contact_content, \
                updated_at = now()",
        )
        .bind(Uuid::new_v4())
        .bind(params.locale)
        .bind(&params.site_name)
        .bind(&params.site_description)
        .bind(&params.contact_email)
        .bind(&params.contact_phone)
        .bind(&params.contact_address)
        .bind(&params.contact_map_url)
        .bind(&params.contact_content)
        .execute(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
