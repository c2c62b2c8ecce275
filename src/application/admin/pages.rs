//! Content-page mutations: structured upsert keyed by slug.

use std::sync::Arc;

use time::OffsetDateTime;

use crate::application::admin::AdminError;
use crate::application::repos::{ContentPagesWriteRepo, UpsertContentPageParams};
use crate::cache::{CacheTag, ContentCache};
use crate::domain::entities::ContentPageRecord;
use crate::domain::pages::ContentPageDefinition;
use crate::domain::types::PostStatus;

#[derive(Clone)]
pub struct AdminContentPageService {
    pages: Arc<dyn ContentPagesWriteRepo>,
    cache: Arc<ContentCache>,
}

impl AdminContentPageService {
    pub fn new(pages: Arc<dyn ContentPagesWriteRepo>, cache: Arc<ContentCache>) -> Self {
        Self { pages, cache }
    }

    pub async fn upsert(
        &self,
        definition: ContentPageDefinition,
        publish: bool,
    ) -> Result<ContentPageRecord, AdminError> {
        definition
            .validate()
            .map_err(|err| AdminError::validation(err.to_string()))?;

        let data = serde_json::to_value(&definition)
            .map_err(|err| AdminError::validation(format!("unencodable definition: {err}")))?;

        let params = UpsertContentPageParams {
            slug: definition.slug.clone(),
            category: definition.category,
            title: definition.hero.title.clone(),
            seo_title: Some(definition.seo.title.clone()),
            seo_description: Some(definition.seo.description.clone()),
            data,
            status: if publish {
                PostStatus::Published
            } else {
                PostStatus::Draft
            },
            published_at: publish.then(OffsetDateTime::now_utc),
        };

        let record = self.pages.upsert_page(params).await?;

        self.cache.invalidate(&CacheTag::ContentPages);
        self.cache.invalidate(&CacheTag::ContentPage {
            slug: record.slug.clone(),
        });
        Ok(record)
    }
}
