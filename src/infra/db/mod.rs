//! Postgres-backed repository implementations.

mod categories;
mod content_pages;
mod events;
mod faqs;
mod heroes;
mod posts;
mod settings;
mod util;

pub use util::map_sqlx_error;

use std::sync::Arc;

use sqlx::{
    Postgres, QueryBuilder,
    postgres::{PgPool, PgPoolOptions},
    query,
};

use crate::domain::locale::Locale;
use crate::domain::types::{PostStatus, PostType};

#[derive(Clone)]
pub struct PostgresRepositories {
    pool: Arc<PgPool>,
}

impl PostgresRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        query("SELECT 1").execute(self.pool()).await.map(|_| ())
    }

    fn push_published_scope<'q>(
        qb: &mut QueryBuilder<'q, Postgres>,
        post_type: PostType,
        locale: Locale,
    ) {
        qb.push(" AND p.status = ");
        qb.push_bind(PostStatus::Published);
        qb.push(" AND p.post_type = ");
        qb.push_bind(post_type);
        qb.push(" AND p.locale = ");
        qb.push_bind(locale);
    }
}
