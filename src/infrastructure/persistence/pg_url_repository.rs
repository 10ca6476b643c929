//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;

use super::pg_session::{PgSession, map_sqlx_error};
use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::domain::session::StoreResult;

#[derive(sqlx::FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
}

impl From<UrlRow> for UrlRecord {
    fn from(row: UrlRow) -> Self {
        UrlRecord::restore(row.id, row.original_url, row.short_code)
    }
}

/// PostgreSQL repository for the `url_shorten` table.
///
/// Stateless: every query runs on the connection of the session passed in.
#[derive(Debug, Clone, Copy, Default)]
pub struct PgUrlRepository;

impl PgUrlRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    type Session = PgSession;

    async fn find_by_short_code(
        &self,
        short_code: &str,
        session: &mut PgSession,
    ) -> StoreResult<Option<UrlRecord>> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code
            FROM url_shorten
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(session.connection()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
        session: &mut PgSession,
    ) -> StoreResult<Option<UrlRecord>> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, original_url, short_code
            FROM url_shorten
            WHERE original_url = $1
            "#,
        )
        .bind(original_url)
        .fetch_optional(session.connection()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(UrlRecord::from))
    }

    async fn save(&self, record: &UrlRecord, session: &mut PgSession) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO url_shorten (original_url, short_code)
            VALUES ($1, $2)
            "#,
        )
        .bind(record.original_url())
        .bind(record.short_code())
        .execute(session.connection()?)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}
