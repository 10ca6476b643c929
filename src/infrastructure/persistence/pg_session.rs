//! PostgreSQL sessions backed by an sqlx connection pool.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use std::sync::Arc;

use crate::domain::session::{Session, SessionProvider, StoreError, StoreResult, UniqueKey};

/// Name of the unique constraint on `url_shorten.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_shorten_short_code_key";

/// Name of the unique constraint on `url_shorten.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_shorten_original_url_key";

/// Hands out [`PgSession`]s over a shared connection pool.
#[derive(Debug, Clone)]
pub struct PgSessionProvider {
    pool: Arc<PgPool>,
}

impl PgSessionProvider {
    /// Creates a new provider with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionProvider for PgSessionProvider {
    type Session = PgSession;

    async fn open(&self) -> StoreResult<PgSession> {
        if self.pool.is_closed() {
            return Err(StoreError::Unavailable(
                "connection pool is closed".to_string(),
            ));
        }

        Ok(PgSession {
            pool: Arc::clone(&self.pool),
            tx: None,
        })
    }
}

/// A unit of work holding at most one open transaction.
///
/// The connection is checked out of the pool when the transaction begins
/// and returned when it commits or rolls back. sqlx rolls back a
/// transaction that is dropped while still open.
pub struct PgSession {
    pool: Arc<PgPool>,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSession {
    /// Connection of the transaction in progress.
    pub(crate) fn connection(&mut self) -> StoreResult<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or(StoreError::NoTransaction)
    }
}

#[async_trait]
impl Session for PgSession {
    async fn begin(&mut self) -> StoreResult<()> {
        if self.tx.is_some() {
            return Err(StoreError::TransactionActive);
        }

        let tx = self.pool.begin().await.map_err(map_sqlx_error)?;
        self.tx = Some(tx);
        Ok(())
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let tx = self.tx.take().ok_or(StoreError::NoTransaction)?;
        tx.commit().await.map_err(map_sqlx_error)
    }

    async fn rollback(&mut self) -> StoreResult<()> {
        let tx = self.tx.take().ok_or(StoreError::NoTransaction)?;
        tx.rollback().await.map_err(map_sqlx_error)
    }

    fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }
}

/// Maps sqlx errors to store faults.
///
/// Unique violations on the two `url_shorten` constraints become
/// [`StoreError::UniqueViolation`]; pool and transport failures become
/// [`StoreError::Unavailable`].
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    let unique_key = err
        .as_database_error()
        .filter(|db| db.is_unique_violation())
        .and_then(|db| match db.constraint() {
            Some(SHORT_CODE_CONSTRAINT) => Some(UniqueKey::ShortCode),
            Some(ORIGINAL_URL_CONSTRAINT) => Some(UniqueKey::OriginalUrl),
            _ => None,
        });

    if let Some(key) = unique_key {
        return StoreError::UniqueViolation(key);
    }

    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Unavailable(err.to_string()),
        other => StoreError::Database(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_map_to_unavailable() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut),
            StoreError::Unavailable(_)
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed),
            StoreError::Unavailable(_)
        ));
    }

    #[test]
    fn test_other_errors_map_to_database() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound),
            StoreError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
