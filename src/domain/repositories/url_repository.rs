//! Repository trait for URL record data access.

use crate::domain::entities::UrlRecord;
use crate::domain::session::{Session, StoreResult};
use async_trait::async_trait;

/// Repository interface for URL records.
///
/// Every operation runs inside a session supplied by the caller. The
/// repository never opens a session, begins a transaction or commits one.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(
    test,
    mockall::automock(type Session = crate::infrastructure::persistence::MemorySession;)
)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    type Session: Session;

    /// Finds a record by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlRecord))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Propagates store faults unchanged.
    async fn find_by_short_code(
        &self,
        short_code: &str,
        session: &mut Self::Session,
    ) -> StoreResult<Option<UrlRecord>>;

    /// Finds a record by its original URL.
    ///
    /// Used to reuse the existing code when a URL is shortened again.
    ///
    /// # Errors
    ///
    /// Propagates store faults unchanged.
    async fn find_by_original_url(
        &self,
        original_url: &str,
        session: &mut Self::Session,
    ) -> StoreResult<Option<UrlRecord>>;

    /// Writes a new record within the session's transaction.
    ///
    /// The row is visible to later reads on the same session immediately;
    /// other sessions see it once the caller commits.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::session::StoreError::UniqueViolation`] if the
    /// short code or original URL is already taken.
    async fn save(&self, record: &UrlRecord, session: &mut Self::Session) -> StoreResult<()>;
}
