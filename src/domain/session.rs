//! Unit-of-work contract between the engine and a backing store.
//!
//! A [`SessionProvider`] hands out [`Session`]s. The caller owns the
//! transaction lifecycle on a session: repositories only read and write
//! through a session that already has a transaction in progress.

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Column protected by a store-level uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueKey {
    ShortCode,
    OriginalUrl,
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortCode => write!(f, "short_code"),
            Self::OriginalUrl => write!(f, "original_url"),
        }
    }
}

/// Faults raised by a store while opening sessions, querying or committing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("unique constraint violated on {0}")]
    UniqueViolation(UniqueKey),

    #[error("no transaction in progress on this session")]
    NoTransaction,

    #[error("a transaction is already in progress on this session")]
    TransactionActive,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Returns the violated key if this is a uniqueness failure.
    pub fn unique_violation(&self) -> Option<UniqueKey> {
        match self {
            Self::UniqueViolation(key) => Some(*key),
            _ => None,
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A scoped handle to the store bounding one transaction's reads and writes.
///
/// Dropping a session with a transaction still in progress discards the
/// writes made in it.
#[async_trait]
pub trait Session: Send {
    /// Starts a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::TransactionActive`] if one is already open, or a
    /// store fault if the store cannot start one.
    async fn begin(&mut self) -> StoreResult<()>;

    /// Commits the transaction in progress, making its writes visible to
    /// other sessions.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NoTransaction`] if none is open and
    /// [`StoreError::UniqueViolation`] if a concurrent commit claimed a key
    /// first.
    async fn commit(&mut self) -> StoreResult<()>;

    /// Discards the transaction in progress.
    async fn rollback(&mut self) -> StoreResult<()>;

    /// Whether a transaction is currently open.
    fn in_transaction(&self) -> bool;
}

/// Source of new sessions bound to the configured store.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    type Session: Session;

    /// Opens a new unit of work.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn open(&self) -> StoreResult<Self::Session>;
}
