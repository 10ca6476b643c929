//! In-process store with unit-of-work sessions.
//!
//! Committed rows live in a table shared by every session of a
//! [`MemoryStore`]. A [`MemorySession`] stages its writes and applies them in
//! one step on commit, so uncommitted rows are only visible to the session
//! that wrote them. Both unique keys are checked when a row is saved and
//! again at commit time.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::domain::session::{Session, SessionProvider, StoreError, StoreResult, UniqueKey};

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    by_short_code: HashMap<String, UrlRecord>,
    short_code_by_url: HashMap<String, String>,
}

impl Table {
    fn conflict(&self, record: &UrlRecord) -> Option<UniqueKey> {
        if self.by_short_code.contains_key(record.short_code()) {
            Some(UniqueKey::ShortCode)
        } else if self.short_code_by_url.contains_key(record.original_url()) {
            Some(UniqueKey::OriginalUrl)
        } else {
            None
        }
    }

    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn insert(&mut self, record: UrlRecord) {
        self.short_code_by_url.insert(
            record.original_url().to_string(),
            record.short_code().to_string(),
        );
        self.by_short_code
            .insert(record.short_code().to_string(), record);
    }

    fn get_by_original_url(&self, original_url: &str) -> Option<&UrlRecord> {
        self.short_code_by_url
            .get(original_url)
            .and_then(|code| self.by_short_code.get(code))
    }
}

/// Shared in-memory table of URL records.
///
/// Cloning is cheap; clones share the same table.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    table: Arc<Mutex<Table>>,
    closed: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory store");
        Self::default()
    }

    /// Stops handing out sessions. Sessions already open keep working.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        lock(&self.table).by_short_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock(table: &Mutex<Table>) -> MutexGuard<'_, Table> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl SessionProvider for MemoryStore {
    type Session = MemorySession;

    async fn open(&self) -> StoreResult<MemorySession> {
        if self.is_closed() {
            return Err(StoreError::Unavailable("memory store is closed".to_string()));
        }

        Ok(MemorySession {
            table: Arc::clone(&self.table),
            staged: None,
        })
    }
}

/// Unit of work over a [`MemoryStore`].
///
/// `staged` is `Some` while a transaction is open and holds the rows written
/// in it.
#[derive(Debug)]
pub struct MemorySession {
    table: Arc<Mutex<Table>>,
    staged: Option<Vec<UrlRecord>>,
}

impl MemorySession {
    fn staged(&self) -> StoreResult<&[UrlRecord]> {
        self.staged.as_deref().ok_or(StoreError::NoTransaction)
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn begin(&mut self) -> StoreResult<()> {
        if self.staged.is_some() {
            return Err(StoreError::TransactionActive);
        }
        self.staged = Some(Vec::new());
        Ok(())
    }

    async fn commit(&mut self) -> StoreResult<()> {
        let staged = self.staged.take().ok_or(StoreError::NoTransaction)?;
        let mut table = lock(&self.table);

        // All or nothing: a row claimed by a concurrent commit aborts the batch.
        if let Some(key) = staged.iter().find_map(|record| table.conflict(record)) {
            return Err(StoreError::UniqueViolation(key));
        }

        for record in staged {
            table.insert(record);
        }
        Ok(())
    }

    async fn rollback(&mut self) -> StoreResult<()> {
        self.staged
            .take()
            .map(|_| ())
            .ok_or(StoreError::NoTransaction)
    }

    fn in_transaction(&self) -> bool {
        self.staged.is_some()
    }
}

/// Repository over a [`MemoryStore`] session.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryUrlRepository;

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    type Session = MemorySession;

    async fn find_by_short_code(
        &self,
        short_code: &str,
        session: &mut MemorySession,
    ) -> StoreResult<Option<UrlRecord>> {
        if let Some(record) = session
            .staged()?
            .iter()
            .find(|r| r.short_code() == short_code)
        {
            return Ok(Some(record.clone()));
        }

        Ok(lock(&session.table).by_short_code.get(short_code).cloned())
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
        session: &mut MemorySession,
    ) -> StoreResult<Option<UrlRecord>> {
        if let Some(record) = session
            .staged()?
            .iter()
            .find(|r| r.original_url() == original_url)
        {
            return Ok(Some(record.clone()));
        }

        Ok(lock(&session.table)
            .get_by_original_url(original_url)
            .cloned())
    }

    async fn save(&self, record: &UrlRecord, session: &mut MemorySession) -> StoreResult<()> {
        let staged = session.staged.as_mut().ok_or(StoreError::NoTransaction)?;

        if staged.iter().any(|r| r.short_code() == record.short_code()) {
            return Err(StoreError::UniqueViolation(UniqueKey::ShortCode));
        }
        if staged
            .iter()
            .any(|r| r.original_url() == record.original_url())
        {
            return Err(StoreError::UniqueViolation(UniqueKey::OriginalUrl));
        }

        let mut table = lock(&session.table);
        if let Some(key) = table.conflict(record) {
            return Err(StoreError::UniqueViolation(key));
        }
        let id = table.next_id();
        drop(table);

        staged.push(record.clone().with_id(id));
        Ok(())
    }
}
