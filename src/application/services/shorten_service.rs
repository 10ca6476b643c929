//! URL shortening and resolution service.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::domain::session::{Session, SessionProvider, StoreError, StoreResult};
use crate::utils::code_generator::{self, CodeGenerator};

/// Default cap on candidate codes drawn for a single shorten call.
pub const DEFAULT_MAX_CODE_ATTEMPTS: usize = 256;

/// Restarts allowed after a store-level unique violation on insert.
const MAX_CONFLICT_RETRIES: usize = 3;

/// Errors surfaced by [`ShortenService`].
#[derive(Debug, Error)]
pub enum ShortenError {
    /// The store could not be reached, or a query or commit failed.
    #[error("{context}")]
    Communication {
        context: String,
        #[source]
        source: StoreError,
    },

    /// Every candidate drawn was already taken.
    #[error("no free short code found after {attempts} attempts")]
    AliasSpaceExhausted { attempts: usize },
}

impl ShortenError {
    fn communication(context: impl Into<String>, source: StoreError) -> Self {
        Self::Communication {
            context: context.into(),
            source,
        }
    }
}

/// Object-safe facade over the shortening engine, shared by the HTTP layer
/// and the admin CLI.
#[async_trait]
pub trait UrlShortener: Send + Sync {
    /// Returns the short code for `original_url`, creating one if needed.
    async fn shorten(&self, original_url: &str) -> Result<String, ShortenError>;

    /// Returns the original URL for `short_code`, or `None` if it was never
    /// issued.
    async fn resolve(&self, short_code: &str) -> Result<Option<String>, ShortenError>;

    /// Checks that a transaction can be opened on the store.
    async fn ping(&self) -> Result<(), ShortenError>;
}

enum Outcome {
    Created(String),
    Reused(String),
}

enum AttemptError {
    Store(StoreError),
    Exhausted(usize),
}

impl From<StoreError> for AttemptError {
    fn from(err: StoreError) -> Self {
        Self::Store(err)
    }
}

/// Service for creating and resolving short codes.
///
/// Every call opens its own session; the service keeps no records between
/// calls. Reads and the insert of one shorten attempt run in a single
/// transaction, and store-level unique constraints settle races between
/// concurrent callers.
pub struct ShortenService<P, R, G> {
    sessions: Arc<P>,
    repository: Arc<R>,
    generator: Arc<G>,
    max_code_attempts: usize,
}

impl<P, R, G> ShortenService<P, R, G>
where
    P: SessionProvider,
    R: UrlRepository<Session = P::Session>,
    G: CodeGenerator,
{
    /// Creates a new shortening service.
    pub fn new(sessions: Arc<P>, repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            sessions,
            repository,
            generator,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Sets the cap on candidate codes drawn per call (at least 1).
    pub fn with_max_code_attempts(mut self, attempts: usize) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Shortens `original_url`.
    ///
    /// # Deduplication
    ///
    /// If the URL was shortened before, the existing code is returned and no
    /// record is written.
    ///
    /// # Code Generation
    ///
    /// Candidates are drawn until one is free, up to the configured cap. If a
    /// concurrent caller commits the same URL or code first, the attempt is
    /// rolled back and rerun in a fresh session.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::AliasSpaceExhausted`] when the cap is reached
    /// and [`ShortenError::Communication`] on any store fault.
    pub async fn shorten(&self, original_url: &str) -> Result<String, ShortenError> {
        let mut restarts = 0;

        loop {
            match self.try_shorten(original_url).await {
                Ok(Outcome::Created(code)) => {
                    info!(short_code = %code, "Shortened URL created");
                    return Ok(code);
                }
                Ok(Outcome::Reused(code)) => {
                    info!(short_code = %code, "Got existing shortened URL");
                    return Ok(code);
                }
                Err(AttemptError::Exhausted(attempts)) => {
                    warn!(attempts, "Gave up looking for a free short code");
                    return Err(ShortenError::AliasSpaceExhausted { attempts });
                }
                Err(AttemptError::Store(err)) => {
                    if let Some(key) = err.unique_violation()
                        && restarts < MAX_CONFLICT_RETRIES
                    {
                        restarts += 1;
                        warn!(%key, restarts, "Insert lost a uniqueness race, retrying");
                        continue;
                    }

                    return Err(ShortenError::communication(
                        format!("Error shortening URL: {original_url}"),
                        err,
                    ));
                }
            }
        }
    }

    /// Looks up the original URL behind `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenError::Communication`] on any store fault. An unknown
    /// code is `Ok(None)`.
    pub async fn resolve(&self, short_code: &str) -> Result<Option<String>, ShortenError> {
        // Codes of any other shape were never issued.
        if !code_generator::is_well_formed(short_code) {
            debug!(short_code, "Malformed short code");
            return Ok(None);
        }

        self.try_resolve(short_code).await.map_err(|err| {
            ShortenError::communication(
                format!("Error getting original URL from queried string: {short_code}"),
                err,
            )
        })
    }

    /// Opens a session and a transaction, then rolls it back.
    pub async fn ping(&self) -> Result<(), ShortenError> {
        let check = async {
            let mut session = self.sessions.open().await?;
            session.begin().await?;
            session.rollback().await?;
            Ok::<_, StoreError>(())
        };

        check
            .await
            .map_err(|err| ShortenError::communication("Error checking store connectivity", err))
    }

    async fn try_shorten(&self, original_url: &str) -> Result<Outcome, AttemptError> {
        let mut session = self.sessions.open().await?;
        session.begin().await?;

        let result = match self.shorten_in(original_url, &mut session).await {
            Ok(outcome) => session
                .commit()
                .await
                .map(|()| outcome)
                .map_err(AttemptError::from),
            Err(err) => Err(err),
        };

        if result.is_err() {
            rollback_quietly(&mut session).await;
        }
        result
    }

    async fn shorten_in(
        &self,
        original_url: &str,
        session: &mut P::Session,
    ) -> Result<Outcome, AttemptError> {
        if let Some(existing) = self
            .repository
            .find_by_original_url(original_url, session)
            .await?
        {
            return Ok(Outcome::Reused(existing.short_code().to_string()));
        }

        let code = self.free_short_code(session).await?;
        let record = UrlRecord::new(original_url, code);
        self.repository.save(&record, session).await?;

        Ok(Outcome::Created(record.short_code().to_string()))
    }

    async fn free_short_code(&self, session: &mut P::Session) -> Result<String, AttemptError> {
        for attempt in 1..=self.max_code_attempts {
            let candidate = self.generator.generate();

            if self
                .repository
                .find_by_short_code(&candidate, session)
                .await?
                .is_none()
            {
                return Ok(candidate);
            }

            debug!(%candidate, attempt, "Short code collision");
        }

        Err(AttemptError::Exhausted(self.max_code_attempts))
    }

    async fn try_resolve(&self, short_code: &str) -> StoreResult<Option<String>> {
        let mut session = self.sessions.open().await?;
        session.begin().await?;

        let found = self
            .repository
            .find_by_short_code(short_code, &mut session)
            .await;
        rollback_quietly(&mut session).await;

        Ok(found?.map(UrlRecord::into_original_url))
    }
}

/// Ends the transaction in progress, if any, logging a failed rollback.
async fn rollback_quietly<S: Session>(session: &mut S) {
    if session.in_transaction()
        && let Err(err) = session.rollback().await
    {
        warn!(error = %err, "Rollback failed");
    }
}

#[async_trait]
impl<P, R, G> UrlShortener for ShortenService<P, R, G>
where
    P: SessionProvider + 'static,
    R: UrlRepository<Session = P::Session> + 'static,
    G: CodeGenerator + 'static,
{
    async fn shorten(&self, original_url: &str) -> Result<String, ShortenError> {
        ShortenService::shorten(self, original_url).await
    }

    async fn resolve(&self, short_code: &str) -> Result<Option<String>, ShortenError> {
        ShortenService::resolve(self, short_code).await
    }

    async fn ping(&self) -> Result<(), ShortenError> {
        ShortenService::ping(self).await
    }
}
