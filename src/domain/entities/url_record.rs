//! URL record entity pairing an original URL with its short code.

/// A shortened URL mapping.
///
/// Fields are fixed once the value is built. The engine creates records with
/// [`UrlRecord::new`]; the surrogate `id` stays `None` until a store assigns
/// one on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlRecord {
    id: Option<i64>,
    original_url: String,
    short_code: String,
}

impl UrlRecord {
    /// Creates a new, not yet persisted record.
    pub fn new(original_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            id: None,
            original_url: original_url.into(),
            short_code: short_code.into(),
        }
    }

    /// Rebuilds a record materialized from a store row.
    pub fn restore(id: i64, original_url: String, short_code: String) -> Self {
        Self {
            id: Some(id),
            original_url,
            short_code,
        }
    }

    /// Store-assigned surrogate identifier, `None` before insert.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn original_url(&self) -> &str {
        &self.original_url
    }

    pub fn short_code(&self) -> &str {
        &self.short_code
    }

    /// Consumes the record, returning the original URL.
    pub fn into_original_url(self) -> String {
        self.original_url
    }

    /// Returns a copy carrying the id assigned by a store on insert.
    pub(crate) fn with_id(self, id: i64) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
