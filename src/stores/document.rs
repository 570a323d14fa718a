//! Defines the document store trait and the wire-level record types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::models::{ReceiptRef, TransactionId, TransactionKind, UserId};

/// The errors a store backend may report.
///
/// These describe transport and backend failures only. A document that simply
/// does not exist is reported as an absent result by lookups, not as an
/// error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or did not answer in time.
    #[error("the backend is unavailable: {0}")]
    Unavailable(String),

    /// The backend answered but refused the request.
    #[error("the backend rejected the request: {0}")]
    Rejected(String),

    /// An update targeted a document that does not exist.
    #[error("no document with ID {0}")]
    MissingDocument(String),
}

/// The store-native point-in-time representation: whole seconds and
/// nanoseconds since the Unix epoch.
///
/// Application code works in [OffsetDateTime]; conversion happens at every
/// read and write boundary so the store format never leaks further up.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
}

impl Timestamp {
    /// Convert an application date-time into the store representation.
    pub fn from_datetime(value: OffsetDateTime) -> Self {
        Self {
            seconds: value.unix_timestamp(),
            nanos: value.nanosecond(),
        }
    }

    /// Convert back into the application representation.
    pub fn to_datetime(self) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(self.seconds)
            .unwrap_or(OffsetDateTime::UNIX_EPOCH)
            + Duration::nanoseconds(self.nanos as i64)
    }
}

/// A transaction record as the document store holds it.
///
/// The ID is not part of the document; the store assigns it on insert and
/// returns it alongside the document on queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDocument {
    /// The owning user. Never changed after insert.
    pub user_id: UserId,
    /// A short label for the transaction.
    pub title: String,
    /// Optional free-text notes.
    pub description: Option<String>,
    /// The amount in minor currency units.
    pub amount: u64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// A free-text category label.
    pub category: String,
    /// When the transaction happened.
    pub occurred_at: Timestamp,
    /// The attached receipt, if any.
    pub receipt: Option<ReceiptRef>,
    /// When the record was first written.
    pub created_at: Timestamp,
    /// When the record was last changed.
    pub updated_at: Timestamp,
}

/// A partial update to a stored document. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    /// Replace the title.
    pub title: Option<String>,
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the amount.
    pub amount: Option<u64>,
    /// Replace the category.
    pub category: Option<String>,
    /// Replace when the transaction happened.
    pub occurred_at: Option<Timestamp>,
    /// Replace the receipt reference.
    pub receipt: Option<ReceiptRef>,
    /// The new last-changed stamp. Always set by the access layer.
    pub updated_at: Option<Timestamp>,
}

/// The position of the last record of a fetched page.
///
/// Pass it back as `start_after` to resume a query on the record that
/// follows. Treat the contents as opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    pub(crate) occurred_at: Timestamp,
    pub(crate) id: TransactionId,
}

impl PageCursor {
    /// The cursor for the page ending at the given record.
    pub fn after(id: &str, occurred_at: Timestamp) -> Self {
        Self {
            occurred_at,
            id: id.to_owned(),
        }
    }
}

/// Defines how documents should be fetched from [TransactionStore::query].
///
/// All predicates are combined with AND. Results are ordered by `occurred_at`
/// descending, with the document ID as a stable tie-break so that repeated
/// cursor pages never overlap and never skip a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentQuery {
    /// Only documents owned by this user. Every query is owner-scoped.
    pub user_id: UserId,
    /// Only documents with `occurred_at >= occurred_from` (inclusive).
    pub occurred_from: Option<Timestamp>,
    /// Only documents with `occurred_at <= occurred_until` (inclusive).
    pub occurred_until: Option<Timestamp>,
    /// Only documents with exactly this category label.
    pub category: Option<String>,
    /// Only documents of this kind.
    pub kind: Option<TransactionKind>,
    /// Return at most this many documents.
    pub limit: usize,
    /// Resume after this position from a previous page.
    pub start_after: Option<PageCursor>,
}

impl DocumentQuery {
    /// A query for up to `limit` of `user_id`'s documents, newest first,
    /// with no further predicates.
    pub fn for_user(user_id: &str, limit: usize) -> Self {
        Self {
            user_id: user_id.to_owned(),
            occurred_from: None,
            occurred_until: None,
            category: None,
            kind: None,
            limit,
            start_after: None,
        }
    }
}

/// Handles the persistence of transaction documents.
///
/// Implementations wrap a remote document database; the in-memory
/// implementation backs tests. All methods are owner-agnostic except
/// [TransactionStore::query], which is always scoped by the query's
/// `user_id`.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Write a new document and return the ID the store assigned to it.
    async fn insert(&self, document: TransactionDocument) -> Result<TransactionId, StoreError>;

    /// Fetch a single document by ID. Absent documents are `Ok(None)`.
    async fn get(&self, id: &str) -> Result<Option<TransactionDocument>, StoreError>;

    /// Fetch documents matching `query`, newest first, with their IDs.
    async fn query(
        &self,
        query: DocumentQuery,
    ) -> Result<Vec<(TransactionId, TransactionDocument)>, StoreError>;

    /// Apply a partial update to an existing document.
    ///
    /// # Errors
    /// Returns [StoreError::MissingDocument] if `id` does not refer to a
    /// stored document.
    async fn update(&self, id: &str, patch: DocumentPatch) -> Result<(), StoreError>;

    /// Remove a document. Deleting an ID that does not exist is a no-op,
    /// matching the idempotent delete of the backing platform.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

#[cfg(test)]
mod timestamp_tests {
    use time::macros::datetime;

    use super::Timestamp;

    #[test]
    fn converts_to_and_from_datetime() {
        let datetime = datetime!(2025-06-01 12:30:45.5 UTC);

        let got = Timestamp::from_datetime(datetime).to_datetime();

        assert_eq!(got, datetime);
    }

    #[test]
    fn orders_by_seconds_then_nanos() {
        let earlier = Timestamp::from_datetime(datetime!(2025-06-01 12:00:00.1 UTC));
        let later = Timestamp::from_datetime(datetime!(2025-06-01 12:00:00.2 UTC));

        assert!(earlier < later);
    }
}
