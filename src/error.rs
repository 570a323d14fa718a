//! Defines the crate level error type.

use std::time::Duration;

use crate::stores::StoreError;

/// The errors that may occur in the transaction access layer.
///
/// Every store failure is wrapped in a variant naming the operation that
/// failed, so callers and logs always see what was being attempted alongside
/// the underlying cause.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An empty string was used as a transaction title.
    #[error("transaction title cannot be empty")]
    EmptyTitle,

    /// The document store rejected the new transaction record, even after
    /// the configured retries were exhausted.
    #[error("could not create transaction: {0}")]
    CreateTransaction(StoreError),

    /// A paginated transaction query failed.
    #[error("could not fetch transactions: {0}")]
    ListTransactions(StoreError),

    /// A single-record lookup failed.
    ///
    /// A record that simply does not exist is NOT an error; lookups report
    /// that as an absent result instead.
    #[error("could not fetch transaction: {0}")]
    GetTransaction(StoreError),

    /// The document store rejected a partial update.
    #[error("could not update transaction: {0}")]
    UpdateTransaction(StoreError),

    /// The document store rejected a record deletion.
    #[error("could not delete transaction: {0}")]
    DeleteTransaction(StoreError),

    /// A receipt file could not be stored.
    ///
    /// Raised before any transaction record is written, so a failed upload
    /// never leaves a partial record behind.
    #[error("could not upload receipt: {0}")]
    UploadReceipt(StoreError),

    /// The previous receipt blob could not be removed while replacing it.
    ///
    /// Only the update path raises this; deleting a whole transaction treats
    /// blob cleanup as best-effort instead.
    #[error("could not delete previous receipt: {0}")]
    DeleteReceipt(StoreError),

    /// A bounded create did not complete in time.
    ///
    /// The underlying write is cancelled when the deadline passes, so no
    /// untracked record is left in flight.
    #[error("the operation did not complete within {0:?}")]
    Timeout(Duration),
}
