//! The transaction access layer: typed operations over the document and blob
//! store backends.
//!
//! Every operation takes the owning user explicitly; the service keeps no
//! per-user or per-request state of its own.

mod aggregate;
mod filter;

pub use filter::{KindFilter, TransactionFilter};

use std::time::Duration;

use time::OffsetDateTime;

use crate::{
    Error,
    models::{ReceiptFile, ReceiptRef, Transaction, TransactionId, TransactionInput, TransactionPatch},
    retry::{RetryPolicy, retry},
    stores::{BlobStore, DocumentPatch, PageCursor, Timestamp, TransactionDocument, TransactionStore},
};

/// One page of a cursor-paginated transaction listing.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The fetched transactions, newest first, after any client-side search
    /// filtering.
    pub transactions: Vec<Transaction>,
    /// Pass this back to [TransactionService::list] to fetch the next page.
    /// Absent when the raw page was empty.
    pub next_cursor: Option<PageCursor>,
    /// Whether another page may exist. Computed from the raw page being
    /// full, BEFORE the search term narrowed it, so a page that filters down
    /// to nothing still reports more data upstream correctly.
    pub has_more: bool,
}

/// Translates typed transaction requests into document and blob store calls.
///
/// Handles timestamp conversion at the store boundary, receipt upload and
/// cleanup, bounded retries on the create path, and cursor pagination. The
/// service is stateless per call and cheap to clone when its backends are.
#[derive(Debug, Clone)]
pub struct TransactionService<S, B> {
    store: S,
    blobs: B,
    retry: RetryPolicy,
}

impl<S, B> TransactionService<S, B>
where
    S: TransactionStore,
    B: BlobStore,
{
    /// Create a service with the default retry policy (3 attempts, linear
    /// backoff from 2 seconds).
    pub fn new(store: S, blobs: B) -> Self {
        Self::with_retry_policy(store, blobs, RetryPolicy::default())
    }

    /// Create a service with a caller-chosen retry policy for the create
    /// path.
    pub fn with_retry_policy(store: S, blobs: B, retry: RetryPolicy) -> Self {
        Self { store, blobs, retry }
    }

    /// Record a new transaction for `user_id` and return its assigned ID.
    ///
    /// When the input carries a receipt file it is uploaded first; an upload
    /// failure aborts the whole operation before any record is written. The
    /// record itself is inserted through the retry policy, so transient
    /// store failures are retried before the last error is surfaced.
    ///
    /// # Errors
    /// Returns [Error::UploadReceipt] if the receipt could not be stored, or
    /// [Error::CreateTransaction] if the insert failed after all attempts.
    pub async fn create(
        &self,
        user_id: &str,
        input: TransactionInput,
    ) -> Result<TransactionId, Error> {
        let TransactionInput {
            title,
            description,
            amount,
            kind,
            category,
            occurred_at,
            receipt_file,
        } = input;

        let receipt = match receipt_file {
            Some(file) => Some(self.upload_receipt(user_id, file).await?),
            None => None,
        };

        let now = Timestamp::from_datetime(OffsetDateTime::now_utc());
        let document = TransactionDocument {
            user_id: user_id.to_owned(),
            title,
            description,
            amount,
            kind,
            category,
            occurred_at: Timestamp::from_datetime(occurred_at),
            receipt,
            created_at: now,
            updated_at: now,
        };

        retry(&self.retry, || self.store.insert(document.clone()))
            .await
            .map_err(Error::CreateTransaction)
    }

    /// [TransactionService::create], bounded by a deadline.
    ///
    /// When `wait` passes before the create finishes, the create future is
    /// dropped: the in-flight write is cancelled rather than left racing on
    /// unobserved.
    ///
    /// # Errors
    /// Returns [Error::Timeout] when the deadline passes, otherwise whatever
    /// [TransactionService::create] returns.
    pub async fn create_with_timeout(
        &self,
        user_id: &str,
        input: TransactionInput,
        wait: Duration,
    ) -> Result<TransactionId, Error> {
        match tokio::time::timeout(wait, self.create(user_id, input)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout(wait)),
        }
    }

    /// Fetch one page of `user_id`'s transactions, newest first.
    ///
    /// `page_size` must be at least 1. Pass the previous page's
    /// `next_cursor` to resume; pass `None` to start from the newest record.
    /// The filter's search term narrows the returned page client side
    /// without affecting the cursor or [TransactionPage::has_more].
    ///
    /// # Errors
    /// Returns [Error::ListTransactions] if the store query fails.
    pub async fn list(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        page_size: usize,
        cursor: Option<PageCursor>,
    ) -> Result<TransactionPage, Error> {
        let query = filter.to_document_query(user_id, page_size, cursor);
        let raw = self
            .store
            .query(query)
            .await
            .map_err(Error::ListTransactions)?;

        let has_more = page_size > 0 && raw.len() == page_size;
        let next_cursor = raw
            .last()
            .map(|(id, document)| PageCursor::after(id, document.occurred_at));

        let transactions = raw
            .into_iter()
            .map(|(id, document)| to_transaction(id, document))
            .filter(|transaction| filter.matches_search(transaction))
            .collect();

        Ok(TransactionPage {
            transactions,
            next_cursor,
            has_more,
        })
    }

    /// Fetch a single transaction by ID.
    ///
    /// A transaction that does not exist is `Ok(None)`, not an error.
    ///
    /// # Errors
    /// Returns [Error::GetTransaction] if the store lookup fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Transaction>, Error> {
        let document = self.store.get(id).await.map_err(Error::GetTransaction)?;

        Ok(document.map(|document| to_transaction(id.to_owned(), document)))
    }

    /// Apply a partial edit to a transaction, stamping `updated_at`.
    ///
    /// When the patch carries a new receipt file, the previous receipt blob
    /// (if any) is deleted first, then the new file is uploaded and the
    /// reference replaced. Blob cleanup failure is fatal here, unlike in
    /// [TransactionService::delete]: the update the user asked for must not
    /// silently half-apply.
    ///
    /// # Errors
    /// Returns [Error::GetTransaction] if the current record could not be
    /// read, [Error::DeleteReceipt] if the previous blob could not be
    /// removed, [Error::UploadReceipt] if the new file could not be stored,
    /// or [Error::UpdateTransaction] if the store rejected the patch.
    pub async fn update(
        &self,
        id: &str,
        user_id: &str,
        patch: TransactionPatch,
    ) -> Result<(), Error> {
        let mut document_patch = DocumentPatch {
            title: patch.title,
            description: patch.description,
            amount: patch.amount,
            category: patch.category,
            occurred_at: patch.occurred_at.map(Timestamp::from_datetime),
            receipt: None,
            updated_at: Some(Timestamp::from_datetime(OffsetDateTime::now_utc())),
        };

        if let Some(file) = patch.receipt_file {
            let current = self.store.get(id).await.map_err(Error::GetTransaction)?;

            if let Some(previous) = current.and_then(|document| document.receipt) {
                self.blobs
                    .delete(&previous.url)
                    .await
                    .map_err(Error::DeleteReceipt)?;
            }

            document_patch.receipt = Some(self.upload_receipt(user_id, file).await?);
        }

        self.store
            .update(id, document_patch)
            .await
            .map_err(Error::UpdateTransaction)
    }

    /// Remove a transaction and, best effort, its receipt blob.
    ///
    /// Blob cleanup failure is logged and swallowed: an orphan blob is
    /// acceptable, failing to delete a transaction the user asked to remove
    /// is not. The record delete always runs after the cleanup attempt.
    ///
    /// # Errors
    /// Returns [Error::GetTransaction] if the record lookup fails, or
    /// [Error::DeleteTransaction] if the record delete fails.
    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        let existing = self.store.get(id).await.map_err(Error::GetTransaction)?;

        if let Some(receipt) = existing.and_then(|document| document.receipt) {
            if let Err(error) = self.blobs.delete(&receipt.url).await {
                tracing::warn!(
                    "could not delete receipt for transaction {id}, leaving orphan blob: {error}"
                );
            }
        }

        self.store
            .delete(id)
            .await
            .map_err(Error::DeleteTransaction)
    }

    /// Upload a receipt file under an owner- and time-namespaced path and
    /// return the stored reference.
    async fn upload_receipt(&self, user_id: &str, file: ReceiptFile) -> Result<ReceiptRef, Error> {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        let file_name = format!("{user_id}_{millis}_{}", file.name);
        let path = format!("receipts/{user_id}/{file_name}");

        self.blobs
            .upload(&path, file.bytes)
            .await
            .map_err(Error::UploadReceipt)?;
        let url = self
            .blobs
            .download_url(&path)
            .await
            .map_err(Error::UploadReceipt)?;

        Ok(ReceiptRef {
            url,
            name: file_name,
        })
    }
}

/// Convert a stored document back into the application model.
fn to_transaction(id: TransactionId, document: TransactionDocument) -> Transaction {
    Transaction {
        id,
        user_id: document.user_id,
        title: document.title,
        description: document.description,
        amount: document.amount,
        kind: document.kind,
        category: document.category,
        occurred_at: document.occurred_at.to_datetime(),
        receipt: document.receipt,
        created_at: document.created_at.to_datetime(),
        updated_at: document.updated_at.to_datetime(),
    }
}
