//! In-memory store implementations used by tests and local development.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    BlobStore, DocumentPatch, DocumentQuery, StoreError, TransactionDocument, TransactionStore,
};
use crate::models::TransactionId;

/// Stores transaction documents in a shared in-memory map.
///
/// Documents get a UUIDv4 ID on insert. Queries replicate the ordering and
/// cursor semantics the remote platform provides: `occurred_at` descending
/// with the document ID as a tie-break.
#[derive(Debug, Clone, Default)]
pub struct MemoryTransactionStore {
    documents: Arc<Mutex<HashMap<TransactionId, TransactionDocument>>>,
}

impl MemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored documents, across all users.
    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    /// Whether the store holds no documents.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, document: TransactionDocument) -> Result<TransactionId, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.documents.lock().unwrap().insert(id.clone(), document);

        Ok(id)
    }

    async fn get(&self, id: &str) -> Result<Option<TransactionDocument>, StoreError> {
        Ok(self.documents.lock().unwrap().get(id).cloned())
    }

    async fn query(
        &self,
        query: DocumentQuery,
    ) -> Result<Vec<(TransactionId, TransactionDocument)>, StoreError> {
        let documents = self.documents.lock().unwrap();

        let mut matches: Vec<(TransactionId, TransactionDocument)> = documents
            .iter()
            .filter(|(_, document)| document.user_id == query.user_id)
            .filter(|(_, document)| {
                query
                    .occurred_from
                    .is_none_or(|from| document.occurred_at >= from)
            })
            .filter(|(_, document)| {
                query
                    .occurred_until
                    .is_none_or(|until| document.occurred_at <= until)
            })
            .filter(|(_, document)| {
                query
                    .category
                    .as_ref()
                    .is_none_or(|category| &document.category == category)
            })
            .filter(|(_, document)| query.kind.is_none_or(|kind| document.kind == kind))
            .map(|(id, document)| (id.clone(), document.clone()))
            .collect();

        // Newest first; ties broken by ID so cursor pages stay disjoint.
        matches.sort_by(|(a_id, a), (b_id, b)| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| a_id.cmp(b_id))
        });

        if let Some(cursor) = &query.start_after {
            matches.retain(|(id, document)| {
                document.occurred_at < cursor.occurred_at
                    || (document.occurred_at == cursor.occurred_at && *id > cursor.id)
            });
        }

        matches.truncate(query.limit);

        Ok(matches)
    }

    async fn update(&self, id: &str, patch: DocumentPatch) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().unwrap();
        let document = documents
            .get_mut(id)
            .ok_or_else(|| StoreError::MissingDocument(id.to_owned()))?;

        if let Some(title) = patch.title {
            document.title = title;
        }
        if let Some(description) = patch.description {
            document.description = Some(description);
        }
        if let Some(amount) = patch.amount {
            document.amount = amount;
        }
        if let Some(category) = patch.category {
            document.category = category;
        }
        if let Some(occurred_at) = patch.occurred_at {
            document.occurred_at = occurred_at;
        }
        if let Some(receipt) = patch.receipt {
            document.receipt = Some(receipt);
        }
        if let Some(updated_at) = patch.updated_at {
            document.updated_at = updated_at;
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        // Deleting an unknown ID is a no-op, like the remote platform.
        self.documents.lock().unwrap().remove(id);

        Ok(())
    }
}

/// The URL scheme the in-memory blob store hands out.
const MEMORY_URL_PREFIX: &str = "memory://";

/// Stores uploaded blobs in a shared in-memory map keyed by path.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of stored blobs.
    pub fn blob_count(&self) -> usize {
        self.blobs.lock().unwrap().len()
    }

    /// Whether a blob exists at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.blobs.lock().unwrap().contains_key(path)
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        self.blobs.lock().unwrap().insert(path.to_owned(), bytes);

        Ok(())
    }

    async fn download_url(&self, path: &str) -> Result<String, StoreError> {
        if !self.blobs.lock().unwrap().contains_key(path) {
            return Err(StoreError::Rejected(format!("no blob at {path}")));
        }

        Ok(format!("{MEMORY_URL_PREFIX}{path}"))
    }

    async fn delete(&self, url: &str) -> Result<(), StoreError> {
        let path = url
            .strip_prefix(MEMORY_URL_PREFIX)
            .ok_or_else(|| StoreError::Rejected(format!("not a memory store url: {url}")))?;

        match self.blobs.lock().unwrap().remove(path) {
            Some(_) => Ok(()),
            None => Err(StoreError::Rejected(format!("no blob at {path}"))),
        }
    }
}
