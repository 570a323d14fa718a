//! Contains the traits for the remote backends that persist transactions and
//! receipt files, plus in-memory implementations for tests and local use.
//!
//! The real document database and blob storage service live behind these
//! traits; nothing in this crate assumes a particular vendor.

mod blob;
mod document;
mod memory;

pub use blob::BlobStore;
pub use document::{
    DocumentPatch, DocumentQuery, PageCursor, StoreError, Timestamp, TransactionDocument,
    TransactionStore,
};
pub use memory::{MemoryBlobStore, MemoryTransactionStore};
