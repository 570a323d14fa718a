//! Centavo is the storage and aggregation core of a personal finance
//! tracker.
//!
//! Users record income and expense transactions, optionally attaching a
//! receipt image, and the library keeps the records in a document store
//! behind the [stores::TransactionStore] trait, with receipt files in a
//! blob store behind [stores::BlobStore]. On top of those seams,
//! [service::TransactionService] provides creation with retry and timeout
//! handling, cursor-based pagination with client-side search, partial
//! updates that manage receipt replacement, and financial summaries
//! computed by streaming over every matching page.
//!
//! All amounts are integer minor currency units (cents); see
//! [models::Transaction].

#![warn(missing_docs)]

mod error;
mod retry;
mod seed;

pub mod models;
pub mod service;
pub mod stores;

pub use error::Error;
pub use retry::RetryPolicy;
pub use seed::{sample_transactions, seed_transactions};
