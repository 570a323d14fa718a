//! The domain models for transactions and their derived summaries.

mod summary;
mod transaction;

pub use summary::{CategorySummary, TransactionSummary};
pub use transaction::{
    EXPENSE_CATEGORIES, INCOME_CATEGORIES, ReceiptFile, ReceiptRef, Transaction, TransactionId,
    TransactionInput, TransactionKind, TransactionPatch, UserId,
};
