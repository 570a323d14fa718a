//! Defines the transaction model and the inputs used to create and edit it.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::Error;

/// The identifier the document store assigns to a transaction on creation.
///
/// Opaque to the application; unique and immutable once assigned.
pub type TransactionId = String;

/// The identifier of the user a transaction belongs to.
///
/// Set once at creation and never reassigned. Every query is scoped to one
/// owner.
pub type UserId = String;

/// Whether a transaction brings money in or takes money out.
///
/// Fixed at creation; there is deliberately no way to flip a stored
/// transaction between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money earned.
    Income,
    /// Money spent.
    Expense,
}

/// A stored receipt attachment: where to download it and what to call it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptRef {
    /// The download URL returned by the blob store.
    pub url: String,
    /// The display name of the uploaded file.
    pub name: String,
}

/// A receipt file attached to a create or update, before it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptFile {
    /// The original file name, e.g. `groceries.jpg`.
    pub name: String,
    /// The raw file contents.
    pub bytes: Vec<u8>,
}

/// An expense or income recorded by a user.
///
/// Amounts are integer minor currency units (cents) so that sums never
/// accumulate floating-point drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The store-assigned ID of the transaction.
    pub id: TransactionId,
    /// The user that owns this transaction.
    pub user_id: UserId,
    /// A short label for the transaction, e.g. "Groceries".
    pub title: String,
    /// Optional free-text notes.
    pub description: Option<String>,
    /// The amount of money in minor currency units. Never negative.
    pub amount: u64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// A free-text category label, conventionally one of
    /// [INCOME_CATEGORIES] or [EXPENSE_CATEGORIES].
    pub category: String,
    /// When the transaction happened, as supplied by the user. Distinct from
    /// the record metadata timestamps below.
    pub occurred_at: OffsetDateTime,
    /// The attached receipt, if a file was uploaded for this transaction.
    pub receipt: Option<ReceiptRef>,
    /// When the record was first written. Stamped by the access layer.
    pub created_at: OffsetDateTime,
    /// When the record was last changed. Stamped by the access layer.
    pub updated_at: OffsetDateTime,
}

/// The caller-supplied fields for a new transaction.
///
/// Build one with [TransactionInput::new] and chain the optional setters:
///
/// ```ignore
/// let input = TransactionInput::new(
///         "Groceries",
///         5000,
///         TransactionKind::Expense,
///         "Food",
///         occurred_at,
///     )?
///     .description("Weekly shop")
///     .receipt_file(ReceiptFile { name: "receipt.jpg".to_owned(), bytes });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    /// A short label for the transaction. Never empty.
    pub title: String,
    /// Optional free-text notes.
    pub description: Option<String>,
    /// The amount of money in minor currency units.
    pub amount: u64,
    /// Whether this is income or an expense.
    pub kind: TransactionKind,
    /// A free-text category label.
    pub category: String,
    /// When the transaction happened.
    pub occurred_at: OffsetDateTime,
    /// A receipt file to upload alongside the record.
    pub receipt_file: Option<ReceiptFile>,
}

impl TransactionInput {
    /// Create an input with the required fields.
    ///
    /// # Errors
    /// Returns [Error::EmptyTitle] if `title` is empty. Other validation is
    /// the caller's responsibility.
    pub fn new(
        title: &str,
        amount: u64,
        kind: TransactionKind,
        category: &str,
        occurred_at: OffsetDateTime,
    ) -> Result<Self, Error> {
        if title.is_empty() {
            return Err(Error::EmptyTitle);
        }

        Ok(Self {
            title: title.to_owned(),
            description: None,
            amount,
            kind,
            category: category.to_owned(),
            occurred_at,
            receipt_file: None,
        })
    }

    /// Set the free-text description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_owned());
        self
    }

    /// Attach a receipt file to upload with the transaction.
    pub fn receipt_file(mut self, file: ReceiptFile) -> Self {
        self.receipt_file = Some(file);
        self
    }
}

/// A partial edit of an existing transaction.
///
/// Every field is optional; absent fields are left untouched. There is no
/// `kind` field here because a transaction's kind is immutable after
/// creation, and no timestamp fields because the access layer stamps
/// `updated_at` itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// Replace the title.
    pub title: Option<String>,
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the amount, in minor currency units.
    pub amount: Option<u64>,
    /// Replace the category label.
    pub category: Option<String>,
    /// Replace when the transaction happened.
    pub occurred_at: Option<OffsetDateTime>,
    /// Upload a new receipt, replacing (and deleting) any previous one.
    pub receipt_file: Option<ReceiptFile>,
}

/// The suggested category labels for income transactions.
///
/// Suggestions only; `category` stays free text rather than an enum so users
/// can label transactions however they like.
pub const INCOME_CATEGORIES: &[&str] =
    &["Salary", "Freelance", "Investments", "Sales", "Other"];

/// The suggested category labels for expense transactions.
pub const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transport",
    "Housing",
    "Health",
    "Education",
    "Entertainment",
    "Shopping",
    "Bills",
    "Other",
];

#[cfg(test)]
mod transaction_input_tests {
    use time::macros::datetime;

    use crate::Error;

    use super::{ReceiptFile, TransactionInput, TransactionKind};

    #[test]
    fn new_rejects_empty_title() {
        let result = TransactionInput::new(
            "",
            1000,
            TransactionKind::Expense,
            "Food",
            datetime!(2025-06-01 12:00 UTC),
        );

        assert_eq!(result, Err(Error::EmptyTitle));
    }

    #[test]
    fn setters_fill_optional_fields() {
        let input = TransactionInput::new(
            "Groceries",
            5000,
            TransactionKind::Expense,
            "Food",
            datetime!(2025-06-01 12:00 UTC),
        )
        .expect("Could not build input")
        .description("Weekly shop")
        .receipt_file(ReceiptFile {
            name: "receipt.jpg".to_owned(),
            bytes: vec![1, 2, 3],
        });

        assert_eq!(input.description.as_deref(), Some("Weekly shop"));
        assert_eq!(
            input.receipt_file.map(|file| file.name),
            Some("receipt.jpg".to_owned())
        );
    }
}
