//! Defines the query filter callers pass to list and summary operations.

use time::OffsetDateTime;

use crate::{
    models::{Transaction, TransactionKind},
    stores::{DocumentQuery, PageCursor, Timestamp},
};

/// Narrows a list or summary to transactions of one kind, or keeps both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    /// Keep income and expenses alike.
    #[default]
    All,
    /// Keep only the given kind.
    Only(TransactionKind),
}

/// Defines which transactions a list or summary operation should cover.
///
/// All predicates are combined with AND. The date bounds, category and kind
/// are pushed down to the document store; `search_term` is applied client
/// side to the fetched page because the store cannot do substring matching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionFilter {
    /// Keep transactions that occurred at or after this time.
    pub start_date: Option<OffsetDateTime>,
    /// Keep transactions that occurred at or before this time.
    pub end_date: Option<OffsetDateTime>,
    /// Keep transactions with exactly this category label.
    pub category: Option<String>,
    /// Keep transactions of this kind.
    pub kind: KindFilter,
    /// Keep transactions whose title, description or category contains this
    /// term, case-insensitively. Applied after the page is fetched, so it
    /// narrows what a page shows without changing pagination accounting.
    pub search_term: Option<String>,
}

impl TransactionFilter {
    /// Build the store-side query for this filter.
    pub(crate) fn to_document_query(
        &self,
        user_id: &str,
        limit: usize,
        start_after: Option<PageCursor>,
    ) -> DocumentQuery {
        DocumentQuery {
            user_id: user_id.to_owned(),
            occurred_from: self.start_date.map(Timestamp::from_datetime),
            occurred_until: self.end_date.map(Timestamp::from_datetime),
            category: self.category.clone(),
            kind: match self.kind {
                KindFilter::All => None,
                KindFilter::Only(kind) => Some(kind),
            },
            limit,
            start_after,
        }
    }

    /// Whether `transaction` passes the client-side search term.
    ///
    /// Always true when no term is set.
    pub(crate) fn matches_search(&self, transaction: &Transaction) -> bool {
        let Some(term) = &self.search_term else {
            return true;
        };
        let term = term.to_lowercase();

        transaction.title.to_lowercase().contains(&term)
            || transaction
                .description
                .as_ref()
                .is_some_and(|description| description.to_lowercase().contains(&term))
            || transaction.category.to_lowercase().contains(&term)
    }
}
