//! Summary aggregation over a user's transactions.
//!
//! Summaries reduce the FULL filtered result set by walking every cursor
//! page, so the figures stay exact no matter how many records match.

use crate::{
    Error,
    models::{CategorySummary, TransactionKind, TransactionSummary},
    service::{KindFilter, TransactionFilter, TransactionService},
    stores::{BlobStore, TransactionStore},
};

/// How many records each aggregation fetch pulls per page.
const AGGREGATE_PAGE_SIZE: usize = 500;

impl<S, B> TransactionService<S, B>
where
    S: TransactionStore,
    B: BlobStore,
{
    /// Total income, expenses, balance and record count for `user_id`'s
    /// transactions matching `filter`.
    ///
    /// Sums are exact integer cents; `balance == total_income -
    /// total_expenses` holds by construction. The filter's search term
    /// participates, so the summary matches what a filtered listing shows.
    ///
    /// # Errors
    /// Returns [Error::ListTransactions] if any page fetch fails.
    pub async fn summary(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
    ) -> Result<TransactionSummary, Error> {
        self.summary_with_page_size(user_id, filter, AGGREGATE_PAGE_SIZE)
            .await
    }

    pub(crate) async fn summary_with_page_size(
        &self,
        user_id: &str,
        filter: &TransactionFilter,
        page_size: usize,
    ) -> Result<TransactionSummary, Error> {
        let mut summary = TransactionSummary::default();
        let mut cursor = None;

        loop {
            let page = self.list(user_id, filter, page_size, cursor).await?;

            for transaction in &page.transactions {
                match transaction.kind {
                    TransactionKind::Income => summary.total_income += transaction.amount,
                    TransactionKind::Expense => summary.total_expenses += transaction.amount,
                }
            }
            summary.count += page.transactions.len();

            cursor = page.next_cursor;
            if !page.has_more || cursor.is_none() {
                break;
            }
        }

        summary.balance = summary.total_income as i64 - summary.total_expenses as i64;

        Ok(summary)
    }

    /// Per-category totals for `user_id`'s transactions of one kind,
    /// sorted by descending amount.
    ///
    /// Each entry carries its share of the overall summed amount in percent
    /// (zero when the total is zero). The sort is stable, so categories
    /// with equal amounts keep the order they were first seen in.
    ///
    /// # Errors
    /// Returns [Error::ListTransactions] if any page fetch fails.
    pub async fn category_summary(
        &self,
        user_id: &str,
        kind: TransactionKind,
        filter: &TransactionFilter,
    ) -> Result<Vec<CategorySummary>, Error> {
        self.category_summary_with_page_size(user_id, kind, filter, AGGREGATE_PAGE_SIZE)
            .await
    }

    pub(crate) async fn category_summary_with_page_size(
        &self,
        user_id: &str,
        kind: TransactionKind,
        filter: &TransactionFilter,
        page_size: usize,
    ) -> Result<Vec<CategorySummary>, Error> {
        let filter = TransactionFilter {
            kind: KindFilter::Only(kind),
            ..filter.clone()
        };

        // Grouped in first-seen order; a Vec keeps that order where a map
        // would not, and the handful of categories makes linear lookup fine.
        let mut groups: Vec<CategorySummary> = Vec::new();
        let mut cursor = None;

        loop {
            let page = self.list(user_id, &filter, page_size, cursor).await?;

            for transaction in &page.transactions {
                let group = match groups
                    .iter_mut()
                    .find(|group| group.category == transaction.category)
                {
                    Some(group) => group,
                    None => {
                        groups.push(CategorySummary {
                            category: transaction.category.clone(),
                            amount: 0,
                            count: 0,
                            percentage: 0.0,
                        });
                        groups.last_mut().expect("group just added")
                    }
                };
                group.amount += transaction.amount;
                group.count += 1;
            }

            cursor = page.next_cursor;
            if !page.has_more || cursor.is_none() {
                break;
            }
        }

        let total: u64 = groups.iter().map(|group| group.amount).sum();
        for group in &mut groups {
            group.percentage = if total == 0 {
                0.0
            } else {
                (group.amount as f64 / total as f64) * 100.0
            };
        }

        groups.sort_by(|a, b| b.amount.cmp(&a.amount));

        Ok(groups)
    }
}
