//! Sample-data generation and bulk seeding for demos and fresh accounts.

use time::{Duration, OffsetDateTime};

use crate::{
    Error,
    models::{TransactionInput, TransactionKind},
    service::TransactionService,
    stores::{BlobStore, TransactionStore},
};

/// How many concurrent creates a seeding batch issues.
const BATCH_SIZE: usize = 10;

/// (category, title) pairs used for generated income records.
const SAMPLE_INCOME: &[(&str, &str)] = &[
    ("Salary", "Monthly salary"),
    ("Freelance", "Web project"),
    ("Investments", "Dividends"),
    ("Sales", "Marketplace sale"),
    ("Freelance", "Consulting"),
];

/// (category, title) pairs used for generated expense records.
const SAMPLE_EXPENSES: &[(&str, &str)] = &[
    ("Food", "Supermarket"),
    ("Transport", "Fuel"),
    ("Health", "Pharmacy"),
    ("Entertainment", "Cinema"),
    ("Bills", "Electricity"),
    ("Food", "Restaurant"),
    ("Shopping", "Clothes"),
    ("Bills", "Internet"),
    ("Transport", "Parking"),
];

const SAMPLE_DESCRIPTIONS: &[&str] = &[
    "Paid by card",
    "Bank transfer",
    "Direct debit",
    "Paid in cash",
];

/// Generate `count` realistic transaction inputs, newest dated `newest`.
///
/// Roughly 30% income and 70% expenses, amounts in cents (income up to
/// 5000.00, expenses up to 2000.00, both at least 5.00), occurrence dates
/// spread over the 90 days before `newest`, no receipts. The output is a
/// pure function of its arguments so tests can assert on it.
pub fn sample_transactions(count: usize, newest: OffsetDateTime) -> Vec<TransactionInput> {
    (0..count)
        .map(|i| {
            let is_income = i % 10 < 3;
            let (category, title) = if is_income {
                SAMPLE_INCOME[i % SAMPLE_INCOME.len()]
            } else {
                SAMPLE_EXPENSES[i % SAMPLE_EXPENSES.len()]
            };

            let (kind, max_amount) = if is_income {
                (TransactionKind::Income, 500_000)
            } else {
                (TransactionKind::Expense, 200_000)
            };
            let amount = 500 + (i as u64).wrapping_mul(7_919) % (max_amount - 500);

            let occurred_at =
                newest - Duration::days((i % 90) as i64) - Duration::minutes(i as i64);

            let mut input = TransactionInput::new(title, amount, kind, category, occurred_at)
                .expect("sample titles are never empty");
            if i % 3 == 0 {
                input = input.description(SAMPLE_DESCRIPTIONS[i % SAMPLE_DESCRIPTIONS.len()]);
            }

            input
        })
        .collect()
}

/// Create `inputs` for `user_id` in batches of ten concurrent writes,
/// awaiting each full batch before starting the next.
///
/// The batching bounds how many writes are in flight against the document
/// store at once. Progress is logged per batch. Returns how many records
/// were created.
///
/// # Errors
/// Returns the first create error encountered; records created by earlier
/// batches (and by other tasks in the failing batch) remain in the store.
pub async fn seed_transactions<S, B>(
    service: &TransactionService<S, B>,
    user_id: &str,
    inputs: Vec<TransactionInput>,
) -> Result<usize, Error>
where
    S: TransactionStore + Clone + 'static,
    B: BlobStore + Clone + 'static,
{
    let total = inputs.len();
    let mut created = 0;
    let mut pending = inputs.into_iter();

    loop {
        let batch: Vec<TransactionInput> = pending.by_ref().take(BATCH_SIZE).collect();
        if batch.is_empty() {
            break;
        }

        let mut tasks = tokio::task::JoinSet::new();
        for input in batch {
            let service = service.clone();
            let user_id = user_id.to_owned();
            tasks.spawn(async move { service.create(&user_id, input).await });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.expect("seeding task panicked")?;
            created += 1;
        }

        tracing::info!("seeded {created}/{total} sample transactions");
    }

    Ok(created)
}

#[cfg(test)]
mod seed_tests {
    use time::macros::datetime;

    use crate::{
        models::TransactionKind,
        service::{TransactionFilter, TransactionService},
        stores::{MemoryBlobStore, MemoryTransactionStore},
    };

    use super::{sample_transactions, seed_transactions};

    #[test]
    fn sample_transactions_are_deterministic() {
        let newest = datetime!(2025-06-01 12:00 UTC);

        let first = sample_transactions(50, newest);
        let second = sample_transactions(50, newest);

        assert_eq!(first, second);
    }

    #[test]
    fn sample_transactions_mix_kinds_and_bound_amounts() {
        let newest = datetime!(2025-06-01 12:00 UTC);

        let inputs = sample_transactions(100, newest);

        let income_count = inputs
            .iter()
            .filter(|input| input.kind == TransactionKind::Income)
            .count();
        assert_eq!(income_count, 30, "want a 30/70 income/expense split");

        for input in &inputs {
            assert!(input.amount >= 500, "amount {} below minimum", input.amount);
            let max = match input.kind {
                TransactionKind::Income => 500_000,
                TransactionKind::Expense => 200_000,
            };
            assert!(input.amount < max, "amount {} above maximum", input.amount);
            assert!(input.occurred_at <= newest);
            assert!(input.occurred_at > newest - time::Duration::days(91));
            assert!(input.receipt_file.is_none(), "samples carry no receipts");
        }
    }

    #[tokio::test]
    async fn seeding_creates_every_record_in_batches() {
        let store = MemoryTransactionStore::new();
        let service = TransactionService::new(store.clone(), MemoryBlobStore::new());
        let inputs = sample_transactions(25, datetime!(2025-06-01 12:00 UTC));

        let created = seed_transactions(&service, "user-1", inputs)
            .await
            .expect("Could not seed transactions");

        assert_eq!(created, 25);
        assert_eq!(store.len(), 25);

        let summary = service
            .summary("user-1", &TransactionFilter::default())
            .await
            .unwrap();
        assert_eq!(summary.count, 25);
        assert_eq!(
            summary.balance,
            summary.total_income as i64 - summary.total_expenses as i64
        );
    }
}
