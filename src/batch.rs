//! Fan-out/join over a dynamic set of independent async operations.
//!
//! Every item gets its own operation; operations never depend on each other
//! and a failing item never aborts its siblings. The [`BatchReport`] is
//! produced only once every operation has resolved, so "all done" is
//! structural rather than counted.

use std::future::Future;

use futures::future::join_all;

/// How a single item in a batch resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item's work was performed.
    Done,
    /// Nothing to do for this item (e.g. already cached).
    Skipped,
    /// The item failed. The batch keeps running.
    Failed { item: String, reason: String },
}

/// Aggregate result of a joined batch.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub total: usize,
    pub completed: usize,
    pub failures: Vec<(String, String)>,
}

impl BatchReport {
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Run `per_item` for every item and wait for all of them to finish.
///
/// At most `concurrency` operations are in flight at once; within a chunk
/// completion order is arbitrary. Returns only after every item has
/// resolved, with the failures collected in submission order per chunk.
pub async fn join_batch<T, F, Fut>(items: Vec<T>, concurrency: usize, per_item: F) -> BatchReport
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = ItemOutcome>,
{
    let mut report = BatchReport {
        total: items.len(),
        ..BatchReport::default()
    };

    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        let chunk: Vec<T> = items.by_ref().take(concurrency.max(1)).collect();
        let outcomes = join_all(chunk.into_iter().map(&per_item)).await;

        for outcome in outcomes {
            report.completed += 1;
            if let ItemOutcome::Failed { item, reason } = outcome {
                report.failures.push((item, reason));
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_empty_batch_completes_cleanly() {
        let report = join_batch(Vec::<u32>::new(), 4, |_| async { ItemOutcome::Done }).await;
        assert_eq!(report.total, 0);
        assert_eq!(report.completed, 0);
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_every_item_resolves_before_report() {
        let resolved = AtomicUsize::new(0);
        let resolved = &resolved;
        let report = join_batch(vec![1, 2, 3, 4, 5], 2, |_| async move {
            resolved.fetch_add(1, Ordering::SeqCst);
            ItemOutcome::Done
        })
        .await;

        assert_eq!(resolved.load(Ordering::SeqCst), 5);
        assert_eq!(report.completed, report.total);
        assert!(report.all_succeeded());
    }

    #[tokio::test]
    async fn test_one_failure_sets_aggregate_flag_only() {
        let report = join_batch(vec![1, 2, 3], 8, |n| async move {
            if n == 2 {
                ItemOutcome::Failed {
                    item: n.to_string(),
                    reason: "not found".to_string(),
                }
            } else {
                ItemOutcome::Done
            }
        })
        .await;

        // The failing item never stops the others from completing.
        assert_eq!(report.completed, 3);
        assert!(!report.all_succeeded());
        assert_eq!(report.failures, vec![("2".to_string(), "not found".to_string())]);
    }

    #[tokio::test]
    async fn test_skipped_items_count_as_success() {
        let report = join_batch(vec![1, 2], 1, |_| async { ItemOutcome::Skipped }).await;
        assert_eq!(report.completed, 2);
        assert!(report.all_succeeded());
    }
}
