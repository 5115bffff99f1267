//! Batch aggregation across upstream pages.
//!
//! [`build_batch`] drives an [`OrderSource`] from the first page to the
//! continuation sentinel, normalizing each record as it arrives. Record
//! failures are counted and skipped; page failures abort the batch, because
//! a failed page leaves the pagination state untrustworthy and partially
//! aggregated results must not be exported.

use std::future::Future;
use std::pin::Pin;

use tracing::{debug, warn};

use britecal_core::Batch;

use crate::error::{ExportError, ExportResult};
use crate::normalize::normalize_order;
use crate::raw_order::UpstreamPage;

/// A boxed future, as returned by [`OrderSource`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Default upper bound on pages fetched per batch.
///
/// The upstream contract guarantees termination via the continuation
/// sentinel; this bound exists so an upstream pagination bug degrades into
/// a structured error instead of an endless fetch loop.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// A paged source of raw order records.
///
/// `continuation = None` requests the first page. Each returned page carries
/// the cursor for the next fetch, or `None` when pagination is complete.
/// Implementations hold no pagination state of their own.
pub trait OrderSource: Send + Sync {
    /// Fetches one page of records.
    fn fetch_page<'a>(
        &'a self,
        continuation: Option<&'a str>,
    ) -> BoxFuture<'a, ExportResult<UpstreamPage>>;
}

/// Fetches every page from the source and normalizes the records into a
/// [`Batch`], preserving upstream order across pages.
///
/// # Errors
///
/// - any source failure is propagated immediately, discarding records
///   already collected;
/// - [`ExportError::PaginationLimitExceeded`] when `max_pages` pages did not
///   reach the continuation sentinel;
/// - [`ExportError::EmptyBatch`] when no page returned any record;
/// - [`ExportError::NoValidEvents`] when records came back but none survived
///   normalization.
pub async fn build_batch(source: &dyn OrderSource, max_pages: usize) -> ExportResult<Batch> {
    let mut batch = Batch::new();
    let mut continuation: Option<String> = None;
    let mut pages_fetched = 0usize;
    let mut records_seen = 0usize;

    loop {
        if pages_fetched >= max_pages {
            return Err(ExportError::PaginationLimitExceeded { limit: max_pages });
        }

        let page = source.fetch_page(continuation.as_deref()).await?;
        pages_fetched += 1;
        records_seen += page.records.len();

        for order in &page.records {
            match normalize_order(order) {
                Ok(event) => batch.push(event),
                Err(err) => {
                    warn!(record = err.record_id(), cause = %err, "skipping order");
                    batch.record_skip();
                }
            }
        }

        match page.next {
            Some(token) => continuation = Some(token),
            None => break,
        }
    }

    debug!(
        pages = pages_fetched,
        events = batch.len(),
        skipped = batch.skipped,
        "aggregated batch"
    );

    if records_seen == 0 {
        return Err(ExportError::EmptyBatch);
    }
    if batch.is_empty() {
        return Err(ExportError::NoValidEvents {
            skipped: batch.skipped,
        });
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw_order::{RawEventPayload, RawOrder, RawText, RawTimestamp};
    use std::collections::HashMap;

    /// A canned response for one cursor position.
    enum FakePage {
        Records(Vec<RawOrder>, Option<&'static str>),
        Failure(u16),
    }

    /// In-memory source keyed by continuation token. Lookups are pure, so a
    /// revisited cursor would simply replay the same page (and break the
    /// order assertions below if the aggregator ever looped).
    struct FakeSource {
        pages: HashMap<Option<String>, FakePage>,
    }

    impl FakeSource {
        fn new(pages: Vec<(Option<&str>, FakePage)>) -> Self {
            Self {
                pages: pages
                    .into_iter()
                    .map(|(cursor, page)| (cursor.map(str::to_string), page))
                    .collect(),
            }
        }
    }

    impl OrderSource for FakeSource {
        fn fetch_page<'a>(
            &'a self,
            continuation: Option<&'a str>,
        ) -> BoxFuture<'a, ExportResult<UpstreamPage>> {
            let key = continuation.map(str::to_string);
            Box::pin(async move {
                match self.pages.get(&key) {
                    Some(FakePage::Records(records, next)) => Ok(UpstreamPage {
                        records: records.clone(),
                        next: next.map(str::to_string),
                    }),
                    Some(FakePage::Failure(status)) => Err(ExportError::Upstream {
                        status: *status,
                        body: "denied".to_string(),
                    }),
                    None => panic!("fetch for unexpected cursor {:?}", key),
                }
            })
        }
    }

    fn valid_order(id: &str, title: &str) -> RawOrder {
        RawOrder {
            id: Some(id.to_string()),
            event: Some(RawEventPayload {
                name: Some(RawText {
                    text: Some(title.to_string()),
                    html: None,
                }),
                start: Some(RawTimestamp {
                    utc: Some("2024-09-10T16:00:00Z".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn titleless_order(id: &str) -> RawOrder {
        let mut order = valid_order(id, "ignored");
        order.event.as_mut().unwrap().name = None;
        order
    }

    #[tokio::test]
    async fn concatenates_pages_in_upstream_order() {
        let source = FakeSource::new(vec![
            (
                None,
                FakePage::Records(
                    vec![valid_order("1", "First"), valid_order("2", "Second")],
                    Some("p2"),
                ),
            ),
            (
                Some("p2"),
                FakePage::Records(vec![valid_order("3", "Third")], Some("p3")),
            ),
            (
                Some("p3"),
                FakePage::Records(vec![valid_order("4", "Fourth")], None),
            ),
        ]);

        let batch = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap();
        let titles: Vec<&str> = batch.events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third", "Fourth"]);
        assert_eq!(batch.skipped, 0);
    }

    #[tokio::test]
    async fn skips_bad_records_without_aborting() {
        // Page 1: two valid records; page 2 (final): one missing a title.
        let source = FakeSource::new(vec![
            (
                None,
                FakePage::Records(
                    vec![valid_order("1", "First"), valid_order("2", "Second")],
                    Some("p2"),
                ),
            ),
            (
                Some("p2"),
                FakePage::Records(vec![titleless_order("3")], None),
            ),
        ]);

        let batch = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.skipped, 1);
    }

    #[tokio::test]
    async fn empty_pages_yield_empty_batch_error() {
        let source = FakeSource::new(vec![
            (None, FakePage::Records(vec![], Some("p2"))),
            (Some("p2"), FakePage::Records(vec![], None)),
        ]);

        let err = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap_err();
        assert!(matches!(err, ExportError::EmptyBatch));
    }

    #[tokio::test]
    async fn all_invalid_records_yield_no_valid_events() {
        let source = FakeSource::new(vec![(
            None,
            FakePage::Records(vec![titleless_order("1"), titleless_order("2")], None),
        )]);

        let err = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap_err();
        assert!(matches!(err, ExportError::NoValidEvents { skipped: 2 }));
    }

    #[tokio::test]
    async fn upstream_failure_discards_partial_batch() {
        let source = FakeSource::new(vec![
            (
                None,
                FakePage::Records(vec![valid_order("1", "First")], Some("p2")),
            ),
            (Some("p2"), FakePage::Failure(401)),
        ]);

        let err = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap_err();
        assert!(matches!(err, ExportError::Upstream { status: 401, .. }));
    }

    #[tokio::test]
    async fn runaway_continuation_hits_the_page_bound() {
        // The cursor "again" always hands back another "again".
        let source = FakeSource::new(vec![
            (
                None,
                FakePage::Records(vec![valid_order("1", "First")], Some("again")),
            ),
            (
                Some("again"),
                FakePage::Records(vec![valid_order("2", "More")], Some("again")),
            ),
        ]);

        let err = build_batch(&source, 5).await.unwrap_err();
        assert!(matches!(
            err,
            ExportError::PaginationLimitExceeded { limit: 5 }
        ));
    }

    #[tokio::test]
    async fn single_page_batch() {
        let source = FakeSource::new(vec![(
            None,
            FakePage::Records(vec![valid_order("1", "Only")], None),
        )]);

        let batch = build_batch(&source, DEFAULT_MAX_PAGES).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.events[0].title, "Only");
    }
}
