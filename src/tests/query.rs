use std::sync::Arc;

use tokio::sync::Notify;

use super::{MockSource, bulbasaur, charmander};
use crate::{
    pokemon::{Page, Pagination},
    query::{FetchOutcome, ListQuery},
};

#[tokio::test]
async fn test_first_page_fills_results() {
    let source = MockSource::generated(10);
    let query = ListQuery::new(&source, 4);

    let outcome = query.fetch_first_page().await;
    assert_eq!(outcome, FetchOutcome::Fetched { offset: 0, count: 4 });

    let snapshot = query.snapshot().await;
    let ids: Vec<u32> = snapshot.all_results.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert!(snapshot.has_next_page);
    assert!(!snapshot.is_loading_first_page);
    assert!(!snapshot.is_fetching_next_page);
    assert_eq!(snapshot.error, None);
}

#[tokio::test]
async fn test_first_page_is_fetched_once() {
    let source = MockSource::generated(10);
    let query = ListQuery::new(&source, 4);

    query.fetch_first_page().await;
    assert_eq!(query.fetch_first_page().await, FetchOutcome::Skipped);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_pages_are_appended_in_request_order() {
    let source = MockSource::generated(10);
    let query = ListQuery::new(&source, 4);

    query.fetch_first_page().await;
    query.fetch_next_page().await;
    query.fetch_next_page().await;

    let snapshot = query.snapshot().await;
    let ids: Vec<u32> = snapshot.all_results.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());

    // each request starts where the previous one ended
    assert_eq!(source.requests(), vec![(0, 4), (4, 4), (8, 4)]);
}

#[tokio::test]
async fn test_overlapping_fetches_issue_one_request() {
    let source = MockSource::generated(100);
    let query = ListQuery::new(&source, 10);
    query.fetch_first_page().await;

    let (first, second) = tokio::join!(query.fetch_next_page(), query.fetch_next_page());

    assert_eq!(first, FetchOutcome::Fetched { offset: 10, count: 10 });
    assert_eq!(second, FetchOutcome::Skipped);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_fetching_flag_is_visible_while_in_flight() {
    let gate = Arc::new(Notify::new());
    let source = MockSource::generated(100).gated(gate.clone());
    let query = ListQuery::new(&source, 10);

    let (first, _) = tokio::join!(query.fetch_first_page(), async {
        let snapshot = query.snapshot().await;
        assert!(snapshot.is_loading_first_page);
        assert!(!snapshot.is_fetching_next_page);
        gate.notify_one();
    });
    assert_eq!(first, FetchOutcome::Fetched { offset: 0, count: 10 });

    let (next, _) = tokio::join!(query.fetch_next_page(), async {
        let snapshot = query.snapshot().await;
        assert!(snapshot.is_fetching_next_page);
        assert!(!snapshot.is_loading_first_page);
        gate.notify_one();
    });
    assert_eq!(next, FetchOutcome::Fetched { offset: 10, count: 10 });
}

#[tokio::test]
async fn test_last_page_stops_pagination() {
    let source = MockSource::generated(6);
    let query = ListQuery::new(&source, 4);

    query.fetch_first_page().await;
    assert_eq!(
        query.fetch_next_page().await,
        FetchOutcome::Fetched { offset: 4, count: 2 }
    );
    assert!(!query.snapshot().await.has_next_page);

    assert_eq!(query.fetch_next_page().await, FetchOutcome::Skipped);
    assert_eq!(query.fetch_next_page().await, FetchOutcome::Skipped);
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_stored_pagination_follows_total() {
    let inconsistent = Page {
        results: vec![bulbasaur()],
        pagination: Pagination {
            total: 1,
            offset: 0,
            limit: 20,
            has_more: true,
        },
    };
    let source = MockSource::fixed(vec![inconsistent]);
    let query = ListQuery::new(&source, 20);

    query.fetch_first_page().await;
    assert!(!query.snapshot().await.has_next_page);
    assert_eq!(query.fetch_next_page().await, FetchOutcome::Skipped);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_stored_pagination_ignores_reported_has_more() {
    let understated = Page {
        results: vec![bulbasaur(), charmander()],
        pagination: Pagination {
            total: 1000,
            offset: 0,
            limit: 2,
            has_more: false,
        },
    };
    let source = MockSource::fixed(vec![understated]);
    let query = ListQuery::new(&source, 2);

    query.fetch_first_page().await;
    assert!(query.snapshot().await.has_next_page);
}

#[tokio::test]
async fn test_huge_page_size_does_not_overflow() {
    let source = MockSource::generated(3);
    let query = ListQuery::new(&source, u32::MAX);

    query.fetch_first_page().await;

    let snapshot = query.snapshot().await;
    assert_eq!(snapshot.all_results.len(), 3);
    assert!(!snapshot.has_next_page);
    assert_eq!(query.fetch_next_page().await, FetchOutcome::Skipped);
}

#[tokio::test]
async fn test_failed_page_keeps_previous_results() {
    let source = MockSource::generated(100).failing_at(10);
    let query = ListQuery::new(&source, 10);

    query.fetch_first_page().await;
    let outcome = query.fetch_next_page().await;
    assert!(matches!(outcome, FetchOutcome::Failed(_)));

    let snapshot = query.snapshot().await;
    assert_eq!(snapshot.all_results.len(), 10);
    assert!(snapshot.error.is_some());
    assert!(!snapshot.is_fetching_next_page);

    // no retry happens on its own
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_failed_first_page_leaves_empty_list() {
    let source = MockSource::generated(100).failing_at(0);
    let query = ListQuery::new(&source, 10);

    assert!(matches!(
        query.fetch_first_page().await,
        FetchOutcome::Failed(_)
    ));

    let snapshot = query.snapshot().await;
    assert!(snapshot.all_results.is_empty());
    assert!(!snapshot.has_next_page);
    assert!(!snapshot.is_loading_first_page);
}

#[tokio::test]
async fn test_next_page_before_any_page_loads_the_first() {
    let source = MockSource::generated(10);
    let query = ListQuery::new(&source, 5);

    assert_eq!(
        query.fetch_next_page().await,
        FetchOutcome::Fetched { offset: 0, count: 5 }
    );
}

#[tokio::test]
async fn test_page_size_change_restarts_the_list() {
    let source = MockSource::generated(100);
    let query = ListQuery::new(&source, 10);
    query.fetch_first_page().await;
    let before = query.snapshot().await.generation;

    assert!(query.set_page_size(8).await);
    assert!(!query.set_page_size(8).await);

    let snapshot = query.snapshot().await;
    assert!(snapshot.all_results.is_empty());
    assert_eq!(snapshot.page_size, 8);
    assert_ne!(snapshot.generation, before);

    query.fetch_first_page().await;
    assert_eq!(source.requests(), vec![(0, 10), (0, 8)]);
}

#[tokio::test]
async fn test_page_size_change_discards_in_flight_request() {
    let gate = Arc::new(Notify::new());
    let source = MockSource::generated(100).gated(gate.clone());
    let query = ListQuery::new(&source, 10);

    let (outcome, _) = tokio::join!(query.fetch_first_page(), async {
        assert!(query.snapshot().await.is_loading_first_page);
        assert!(query.set_page_size(8).await);
        assert!(!query.snapshot().await.is_loading_first_page);
        gate.notify_one();
    });

    assert_eq!(outcome, FetchOutcome::Discarded);
    let snapshot = query.snapshot().await;
    assert!(snapshot.all_results.is_empty());
    assert!(!snapshot.is_loading_first_page);
    assert!(!snapshot.is_fetching_next_page);

    // the guard was released, the new size is fetched
    let (outcome, _) = tokio::join!(query.fetch_first_page(), async { gate.notify_one() });
    assert_eq!(outcome, FetchOutcome::Fetched { offset: 0, count: 8 });
    assert_eq!(source.requests(), vec![(0, 10), (0, 8)]);
}

#[tokio::test]
async fn test_abandoned_request_is_discarded() {
    let gate = Arc::new(Notify::new());
    let source = MockSource::generated(100).gated(gate.clone());
    let query = ListQuery::new(&source, 10);

    let (outcome, _) = tokio::join!(query.fetch_first_page(), async {
        query.abandon().await;
        gate.notify_one();
    });

    assert_eq!(outcome, FetchOutcome::Discarded);
    let snapshot = query.snapshot().await;
    assert!(snapshot.all_results.is_empty());
    assert!(!snapshot.is_loading_first_page);
}

#[tokio::test]
async fn test_find_looks_across_pages() {
    let first = Page {
        results: vec![bulbasaur()],
        pagination: Pagination::new(2, 0, 1),
    };
    let second = Page {
        results: vec![charmander()],
        pagination: Pagination::new(2, 1, 1),
    };
    let source = MockSource::fixed(vec![first, second]);
    let query = ListQuery::new(&source, 1);

    query.fetch_first_page().await;
    query.fetch_next_page().await;

    assert_eq!(query.find(4).await, Some(charmander()));
    assert_eq!(query.find(999).await, None);
}
