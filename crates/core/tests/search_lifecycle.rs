//! Search lifecycle integration tests.
//!
//! These tests drive the `App` container against a mock catalog:
//! idle -> searching -> populated/empty/errored, pagination, and the
//! handling of responses that arrive after a newer search or a clear.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{
    testing::{fixtures, MockCatalog, RecordedQuery},
    App, CatalogError, FailureKind, MemoryStore, SearchError, SearchMode, SearchOutcome,
    SearchStatus,
};

struct TestHarness {
    catalog: MockCatalog,
    app: App,
}

impl TestHarness {
    fn new() -> Self {
        let catalog = MockCatalog::new();
        let app = App::new(
            Arc::new(catalog.clone()),
            Arc::new(MemoryStore::new()),
            3,
        );
        Self { catalog, app }
    }
}

fn completed(outcome: SearchOutcome) -> marquee_core::SearchSession {
    match outcome {
        SearchOutcome::Completed(session) => session,
        other => panic!("Expected a completed search, got {:?}", other),
    }
}

#[tokio::test]
async fn test_short_query_is_rejected_without_request() {
    let h = TestHarness::new();

    let result = h.app.search("Up", 1).await;

    assert_eq!(result, Err(SearchError::QueryTooShort { min: 3, actual: 2 }));
    assert_eq!(h.catalog.query_count().await, 0);
    assert_eq!(h.app.session().status(), SearchStatus::Idle);
}

#[tokio::test]
async fn test_blank_query_is_skipped() {
    let h = TestHarness::new();

    assert_eq!(h.app.search("   ", 1).await, Ok(SearchOutcome::Skipped));
    assert_eq!(h.catalog.query_count().await, 0);
}

#[tokio::test]
async fn test_title_search_populates_results() {
    let h = TestHarness::new();
    h.catalog
        .set_page(
            "Inception",
            1,
            vec![fixtures::movie("tt1375666", "Inception", "2010")],
            1,
        )
        .await;

    let session = completed(h.app.search("Inception", 1).await.unwrap());

    assert_eq!(session.status(), SearchStatus::Populated);
    assert_eq!(session.total_count(), 1);
    assert_eq!(session.items()[0].id, "tt1375666");
    assert!(!session.has_more());
    assert_eq!(h.app.recent_queries(), vec!["inception".to_string()]);
}

#[tokio::test]
async fn test_no_match_sets_error() {
    let h = TestHarness::new();

    let session = completed(h.app.search("xyzxyzxyz-nomatch", 1).await.unwrap());

    assert_eq!(session.status(), SearchStatus::Empty);
    assert!(session.items().is_empty());
    let failure = session.error().expect("failure should be recorded");
    assert_eq!(failure.kind, FailureKind::NotFound);
    assert!(failure.message.contains("xyzxyzxyz-nomatch"));
    assert!(h.app.recent_queries().is_empty());
}

#[tokio::test]
async fn test_identifier_query_fetches_by_id() {
    let h = TestHarness::new();
    h.catalog
        .add_details(fixtures::detailed_movie("tt3896198", "Guardians of the Galaxy Vol. 2", "2017"))
        .await;

    let session = completed(h.app.search("tt3896198", 4).await.unwrap());

    assert_eq!(session.mode(), SearchMode::Identifier);
    assert_eq!(session.page(), 1);
    assert_eq!(session.total_count(), 1);
    assert!(session.items()[0].has_details());
    assert_eq!(
        h.catalog.recorded_queries().await,
        vec![RecordedQuery::FetchById {
            id: "tt3896198".to_string()
        }]
    );
}

#[tokio::test]
async fn test_load_more_appends_until_exhausted() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Star", 1, fixtures::movies("Star", 1, 10), 15)
        .await;
    h.catalog
        .set_page("Star", 2, fixtures::movies("Star", 11, 5), 15)
        .await;

    let first = completed(h.app.search("Star", 1).await.unwrap());
    assert_eq!(first.items().len(), 10);
    assert!(first.has_more());

    let second = completed(h.app.load_more().await);
    assert_eq!(second.items().len(), 15);
    assert_eq!(second.page(), 2);
    assert!(!second.has_more());

    assert_eq!(h.app.load_more().await, SearchOutcome::Skipped);
    assert_eq!(h.catalog.query_count().await, 2);
}

#[tokio::test]
async fn test_load_all_pages_with_repeated_items_keeps_results() {
    let h = TestHarness::new();
    h.catalog
        .set_page(
            "Star",
            1,
            vec![
                fixtures::movie("tt0000001", "Star 1", "2001"),
                fixtures::movie("tt0000002", "Star 2", "2002"),
            ],
            3,
        )
        .await;
    h.catalog
        .set_page(
            "Star",
            2,
            vec![
                fixtures::movie("tt0000002", "Star 2", "2002"),
                fixtures::movie("tt0000003", "Star 3", "2003"),
            ],
            4,
        )
        .await;

    let mut session = completed(h.app.search("Star", 1).await.unwrap());
    while session.has_more() {
        match h.app.load_more().await {
            SearchOutcome::Completed(next) => session = next,
            other => panic!("Unexpected outcome {:?}", other),
        }
    }

    assert_eq!(session.status(), SearchStatus::Populated);
    assert_eq!(session.items().len(), 3);
    assert!(session.error().is_none());
    assert_eq!(
        h.catalog.recorded_queries().await,
        vec![
            RecordedQuery::SearchByTerm {
                term: "Star".to_string(),
                page: 1
            },
            RecordedQuery::SearchByTerm {
                term: "Star".to_string(),
                page: 2
            },
        ]
    );
}

#[tokio::test]
async fn test_load_more_after_last_page_number_is_skipped() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Star", u32::MAX, fixtures::movies("Star", 1, 1), u32::MAX)
        .await;

    let session = completed(h.app.search("Star", u32::MAX).await.unwrap());
    assert_eq!(session.page(), u32::MAX);
    assert_eq!(h.app.load_more().await, SearchOutcome::Skipped);
    assert_eq!(h.app.session().items().len(), 1);
}

#[tokio::test]
async fn test_new_search_replaces_results() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Alien", 1, fixtures::movies("Alien", 1, 3), 3)
        .await;
    h.catalog
        .set_page("Heat", 1, vec![fixtures::movie("tt0113277", "Heat", "1995")], 1)
        .await;

    h.app.search("Alien", 1).await.unwrap();
    let session = completed(h.app.search("Heat", 1).await.unwrap());

    assert_eq!(session.query(), "Heat");
    assert_eq!(session.items().len(), 1);
    assert_eq!(
        h.app.recent_queries(),
        vec!["heat".to_string(), "alien".to_string()]
    );
}

#[tokio::test]
async fn test_upstream_failure_is_retryable() {
    let h = TestHarness::new();
    h.catalog
        .set_next_error(CatalogError::Upstream {
            status: Some(503),
            message: "Service Unavailable".to_string(),
        })
        .await;

    let session = completed(h.app.search("Inception", 1).await.unwrap());

    assert_eq!(session.status(), SearchStatus::Errored);
    assert!(session.error().unwrap().kind.is_retryable());
    assert_eq!(session.page(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Alien", 1, fixtures::movies("Alien", 1, 2), 2)
        .await;
    h.catalog
        .set_delay("Alien", Duration::from_millis(300))
        .await;
    h.catalog
        .set_page("Aliens", 1, fixtures::movies("Aliens", 100, 1), 1)
        .await;
    h.catalog
        .set_delay("Aliens", Duration::from_millis(10))
        .await;

    let (first, second) = tokio::join!(h.app.search("Alien", 1), async {
        tokio::time::sleep(Duration::from_millis(5)).await;
        h.app.search("Aliens", 1).await
    });

    assert_eq!(first, Ok(SearchOutcome::Superseded));
    let session = completed(second.unwrap());
    assert_eq!(session.query(), "Aliens");
    assert_eq!(session.items().len(), 1);

    // The slow response never lands, even once its delay has elapsed.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(h.app.session().query(), "Aliens");
    assert_eq!(h.app.recent_queries(), vec!["aliens".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_response_after_clear_is_discarded() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Inception", 1, fixtures::movies("Inception", 1, 1), 1)
        .await;
    h.catalog
        .set_delay("Inception", Duration::from_millis(200))
        .await;

    let (outcome, _) = tokio::join!(h.app.search("Inception", 1), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        h.app.clear_search();
    });

    assert_eq!(outcome, Ok(SearchOutcome::Superseded));
    let session = h.app.session();
    assert_eq!(session.status(), SearchStatus::Idle);
    assert!(session.items().is_empty());
    assert!(h.app.recent_queries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_reports_searching_while_in_flight() {
    let h = TestHarness::new();
    h.catalog
        .set_page("Heat", 1, vec![fixtures::movie("tt0113277", "Heat", "1995")], 1)
        .await;
    h.catalog.set_delay("Heat", Duration::from_millis(100)).await;

    let (outcome, observed) = tokio::join!(h.app.search("Heat", 1), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        h.app.session().status()
    });

    assert_eq!(observed, SearchStatus::Searching);
    assert_eq!(completed(outcome.unwrap()).status(), SearchStatus::Populated);
}
