//! Integration tests for window walking and cursor handling

use std::collections::HashSet;
use std::sync::Arc;

use history_pager::clock::FixedClock;
use history_pager::config::PagerConfig;
use history_pager::lists::{open_session_with_clock, DeploymentFilterOptions};
use history_pager::ListSession;

use super::test_utils::InMemoryDeployments;

fn small_config() -> PagerConfig {
    PagerConfig {
        horizon_seconds: 100,
        first_page_size: 2,
        subsequent_page_size: 1,
        max_windows: 0,
    }
}

fn session(
    backend: Arc<InMemoryDeployments>,
    config: PagerConfig,
) -> ListSession<Arc<InMemoryDeployments>> {
    open_session_with_clock(
        backend,
        &DeploymentFilterOptions::default(),
        config,
        Arc::new(FixedClock(1000)),
    )
    .unwrap()
}

#[tokio::test]
async fn test_under_full_first_page_moves_to_previous_window() {
    let backend = Arc::new(InMemoryDeployments::at(&[950]));
    let mut session = session(backend.clone(), small_config());

    session.fetch_next_page().await.unwrap();
    session.fetch_next_page().await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[0].page_min_updated_at, 900);
    assert_eq!(requests[0].page_size, 2);
    assert_eq!(requests[1].page_min_updated_at, 800);
    assert_eq!(requests[1].page_size, 1);
}

#[tokio::test]
async fn test_window_and_cursor_rules_hold_across_a_walk() {
    let backend = Arc::new(InMemoryDeployments::at(&[
        990, 980, 950, 870, 860, 850, 840, 700, 420,
    ]));
    let mut session = session(backend.clone(), small_config());

    let mut pages = Vec::new();
    for _ in 0..16 {
        let page = session.fetch_next_page().await.unwrap().unwrap();
        pages.push((page.records.len(), page.page_size));
    }

    let requests = backend.requests();
    assert_eq!(requests[0].page_size, 2);
    assert!(requests[1..].iter().all(|r| r.page_size == 1));

    for (i, pair) in requests.windows(2).enumerate() {
        let (current, next) = (&pair[0], &pair[1]);
        let (returned, requested) = pages[i];
        assert!(next.page_min_updated_at <= current.page_min_updated_at);
        if returned as u32 >= requested {
            assert_eq!(next.page_min_updated_at, current.page_min_updated_at);
        } else {
            assert_eq!(next.page_min_updated_at, current.page_min_updated_at - 100);
        }
        if !current.cursor.is_empty() {
            assert!(!next.cursor.is_empty(), "cursor regressed to empty at request {}", i + 1);
        }
    }
}

#[tokio::test]
async fn test_window_shifts_never_drop_or_duplicate_records() {
    let timestamps = [990, 980, 950, 870, 860, 850, 840, 700, 420];
    let backend = Arc::new(InMemoryDeployments::at(&timestamps));
    let mut session = session(backend, small_config());

    while session
        .next_state()
        .and_then(|s| s.min_updated_at)
        .map_or(true, |min| min >= 400)
    {
        session.fetch_next_page().await.unwrap();
    }

    let ids: Vec<&str> = session.records().map(|d| d.id.as_str()).collect();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), timestamps.len());
    assert_eq!(unique.len(), timestamps.len());
    let order: Vec<i64> = session.records().map(|d| d.updated_at).collect();
    assert_eq!(order, timestamps.to_vec());
}

#[tokio::test]
async fn test_retry_after_failure_repeats_the_same_request() {
    let backend = Arc::new(InMemoryDeployments::at(&[990, 980, 970, 960]));
    backend.fail_request(1);
    let mut session = session(backend.clone(), small_config());

    session.fetch_next_page().await.unwrap();
    let err = session.fetch_next_page().await.unwrap_err();
    assert_eq!(err.0, "request 1 refused");
    session.fetch_next_page().await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[1], requests[2]);
    assert_eq!(session.pages().len(), 2);
}

#[tokio::test]
async fn test_default_bound_stops_an_empty_history() {
    let backend = Arc::new(InMemoryDeployments::at(&[]));
    let config = PagerConfig {
        horizon_seconds: 100,
        ..PagerConfig::default()
    };
    let mut session = session(backend.clone(), config);

    let mut requests = 0;
    while session.fetch_next_page().await.unwrap().is_some() {
        requests += 1;
        assert!(requests <= 12);
    }

    assert_eq!(requests, 12);
    assert!(session.is_exhausted());
    let bounds: Vec<i64> = backend
        .requests()
        .iter()
        .map(|r| r.page_min_updated_at)
        .collect();
    assert_eq!(bounds.first(), Some(&900));
    assert_eq!(bounds.last(), Some(&-200));
}

#[tokio::test]
async fn test_window_shift_does_not_replay_newer_records() {
    let backend = Arc::new(InMemoryDeployments::at(&[990, 870]));
    let mut session = session(backend.clone(), small_config());

    // [990] under-fills the first page of two
    session.fetch_next_page().await.unwrap();
    session.fetch_next_page().await.unwrap();

    let requests = backend.requests();
    assert_eq!(requests[1].page_min_updated_at, 800);
    assert_eq!(requests[1].cursor, "990");
    let ids: Vec<&str> = session.records().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec!["d990", "d870"]);
}
