//! Property-based tests for window walking

use std::collections::HashSet;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::executor::block_on;
use history_pager::clock::FixedClock;
use history_pager::config::PagerConfig;
use history_pager::{Page, PageFetcher, PageRequest, PaginationEngine, PaginationState};
use proptest::prelude::*;

const NOW: i64 = 1_000_000;

/// Keyset backend over bare timestamps; may withhold the cursor on any call
struct Timeline {
    timestamps: Vec<i64>,
    drop_cursor: Vec<bool>,
    requests: Mutex<Vec<PageRequest<()>>>,
}

#[async_trait]
impl PageFetcher for Timeline {
    type Options = ();
    type Record = i64;
    type Error = Infallible;

    async fn fetch(&self, request: PageRequest<()>) -> Result<Page<i64>, Infallible> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };
        let before = request.cursor.parse::<i64>().ok();
        let items: Vec<i64> = self
            .timestamps
            .iter()
            .copied()
            .filter(|ts| *ts >= request.page_min_updated_at)
            .filter(|ts| before.map_or(true, |b| *ts < b))
            .take(request.page_size as usize)
            .collect();
        let cursor = if self.drop_cursor.get(call).copied().unwrap_or(false) {
            String::new()
        } else {
            items.last().map(|ts| ts.to_string()).unwrap_or_default()
        };
        Ok(Page::new(items, cursor))
    }
}

fn walk(
    timestamps: Vec<i64>,
    drop_cursor: Vec<bool>,
    config: PagerConfig,
    calls: usize,
) -> (Vec<PageRequest<()>>, Vec<usize>, Vec<i64>) {
    let mut timestamps = timestamps;
    timestamps.sort_unstable_by(|a, b| b.cmp(a));
    timestamps.dedup();
    let timeline = Arc::new(Timeline {
        timestamps,
        drop_cursor,
        requests: Mutex::new(Vec::new()),
    });
    let engine =
        PaginationEngine::with_clock(timeline.clone(), (), config, Arc::new(FixedClock(NOW)))
            .unwrap();

    let mut returned = Vec::new();
    let mut records = Vec::new();
    let mut state: Option<PaginationState> = None;
    for _ in 0..calls {
        let page = match block_on(engine.fetch_page(state.as_ref())) {
            Ok(page) => page,
            Err(never) => match never {},
        };
        returned.push(page.records.len());
        records.extend(page.records.iter().copied());
        match page.next.state() {
            Some(next) => state = Some(next.clone()),
            None => break,
        }
    }

    let requests = timeline.requests.lock().unwrap().clone();
    (requests, returned, records)
}

fn config_strategy() -> impl Strategy<Value = PagerConfig> {
    (1u64..500, 1u32..8, 1u32..8).prop_map(|(horizon, a, b)| PagerConfig {
        horizon_seconds: horizon,
        first_page_size: a.max(b),
        subsequent_page_size: a.min(b),
        max_windows: 0,
    })
}

/// Page sizes, window movement and cursor carry-forward follow the previous response
#[test]
fn test_request_derivation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(NOW - 3_000..NOW, 0..40),
                prop::collection::vec(any::<bool>(), 0..30),
                config_strategy(),
            ),
            |(timestamps, drop_cursor, config)| {
                let (requests, returned, _) = walk(timestamps, drop_cursor, config, 25);

                prop_assert_eq!(requests[0].page_size, config.first_page_size);
                prop_assert_eq!(requests[0].cursor.as_str(), "");
                prop_assert_eq!(
                    requests[0].page_min_updated_at,
                    NOW - config.horizon_seconds as i64
                );

                for (i, pair) in requests.windows(2).enumerate() {
                    let (current, next) = (&pair[0], &pair[1]);
                    prop_assert_eq!(next.page_size, config.subsequent_page_size);
                    prop_assert!(next.page_min_updated_at <= current.page_min_updated_at);
                    if returned[i] >= current.page_size as usize {
                        prop_assert_eq!(next.page_min_updated_at, current.page_min_updated_at);
                    } else {
                        prop_assert_eq!(
                            next.page_min_updated_at,
                            current.page_min_updated_at - config.horizon_seconds as i64
                        );
                    }
                    if !current.cursor.is_empty() {
                        prop_assert!(!next.cursor.is_empty());
                    }
                }

                Ok(())
            },
        )
        .unwrap();
}

/// With a keyset backend, walking past the oldest record yields every record exactly once
#[test]
fn test_no_loss_or_duplication_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(prop::collection::vec(NOW - 2_000..NOW, 0..30), config_strategy()),
            |(timestamps, config)| {
                let expected: HashSet<i64> = timestamps.iter().copied().collect();
                // Enough calls to cover every record plus every window back to the oldest one
                let windows = 2_000 / config.horizon_seconds as usize + 2;
                let calls = expected.len() + windows + 1;
                let (_, _, records) = walk(timestamps, Vec::new(), config, calls);

                let seen: HashSet<i64> = records.iter().copied().collect();
                prop_assert_eq!(seen.len(), records.len());
                prop_assert_eq!(seen, expected);
                Ok(())
            },
        )
        .unwrap();
}

/// A bounded session stops after exactly `max_windows` windows of empty history
#[test]
fn test_window_bound_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(1u32..20, config_strategy()), |(max_windows, config)| {
            let config = PagerConfig {
                max_windows,
                ..config
            };
            let (requests, _, _) = walk(Vec::new(), Vec::new(), config, 100);
            prop_assert_eq!(requests.len(), max_windows as usize);
            Ok(())
        })
        .unwrap();
}
