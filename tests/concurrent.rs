mod common;

use common::{expect_eq, failure, fetch_status, lines, plain};
use multi_assert::{
    multi_assert_async, multi_assert_async_with, Failure, MultiAssertAsync,
};
use std::{future::Ready, time::Duration};
use tokio::time::{self, Instant};

#[tokio::test]
async fn empty_list_passes() {
    let checks: Vec<fn() -> Ready<Result<(), Failure>>> = Vec::new();
    assert!(multi_assert_async(checks).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn all_passing_checks_pass() {
    let res = MultiAssertAsync::new()
        .check(|| async { expect_eq(fetch_status(300).await, "bluegreen") })
        .check(|| async { expect_eq(3, 3) })
        .run()
        .await;
    assert!(res.is_ok());
}

#[tokio::test(start_paused = true)]
async fn reports_a_single_slow_failure() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .check(|| async { expect_eq(fetch_status(300).await, "yellowblue") })
        .run()
        .await
        .unwrap_err();

    assert!(lines(err.message())[2].contains(
        "MultipleAssertionError: expected 'bluegreen' to equal 'yellowblue'"
    ));
}

#[tokio::test(start_paused = true)]
async fn immediate_failure_settles_before_slow_one() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .check(|| async { expect_eq(fetch_status(300).await, "yellowblue") })
        .check(|| async { expect_eq(3, 3) })
        .check(|| async { expect_eq(3, 4) })
        .run()
        .await
        .unwrap_err();

    let lines = lines(err.message());
    assert!(lines[2].contains("MultipleAssertionError: expected 3 to equal 4"));
    assert!(lines[7].contains(
        "MultipleAssertionError: expected 'bluegreen' to equal 'yellowblue'"
    ));
}

#[tokio::test(start_paused = true)]
async fn failures_are_listed_in_settlement_order() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .check(|| async { expect_eq(fetch_status(500).await, "yellowblue") })
        .check(|| async { expect_eq(fetch_status(100).await, "yellowred") })
        .check(|| async { Ok::<(), Failure>(()) })
        .run()
        .await
        .unwrap_err();

    let messages: Vec<_> =
        err.fragments().iter().map(|frag| frag.message()).collect();
    assert_eq!(
        messages,
        vec![
            "expected 'bluegreen' to equal 'yellowred'",
            "expected 'bluegreen' to equal 'yellowblue'",
        ]
    );
    assert_eq!(err.message().matches("MultipleAssertionError").count(), 2);
}

#[tokio::test(start_paused = true)]
async fn same_duration_failures_keep_input_order() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .check(|| async { expect_eq(fetch_status(300).await, "yellowblue") })
        .check(|| async { expect_eq(3, 3) })
        .check(|| async { expect_eq(fetch_status(300).await, "yellowred") })
        .run()
        .await
        .unwrap_err();

    let lines = lines(err.message());
    assert!(lines[2].contains(
        "MultipleAssertionError: expected 'bluegreen' to equal 'yellowblue'"
    ));
    assert!(lines[7].contains(
        "MultipleAssertionError: expected 'bluegreen' to equal 'yellowred'"
    ));
}

#[tokio::test]
async fn synchronous_failures_keep_input_order() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .check(|| async { expect_eq(1, 2) })
        .check(|| async { expect_eq(3, 3) })
        .check(|| async { expect_eq(3, 4) })
        .run()
        .await
        .unwrap_err();

    let lines = lines(err.message());
    assert!(lines[2].contains("MultipleAssertionError: expected 1 to equal 2"));
    assert!(lines[7].contains("MultipleAssertionError: expected 3 to equal 4"));
}

#[tokio::test(start_paused = true)]
async fn checks_run_concurrently() {
    let start = Instant::now();
    let durations = [300, 300, 300, 300];
    let res = multi_assert_async(durations.iter().map(|&ms| {
        move || async move { expect_eq(fetch_status(ms).await, "bluegreen") }
    }))
    .await;

    assert!(res.is_ok());
    assert!(start.elapsed() < Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn positions_follow_settlement() {
    let delays = [30_u64, 10, 20];
    let err = multi_assert_async_with(
        delays.iter().map(|&ms| {
            move || async move {
                time::sleep(Duration::from_millis(ms)).await;
                Err::<(), _>(failure(format!("slept {}", ms)))
            }
        }),
        plain(),
    )
    .await
    .unwrap_err();

    let settled: Vec<_> = err
        .fragments()
        .iter()
        .map(|frag| (frag.position(), frag.message().to_string()))
        .collect();
    assert_eq!(
        settled,
        vec![
            (0, "slept 10".to_string()),
            (1, "slept 20".to_string()),
            (2, "slept 30".to_string()),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn panicking_assertions_are_captured() {
    let err = MultiAssertAsync::new()
        .with_config(plain())
        .assert(|| async {
            let status = fetch_status(300).await;
            assert!(
                status == "yellowblue",
                "expected 'bluegreen' to equal 'yellowblue'"
            );
        })
        .assert(|| async { assert_eq!(3, 3) })
        .run()
        .await
        .unwrap_err();

    assert_eq!(err.fragments().len(), 1);
    let lines = lines(err.message());
    assert_eq!(
        lines[2],
        "      MultipleAssertionError: expected 'bluegreen' to equal 'yellowblue'"
    );
    assert!(lines[3].starts_with("    at tests/concurrent.rs:"), "{}", lines[3]);
    assert_eq!(lines.len(), 7);
}
