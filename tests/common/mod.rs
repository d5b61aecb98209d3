#![allow(dead_code)]

use multi_assert::{Config, Failure};
use std::{fmt::Debug, time::Duration};

/// Reports without colour so that lines can be compared exactly.
pub fn plain() -> Config {
    Config {
        color: false,
        ..Config::default()
    }
}

/// A failure with a fixed five line trace, independent of RUST_BACKTRACE.
pub fn failure(message: impl Into<String>) -> Failure {
    let message = message.into();
    let trace = vec![
        format!("AssertionError: {}", message),
        "at check (tests/common/mod.rs:20:9)".to_string(),
        "at run (src/executor/sequential.rs:44:29)".to_string(),
        "at scenario (tests/scenario.rs:12:5)".to_string(),
        "at harness (libtest/lib.rs:1:1)".to_string(),
    ];
    Failure::with_trace("AssertionError", message, trace)
}

fn show<T: Debug>(value: &T) -> String {
    format!("{:?}", value).replace('"', "'")
}

/// Minimal equality check in the style of the assertion libraries the
/// aggregators are meant to wrap.
pub fn expect_eq<T: PartialEq + Debug>(actual: T, expected: T) -> Result<(), Failure> {
    if actual == expected {
        Ok(())
    } else {
        Err(failure(format!(
            "expected {} to equal {}",
            show(&actual),
            show(&expected)
        )))
    }
}

/// [expect_eq] with whatever trace `Failure::new` captures, which depends on
/// the backtrace settings of the test run.
pub fn expect_eq_captured<T: PartialEq + Debug>(
    actual: T,
    expected: T,
) -> Result<(), Failure> {
    if actual == expected {
        Ok(())
    } else {
        Err(Failure::new(format!(
            "expected {} to equal {}",
            show(&actual),
            show(&expected)
        )))
    }
}

/// Resolves to `"bluegreen"` after `ms` milliseconds.
pub async fn fetch_status(ms: u64) -> &'static str {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "bluegreen"
}

pub fn lines(message: &str) -> Vec<&str> {
    message.split('\n').collect()
}
