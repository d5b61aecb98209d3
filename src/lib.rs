//! Multi-assert runs a list of checks and reports *every* failure instead of
//! stopping at the first one.
//!
//! A test that asserts five independent things usually tells you about the
//! first broken one only. Fix it, rerun, find the second, and so on.
//! Multi-assert runs all of them and returns one [AssertionError] that lists
//! each failure together with a few lines of its stack trace.
//!
//! ## Sequential Checks
//!
//! A check is a closure returning `Result<(), E>` where `E` implements
//! [FailureRecord]. Checks run in order and failures are reported in order:
//! ```
//! use multi_assert::{multi_assert, Failure};
//!
//! fn expect_eq(left: i32, right: i32) -> Result<(), Failure> {
//!     if left == right {
//!         Ok(())
//!     } else {
//!         Err(Failure::new(format!("expected {} to equal {}", left, right)))
//!     }
//! }
//!
//! let checks: Vec<fn() -> Result<(), Failure>> = vec![
//!     || expect_eq(1, 2),
//!     || expect_eq(3, 3),
//!     || expect_eq(3, 4),
//! ];
//! let err = multi_assert(checks).unwrap_err();
//! assert_eq!(err.fragments().len(), 2);
//! ```
//!
//! Closures of different types go through the [MultiAssert] builder, which
//! also accepts plain `assert!`-style checks that panic:
//! ```
//! use multi_assert::MultiAssert;
//!
//! let name = "James";
//! let res = MultiAssert::new()
//!     .assert(|| assert!(name.is_empty(), "expected 'James' to be empty"))
//!     .assert(|| assert_eq!(name, "James"))
//!     .run();
//! assert!(res.is_err());
//! ```
//!
//! ## Asynchronous Checks
//!
//! [multi_assert_async] starts every check at once and waits until all of
//! them settle. Failures are reported in the order they *settled*, so a fast
//! failing check is listed before a slow one even if it comes later in the
//! list. [multi_assert_parallel] does the same with one tokio task per check.
//!
//! ## Report Format
//!
//! The message of the combined error, split on newlines, looks like this for
//! two failures. Traces shorter than the excerpt are padded with blank lines,
//! so headlines always land on the same lines:
//! ```text
//! 0
//! 1
//! 2       MultipleAssertionError: expected 1 to equal 2
//! 3     <trace line 1>
//! 4     <trace line 2>
//! 5     <trace line 3>
//! 6
//! 7       MultipleAssertionError: expected 3 to equal 4
//! 8     ...
//! ```
//! The label of each failure has `AssertionError` replaced with
//! `MultipleAssertionError`; the combined error itself is still named
//! `AssertionError`. Headlines are red and trace lines grey unless colours are
//! turned off through [Config].
//!
//! ## Configuration
//!
//! [Config] can be read from a TOML file or from the `MULTI_ASSERT_COLOR` and
//! `MULTI_ASSERT_EXCERPT_LINES` environment variables, and is passed to the
//! `*_with` functions or the builders' `with_config`.
pub mod cli;
pub mod config;
pub mod errors;
pub mod executor;
pub mod failure;
pub mod printer;

pub use config::Config;
pub use errors::AssertionError;
pub use executor::{
    multi_assert, multi_assert_async, multi_assert_async_with,
    multi_assert_parallel, multi_assert_parallel_with, multi_assert_with,
    AsyncCheck, Check, MultiAssert, MultiAssertAsync,
};
pub use failure::{Failure, FailureRecord};
pub use printer::{build_message, Fragment};
