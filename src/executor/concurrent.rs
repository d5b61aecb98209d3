use super::results::Failures;
use crate::{
    config::Config,
    errors::AssertionError,
    failure::{self, Failure, FailureRecord},
};
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::{cell::RefCell, future::Future, panic::AssertUnwindSafe};
use tracing::trace;

/// A boxed asynchronous check, for lists mixing different closures.
pub type AsyncCheck<'a, E = Failure> =
    Box<dyn FnOnce() -> LocalBoxFuture<'a, Result<(), E>> + 'a>;

/// Start every check at once, wait for all of them to settle, and report all
/// failures at once.
///
/// All checks are polled on the calling task, so they interleave only at
/// their own `.await` points. Failures are listed in the order the checks
/// settled, which is not necessarily input order. There is no timeout: a
/// check that never settles keeps the returned future pending.
pub async fn multi_assert_async<I, F, Fut, E>(
    checks: I,
) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: FailureRecord,
{
    multi_assert_async_with(checks, Config::default()).await
}

/// [multi_assert_async] with an explicit report configuration.
pub async fn multi_assert_async_with<I, F, Fut, E>(
    checks: I,
    config: Config,
) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: FailureRecord,
{
    // Only ever borrowed between two polls, never across an `.await`.
    let failures = RefCell::new(Failures::new(config));

    let launched = checks.into_iter().enumerate().map(|(idx, check)| {
        let failures = &failures;
        let pending = check();
        async move {
            if let Err(err) = pending.await {
                trace!(index = idx, "check settled with a failure");
                failures.borrow_mut().record(&err);
            }
        }
    });
    future::join_all(launched).await;

    failures.into_inner().into_result()
}

/// Builder collecting heterogeneous checks for [multi_assert_async].
///
/// ```
/// use multi_assert::{Failure, MultiAssertAsync};
///
/// # futures::executor::block_on(async {
/// let res = MultiAssertAsync::new()
///     .check(|| async {
///         Err(Failure::new("expected 'bluegreen' to equal 'yellowblue'"))
///     })
///     .assert(|| async { assert_eq!(3, 3) })
///     .run()
///     .await;
/// assert!(res.is_err());
/// # });
/// ```
pub struct MultiAssertAsync<'a, E = Failure> {
    checks: Vec<AsyncCheck<'a, E>>,
    config: Config,
}

impl<'a> MultiAssertAsync<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check that signals failure by panicking. Panics raised while
    /// creating or polling the future are caught and become a [Failure]
    /// whose trace line 1 is the location of the panic.
    pub fn assert<F, Fut>(self, check: F) -> Self
    where
        F: FnOnce() -> Fut + 'a,
        Fut: Future<Output = ()> + 'a,
    {
        failure::install_location_hook();
        self.check(move || {
            AssertUnwindSafe(async move { check().await })
                .catch_unwind()
                .map(|res| res.map_err(Failure::from_caught_panic))
        })
    }
}

impl<'a, E> Default for MultiAssertAsync<'a, E> {
    fn default() -> Self {
        Self {
            checks: Vec::new(),
            config: Config::default(),
        }
    }
}

impl<'a, E: FailureRecord + 'a> MultiAssertAsync<'a, E> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add a check that signals failure by resolving to `Err`.
    pub fn check<F, Fut>(mut self, check: F) -> Self
    where
        F: FnOnce() -> Fut + 'a,
        Fut: Future<Output = Result<(), E>> + 'a,
    {
        self.checks.push(Box::new(move || check().boxed_local()));
        self
    }

    /// Run all checks concurrently on the calling task.
    pub async fn run(self) -> Result<(), AssertionError> {
        multi_assert_async_with(self.checks, self.config).await
    }
}
