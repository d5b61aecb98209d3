use super::results::Failures;
use crate::{
    config::Config,
    errors::AssertionError,
    failure::{self, Failure, FailureRecord},
};
use futures::future::{self, FutureExt};
use std::{
    future::Future,
    panic::AssertUnwindSafe,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tracing::{trace, warn};

/// Spawn every check as its own tokio task, wait for all of them, and report
/// all failures at once.
///
/// Unlike [super::multi_assert_async] the checks may run on several worker
/// threads. Recording a failure and reading its position happen under one
/// lock, so positions still count the failures that settled before it.
/// Panics inside a check are caught and reported as failures.
///
/// Must be called from within a tokio runtime.
pub async fn multi_assert_parallel<I, F, Fut, E>(
    checks: I,
) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: FailureRecord + Send + 'static,
{
    multi_assert_parallel_with(checks, Config::default()).await
}

/// [multi_assert_parallel] with an explicit report configuration.
pub async fn multi_assert_parallel_with<I, F, Fut, E>(
    checks: I,
    config: Config,
) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: FailureRecord + Send + 'static,
{
    failure::install_location_hook();
    let failures = Arc::new(Mutex::new(Failures::new(config)));

    let handles = checks
        .into_iter()
        .enumerate()
        .map(|(idx, check)| {
            let failures = Arc::clone(&failures);
            tokio::spawn(async move {
                let outcome = AssertUnwindSafe(async move { check().await })
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        trace!(index = idx, "check settled with a failure");
                        lock(&failures).record(&err);
                    }
                    Err(payload) => {
                        trace!(index = idx, "check panicked");
                        let failure = Failure::from_caught_panic(payload);
                        lock(&failures).record(&failure);
                    }
                }
            })
        })
        .collect::<Vec<_>>();

    for joined in future::join_all(handles).await {
        if let Err(err) = joined {
            warn!("check task did not complete: {}", err);
            lock(&failures).record(&Failure::named("JoinError", err.to_string()));
        }
    }

    let result = lock(&failures).finish();
    result
}

/// The guard is never held across an `.await`. A poisoned lock still holds
/// every failure recorded so far, so it is used as is.
fn lock(failures: &Mutex<Failures>) -> MutexGuard<'_, Failures> {
    failures.lock().unwrap_or_else(PoisonError::into_inner)
}
