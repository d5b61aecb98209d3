use super::results::Failures;
use crate::{
    config::Config,
    errors::AssertionError,
    failure::{self, Failure, FailureRecord},
};
use tracing::trace;

/// A boxed synchronous check, for lists mixing different closures.
pub type Check<'a, E = Failure> = Box<dyn FnOnce() -> Result<(), E> + 'a>;

/// Run every check in order and report all failures at once.
///
/// A failing check never stops the checks after it. Returns `Ok(())` when
/// every check passed, otherwise an [AssertionError] listing the failures in
/// input order.
pub fn multi_assert<I, F, E>(checks: I) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Result<(), E>,
    E: FailureRecord,
{
    multi_assert_with(checks, Config::default())
}

/// [multi_assert] with an explicit report configuration.
pub fn multi_assert_with<I, F, E>(
    checks: I,
    config: Config,
) -> Result<(), AssertionError>
where
    I: IntoIterator<Item = F>,
    F: FnOnce() -> Result<(), E>,
    E: FailureRecord,
{
    let mut failures = Failures::new(config);
    for (idx, check) in checks.into_iter().enumerate() {
        if let Err(err) = check() {
            trace!(index = idx, "check failed");
            failures.record(&err);
        }
    }
    failures.into_result()
}

/// Builder collecting heterogeneous checks for [multi_assert].
///
/// ```
/// use multi_assert::MultiAssert;
///
/// let res = MultiAssert::new()
///     .check(|| Err("expected 1 to equal 2".into()))
///     .assert(|| assert_eq!(3, 3))
///     .run();
/// assert!(res.is_err());
/// ```
pub struct MultiAssert<'a, E = Failure> {
    checks: Vec<Check<'a, E>>,
    config: Config,
}

impl<'a> MultiAssert<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check that signals failure by panicking, which is how `assert!`
    /// and friends behave. The panic is caught and becomes a [Failure].
    /// The panic hook still runs, so its message is printed as usual. Trace
    /// line 1 of the failure is the location of the panic.
    pub fn assert<F>(self, check: F) -> Self
    where
        F: FnOnce() + 'a,
    {
        self.check(move || failure::catch_panic(check))
    }
}

impl<'a, E> Default for MultiAssert<'a, E> {
    fn default() -> Self {
        Self {
            checks: Vec::new(),
            config: Config::default(),
        }
    }
}

impl<'a, E: FailureRecord> MultiAssert<'a, E> {
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Add a check that signals failure by returning `Err`.
    pub fn check<F>(mut self, check: F) -> Self
    where
        F: FnOnce() -> Result<(), E> + 'a,
    {
        self.checks.push(Box::new(check));
        self
    }

    /// Run all checks in the order they were added.
    pub fn run(self) -> Result<(), AssertionError> {
        multi_assert_with(self.checks, self.config)
    }
}
