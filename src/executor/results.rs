use crate::{
    config::Config, errors::AssertionError, failure::FailureRecord,
    printer::Fragment,
};
use tracing::debug;

/// Accumulates the failures of one aggregation run.
///
/// Each failure is turned into a [Fragment] the moment it is recorded, with
/// its position taken from the number of failures already recorded.
#[derive(Debug)]
pub struct Failures {
    config: Config,
    fragments: Vec<Fragment>,
}

impl Failures {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            fragments: Vec::new(),
        }
    }

    /// Record a failure and return the position it was assigned.
    pub fn record<F>(&mut self, failure: &F) -> usize
    where
        F: FailureRecord + ?Sized,
    {
        let position = self.fragments.len();
        let fragment =
            Fragment::build(failure, position, self.config.excerpt_lines);
        debug!(
            position,
            label = fragment.label(),
            "captured failure: {}",
            fragment.message()
        );
        self.fragments.push(fragment);
        position
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Drain the recorded failures into the outcome of the run.
    pub fn finish(&mut self) -> Result<(), AssertionError> {
        if self.fragments.is_empty() {
            debug!("all checks passed");
            return Ok(());
        }
        debug!(failures = self.fragments.len(), "checks failed");
        let fragments = std::mem::take(&mut self.fragments);
        Err(AssertionError::new(fragments, self.config.color))
    }

    pub fn into_result(mut self) -> Result<(), AssertionError> {
        self.finish()
    }
}
