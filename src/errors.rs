use crate::{failure::FailureRecord, printer::Fragment};
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Category name of the combined error. The per-failure fragments inside it
/// are relabelled, the combined error itself never is.
pub const ASSERTION_ERROR: &str = "AssertionError";

/// The error returned by an aggregation run in which at least one check
/// failed.
///
/// The message is every rendered [Fragment] joined with `\n`, followed by a
/// trailing `\n`. Consumers that want to look at one failure in isolation can
/// either split the message on newlines or walk [AssertionError::fragments].
#[derive(Error)]
#[error("{message}")]
pub struct AssertionError {
    fragments: Vec<Fragment>,
    message: String,
}

impl AssertionError {
    /// Assemble the combined error from the captured fragments, in the order
    /// they were captured.
    pub fn new(fragments: Vec<Fragment>, color: bool) -> Self {
        let mut message = fragments
            .iter()
            .map(|frag| frag.render(color))
            .collect::<Vec<_>>()
            .join("\n");
        message.push('\n');
        Self { fragments, message }
    }

    pub fn name(&self) -> &'static str {
        ASSERTION_ERROR
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured view of the captured failures.
    pub fn fragments(&self) -> &[Fragment] {
        &self.fragments
    }
}

// `unwrap()` on a failed run should print the report, not a struct dump.
impl fmt::Debug for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A combined error can itself be a check's failure, so aggregations nest.
impl FailureRecord for AssertionError {
    fn name(&self) -> &str {
        ASSERTION_ERROR
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// An invalid command line value.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct OptionError(pub String);

/// Errors raised while loading a [crate::config::Config].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
