//! Failure records captured from individual checks.
use crate::errors::ASSERTION_ERROR;
use std::{
    any::Any,
    backtrace::{Backtrace, BacktraceStatus},
    cell::Cell,
    error, fmt, panic,
    sync::Once,
};

/// The shape an aggregator needs from a failed check.
pub trait FailureRecord {
    /// Category label, conventionally `AssertionError`.
    fn name(&self) -> &str;

    /// Human readable description of what went wrong.
    fn message(&self) -> &str;

    /// Lines of the call stack at the failure site. Line 0 repeats
    /// `name: message` and is never shown in a report.
    /// Missing lines are reported as blank excerpt lines.
    fn trace(&self) -> &[String] {
        &[]
    }
}

/// A failure captured from one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    name: String,
    message: String,
    trace: Vec<String>,
}

fn header(name: &str, message: &str) -> String {
    format!("{}: {}", name, message)
}

impl Failure {
    /// Construct an `AssertionError` failure, recording the current
    /// backtrace when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable it.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let mut trace = vec![header(ASSERTION_ERROR, &message)];

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            trace.extend(caller_frames(&backtrace.to_string()));
        }

        Self {
            name: ASSERTION_ERROR.to_string(),
            message,
            trace,
        }
    }

    /// Construct a failure with an explicit category and no stack.
    pub fn named(name: impl Into<String>, message: impl Into<String>) -> Self {
        let (name, message) = (name.into(), message.into());
        let trace = vec![header(&name, &message)];
        Self {
            name,
            message,
            trace,
        }
    }

    /// Construct a failure from already rendered stack lines.
    pub fn with_trace(
        name: impl Into<String>,
        message: impl Into<String>,
        trace: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            trace,
        }
    }

    /// Convert the payload of a caught panic, such as a failed `assert_eq!`.
    ///
    /// The first payload line becomes the message. Further lines, like the
    /// `left:`/`right:` values of `assert_eq!`, go into the trace.
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        Self::panicked(payload, None)
    }

    /// [Failure::from_panic] for a panic raised on this thread while the
    /// location hook was installed, placing `file:line:col` on trace line 1.
    pub(crate) fn from_caught_panic(payload: Box<dyn Any + Send>) -> Self {
        Self::panicked(payload, take_panic_location())
    }

    fn panicked(payload: Box<dyn Any + Send>, location: Option<String>) -> Self {
        let text = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let mut lines = text.lines();
        let message = lines.next().unwrap_or_default().to_string();
        let mut trace = vec![header(ASSERTION_ERROR, &message)];
        trace.extend(location);
        trace.extend(lines.map(|line| line.trim().to_string()));

        Self {
            name: ASSERTION_ERROR.to_string(),
            message,
            trace,
        }
    }
}

thread_local! {
    static PANIC_LOCATION: Cell<Option<String>> = Cell::new(None);
}

static LOCATION_HOOK: Once = Once::new();

/// Chain a panic hook that remembers where the latest panic on each thread
/// was raised. The previous hook still runs, so panics print as usual.
pub(crate) fn install_location_hook() {
    LOCATION_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if let Some(loc) = info.location() {
                let at = format!("at {}:{}:{}", loc.file(), loc.line(), loc.column());
                let _ = PANIC_LOCATION.try_with(|slot| slot.set(Some(at)));
            }
            previous(info);
        }));
    });
}

fn take_panic_location() -> Option<String> {
    PANIC_LOCATION.try_with(Cell::take).ok().flatten()
}

/// Run `check`, turning a panic into a [Failure] located at the panic site.
pub(crate) fn catch_panic<F: FnOnce()>(check: F) -> Result<(), Failure> {
    install_location_hook();
    panic::catch_unwind(panic::AssertUnwindSafe(check))
        .map_err(Failure::from_caught_panic)
}

/// Drop the frames that belong to the backtrace machinery and to
/// `Failure::new` itself so that line 1 points at the caller.
fn caller_frames(rendered: &str) -> Vec<String> {
    let lines: Vec<&str> = rendered.lines().map(str::trim).collect();
    let start = lines
        .iter()
        .position(|line| line.contains("Failure::new"))
        .map(|idx| {
            // Skip the `at file:line` rows attached to that frame too.
            idx + 1
                + lines[idx + 1..]
                    .iter()
                    .take_while(|line| line.starts_with("at "))
                    .count()
        })
        .unwrap_or(0);

    lines[start..].iter().map(|line| line.to_string()).collect()
}

impl FailureRecord for Failure {
    fn name(&self) -> &str {
        &self.name
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn trace(&self) -> &[String] {
        &self.trace
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl error::Error for Failure {}

impl From<String> for Failure {
    fn from(message: String) -> Self {
        Failure::new(message)
    }
}

impl From<&str> for Failure {
    fn from(message: &str) -> Self {
        Failure::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_starts_with_header() {
        let failure = Failure::new("expected 1 to equal 2");
        assert_eq!(failure.name(), "AssertionError");
        assert_eq!(failure.trace()[0], "AssertionError: expected 1 to equal 2");
    }

    #[test]
    fn named_keeps_category() {
        let failure = Failure::named("TypeError", "not a function");
        assert_eq!(failure.to_string(), "TypeError: not a function");
        assert_eq!(failure.trace().len(), 1);
    }

    #[test]
    fn panic_payloads() {
        let from_str = Failure::from_panic(Box::new("static message"));
        assert_eq!(from_str.message(), "static message");

        let from_string = Failure::from_panic(Box::new(String::from("owned")));
        assert_eq!(from_string.message(), "owned");

        let opaque = Failure::from_panic(Box::new(42_u32));
        assert_eq!(opaque.message(), "Box<dyn Any>");
        assert_eq!(opaque.name(), "AssertionError");
    }

    #[test]
    fn multi_line_payload_keeps_headline_single() {
        let payload = String::from(
            "assertion `left == right` failed: expected 1 to equal 2\n  left: 1\n right: 2",
        );
        let failure = Failure::from_panic(Box::new(payload));
        assert_eq!(
            failure.message(),
            "assertion `left == right` failed: expected 1 to equal 2"
        );
        assert_eq!(&failure.trace()[1..], ["left: 1", "right: 2"]);
    }

    #[test]
    fn caught_panic_records_location() {
        let line = line!() + 1;
        let err = catch_panic(|| panic!("expected 1 to equal 2")).unwrap_err();
        assert_eq!(err.message(), "expected 1 to equal 2");
        let at = &err.trace()[1];
        assert!(at.starts_with("at "), "{}", at);
        assert!(at.contains(&format!("failure.rs:{}:", line)), "{}", at);
    }

    #[test]
    fn passing_check_is_ok() {
        assert!(catch_panic(|| assert_eq!(2, 2)).is_ok());
    }

    #[test]
    fn caller_frames_skip_constructor() {
        let rendered = "   0: std::backtrace::Backtrace::capture\n\
                        \x20            at backtrace.rs:1:1\n\
                        \x20  1: multi_assert::failure::Failure::new\n\
                        \x20            at src/failure.rs:40:25\n\
                        \x20  2: my_test::check\n\
                        \x20            at tests/my_test.rs:7:9";
        assert_eq!(
            caller_frames(rendered),
            vec!["2: my_test::check", "at tests/my_test.rs:7:9"]
        );
    }

    #[test]
    fn caller_frames_without_constructor_keeps_everything() {
        assert_eq!(caller_frames("0: a\n1: b"), vec!["0: a", "1: b"]);
    }

    #[test]
    fn default_trace_is_empty() {
        struct Bare;
        impl FailureRecord for Bare {
            fn name(&self) -> &str {
                "AssertionError"
            }
            fn message(&self) -> &str {
                "bare"
            }
        }
        assert!(Bare.trace().is_empty());
    }
}
