//! Rendering of captured failures into report fragments.
use crate::failure::FailureRecord;
use colored::Colorize;
use std::{fmt, iter};

/// Number of trace lines, after the header line, shown for each failure.
pub const DEFAULT_EXCERPT_LINES: usize = 3;

const LABEL_INDENT: &str = "      ";
const TRACE_INDENT: &str = "    ";

/// One failure block inside a combined report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Number of failures captured before this one in the same run.
    position: usize,
    /// Category label, relabelled to `MultipleAssertionError`.
    label: String,
    message: String,
    /// Trace lines following the header line.
    excerpt: Vec<String>,
}

impl Fragment {
    /// Build the fragment for `failure`, the `position`-th failure of a run.
    /// The excerpt always holds `excerpt_lines` lines. Missing trace lines
    /// are blank, so every fragment spans the same number of report lines.
    pub fn build<F>(failure: &F, position: usize, excerpt_lines: usize) -> Self
    where
        F: FailureRecord + ?Sized,
    {
        Self {
            position,
            label: failure
                .name()
                .replacen("AssertionError", "MultipleAssertionError", 1),
            message: failure.message().to_string(),
            excerpt: failure
                .trace()
                .iter()
                .skip(1)
                .cloned()
                .chain(iter::repeat(String::new()))
                .take(excerpt_lines)
                .collect(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn excerpt(&self) -> &[String] {
        &self.excerpt
    }

    /// The first fragment of a report gets an extra blank line.
    pub fn separator(&self) -> &'static str {
        if self.position == 0 {
            "\n\n"
        } else {
            "\n"
        }
    }

    /// Render this fragment. With `color` set, the headline is red and the
    /// excerpt dim grey, subject to `colored`'s terminal detection.
    pub fn render(&self, color: bool) -> String {
        let mut buf = String::from(self.separator());

        let headline =
            format!("{}{}: {}", LABEL_INDENT, self.label, self.message);
        if color {
            buf.push_str(&headline.red().to_string());
        } else {
            buf.push_str(&headline);
        }

        for line in &self.excerpt {
            let line = format!("\n{}{}", TRACE_INDENT, line);
            if color {
                buf.push_str(&line.bright_black().to_string());
            } else {
                buf.push_str(&line);
            }
        }
        buf
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.render(false))
    }
}

/// Render the coloured fragment for `failure` at `position` with the default
/// excerpt depth.
pub fn build_message<F>(failure: &F, position: usize) -> String
where
    F: FailureRecord + ?Sized,
{
    Fragment::build(failure, position, DEFAULT_EXCERPT_LINES).render(true)
}
