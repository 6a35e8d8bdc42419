//! Ariadne-based rendering of resolution errors.
//!
//! Renders [`ResolveError`] values into formatted, labeled error messages.
//! Output is colorless so the rendered text is stable in tests and logs.

use std::ops::Range;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};

use quartz_common::span::{LineIndex, Span};

use crate::error::{ResolveError, ResolveErrorKind};

/// Assign a stable error code to each resolution error variant.
fn error_code(err: &ResolveError) -> &'static str {
    match err.kind {
        ResolveErrorKind::UndefinedName(_) => "R0001",
    }
}

/// Convert a span to the byte range ariadne labels take, clamped to the
/// source bounds. Zero-length spans are widened to one byte where possible
/// (ariadne needs a non-empty span to draw a label).
fn span_to_range(span: Span, source_len: usize) -> Range<usize> {
    let full: Range<usize> = span.into();
    let start = full.start.min(source_len);
    let end = full.end.min(source_len).max(start);
    if start == end {
        start..end.saturating_add(1).min(source_len)
    } else {
        start..end
    }
}

/// Render a resolution error into a formatted diagnostic string.
pub fn render_diagnostic(error: &ResolveError, source: &str) -> String {
    let config = Config::default().with_color(false);
    let range = span_to_range(error.span, source.len());

    let report = match &error.kind {
        ResolveErrorKind::UndefinedName(name) => {
            Report::build(ReportKind::Error, range.clone())
                .with_code(error_code(error))
                .with_message(format!("undefined name `{name}`"))
                .with_config(config)
                .with_label(
                    Label::new(range)
                        .with_message("not a builtin and not bound in any enclosing scope")
                        .with_color(Color::Red),
                )
                .with_help("declare the name before use, or check its spelling against the builtin list")
                .finish()
        }
    };

    // Writing into a Vec<u8> cannot fail, and ariadne emits UTF-8; a
    // rendering hiccup degrades to a partial diagnostic rather than an
    // error from this layer.
    let mut buf = Vec::new();
    let _ = report.write(Source::from(source), &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// One-line summary with a 1-based line:column position, for terse logs.
pub fn one_line_summary(error: &ResolveError, index: &LineIndex) -> String {
    let (line, col) = index.line_col(error.span.start);
    format!("error[{}]: {} at {line}:{col}", error_code(error), error)
}
