use std::ops::Range;

use serde::Serialize;

/// Byte-offset span into Quartz source text. Start inclusive, end exclusive.
///
/// All locations flowing through the compiler are byte offsets into the
/// original source string. Line/column pairs are derived on demand with
/// [`LineIndex`] when an error is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a span from byte offsets.
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span start ({start}) must be <= end ({end})");
        Self { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Spans convert directly into the byte ranges diagnostic renderers take.
impl From<Span> for Range<usize> {
    fn from(span: Span) -> Range<usize> {
        span.start as usize..span.end as usize
    }
}

/// Pre-computed line start offsets for on-demand line/column lookup.
///
/// Built once per source file; `line_col` then answers in O(log n) via
/// binary search over the line starts. Offsets past the end of the source
/// are clamped to the final position, so stale or synthetic spans still
/// map to a printable location.
#[derive(Debug)]
pub struct LineIndex {
    /// Byte offset of the first character of each line. First entry is 0.
    line_starts: Vec<u32>,
    /// Total length of the indexed source in bytes.
    source_len: u32,
}

impl LineIndex {
    /// Scan the source once, recording where each line begins.
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, byte)| byte == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self {
            line_starts,
            source_len: source.len() as u32,
        }
    }

    /// Convert a byte offset to a 1-based (line, column) pair.
    ///
    /// Column is measured in bytes from the start of the line. Offsets
    /// beyond the source are clamped to one past its final byte.
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.source_len);
        // First line_start > offset, minus one, is the containing line.
        let line_idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line = (line_idx as u32) + 1;
        let col = offset - self.line_starts[line_idx] + 1;
        (line, col)
    }

    /// Number of lines in the indexed source.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
