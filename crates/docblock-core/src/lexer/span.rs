//! Source location tracking for the PHP lexer

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

/// A byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Byte offset of the start of the span
    pub start: u32,
    /// Byte offset of the end of the span (exclusive)
    pub end: u32,
}

impl Span {
    /// Create a new span from start and end byte offsets
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a span from a pair of `usize` offsets
    #[must_use]
    pub fn from_offsets(start: usize, end: usize) -> Self {
        Self::new(start as u32, end as u32)
    }
}

/// Maps byte offsets to 1-based line numbers.
///
/// Only `\n` starts a new line, so a `\r\n` file numbers its lines the same
/// way a line-split of the text on the platform terminator does.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offsets where each line starts
    line_starts: Vec<u32>,
}

impl LineIndex {
    /// Build a line index from source code
    #[must_use]
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|&(_, b)| b == b'\n')
                    .map(|(i, _)| (i + 1) as u32),
            )
            .collect();
        Self { line_starts }
    }

    /// 1-based line number containing `offset`
    #[must_use]
    pub fn line_of(&self, offset: u32) -> u32 {
        let idx = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        (idx + 1) as u32
    }
}
