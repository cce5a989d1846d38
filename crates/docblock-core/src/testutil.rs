//! Test utilities for docblock
//!
//! Helpers for building sources with the platform line terminator and for
//! running the rewrite pipeline on a string.

use crate::config::GeneratorConfig;
use crate::generator::Generator;
use crate::insert::Rewrite;
use crate::stats::GenerationCounters;
use crate::LINE_ENDING;

/// Join lines with the platform line terminator
pub fn source(lines: &[&str]) -> String {
    lines.join(LINE_ENDING)
}

/// Normalize platform line terminators to `\n` for comparisons
pub fn unix_lines(text: &str) -> String {
    text.replace(LINE_ENDING, "\n")
}

/// Run tokenize, extract and rewrite over a source string
pub fn rewrite_with(source: &str, config: GeneratorConfig) -> (Rewrite, GenerationCounters) {
    let mut counters = GenerationCounters::default();
    let rewrite = Generator::new(config).rewrite_source(source, &mut counters);
    (rewrite, counters)
}

/// Rewrite with defaults and return the resulting text with `\n` endings
pub fn rewrite_text(source: &str) -> String {
    unix_lines(&rewrite_with(source, GeneratorConfig::default()).0.text())
}
