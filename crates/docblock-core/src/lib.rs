//! Docblock Core - DocBlock generation for PHP sources
//!
//! This crate provides the core functionality:
//! - Lexer: Tokenization of PHP source, markup and code
//! - Extract: Class and function declaration sites
//! - Doc: Existing-block detection and block synthesis
//! - Insert: Line-based insertion of new blocks
//! - Generator: Per-file and batch processing

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line terminator used to split sources and to end synthesized lines
pub const LINE_ENDING: &str = if cfg!(windows) { "\r\n" } else { "\n" };

/// Lexer module - tokenization of PHP source code
pub mod lexer;

/// Declaration extractor - classes and functions found in a token stream
pub mod extract;

/// DocBlock detection and synthesis
pub mod doc;

/// Insertion pass over source lines
pub mod insert;

/// Generator configuration
pub mod config;

/// Run counters and exit status
pub mod stats;

/// File and batch processing
pub mod generator;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{ConfigError, GeneratorConfig, NameFilter};
pub use extract::{extract, Declarations, ExtractOptions};
pub use generator::{FileOutcome, Generator, ProcessError};
pub use insert::{rewrite, Rewrite};
pub use lexer::{Lexer, Token, TokenKind};
pub use stats::{ExitStatus, GenerationCounters};
