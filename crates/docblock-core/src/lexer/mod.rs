//! Lexer for PHP source files
//!
//! The lexer converts source text into a flat stream of tokens, handling:
//! - Inline markup outside of `<?php ... ?>` tags
//! - Keywords (case-insensitive), identifiers, variables and operators
//! - Whitespace and comments, which are kept as tokens
//! - Doc comments (`/** ... */`) as a distinct kind
//! - Heredoc/nowdoc bodies as single tokens
//! - Line tracking for every token

#![allow(clippy::cast_possible_truncation)] // We intentionally use u32 for spans; files > 4GB are unsupported

mod span;
mod token;

pub use span::{LineIndex, Span};
pub use token::{TokenClass, TokenKind};

use logos::Logos;
use thiserror::Error;

/// A token with its kind, span, source text and line
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The span in the source code
    pub span: Span,
    /// The raw source text of the token
    pub text: String,
    /// 1-based line of the first byte of the token
    pub line: u32,
}

impl Token {
    /// Create a new token
    #[must_use]
    pub fn new(kind: TokenKind, span: Span, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
            line,
        }
    }

    /// Coarse classification of this token
    #[must_use]
    pub fn class(&self) -> TokenClass {
        self.kind.class()
    }
}

/// Lexer error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    #[error("unexpected character")]
    UnexpectedChar,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("unterminated heredoc '{0}'")]
    UnterminatedHeredoc(String),
}

/// A lexer error with location information
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub error: LexError,
    pub span: Span,
    pub line: u32,
}

impl SpannedError {
    #[must_use]
    pub fn new(error: LexError, span: Span, line: u32) -> Self {
        Self { error, span, line }
    }
}

impl std::fmt::Display for SpannedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on line {}", self.error, self.line)
    }
}

impl std::error::Error for SpannedError {}

/// Which scanner handles the next token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerMode {
    /// Outside of PHP tags
    Markup,
    /// Inside `<?php ... ?>`
    Code,
}

/// The PHP lexer
pub struct Lexer<'source> {
    source: &'source str,
    /// Current position in the source (byte offset)
    position: usize,
    /// Current lexer mode
    mode: LexerMode,
    /// Line lookup for token starts
    lines: LineIndex,
    /// Kind of the last non-trivia token, for contextual keywords
    last_significant: Option<TokenKind>,
    /// Collected errors during lexing
    errors: Vec<SpannedError>,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code
    #[must_use]
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            position: 0,
            mode: LexerMode::Markup,
            lines: LineIndex::new(source),
            last_significant: None,
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source, returning all tokens and any errors
    #[must_use]
    pub fn tokenize(source: &str) -> (Vec<Token>, Vec<SpannedError>) {
        let mut lexer = Lexer::new(source);
        let tokens: Vec<Token> = lexer.by_ref().collect();
        (tokens, lexer.errors)
    }

    /// Get the next token, or `None` at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        if self.position >= self.source.len() {
            return None;
        }
        let token = match self.mode {
            LexerMode::Markup => self.lex_markup(),
            LexerMode::Code => self.lex_code(),
        }?;
        if !token.kind.is_trivia() {
            self.last_significant = Some(token.kind);
        }
        Some(token)
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token {
        Token::new(
            kind,
            Span::from_offsets(start, end),
            &self.source[start..end],
            self.lines.line_of(start as u32),
        )
    }

    fn push_error(&mut self, error: LexError, start: usize, end: usize) {
        let line = self.lines.line_of(start as u32);
        self.errors
            .push(SpannedError::new(error, Span::from_offsets(start, end), line));
    }

    /// Lex outside of PHP tags: everything up to the next open tag is markup
    fn lex_markup(&mut self) -> Option<Token> {
        let start = self.position;
        let remaining = &self.source[start..];

        let token = match find_open_tag(remaining) {
            Some((0, tag_len)) => {
                self.mode = LexerMode::Code;
                self.make_token(TokenKind::OpenTag, start, start + tag_len)
            }
            Some((offset, _)) => self.make_token(TokenKind::InlineHtml, start, start + offset),
            None => self.make_token(TokenKind::InlineHtml, start, self.source.len()),
        };
        self.position = token.span.end as usize;
        Some(token)
    }

    /// Lex inside PHP tags using logos
    fn lex_code(&mut self) -> Option<Token> {
        let start = self.position;
        let remaining = &self.source[start..];

        if remaining.starts_with("<<<") {
            if let Some(token) = self.lex_heredoc() {
                self.position = token.span.end as usize;
                return Some(token);
            }
        }

        if remaining.starts_with("/*") && !remaining[2..].contains("*/") {
            // PHP treats an unterminated block comment as running to end of file
            let end = self.source.len();
            self.push_error(LexError::UnterminatedComment, start, end);
            self.position = end;
            return Some(self.make_token(TokenKind::BlockComment, start, end));
        }

        let mut logos_lexer = TokenKind::lexer(remaining);

        match logos_lexer.next() {
            Some(Ok(kind)) => {
                let span_range = logos_lexer.span();
                let mut lexeme = logos_lexer.slice();
                // A line comment ends in front of a close tag
                if kind == TokenKind::Comment {
                    if let Some(at) = lexeme.find("?>") {
                        lexeme = &lexeme[..at];
                    }
                }
                let end = start + span_range.start + lexeme.len();
                let kind = self.refine(kind, lexeme);
                self.position = end;

                if kind == TokenKind::CloseTag {
                    self.mode = LexerMode::Markup;
                }

                Some(self.make_token(kind, start + span_range.start, end))
            }
            Some(Err(())) => {
                // Error recovery: skip the invalid character
                let invalid_char = remaining.chars().next()?;
                self.position += invalid_char.len_utf8();
                self.push_error(LexError::UnexpectedChar, start, self.position);
                Some(self.make_token(TokenKind::Error, start, self.position))
            }
            None => None,
        }
    }

    /// Context-dependent adjustments logos cannot express
    fn refine(&self, kind: TokenKind, lexeme: &str) -> TokenKind {
        match kind {
            TokenKind::BlockComment if is_doc_comment(lexeme) => TokenKind::DocComment,
            k if k.is_keyword()
                && self
                    .last_significant
                    .is_some_and(|prev| prev.is_member_access()) =>
            {
                TokenKind::Ident
            }
            k => k,
        }
    }

    /// Lex a heredoc or nowdoc starting at the current position.
    ///
    /// Returns `None` when the `<<<` is not followed by a valid label line, in
    /// which case the caller falls back to operator lexing.
    fn lex_heredoc(&mut self) -> Option<Token> {
        let start = self.position;
        let remaining = &self.source[start..];

        let header = remaining[3..].trim_start_matches([' ', '\t']);
        let (quote, label_start) = match header.chars().next() {
            Some(q @ ('\'' | '"')) => (Some(q), &header[1..]),
            _ => (None, header),
        };
        if label_start.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }
        let label_len = label_start
            .find(|c: char| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(label_start.len());
        if label_len == 0 {
            return None;
        }
        let label = &label_start[..label_len];
        let mut after_label = &label_start[label_len..];
        if let Some(q) = quote {
            after_label = after_label.strip_prefix(q)?;
        }
        let body = after_label
            .strip_prefix("\r\n")
            .or_else(|| after_label.strip_prefix('\n'))?;

        let mut offset = remaining.len() - body.len();
        loop {
            let line_end = remaining[offset..]
                .find('\n')
                .map_or(remaining.len(), |i| offset + i);
            let line = &remaining[offset..line_end];
            let stripped = line.trim_start_matches([' ', '\t']);
            if let Some(rest) = stripped.strip_prefix(label) {
                if !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_') {
                    let end = offset + (line.len() - stripped.len()) + label.len();
                    return Some(self.make_token(TokenKind::Heredoc, start, start + end));
                }
            }
            if line_end >= remaining.len() {
                break;
            }
            offset = line_end + 1;
        }

        let end = self.source.len();
        self.push_error(LexError::UnterminatedHeredoc(label.to_string()), start, end);
        Some(self.make_token(TokenKind::Heredoc, start, end))
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// `/**` followed by whitespace; `/**/` is an ordinary comment
fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && text.as_bytes().get(3).is_some_and(u8::is_ascii_whitespace)
}

/// Find the next `<?php` or `<?=` tag, returning its offset and length.
///
/// Bare `<?` short tags are not recognized, so code behind them stays markup.
fn find_open_tag(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut from = 0;
    while let Some(rel) = text[from..].find("<?") {
        let at = from + rel;
        let after = &bytes[at + 2..];
        if after.first() == Some(&b'=') {
            return Some((at, 3));
        }
        if after.len() >= 3
            && after[..3].eq_ignore_ascii_case(b"php")
            && after.get(3).map_or(true, u8::is_ascii_whitespace)
        {
            return Some((at, 5));
        }
        from = at + 2;
    }
    None
}
