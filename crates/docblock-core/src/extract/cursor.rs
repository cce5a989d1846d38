//! Random-access cursor over a token slice

#![allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]

use crate::lexer::{Token, TokenKind};

/// A position in a token slice with bounds-checked lookahead and lookback.
///
/// The cursor never panics on out-of-range access; every peek returns
/// `None` past either end.
#[derive(Debug, Clone)]
pub struct TokenCursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    #[must_use]
    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Index of the current token
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// The token under the cursor
    #[must_use]
    pub fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Kind of the token under the cursor
    #[must_use]
    pub fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Token at a signed offset from the cursor
    #[must_use]
    pub fn peek(&self, offset: isize) -> Option<&'t Token> {
        let idx = self.pos as isize + offset;
        if idx < 0 {
            return None;
        }
        self.tokens.get(idx as usize)
    }

    /// Move one token forward
    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Move forward while the current token is whitespace or a comment
    pub fn skip_trivia(&mut self) {
        while self.current().is_some_and(|t| t.kind.is_trivia()) {
            self.advance();
        }
    }

    /// Next non-trivia token after the cursor, without moving
    #[must_use]
    pub fn peek_significant(&self) -> Option<&'t Token> {
        self.tokens[(self.pos + 1).min(self.tokens.len())..]
            .iter()
            .find(|t| !t.kind.is_trivia())
    }

    /// Non-trivia tokens before the cursor, nearest first
    pub fn significant_before(&self) -> impl Iterator<Item = &'t Token> {
        self.tokens[..self.pos.min(self.tokens.len())]
            .iter()
            .rev()
            .filter(|t| !t.kind.is_trivia())
    }

    /// First token of `kind` at or after the cursor, giving up at any of `stop`
    #[must_use]
    pub fn find_ahead(&self, kind: TokenKind, stop: &[TokenKind]) -> Option<(usize, &'t Token)> {
        self.tokens
            .iter()
            .enumerate()
            .skip(self.pos)
            .take_while(|(_, t)| !stop.contains(&t.kind))
            .find(|(_, t)| t.kind == kind)
    }

    /// Up to `window` tokens ending at `anchor` inclusive, nearest first
    pub fn lookback_from(&self, anchor: usize, window: usize) -> impl Iterator<Item = &'t Token> {
        let end = (anchor + 1).min(self.tokens.len());
        self.tokens[end.saturating_sub(window)..end].iter().rev()
    }
}
