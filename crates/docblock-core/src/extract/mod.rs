//! Declaration extractor - walks the token stream and records every class
//! and function declaration site
//!
//! The extractor is a single forward pass with a little state: the comment
//! kind seen since the last punctuation, the brace depth, the enclosing class
//! and a stack of function bodies for attributing `return` statements.

mod cursor;
mod types;

use tracing::{debug, warn};

use crate::lexer::{Token, TokenKind};
use crate::stats::GenerationCounters;

pub use cursor::TokenCursor;
pub use types::{
    AccessModifier, ClassRecord, Declarations, FunctionMap, FunctionRecord, ParameterRecord,
};

/// How many tokens ending at a closure's first variable to search for a name
const SURROGATE_LOOKBACK: usize = 10;

/// Options that change what the extractor records
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    /// Record closures under a surrogate name instead of skipping them
    pub include_anonymous: bool,
}

/// Extract all declarations from a token stream
pub fn extract(
    tokens: &[Token],
    options: ExtractOptions,
    counters: &mut GenerationCounters,
) -> Declarations {
    DeclarationExtractor::new(tokens, options).run(counters)
}

/// Kind of comment seen since the last punctuation token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum CommentState {
    #[default]
    None,
    Plain,
    Doc,
}

/// The block the next `{` opens
#[derive(Debug)]
enum PendingBlock {
    Class(String),
    /// Body of a function, named when a record exists for it
    Function(Option<String>),
}

#[derive(Debug)]
struct ClassScope {
    name: String,
    depth: usize,
}

#[derive(Debug)]
struct FunctionFrame {
    name: Option<String>,
    depth: usize,
}

/// Name token of a function header
enum HeaderName<'t> {
    Named(&'t Token),
    /// Closure, with the first variable of its header if any
    Anonymous(Option<(usize, &'t Token)>),
    Missing,
}

/// Walks a token stream and collects declarations
pub struct DeclarationExtractor<'t> {
    cursor: TokenCursor<'t>,
    options: ExtractOptions,
    declarations: Declarations,
    comment: CommentState,
    depth: usize,
    class_scope: Option<ClassScope>,
    bodies: Vec<FunctionFrame>,
    pending: Option<PendingBlock>,
}

impl<'t> DeclarationExtractor<'t> {
    #[must_use]
    pub fn new(tokens: &'t [Token], options: ExtractOptions) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            options,
            declarations: Declarations::default(),
            comment: CommentState::None,
            depth: 0,
            class_scope: None,
            bodies: Vec::new(),
            pending: None,
        }
    }

    /// Consume the stream and return the declarations found
    pub fn run(mut self, counters: &mut GenerationCounters) -> Declarations {
        while let Some(token) = self.cursor.current() {
            match token.kind {
                TokenKind::Comment | TokenKind::BlockComment => {
                    if !mentions_copyright(&token.text) {
                        self.comment = CommentState::Plain;
                    }
                }
                TokenKind::DocComment => {
                    if !mentions_copyright(&token.text) {
                        self.comment = CommentState::Doc;
                    }
                }
                TokenKind::Class => {
                    // Header handling leaves the cursor on the opening brace
                    self.class_declaration(counters);
                    continue;
                }
                TokenKind::Function => {
                    self.function_declaration(counters);
                    continue;
                }
                TokenKind::Return => self.mark_return(),
                TokenKind::LBrace => self.open_brace(),
                TokenKind::RBrace => self.close_brace(),
                TokenKind::Semicolon => {
                    // Abstract and interface methods have no body
                    if matches!(self.pending, Some(PendingBlock::Function(_))) {
                        self.pending = None;
                    }
                }
                _ => {}
            }

            if token.kind.is_punctuation() {
                self.comment = CommentState::None;
            }
            self.cursor.advance();
        }

        self.declarations
    }

    fn class_declaration(&mut self, counters: &mut GenerationCounters) {
        let Some(keyword) = self.cursor.current() else {
            return;
        };
        counters.total_classes += 1;

        let name = match self.cursor.peek_significant() {
            Some(token) if token.kind == TokenKind::Ident => token.text.clone(),
            _ => {
                // `new class (...) { ... }` has nothing to name
                debug!(line = keyword.line, "skipping anonymous class");
                counters.skipped_classes += 1;
                self.comment = CommentState::None;
                self.cursor.advance();
                return;
            }
        };

        match std::mem::take(&mut self.comment) {
            CommentState::Plain => {
                warn!(class = %name, line = keyword.line, "class is commented in a non-DocBlock fashion");
                counters.existing_plain_comments += 1;
            }
            CommentState::Doc => {
                debug!(class = %name, "class already has a DocBlock");
                counters.existing_doc_comments += 1;
            }
            CommentState::None => {
                debug!(class = %name, line = keyword.line, "found class");
            }
        }

        let record = ClassRecord {
            name: name.clone(),
            line: keyword.line,
        };
        if !self.declarations.classes.contains(&record) {
            self.declarations.classes.push(record);
        }

        // Skip `extends` and `implements` clauses
        while let Some(kind) = self.cursor.current_kind() {
            if kind == TokenKind::LBrace {
                self.pending = Some(PendingBlock::Class(name));
                return;
            }
            self.cursor.advance();
        }
    }

    fn function_declaration(&mut self, counters: &mut GenerationCounters) {
        let Some(keyword) = self.cursor.current() else {
            return;
        };
        // `use function Foo\bar;` imports, it does not declare
        if self
            .cursor
            .significant_before()
            .next()
            .is_some_and(|t| t.kind == TokenKind::Use)
        {
            self.cursor.advance();
            return;
        }
        counters.total_functions += 1;

        let (is_static, access) = self.modifiers();
        let comment = std::mem::take(&mut self.comment);

        self.cursor.advance();
        self.cursor.skip_trivia();
        if self.cursor.current_kind() == Some(TokenKind::Amp) {
            self.cursor.advance();
            self.cursor.skip_trivia();
        }

        let header = match self.cursor.current() {
            Some(token) if token.kind == TokenKind::Ident || token.kind.is_keyword() => {
                self.cursor.advance();
                HeaderName::Named(token)
            }
            Some(token) if token.kind == TokenKind::LParen => HeaderName::Anonymous(
                self.cursor.find_ahead(
                    TokenKind::Variable,
                    &[TokenKind::LBrace, TokenKind::Semicolon],
                ),
            ),
            _ => HeaderName::Missing,
        };

        self.cursor.skip_trivia();
        let parameters = if self.cursor.current_kind() == Some(TokenKind::LParen) {
            self.parameters()
        } else {
            Vec::new()
        };

        let (name, line) = match header {
            HeaderName::Named(token) => (token.text.clone(), token.line),
            HeaderName::Anonymous(Some((at, variable))) if self.options.include_anonymous => {
                let surrogate = self
                    .cursor
                    .lookback_from(at, SURROGATE_LOOKBACK)
                    .find(|t| t.kind == TokenKind::Ident)
                    .unwrap_or(variable);
                (surrogate.text.clone(), variable.line)
            }
            HeaderName::Anonymous(_) | HeaderName::Missing => (String::new(), keyword.line),
        };

        let label = if name.is_empty() { "{closure}" } else { &name };
        match comment {
            CommentState::Plain => {
                warn!(function = %label, line, "function is commented in a non-DocBlock fashion");
                counters.existing_plain_comments += 1;
            }
            CommentState::Doc => {
                debug!(function = %label, "function already has a DocBlock");
                counters.existing_doc_comments += 1;
            }
            CommentState::None => {
                debug!(function = %label, line, "function is not commented");
                counters.undocumented_functions += 1;
            }
        }

        self.skip_to_body();

        if name.is_empty() {
            debug!(line, "skipping unnamed function");
            counters.skipped_functions += 1;
            self.pending = Some(PendingBlock::Function(None));
            return;
        }

        let record = FunctionRecord {
            name: name.clone(),
            class_name: self
                .class_scope
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            line,
            parameters,
            is_static,
            access,
            has_return: false,
        };
        if self.declarations.functions.insert(name.clone(), record).is_some() {
            debug!(function = %name, line, "redeclaration replaces earlier record");
        }
        self.pending = Some(PendingBlock::Function(Some(name)));
    }

    /// Modifier keywords directly preceding the `function` keyword
    fn modifiers(&self) -> (bool, Option<AccessModifier>) {
        let mut is_static = false;
        let mut access = None;
        for token in self.cursor.significant_before() {
            if !token.kind.is_modifier() {
                break;
            }
            if token.kind == TokenKind::Static {
                is_static = true;
            } else if access.is_none() {
                access = AccessModifier::from_kind(token.kind);
            }
        }
        (is_static, access)
    }

    /// Parse a parameter list, cursor on its `(`; leaves the cursor after `)`
    fn parameters(&mut self) -> Vec<ParameterRecord> {
        let mut parameters: Vec<ParameterRecord> = Vec::new();
        let mut by_reference = false;
        let mut nesting = 0usize;

        self.cursor.advance();
        while let Some(token) = self.cursor.current() {
            match token.kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::AttributeStart => {
                    nesting += 1;
                }
                TokenKind::RBracket => nesting = nesting.saturating_sub(1),
                TokenKind::RParen if nesting == 0 => {
                    self.cursor.advance();
                    break;
                }
                TokenKind::RParen => nesting -= 1,
                TokenKind::Amp => by_reference = true,
                TokenKind::Variable if nesting == 0 => {
                    parameters.push(ParameterRecord::new(
                        token.text.clone(),
                        std::mem::take(&mut by_reference),
                    ));
                }
                TokenKind::Eq if nesting == 0 => {
                    let default = self.default_value();
                    if let Some(last) = parameters.last_mut() {
                        last.default_value = default;
                    }
                    // Cursor is on the terminating `,` or `)`
                    continue;
                }
                _ => {}
            }
            // `&` only marks the variable directly after it
            if !matches!(token.kind, TokenKind::Amp | TokenKind::Ellipsis) && !token.kind.is_trivia()
            {
                by_reference = false;
            }
            self.cursor.advance();
        }

        parameters
    }

    /// Record the first token of a default value and skip the rest of the
    /// expression, stopping on the `,` or `)` that ends it
    fn default_value(&mut self) -> Option<String> {
        self.cursor.advance();
        self.cursor.skip_trivia();
        if self.cursor.current_kind() == Some(TokenKind::Minus) {
            self.cursor.advance();
            self.cursor.skip_trivia();
        }

        let value = self
            .cursor
            .current()
            .filter(|t| !matches!(t.kind, TokenKind::Comma | TokenKind::RParen))
            .map(|t| t.text.clone());

        let mut nesting = 0usize;
        while let Some(kind) = self.cursor.current_kind() {
            match kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => nesting += 1,
                TokenKind::Comma | TokenKind::RParen if nesting == 0 => break,
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    nesting = nesting.saturating_sub(1);
                }
                _ => {}
            }
            self.cursor.advance();
        }

        value
    }

    /// Skip `use (...)` and return types up to the body or terminating `;`
    fn skip_to_body(&mut self) {
        while let Some(kind) = self.cursor.current_kind() {
            if matches!(kind, TokenKind::LBrace | TokenKind::Semicolon) {
                return;
            }
            self.cursor.advance();
        }
    }

    fn mark_return(&mut self) {
        let Some(name) = self.bodies.last().and_then(|f| f.name.as_ref()) else {
            return;
        };
        if let Some(record) = self.declarations.functions.get_mut(name) {
            record.has_return = true;
        }
    }

    fn open_brace(&mut self) {
        match self.pending.take() {
            Some(PendingBlock::Class(name)) => {
                self.class_scope = Some(ClassScope {
                    name,
                    depth: self.depth,
                });
            }
            Some(PendingBlock::Function(name)) => {
                self.bodies.push(FunctionFrame {
                    name,
                    depth: self.depth,
                });
            }
            None => {}
        }
        self.depth += 1;
    }

    fn close_brace(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        if self.bodies.last().is_some_and(|f| f.depth == self.depth) {
            self.bodies.pop();
        }
        if self.class_scope.as_ref().is_some_and(|c| c.depth == self.depth) {
            self.class_scope = None;
        }
    }
}

/// License headers are not documentation
fn mentions_copyright(text: &str) -> bool {
    text.to_ascii_lowercase().contains("copyright")
}
