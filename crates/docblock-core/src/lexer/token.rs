//! Token types for the PHP lexer

use logos::Logos;

/// The kind of token produced by the lexer in code mode.
///
/// Whitespace and comments are real tokens here: the declaration extractor
/// looks at comments to classify existing documentation.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keywords (case-insensitive) ==========
    #[token("function", ignore(ascii_case))]
    Function,
    #[token("class", ignore(ascii_case))]
    Class,
    #[token("interface", ignore(ascii_case))]
    Interface,
    #[token("trait", ignore(ascii_case))]
    Trait,
    #[token("extends", ignore(ascii_case))]
    Extends,
    #[token("implements", ignore(ascii_case))]
    Implements,
    #[token("return", ignore(ascii_case))]
    Return,
    #[token("static", ignore(ascii_case))]
    Static,
    #[token("public", ignore(ascii_case))]
    Public,
    #[token("private", ignore(ascii_case))]
    Private,
    #[token("protected", ignore(ascii_case))]
    Protected,
    #[token("abstract", ignore(ascii_case))]
    Abstract,
    #[token("final", ignore(ascii_case))]
    Final,
    #[token("new", ignore(ascii_case))]
    New,
    #[token("use", ignore(ascii_case))]
    Use,
    #[token("namespace", ignore(ascii_case))]
    Namespace,

    // ========== Literals ==========
    /// Integer literal (decimal, hex, binary, octal)
    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F][0-9a-fA-F_]*")]
    #[regex(r"0[bB][01][01_]*")]
    #[regex(r"0[oO][0-7][0-7_]*")]
    Integer,

    /// Float literal (including scientific notation)
    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"\.[0-9][0-9_]*([eE][+-]?[0-9][0-9_]*)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9][0-9_]*")]
    Float,

    /// Single-quoted, double-quoted or backtick string, kept whole
    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r"`([^`\\]|\\(.|\n))*`")]
    String,

    /// Heredoc or nowdoc body, produced by the lexer's heredoc scanner
    Heredoc,

    // ========== Names ==========
    /// Identifier, optionally namespace-qualified (`Foo`, `\Foo\Bar`)
    #[regex(r"\\?[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*(\\[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*)*")]
    Ident,

    /// Variable: `$name`
    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,

    // ========== Trivia ==========
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    /// Line comment: `// ...` or `# ...`, cut short at `?>` by the lexer
    #[regex(r"//[^\n]*")]
    #[regex(r"#([^\n\[][^\n]*)?")]
    Comment,

    /// Block comment: `/* ... */` (re-classified to `DocComment` by the lexer)
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    /// Doc comment: `/** ... */`
    DocComment,

    // ========== Multi-character operators ==========
    #[token("->")]
    Arrow,
    #[token("?->")]
    NullsafeArrow,
    #[token("::")]
    DoubleColon,
    #[token("=>")]
    DoubleArrow,
    #[token("...")]
    Ellipsis,
    /// Attribute opener: `#[`
    #[token("#[")]
    AttributeStart,
    #[token("==")]
    #[token("===")]
    #[token("!=")]
    #[token("!==")]
    #[token("<>")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("&&")]
    #[token("||")]
    #[token("??")]
    #[token("??=")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token(".=")]
    #[token("%=")]
    #[token("**")]
    #[token("**=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<")]
    #[token(">>")]
    #[token("<<=")]
    #[token(">>=")]
    Operator,

    // ========== Single-character punctuation ==========
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("&")]
    Amp,
    #[token("-")]
    Minus,
    #[token("$")]
    Dollar,
    #[token("\\")]
    Backslash,
    #[token("+")]
    #[token("*")]
    #[token("/")]
    #[token("%")]
    #[token(".")]
    #[token("<")]
    #[token(">")]
    #[token("!")]
    #[token("?")]
    #[token(":")]
    #[token("|")]
    #[token("^")]
    #[token("~")]
    #[token("@")]
    Punct,

    // ========== Tags and inline markup ==========
    /// `<?php` or `<?=` (produced by the lexer's markup mode)
    OpenTag,
    /// `?>`, including one directly following newline
    #[regex(r"\?>(\r?\n)?")]
    CloseTag,
    /// Text outside of PHP tags
    InlineHtml,

    /// Lexer error - invalid or unterminated input
    Error,
}

/// Coarse token classification shared by all consumers of the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Identifier,
    Keyword,
    Comment,
    DocComment,
    Whitespace,
    Variable,
    Punctuation,
    Other,
}

impl TokenKind {
    /// Returns true if this token is a keyword
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(
            self,
            Self::Function
                | Self::Class
                | Self::Interface
                | Self::Trait
                | Self::Extends
                | Self::Implements
                | Self::Return
                | Self::Static
                | Self::Public
                | Self::Private
                | Self::Protected
                | Self::Abstract
                | Self::Final
                | Self::New
                | Self::Use
                | Self::Namespace
        )
    }

    /// Returns true for plain and doc comments
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self, Self::Comment | Self::BlockComment | Self::DocComment)
    }

    /// Whitespace or comment
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Whitespace) || self.is_comment()
    }

    /// Single-character punctuation
    #[must_use]
    pub const fn is_punctuation(&self) -> bool {
        matches!(
            self,
            Self::LParen
                | Self::RParen
                | Self::LBrace
                | Self::RBrace
                | Self::LBracket
                | Self::RBracket
                | Self::Comma
                | Self::Semicolon
                | Self::Eq
                | Self::Amp
                | Self::Minus
                | Self::Dollar
                | Self::Backslash
                | Self::Punct
        )
    }

    /// Returns true for member and static access operators, after which
    /// keywords are plain names (`$obj->class`, `Foo::class`)
    #[must_use]
    pub const fn is_member_access(&self) -> bool {
        matches!(
            self,
            Self::Arrow | Self::NullsafeArrow | Self::DoubleColon
        )
    }

    /// Visibility keyword
    #[must_use]
    pub const fn is_visibility(&self) -> bool {
        matches!(self, Self::Public | Self::Private | Self::Protected)
    }

    /// Any keyword that may precede `function` in a method declaration
    #[must_use]
    pub const fn is_modifier(&self) -> bool {
        self.is_visibility() || matches!(self, Self::Static | Self::Abstract | Self::Final)
    }

    /// Map onto the coarse classification
    #[must_use]
    pub const fn class(&self) -> TokenClass {
        match self {
            Self::Ident => TokenClass::Identifier,
            Self::Variable => TokenClass::Variable,
            Self::Whitespace => TokenClass::Whitespace,
            Self::Comment | Self::BlockComment => TokenClass::Comment,
            Self::DocComment => TokenClass::DocComment,
            _ if self.is_keyword() => TokenClass::Keyword,
            _ if self.is_punctuation() => TokenClass::Punctuation,
            _ => TokenClass::Other,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Trait => "trait",
            Self::Extends => "extends",
            Self::Implements => "implements",
            Self::Return => "return",
            Self::Static => "static",
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Abstract => "abstract",
            Self::Final => "final",
            Self::New => "new",
            Self::Use => "use",
            Self::Namespace => "namespace",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Heredoc => "heredoc",
            Self::Ident => "identifier",
            Self::Variable => "variable",
            Self::Whitespace => "whitespace",
            Self::Comment | Self::BlockComment => "comment",
            Self::DocComment => "doc comment",
            Self::Arrow => "'->'",
            Self::NullsafeArrow => "'?->'",
            Self::DoubleColon => "'::'",
            Self::DoubleArrow => "'=>'",
            Self::Ellipsis => "'...'",
            Self::AttributeStart => "'#['",
            Self::Operator => "operator",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Eq => "'='",
            Self::Amp => "'&'",
            Self::Minus => "'-'",
            Self::Dollar => "'$'",
            Self::Backslash => "'\\'",
            Self::Punct => "punctuation",
            Self::OpenTag => "open tag",
            Self::CloseTag => "close tag",
            Self::InlineHtml => "inline html",
            Self::Error => "error",
        };
        write!(f, "{s}")
    }
}
