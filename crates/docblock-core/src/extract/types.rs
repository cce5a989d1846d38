//! Declaration records produced by the extractor

use indexmap::IndexMap;

use crate::lexer::TokenKind;

/// A class declaration site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    /// Line of the `class` keyword
    pub line: u32,
}

/// One parameter of a function declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRecord {
    /// Variable name including the `$` sigil
    pub name: String,
    pub by_reference: bool,
    /// Raw text of the first token of the default value
    pub default_value: Option<String>,
}

impl ParameterRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, by_reference: bool) -> Self {
        Self {
            name: name.into(),
            by_reference,
            default_value: None,
        }
    }
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Private,
    Protected,
}

impl AccessModifier {
    /// Map a visibility keyword onto its modifier
    #[must_use]
    pub const fn from_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Public => Some(Self::Public),
            TokenKind::Private => Some(Self::Private),
            TokenKind::Protected => Some(Self::Protected),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
        }
    }
}

impl std::fmt::Display for AccessModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A function or method declaration site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    pub name: String,
    /// Enclosing class name, empty for free functions
    pub class_name: String,
    pub line: u32,
    pub parameters: Vec<ParameterRecord>,
    pub is_static: bool,
    pub access: Option<AccessModifier>,
    pub has_return: bool,
}

impl FunctionRecord {
    #[must_use]
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            class_name: String::new(),
            line,
            parameters: Vec::new(),
            is_static: false,
            access: None,
            has_return: false,
        }
    }
}

/// Function records keyed by name.
///
/// Re-inserting an existing name replaces the record but keeps the slot of
/// the first declaration.
pub type FunctionMap = IndexMap<String, FunctionRecord>;

/// Everything the extractor found in one file
#[derive(Debug, Clone, Default)]
pub struct Declarations {
    pub functions: FunctionMap,
    /// Classes in encounter order
    pub classes: Vec<ClassRecord>,
}

impl Declarations {
    /// First function declared on `line`
    #[must_use]
    pub fn function_at(&self, line: u32) -> Option<&FunctionRecord> {
        self.functions.values().find(|f| f.line == line)
    }

    /// First class declared on `line`
    #[must_use]
    pub fn class_at(&self, line: u32) -> Option<&ClassRecord> {
        self.classes.iter().find(|c| c.line == line)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty()
    }
}
