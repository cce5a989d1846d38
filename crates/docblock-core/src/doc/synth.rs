//! DocBlock synthesis
//!
//! Blocks are built line by line into an output buffer. Every line carries
//! the declaration's indentation and ends with [`LINE_ENDING`], so a block can
//! be prepended to the declaration line as is.

use crate::config::GeneratorConfig;
use crate::extract::{ClassRecord, FunctionRecord};
use crate::LINE_ENDING;

/// Tag lines written for classes at full verbosity
const CLASS_TAGS: &[&str] = &[
    "@category",
    "@package",
    "@author",
    "@copyright",
    "@license",
    "@version",
    "@link",
    "@see",
    "@since",
];

/// Type placeholder for parameters without a default
const UNKNOWN_TYPE: &str = "type";

/// Guess a parameter type from the first token of its default value
#[must_use]
pub fn decode_type(default: &str) -> &str {
    if default == "''" || default == "\"\"" {
        "string"
    } else if is_integer_literal(default) {
        "int"
    } else if default.eq_ignore_ascii_case("true") || default.eq_ignore_ascii_case("false") {
        "bool"
    } else {
        default
    }
}

fn is_integer_literal(text: &str) -> bool {
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0b" | "0B") => (&text[2..], 2),
        Some("0o" | "0O") => (&text[2..], 8),
        _ => (text, 10),
    };
    digits.starts_with(|c: char| c.is_digit(radix))
        && digits.chars().all(|c| c == '_' || c.is_digit(radix))
}

/// Line-oriented block writer
struct BlockWriter<'a> {
    indent: &'a str,
    output: String,
}

impl<'a> BlockWriter<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            indent,
            output: String::new(),
        }
    }

    fn line(&mut self, content: &str) {
        self.output.push_str(self.indent);
        self.output.push_str(content);
        self.output.push_str(LINE_ENDING);
    }

    /// A body line: ` * content`, or ` *` when empty
    fn body(&mut self, content: &str) {
        if content.is_empty() {
            self.line(" *");
        } else {
            self.line(&format!(" * {content}"));
        }
    }

    fn open(&mut self) {
        self.line("/**");
    }

    fn close(mut self) -> String {
        self.line(" */");
        self.output
    }
}

/// Build the block for a function or method
#[must_use]
pub fn function_doc(indent: &str, function: &FunctionRecord, config: &GeneratorConfig) -> String {
    let mut w = BlockWriter::new(indent);
    w.open();
    w.body(&function.name);
    if let Some(description) = config.description() {
        w.body("");
        w.body(description);
    }
    w.body("");

    for param in &function.parameters {
        let ty = param.default_value.as_deref().map_or(UNKNOWN_TYPE, decode_type);
        let amp = if param.by_reference { "&" } else { "" };
        w.body(&format!("@param {ty} {amp}{}", param.name));
    }
    if let Some(access) = function.access {
        w.body(&format!("@access {access}"));
    }
    if function.is_static {
        w.body("@static");
    }
    if function.has_return {
        w.body("");
        w.body("@return type");
    }
    if config.full {
        w.body("");
        w.body("@see");
        w.body("@since");
    }

    w.close()
}

/// Build the block for a class
#[must_use]
pub fn class_doc(indent: &str, class: &ClassRecord, config: &GeneratorConfig) -> String {
    let mut w = BlockWriter::new(indent);
    w.open();
    w.body(&class.name);
    if let Some(description) = config.description() {
        w.body(description);
    }
    w.body("");
    w.body("");
    if config.full {
        for tag in CLASS_TAGS {
            w.body(tag);
        }
    }

    w.close()
}
