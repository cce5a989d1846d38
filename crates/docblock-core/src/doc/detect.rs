//! Line-level heuristics used by the insertion pass

/// Leading whitespace of a line
#[must_use]
pub fn indent_of(line: &str) -> &str {
    let body = line.trim_start_matches(|c: char| c.is_ascii_whitespace());
    &line[..line.len() - body.len()]
}

/// True if the line closes a block comment anywhere.
///
/// This does not check that a comment was opened: `$s = "*/";` also
/// counts. Declarations following such a line are left alone.
#[must_use]
pub fn has_trailing_doc_block(line: &str) -> bool {
    let trimmed = line.trim_start_matches([' ', '\t', '\n', '\r', '\0', '\x0B']);
    let mut after_star = false;
    for ch in trimmed.chars() {
        if after_star && ch == '/' {
            return true;
        }
        after_star = ch == '*';
    }
    false
}
