//! Insertion pass - prepends synthesized blocks to declaration lines

use std::collections::HashSet;

use tracing::debug;

use crate::config::{GeneratorConfig, NameFilter};
use crate::doc::{class_doc, function_doc, has_trailing_doc_block, indent_of};
use crate::extract::Declarations;
use crate::stats::GenerationCounters;
use crate::LINE_ENDING;

/// Result of rewriting one file's lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rewrite {
    /// Output lines; a line that received a block carries it as a prefix
    pub lines: Vec<String>,
    pub inserted_functions: usize,
    pub inserted_classes: usize,
}

impl Rewrite {
    /// Total blocks inserted
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.inserted_functions + self.inserted_classes
    }

    /// The rewritten source
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join(LINE_ENDING)
    }
}

/// Rewrite source lines, prepending a block to every undocumented
/// declaration line.
///
/// Line numbers in `declarations` are 1-based. A declaration is documented
/// when the line above it closes a block comment. When a class and a
/// function start on the same line only the class is documented.
#[must_use]
pub fn rewrite(
    lines: &[&str],
    declarations: &Declarations,
    filter: &NameFilter,
    config: &GeneratorConfig,
    counters: &mut GenerationCounters,
) -> Rewrite {
    let class_lines: HashSet<u32> = declarations.classes.iter().map(|c| c.line).collect();
    let function_lines: HashSet<u32> = declarations.functions.values().map(|f| f.line).collect();

    let mut out = Rewrite {
        lines: Vec::with_capacity(lines.len()),
        ..Default::default()
    };

    for (idx, &line) in lines.iter().enumerate() {
        let Ok(number) = u32::try_from(idx + 1) else {
            out.lines.push(line.to_string());
            continue;
        };
        let documented = idx
            .checked_sub(1)
            .is_some_and(|prev| has_trailing_doc_block(lines[prev]));

        let block = if documented {
            None
        } else if class_lines.contains(&number) {
            declarations.class_at(number).and_then(|class| {
                if filter.allows(&class.name) {
                    out.inserted_classes += 1;
                    Some(class_doc(indent_of(line), class, config))
                } else {
                    debug!(class = %class.name, "not in the name filter");
                    counters.filtered_declarations += 1;
                    None
                }
            })
        } else if function_lines.contains(&number) {
            declarations.function_at(number).and_then(|function| {
                if filter.allows(&function.name) {
                    out.inserted_functions += 1;
                    Some(function_doc(indent_of(line), function, config))
                } else {
                    debug!(function = %function.name, "not in the name filter");
                    counters.filtered_declarations += 1;
                    None
                }
            })
        } else {
            None
        };

        match block {
            Some(mut block) => {
                block.push_str(line);
                out.lines.push(block);
            }
            None => out.lines.push(line.to_string()),
        }
    }

    out
}
