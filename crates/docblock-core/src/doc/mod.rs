//! DocBlock detection and synthesis
//!
//! Detection works on raw source lines, synthesis on extracted records.

mod detect;
mod synth;

pub use detect::{has_trailing_doc_block, indent_of};
pub use synth::{class_doc, decode_type, function_doc};
