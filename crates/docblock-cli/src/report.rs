//! Boxed preface and summary printed around a run

use std::path::Path;
use std::time::Duration;

use docblock_core::{GenerationCounters, GeneratorConfig};

/// Inner width of a box row
const WIDTH: usize = 120;

/// A text box built row by row
#[derive(Default)]
struct Report {
    output: String,
}

impl Report {
    fn rule(&mut self) {
        self.output.push('+');
        self.output.push_str(&"-".repeat(WIDTH + 1));
        self.output.push_str("+\n");
    }

    fn row(&mut self, text: &str) {
        self.output.push_str(&format!("| {text:<width$}|\n", width = WIDTH));
    }

    fn finish(self) -> String {
        self.output
    }
}

fn listed(items: &[String], none: &str) -> String {
    if items.is_empty() {
        none.to_string()
    } else {
        items.join(", ")
    }
}

/// Settings box printed before any file is touched
pub fn preface(target: &Path, config: &GeneratorConfig) -> String {
    let mut r = Report::default();
    r.rule();
    r.row(&format!(
        "PHP DocBlock Generator {} - Starting{}",
        docblock_core::VERSION,
        if config.dry_run { " - Dry Run Only" } else { "" }
    ));
    r.rule();
    r.row("Processing Starting - Settings below");
    r.rule();
    r.row(&format!("Target Path: {}", target.display()));
    r.row(&format!(
        "Recursion is: {}",
        if config.recursive { "Enabled" } else { "Disabled" }
    ));
    r.row(&format!(
        "File Exclusions: {}",
        listed(&config.exclude, "None Excluded")
    ));
    r.row(&format!(
        "Included Functions: {}",
        listed(&config.functions, "All Functions")
    ));
    r.row(&format!(
        "Anonymous Functions: {}",
        if config.anonymous { "Included" } else { "Skipped" }
    ));
    r.row(&format!(
        "PHPDoc Comment Style: {}",
        if config.full { "Full" } else { "Short" }
    ));
    r.rule();
    r.finish()
}

/// Counts box printed after the batch
pub fn summary(counters: &GenerationCounters, elapsed: Duration, dry_run: bool) -> String {
    let verb = if dry_run { "would be" } else { "were" };
    let c = counters;

    let mut r = Report::default();
    r.rule();
    r.row(&format!(
        "DocBlock Generation took {:.2} seconds.",
        elapsed.as_secs_f64()
    ));
    r.rule();
    r.row(&format!(
        "There were {} files total scanned and {} files excluded.",
        c.total_files, c.excluded_files
    ));
    r.row(&format!(
        "There were {} files with nothing to document.",
        c.skipped_files
    ));
    r.row(&format!(
        "There were {} functions found and {} {verb} converted.",
        c.total_functions, c.converted_functions
    ));
    r.row(&format!(
        "There were {} classes found and {} {verb} converted.",
        c.total_classes, c.converted_classes
    ));
    r.row(&format!(
        "There were {} functions and {} classes skipped as anonymous or unnamed.",
        c.skipped_functions, c.skipped_classes
    ));
    if c.filtered_declarations > 0 {
        r.row(&format!(
            "There were {} declarations left out by the function filter.",
            c.filtered_declarations
        ));
    }
    r.row(&format!(
        "There were {} functions found with no comments.",
        c.undocumented_functions
    ));
    r.row(&format!(
        "There were {} existing docblock comments found.",
        c.existing_doc_comments
    ));
    r.row(&format!(
        "WARNING: There were {} existing non-docblock comments found.",
        c.existing_plain_comments
    ));
    if dry_run {
        r.row(&format!(
            "There would be {} read/write errors expected.",
            c.errors
        ));
    } else {
        r.row(&format!("There were {} read/write errors.", c.errors));
    }
    r.rule();
    r.finish()
}
