//! Run-wide counters and the exit status derived from them

/// Counters accumulated over a whole generation run.
///
/// Every stage takes `&mut GenerationCounters` and bumps what it observes;
/// the CLI renders the final values as the summary report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationCounters {
    /// Candidate files considered, excluded ones included
    pub total_files: usize,
    pub excluded_files: usize,
    /// Files that needed no insertion
    pub skipped_files: usize,
    /// Validation, read and write failures
    pub errors: usize,

    pub total_functions: usize,
    pub converted_functions: usize,
    /// Unnamed or disabled anonymous functions
    pub skipped_functions: usize,

    pub total_classes: usize,
    pub converted_classes: usize,
    /// Anonymous classes
    pub skipped_classes: usize,

    /// Declarations left alone because of the name allow-list
    pub filtered_declarations: usize,

    pub existing_doc_comments: usize,
    pub existing_plain_comments: usize,
    pub undocumented_functions: usize,
}

/// Process exit status for a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Nothing to report
    Clean,
    /// Declarations carry plain comments that were not converted
    PlainComments,
    /// Read or write errors occurred
    IoErrors,
    /// Read or write errors would occur
    ExpectedIoErrors,
}

impl ExitStatus {
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Clean => 0,
            Self::PlainComments => 1,
            Self::IoErrors => 2,
            Self::ExpectedIoErrors => 3,
        }
    }
}

impl GenerationCounters {
    /// Errors take precedence over plain-comment warnings
    #[must_use]
    pub fn exit_status(&self, dry_run: bool) -> ExitStatus {
        if self.errors > 0 {
            if dry_run {
                ExitStatus::ExpectedIoErrors
            } else {
                ExitStatus::IoErrors
            }
        } else if self.existing_plain_comments > 0 {
            ExitStatus::PlainComments
        } else {
            ExitStatus::Clean
        }
    }

    /// Declarations that received a block
    #[must_use]
    pub fn converted(&self) -> usize {
        self.converted_functions + self.converted_classes
    }
}
