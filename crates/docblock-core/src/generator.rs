//! File driver - validation, exclusion, rewrite and write-back per file

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info, info_span, warn};

use crate::config::{GeneratorConfig, NameFilter};
use crate::extract::{extract, ExtractOptions};
use crate::insert::{rewrite, Rewrite};
use crate::lexer::Lexer;
use crate::stats::GenerationCounters;
use crate::LINE_ENDING;

/// Errors that end processing of a single file.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{} is not a PHP file", .0.display())]
    NotPhpFile(PathBuf),

    #[error("{} is not readable", .0.display())]
    Unreadable(PathBuf),

    #[error("{} is not writable, check file permissions", .0.display())]
    Unwritable(PathBuf),

    #[error("read error for {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8", .0.display())]
    Encoding(PathBuf),

    #[error("write error for {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// Wrong extension or missing permissions, detected before reading
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotPhpFile(_) | Self::Unreadable(_) | Self::Unwritable(_)
        )
    }
}

/// What happened to one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Excluded,
    /// Nothing to insert
    Unchanged,
    Rewritten { functions: usize, classes: usize },
    /// Insertions counted but not written
    DryRun { functions: usize, classes: usize },
    Failed,
}

/// True if the path can be opened for reading
#[must_use]
pub fn is_readable(path: &Path) -> bool {
    if path.is_dir() {
        fs::read_dir(path).is_ok()
    } else {
        File::open(path).is_ok()
    }
}

/// True if the path can be written without truncating it
#[must_use]
pub fn is_writable(path: &Path) -> bool {
    if path.is_dir() {
        fs::metadata(path).is_ok_and(|m| !m.permissions().readonly())
    } else {
        OpenOptions::new().append(true).open(path).is_ok()
    }
}

/// Rewrites PHP files according to a [`GeneratorConfig`]
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    filter: NameFilter,
}

impl Generator {
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        let filter = config.name_filter();
        Self { config, filter }
    }

    /// Tokenize, extract and rewrite a source string in memory
    pub fn rewrite_source(&self, source: &str, counters: &mut GenerationCounters) -> Rewrite {
        let (tokens, errors) = Lexer::tokenize(source);
        for error in &errors {
            debug!(%error, "tokenizer recovered");
        }

        let options = ExtractOptions {
            include_anonymous: self.config.anonymous,
        };
        let declarations = extract(&tokens, options, counters);

        let lines: Vec<&str> = source.split(LINE_ENDING).collect();
        rewrite(&lines, &declarations, &self.filter, &self.config, counters)
    }

    /// Check extension and permissions of a single file.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn validate_file(&self, path: &Path) -> Result<(), ProcessError> {
        if !self.config.accepts_extension(path) {
            return Err(ProcessError::NotPhpFile(path.to_path_buf()));
        }
        if !is_readable(path) {
            return Err(ProcessError::Unreadable(path.to_path_buf()));
        }
        if !is_writable(path) {
            return Err(ProcessError::Unwritable(path.to_path_buf()));
        }
        Ok(())
    }

    /// Rewrite one file, or count what would be rewritten in dry-run mode.
    ///
    /// Conversions and skipped files are counted here; errors are returned
    /// for the caller to count.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not UTF-8, or cannot
    /// be written back.
    pub fn process_file(
        &self,
        path: &Path,
        counters: &mut GenerationCounters,
    ) -> Result<FileOutcome, ProcessError> {
        let bytes = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let source =
            String::from_utf8(bytes).map_err(|_| ProcessError::Encoding(path.to_path_buf()))?;

        let rewrite = self.rewrite_source(&source, counters);
        if rewrite.inserted() == 0 {
            debug!("nothing to document");
            counters.skipped_files += 1;
            return Ok(FileOutcome::Unchanged);
        }

        let functions = rewrite.inserted_functions;
        let classes = rewrite.inserted_classes;

        if self.config.dry_run {
            if !is_writable(path) {
                return Err(ProcessError::Unwritable(path.to_path_buf()));
            }
            info!(functions, classes, "would insert DocBlocks");
            counters.converted_functions += functions;
            counters.converted_classes += classes;
            return Ok(FileOutcome::DryRun { functions, classes });
        }

        fs::write(path, rewrite.text()).map_err(|source| ProcessError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        info!(functions, classes, "inserted DocBlocks");
        counters.converted_functions += functions;
        counters.converted_classes += classes;
        Ok(FileOutcome::Rewritten { functions, classes })
    }

    /// Process one candidate: count it, honor exclusions, validate, then
    /// rewrite. Failures are logged and counted, never returned.
    pub fn process_candidate(&self, path: &Path, counters: &mut GenerationCounters) -> FileOutcome {
        let span = info_span!("file", path = %path.display());
        let _enter = span.enter();

        counters.total_files += 1;
        if self.config.is_excluded(path) {
            debug!("excluded");
            counters.excluded_files += 1;
            return FileOutcome::Excluded;
        }

        let result = self
            .validate_file(path)
            .and_then(|()| self.process_file(path, counters));
        match result {
            Ok(outcome) => outcome,
            Err(err) => {
                if err.is_validation() {
                    warn!(error = %err, "skipping file");
                } else {
                    error!(error = %err, "read/write error");
                }
                counters.errors += 1;
                FileOutcome::Failed
            }
        }
    }

    /// Process candidates in order; one file's failure never stops the batch
    pub fn process_batch<P: AsRef<Path>>(
        &self,
        paths: &[P],
        counters: &mut GenerationCounters,
    ) -> Vec<FileOutcome> {
        paths
            .iter()
            .map(|path| self.process_candidate(path.as_ref(), counters))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{source, unix_lines};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn undocumented() -> String {
        source(&["<?php", "class A {", "    function b() {}", "}", ""])
    }

    #[test]
    fn rewrites_file_in_place() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.php", &undocumented());
        let generator = Generator::new(GeneratorConfig::default());
        let mut counters = GenerationCounters::default();

        let outcome = generator.process_candidate(&path, &mut counters);
        assert_eq!(
            outcome,
            FileOutcome::Rewritten {
                functions: 1,
                classes: 1
            }
        );
        assert_eq!(counters.total_files, 1);
        assert_eq!(counters.converted_functions, 1);
        assert_eq!(counters.converted_classes, 1);

        let written = unix_lines(&fs::read_to_string(&path).unwrap());
        assert!(written.starts_with("<?php\n/**\n * A\n"));
        assert!(written.contains("    /**\n     * b\n"));
        assert!(written.ends_with("    function b() {}\n}\n"));
    }

    #[test]
    fn second_run_skips_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "a.php", &undocumented());
        let generator = Generator::new(GeneratorConfig::default());

        generator.process_candidate(&path, &mut GenerationCounters::default());
        let first = fs::read_to_string(&path).unwrap();

        let mut counters = GenerationCounters::default();
        let outcome = generator.process_candidate(&path, &mut counters);
        assert_eq!(outcome, FileOutcome::Unchanged);
        assert_eq!(counters.skipped_files, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), first);
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let original = undocumented();
        let path = write(&dir, "a.php", &original);
        let generator = Generator::new(GeneratorConfig {
            dry_run: true,
            ..Default::default()
        });
        let mut counters = GenerationCounters::default();

        let outcome = generator.process_candidate(&path, &mut counters);
        assert_eq!(
            outcome,
            FileOutcome::DryRun {
                functions: 1,
                classes: 1
            }
        );
        assert_eq!(counters.converted(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn excluded_path_is_only_counted() {
        let dir = TempDir::new().unwrap();
        let original = undocumented();
        let path = write(&dir, "vendor/lib.php", &original);
        let generator = Generator::new(GeneratorConfig {
            exclude: vec!["vendor".into()],
            ..Default::default()
        });
        let mut counters = GenerationCounters::default();

        assert_eq!(
            generator.process_candidate(&path, &mut counters),
            FileOutcome::Excluded
        );
        assert_eq!(
            counters,
            GenerationCounters {
                total_files: 1,
                excluded_files: 1,
                ..Default::default()
            }
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn wrong_extension_is_a_validation_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "notes.txt", "<?php function f() {}");
        let generator = Generator::new(GeneratorConfig::default());

        let err = generator.validate_file(&path).unwrap_err();
        assert!(err.is_validation());
        assert!(matches!(err, ProcessError::NotPhpFile(_)));

        let mut counters = GenerationCounters::default();
        assert_eq!(
            generator.process_candidate(&path, &mut counters),
            FileOutcome::Failed
        );
        assert_eq!(counters.errors, 1);
    }

    #[test]
    fn missing_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        let generator = Generator::new(GeneratorConfig::default());
        let err = generator
            .validate_file(&dir.path().join("gone.php"))
            .unwrap_err();
        assert!(matches!(err, ProcessError::Unreadable(_)));
    }

    #[test]
    fn non_utf8_file_is_a_read_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.php");
        fs::write(&path, b"<?php\n// caf\xe9\nfunction f() {}\n").unwrap();
        let generator = Generator::new(GeneratorConfig::default());
        let mut counters = GenerationCounters::default();

        let err = generator.process_file(&path, &mut counters).unwrap_err();
        assert!(matches!(err, ProcessError::Encoding(_)));
        assert!(!err.is_validation());
    }

    #[test]
    fn batch_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.txt", "nope");
        let good = write(&dir, "good.php", &undocumented());
        let done = write(
            &dir,
            "done.inc",
            &source(&["<?php", "/**", " * f", " */", "function f() {}"]),
        );
        let generator = Generator::new(GeneratorConfig::default());
        let mut counters = GenerationCounters::default();

        let outcomes = generator.process_batch(&[bad, good, done], &mut counters);
        assert_eq!(
            outcomes,
            vec![
                FileOutcome::Failed,
                FileOutcome::Rewritten {
                    functions: 1,
                    classes: 1
                },
                FileOutcome::Unchanged,
            ]
        );
        assert_eq!(counters.total_files, 3);
        assert_eq!(counters.errors, 1);
        assert_eq!(counters.skipped_files, 1);
        assert_eq!(counters.existing_doc_comments, 1);
    }

    #[test]
    fn rewrite_source_counts_declarations() {
        let generator = Generator::new(GeneratorConfig::default());
        let mut counters = GenerationCounters::default();
        let src = source(&["<?php", "class A {}", "function f() {}", "$x = function () {};"]);
        let rewrite = generator.rewrite_source(&src, &mut counters);
        assert_eq!(rewrite.inserted(), 2);
        assert_eq!(counters.total_classes, 1);
        assert_eq!(counters.total_functions, 2);
        assert_eq!(counters.skipped_functions, 1);
    }
}
