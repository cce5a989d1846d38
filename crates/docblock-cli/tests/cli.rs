//! Integration tests for the docblock binary.
//!
//! These run the real executable against PHP trees in temporary directories.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const UNDOCUMENTED: &str = "<?php
class Invoice
{
    public function total($tax = 0)
    {
        return 1 + $tax;
    }
}
";

const DOCUMENTED: &str = "<?php
/**
 * Tidy
 */
function tidy() {}
";

const PLAIN: &str = "<?php
// formats things
function format_it() {}
";

fn docblock(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("docblock").unwrap();
    cmd.current_dir(dir).env_remove("RUST_LOG").arg("--no-color");
    cmd
}

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (name, content) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
    dir
}

fn read(dir: &TempDir, name: &str) -> String {
    fs::read_to_string(dir.path().join(name))
        .unwrap()
        .replace("\r\n", "\n")
}

#[test]
fn documents_a_single_file() {
    let dir = project(&[("invoice.php", UNDOCUMENTED)]);

    docblock(dir.path())
        .args(["-s", "invoice.php"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PHP DocBlock Generator"))
        .stdout(predicate::str::contains(
            "There were 1 functions found and 1 were converted.",
        ))
        .stdout(predicate::str::contains(
            "There were 1 classes found and 1 were converted.",
        ));

    let text = read(&dir, "invoice.php");
    assert!(text.starts_with("<?php\n/**\n * Invoice\n * Insert description here\n"));
    assert!(text.contains(
        "    /**\n     * total\n     *\n     * Insert description here\n     *\n     * @param int $tax\n     * @access public\n     *\n     * @return type\n     */\n    public function total($tax = 0)\n"
    ));
}

#[test]
fn second_run_changes_nothing() {
    let dir = project(&[("invoice.php", UNDOCUMENTED)]);
    docblock(dir.path()).args(["-s", "invoice.php"]).assert().code(0);
    let first = read(&dir, "invoice.php");

    docblock(dir.path())
        .args(["-s", "invoice.php"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("0 were converted."));
    assert_eq!(read(&dir, "invoice.php"), first);
}

#[test]
fn dry_run_writes_nothing() {
    let dir = project(&[("invoice.php", UNDOCUMENTED)]);

    docblock(dir.path())
        .args(["-s", ".", "--dryrun"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Dry Run Only"))
        .stdout(predicate::str::contains("1 would be converted."));

    assert_eq!(read(&dir, "invoice.php"), UNDOCUMENTED);
}

#[test]
fn directory_scan_is_flat_unless_recursive() {
    let dir = project(&[("top.php", PLAIN), ("lib/inner.php", UNDOCUMENTED)]);

    docblock(dir.path())
        .args(["-s", "."])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "There were 1 files total scanned and 0 files excluded.",
        ));
    assert_eq!(read(&dir, "lib/inner.php"), UNDOCUMENTED);

    docblock(dir.path())
        .args(["-s", ".", "--recursive"])
        .assert()
        .stdout(predicate::str::contains(
            "There were 2 files total scanned and 0 files excluded.",
        ));
    assert_ne!(read(&dir, "lib/inner.php"), UNDOCUMENTED);
}

#[test]
fn plain_comments_exit_with_warning() {
    let dir = project(&[("plain.php", PLAIN), ("done.php", DOCUMENTED)]);

    docblock(dir.path())
        .args(["-s", "."])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "WARNING: There were 1 existing non-docblock comments found.",
        ))
        .stdout(predicate::str::contains(
            "There were 1 existing docblock comments found.",
        ));
}

#[test]
fn exclusions_are_counted_not_processed() {
    let dir = project(&[
        ("app.php", DOCUMENTED),
        ("vendor/lib.php", UNDOCUMENTED),
        ("cache/tmp.php", UNDOCUMENTED),
    ]);

    docblock(dir.path())
        .args(["-s", ".", "-r", "-x", "vendor cache"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains(
            "There were 3 files total scanned and 2 files excluded.",
        ))
        .stdout(predicate::str::contains("File Exclusions: vendor, cache"));

    assert_eq!(read(&dir, "vendor/lib.php"), UNDOCUMENTED);
    assert_eq!(read(&dir, "cache/tmp.php"), UNDOCUMENTED);
}

#[test]
fn function_filter_limits_changes() {
    let dir = project(&[(
        "funcs.php",
        "<?php\nfunction keep() {}\n\nfunction skip() {}\n",
    )]);

    docblock(dir.path())
        .args(["-s", "funcs.php", "-f", "keep"])
        .assert()
        .code(0);

    let text = read(&dir, "funcs.php");
    assert!(text.contains(" * keep\n"));
    assert!(!text.contains(" * skip\n"));
}

#[test]
fn full_style_from_config_file() {
    let dir = project(&[
        ("invoice.php", UNDOCUMENTED),
        ("docblock.toml", "full = true\ndescription = \"\"\n"),
    ]);

    docblock(dir.path())
        .args(["-s", "invoice.php"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PHPDoc Comment Style: Full"));

    let text = read(&dir, "invoice.php");
    assert!(text.contains(" * @category\n"));
    assert!(text.contains("     * @since\n"));
    assert!(!text.contains("Insert description here"));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = project(&[("invoice.php", UNDOCUMENTED), ("bad.toml", "colour = 1\n")]);

    docblock(dir.path())
        .args(["-s", "invoice.php", "--config", "bad.toml"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("FATAL:"));
    assert_eq!(read(&dir, "invoice.php"), UNDOCUMENTED);
}

#[test]
fn missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    docblock(dir.path())
        .args(["-s", "nowhere"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FATAL: nowhere does not exist"));
}

#[test]
fn non_php_target_is_fatal() {
    let dir = project(&[("readme.txt", "hello")]);
    docblock(dir.path())
        .args(["-s", "readme.txt"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a PHP file"));
}

#[test]
fn unreadable_file_is_a_read_error() {
    let dir = project(&[("ok.php", UNDOCUMENTED)]);
    fs::write(dir.path().join("binary.php"), b"<?php\n// \xff\xfe\nfunction f() {}\n").unwrap();

    docblock(dir.path())
        .args(["-s", "."])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("There were 1 read/write errors."));

    docblock(dir.path())
        .args(["-s", ".", "--dry-run"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains(
            "There would be 1 read/write errors expected.",
        ));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    docblock(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
