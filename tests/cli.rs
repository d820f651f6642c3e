use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn pydeps() -> Command {
    Command::cargo_bin("pydeps").unwrap()
}

fn sample_dir() -> tempfile::TempDir {
    let dir = tempfile::TempDir::new().unwrap();
    fs::write(dir.path().join("a.py"), "import b\nimport c\n").unwrap();
    fs::write(dir.path().join("b.py"), "def f():\n    import c\n").unwrap();
    fs::write(dir.path().join("c.py"), "X = 1\n").unwrap();
    dir
}

#[test]
fn writes_dot_to_stdout() {
    let dir = sample_dir();
    pydeps()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "digraph \"Module Dependencies\" {\n    graph [rankdir=LR]\n",
        ))
        .stdout(predicate::str::contains(
            "    \"b\" -> \"c\" [weight=1, style=dashed]\n",
        ));
}

#[test]
fn writes_output_file_and_honors_ignore_list() {
    let dir = sample_dir();
    let out = dir.path().join("deps.dot");

    pydeps()
        .arg(dir.path())
        .arg(&out)
        .args(["--ignore", "c,"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let s = fs::read_to_string(&out).unwrap();
    assert!(s.contains("    \"a\" -> \"b\" [weight=1, style=solid]\n"));
    assert!(!s.contains("\"c\""));
}

#[test]
fn json_compact_format() {
    let dir = sample_dir();
    pydeps()
        .arg(dir.path())
        .args(["--format", "json-compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"format\":\"compact\""));
}

#[test]
fn missing_directory_fails_without_output() {
    let dir = tempfile::TempDir::new().unwrap();
    let out = dir.path().join("deps.dot");

    pydeps()
        .arg(dir.path().join("missing"))
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a directory"));

    assert!(!out.exists());
}

#[test]
fn duplicate_error_policy_aborts() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("pkg")).unwrap();
    fs::write(dir.path().join("pkg.py"), "").unwrap();
    fs::write(dir.path().join("pkg/__init__.py"), "").unwrap();

    pydeps()
        .arg(dir.path())
        .args(["--duplicates", "error"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Duplicate module name 'pkg'"));
}

#[test]
fn verbose_dumps_catalog_to_stderr() {
    let dir = sample_dir();
    pydeps()
        .arg(dir.path())
        .arg("--verbose")
        .assert()
        .success()
        .stderr(predicate::str::contains("Resolved catalog:"))
        .stderr(predicate::str::contains("\"direct_imports\""));
}

#[test]
fn duplicate_warn_policy_keeps_going() {
    let dir = tempfile::TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("pkg")).unwrap();
    fs::write(dir.path().join("pkg.py"), "import os\n").unwrap();
    fs::write(dir.path().join("pkg/__init__.py"), "import sys\n").unwrap();

    pydeps()
        .arg(dir.path())
        .args(["--duplicates", "warn"])
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Warning: Module 'pkg' defined by both",
        ))
        .stdout(predicate::str::contains("    \"pkg\"\n"));
}

#[test]
fn skip_unreadable_warns_and_renders_the_rest() {
    let dir = sample_dir();
    fs::write(dir.path().join("broken.py"), [0x69, 0x6d, 0xff, 0xfe]).unwrap();

    pydeps()
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.py"));

    pydeps()
        .arg(dir.path())
        .arg("--skip-unreadable")
        .assert()
        .success()
        .stderr(predicate::str::contains("Warning: Failed to read"))
        .stderr(predicate::str::contains("broken.py"))
        .stdout(predicate::str::contains(
            "    \"a\" -> \"b\" [weight=1, style=solid]\n",
        ))
        .stdout(predicate::str::contains("broken").not());
}
