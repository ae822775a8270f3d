//! End-to-end runs of the two binaries.

use pf2e_core::testing::sample_character_json;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(bin: &str, dir: &Path, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("PF2E_SHEET_PAGE_SIZE")
        .env_remove("PF2E_SHEET_STATIC_VALUES")
        .output()
        .expect("Failed to run binary")
}

fn xlsx() -> &'static str {
    env!("CARGO_BIN_EXE_pf2e-xlsx")
}

fn pdf() -> &'static str {
    env!("CARGO_BIN_EXE_pf2e-pdf")
}

fn sample_input(dir: &TempDir) -> String {
    let path = dir.path().join("valeros.json");
    fs::write(&path, sample_character_json().to_string()).unwrap();
    path.to_string_lossy().to_string()
}

#[test]
fn test_wrong_argument_count_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);

    for bin in [xlsx(), pdf()] {
        let output = run(bin, dir.path(), &[input.as_str()]);
        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));

        let output = run(bin, dir.path(), &[]);
        assert_eq!(output.status.code(), Some(1));
    }

    // Only the input file is present.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_help_exits_zero() {
    let dir = TempDir::new().unwrap();
    let output = run(pdf(), dir.path(), &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--page-size"));
}

#[test]
fn test_xlsx_success() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let target = dir.path().join("valeros.xlsx");

    let output = run(xlsx(), dir.path(), &[input.as_str(), target.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Excel character sheet created"));
    assert!(stdout.contains(target.to_str().unwrap()));
    assert!(fs::read(&target).unwrap().starts_with(b"PK"));
}

#[test]
fn test_pdf_success_with_page_size() {
    let dir = TempDir::new().unwrap();
    let input = sample_input(&dir);
    let target = dir.path().join("valeros.pdf");

    let output = run(
        pdf(),
        dir.path(),
        &["--page-size", "a4", input.as_str(), target.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("valeros.pdf"));

    let doc = lopdf::Document::load(&target).expect("Written PDF should parse");
    assert_eq!(doc.get_pages().len(), 5);
}

#[test]
fn test_missing_input_exits_one_without_output() {
    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.xlsx");

    let output = run(
        xlsx(),
        dir.path(),
        &["does-not-exist.json", target.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error"));
    assert!(!target.exists());
}

#[test]
fn test_malformed_input_exits_one() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();
    let target = dir.path().join("out.pdf");

    let output = run(
        pdf(),
        dir.path(),
        &[input.to_str().unwrap(), target.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(!target.exists());
}
