use assert_cmd::{cargo, prelude::*};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "transactions": [
    { "amount": 1000, "type": "income", "category": "Work", "label": "Salary", "createdAt": 1736899200 },
    { "amount": 1234.5, "type": "expense", "category": "Housing", "label": "Rent", "createdAt": 1736985600 },
    { "amount": 15, "type": "expense", "label": "Snacks", "note": "chips, soda" }
  ],
  "totals": { "income": 1000, "expense": 1234.5, "balance": -234.5 },
  "monthlyIncome": 1000,
  "budget": 500
}"#;

const EMPTY: &str = r#"{ "totals": { "income": 0, "expense": 0, "balance": 0 } }"#;

fn write_input(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("failed to write input");
    path
}

fn cashpilot(config_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("cashpilot"));
    cmd.env("CASHPILOT_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

fn single_file_with_extension(dir: &Path, extension: &str) -> PathBuf {
    let matches: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == extension))
        .collect();
    assert_eq!(matches.len(), 1, "expected one .{} file in {:?}", extension, dir);
    matches.into_iter().next().unwrap()
}

#[test]
fn export_csv_writes_dated_file() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_input(&home, "snapshot.json", SNAPSHOT);

    cashpilot(home.path())
        .args(["export", "csv"])
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 transactions"));

    let file = single_file_with_extension(out.path(), "csv");
    let name = file.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Report-") && name.ends_with(".csv"));

    let contents = std::fs::read_to_string(file).unwrap();
    assert_eq!(contents.lines().count(), 4);
    assert!(contents.starts_with(r#""Label","Type","Category","Amount","Note","Created At""#));
    assert!(contents.contains(r#""chips, soda""#));
}

#[test]
fn export_pdf_without_charts_writes_pdf() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_input(&home, "snapshot.json", SNAPSHOT);

    cashpilot(home.path())
        .args(["export", "pdf"])
        .arg(&input)
        .arg("--output")
        .arg(out.path())
        .arg("--no-charts")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 page(s), 3 transaction(s)"));

    let file = single_file_with_extension(out.path(), "pdf");
    let bytes = std::fs::read(file).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn export_pdf_dry_run_writes_nothing() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_input(&home, "snapshot.json", SNAPSHOT);

    cashpilot(home.path())
        .args(["export", "pdf"])
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .args(["--no-charts", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary Overview"))
        .stdout(predicate::str::contains("1 page(s), 3 row(s), 0 chart(s), logo: no"));

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn export_with_no_transactions_prints_notice() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_input(&home, "empty.json", EMPTY);

    for format in ["csv", "pdf"] {
        cashpilot(home.path())
            .args(["export", format])
            .arg(&input)
            .arg("-o")
            .arg(out.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("No transactions to export."));
    }

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn export_pdf_reports_failure() {
    let home = TempDir::new().unwrap();
    let input = home.path().join("missing.json");

    cashpilot(home.path())
        .args(["export", "pdf"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF export failed:"));
}

#[test]
fn export_pdf_rejects_amounts_past_range() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let input = write_input(
        &home,
        "huge.json",
        r#"{
  "transactions": [
    { "amount": 50000000000000000, "type": "expense", "category": "Rent", "label": "a" },
    { "amount": 50000000000000000, "type": "expense", "category": "Rent", "label": "b" }
  ],
  "totals": { "income": 0, "expense": 0, "balance": 0 }
}"#,
    );

    cashpilot(home.path())
        .args(["export", "pdf"])
        .arg(&input)
        .arg("-o")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("PDF export failed:"))
        .stderr(predicate::str::contains("out of the supported amount range"));

    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[test]
fn summary_reads_yaml() {
    let home = TempDir::new().unwrap();
    let input = write_input(
        &home,
        "snapshot.yaml",
        "transactions:\n  - amount: 1234.5\n    type: expense\n    label: Rent\ntotals:\n  income: 1000\n  expense: 1234.5\n  balance: -234.5\nmonthlyIncome: 1000\nbudget: 500\n",
    );

    cashpilot(home.path())
        .arg("summary")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("-₦234.50"))
        .stdout(predicate::str::contains("Budget Remaining"))
        .stdout(predicate::str::contains("Over budget by ₦734.50"));
}

#[test]
fn init_then_config_uses_override_directory() {
    let home = TempDir::new().unwrap();

    cashpilot(home.path()).arg("init").assert().success();
    assert!(home.path().join("config.json").exists());

    cashpilot(home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(home.path().to_string_lossy().to_string()))
        .stdout(predicate::str::contains("Currency symbol:  ₦"));
}
