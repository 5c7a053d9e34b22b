use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const TRIAL_CSV: &str = "\
arm,site,before,after,dose,response
drug,north,120,112,5,2.1
placebo,south,118,117,10,3.9
drug,east,130,121,15,6.2
placebo,north,125,124.5,20,8.1
drug,south,128,119,25,9.8
placebo,east,122,n/a,30,12.2
,north,119,118,,4.0
placebo,south,121,121.5,35,13.9
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("trial.csv"), TRIAL_CSV).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config_path(&self) -> PathBuf {
        self.path("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("datasnap").unwrap();
        cmd.current_dir(self.dir.path())
            .env("DATASNAP_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("DATASNAP_SETTINGS__DEFAULT_ALPHA")
            .env_remove("DATASNAP_SETTINGS__OUTPUT_FORMAT");
        cmd
    }
}

fn json_stdout(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_one_sample_json() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["test", "one-sample", "trial.csv", "--column", "before", "--test-value", "100", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["test_name"], "One-Sample t-Test");
    assert_eq!(json["sample_size"], 8);
    assert_eq!(json["significant"], true);
    assert_eq!(json["p_value_method"], "normal_approximation");
}

#[test]
fn test_table_output_has_interpretation() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["test", "anova", "trial.csv", "-c", "response", "-g", "site"])
        .assert()
        .success()
        .stdout(predicate::str::contains("One-Way ANOVA"))
        .stdout(predicate::str::contains("Interpretation"))
        .stdout(predicate::str::contains("null hypothesis"))
        .stdout(predicate::str::contains("One-Way ANOVA Analysis Results"))
        .stdout(predicate::str::contains("Recommendations:"));
}

#[test]
fn test_grouped_with_three_groups_fails() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["test", "grouped", "trial.csv", "-c", "before", "-g", "site"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Analysis Error:"))
        .stderr(predicate::str::contains("exactly 2 groups"));
}

#[test]
fn test_unknown_column_is_analysis_error() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["test", "correlation", "trial.csv", "-x", "dose", "-y", "weight"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Column 'weight' not found"));
}

#[test]
fn test_missing_file_is_reported() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["describe", "absent.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("absent.csv"));
}

#[test]
fn test_duplicate_header_reports_load_context() {
    let ws = Workspace::new();
    fs::write(ws.path("dup.csv"), "a,a\n1,2\n").unwrap();

    ws.cmd()
        .args(["describe", "dup.csv"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error: Failed to load dataset from"))
        .stderr(predicate::str::contains("Duplicate column name 'a'"));
}

#[test]
fn test_non_finite_test_value_is_rejected() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["test", "one-sample", "trial.csv", "-c", "before", "--test-value", "NaN"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Analysis Error:"))
        .stderr(predicate::str::contains("finite"));
}

#[test]
fn test_json_output_includes_narrative() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["test", "paired", "trial.csv", "--first", "before", "--second", "after", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["narrative"]["title"], "Paired Samples t-Test Analysis Results");
    assert!(json["narrative"]["summary"]
        .as_str()
        .unwrap()
        .starts_with("Statistically significant results found"));
}

#[test]
fn test_alpha_flag_is_clamped() {
    let ws = Workspace::new();
    let output = ws
        .cmd()
        .args(["test", "paired", "trial.csv", "--first", "before", "--second", "after", "--alpha", "0.9", "-o", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(json_stdout(&output.stdout)["alpha"], 0.2);
    assert!(String::from_utf8_lossy(&output.stderr).contains("alpha outside"));
}

#[test]
fn test_describe_json() {
    let ws = Workspace::new();
    let output = ws.cmd().args(["describe", "trial.csv", "-o", "json"]).output().unwrap();

    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["total_rows"], 8);
    assert_eq!(json["total_columns"], 6);
    assert_eq!(json["columns"][0]["profile"]["type"], "categorical");
    assert_eq!(json["columns"][2]["profile"]["type"], "numeric");
}

#[test]
fn test_describe_json_records_input() {
    let ws = Workspace::new();
    fs::write(
        ws.path("scores.json"),
        r#"[{"team": "a", "score": 1}, {"team": "b", "score": 2}, {"team": "a", "score": null}]"#,
    )
    .unwrap();

    let output = ws.cmd().args(["describe", "scores.json", "-o", "json"]).output().unwrap();
    assert!(output.status.success());
    let json = json_stdout(&output.stdout);
    assert_eq!(json["columns"][1]["name"], "score");
    assert_eq!(json["columns"][1]["missing"], 1);
}

#[test]
fn test_anomalies_compact() {
    let ws = Workspace::new();
    let data = "latency\n10\n11\n12\n11.5\n10.5\n95\n12.5\n";
    fs::write(ws.path("latency.csv"), data).unwrap();

    ws.cmd()
        .args(["anomalies", "latency.csv", "--column", "latency", "-o", "compact"])
        .assert()
        .success()
        .stdout(predicate::eq("latency row=6 value=95\n"));
}

#[test]
fn test_config_set_then_show() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["config", "set", "settings.default_alpha", "0.01"])
        .assert()
        .success();
    assert!(read(&ws.config_path()).contains("default_alpha = 0.01"));

    ws.cmd()
        .args(["config", "show", "-o", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.default_alpha=0.01"));

    let output = ws
        .cmd()
        .args(["test", "one-sample", "trial.csv", "-c", "before", "-m", "100", "-o", "json"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output.stdout)["alpha"], 0.01);
}

#[test]
fn test_env_overrides_config_file() {
    let ws = Workspace::new();
    ws.cmd().args(["config", "set", "top_values", "2"]).assert().success();

    ws.cmd()
        .env("DATASNAP_SETTINGS__TOP_VALUES", "7")
        .args(["config", "show", "-o", "compact"])
        .assert()
        .success()
        .stdout(predicate::str::contains("settings.top_values=7"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let ws = Workspace::new();
    ws.cmd()
        .args(["config", "set", "timeout_secs", "30"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown setting"));
    assert!(!ws.config_path().exists());
}

#[test]
fn test_config_reset_requires_force_without_tty() {
    let ws = Workspace::new();
    ws.cmd().args(["config", "set", "histogram_bins", "4"]).assert().success();

    ws.cmd().args(["config", "reset"]).assert().code(1);
    ws.cmd().args(["config", "reset", "--force"]).assert().success();
    assert!(read(&ws.config_path()).contains("histogram_bins = 10"));
}
