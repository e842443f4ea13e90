use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "dfo-cli-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn run_dfo_in<I, S>(dir: &Path, args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_dfo");
    Command::new(bin)
        .current_dir(dir)
        .env_remove("DFO_LOG")
        .args(args)
        .output()
        .expect("dfo command should execute")
}

fn run_dfo<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let scratch = TempDirGuard::new("run");
    run_dfo_in(scratch.path(), args)
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn parse_json_stdout(output: &Output) -> Value {
    serde_json::from_slice::<Value>(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "expected valid JSON stdout, got error: {e}\nstdout:\n{}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

#[test]
fn classes_lists_the_catalogue() {
    let output = run_dfo(["classes", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    let classes = payload["classes"].as_array().expect("classes array");
    assert_eq!(classes.len(), 20);
    let negation = classes
        .iter()
        .find(|c| c["name"] == "negation")
        .expect("negation listed");
    assert_eq!(negation["binary"], false);

    let text = run_dfo(["classes"]);
    assert_success(&text);
    assert!(stdout_text(&text).contains("cp_implication"));
}

#[test]
fn count_json_reports_exact_strings() {
    let output = run_dfo(["count", "aggregation", "-n", "1", "--to", "3", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["class"], "aggregation");
    assert_eq!(payload["method"], "closed_form");
    let counts: Vec<&str> = payload["counts"]
        .as_array()
        .expect("counts array")
        .iter()
        .map(|row| row["count"].as_str().expect("count string"))
        .collect();
    assert_eq!(counts, vec!["4", "136", "21238"]);
}

#[test]
fn count_exhaustive_agrees_with_closed_form() {
    let output = run_dfo(["count", "np-implication", "-n", "3", "--exhaustive", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["method"], "exhaustive");
    assert_eq!(payload["counts"][0]["count"], "84");
}

#[test]
fn count_t_norms_by_extension() {
    let output = run_dfo(["count", "t-norm", "-n", "1", "--to", "5", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["class"], "t_norm");
    assert_eq!(payload["method"], "extension");
    let counts: Vec<&str> = payload["counts"]
        .as_array()
        .expect("counts array")
        .iter()
        .map(|row| row["count"].as_str().expect("count string"))
        .collect();
    assert_eq!(counts, vec!["1", "2", "6", "22", "94"]);
}

#[test]
fn count_closed_form_respects_max_nodes() {
    let output = run_dfo(["count", "aggregation", "-n", "6", "--max-nodes", "1"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: search budget exhausted"));
    assert!(stdout_text(&output).is_empty());
}

#[test]
fn enumerate_copulas() {
    let output = run_dfo(["enumerate", "copula", "-n", "3", "--json"]);
    assert_success(&output);
    assert_eq!(parse_json_stdout(&output)["count"], 6);
}

#[test]
fn count_text_output() {
    let output = run_dfo(["count", "negation", "-n", "4"]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("L_4: 35"));
}

#[test]
fn enumerate_prints_total_and_digest() {
    let output = run_dfo(["enumerate", "conjunction", "-n", "2", "--limit", "3", "--json"]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["count"], 14);
    assert_eq!(payload["truncated"], 11);
    assert_eq!(payload["operators"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        payload["operators"][0]["rows"],
        serde_json::json!([[0, 0, 0], [0, 0, 0], [0, 0, 2]])
    );
    let digest = payload["digest"].as_str().expect("digest string");
    assert!(digest.starts_with("dfos1_"));

    let again = parse_json_stdout(&run_dfo(["enumerate", "conjunction", "-n", "2", "--json"]));
    assert_eq!(again["digest"], digest);
}

#[test]
fn enumerate_fails_cleanly_on_budget() {
    let output = run_dfo(["enumerate", "aggregation", "-n", "3", "--max-nodes", "100"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("error: search budget exhausted"));
    assert!(stdout_text(&output).is_empty());
}

#[test]
fn enumerate_rejects_unary_class() {
    let output = run_dfo(["enumerate", "negation", "-n", "2"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("has no operator-matrix form"));
}

#[test]
fn check_reports_violations_without_failing() {
    let output = run_dfo([
        "check",
        "commutative_conjunction",
        "-n",
        "2",
        "--matrix",
        "0 0 0; 0 0 1; 0 0 2",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["conforming"], false);
    assert_eq!(payload["violations"][0]["constraint"], "symmetry");
    assert_eq!(payload["violations"][0]["cell"], serde_json::json!([1, 2]));
}

#[test]
fn check_rejects_wrong_shape() {
    let output = run_dfo(["check", "conjunction", "-n", "2", "--matrix", "0 0; 0 1"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("shape error"));
}

#[test]
fn fixed_column_with_partials() {
    let output = run_dfo([
        "fixed-column",
        "-n",
        "2",
        "--sequence",
        "2,1",
        "--partials",
        "--json",
    ]);
    assert_success(&output);
    let payload = parse_json_stdout(&output);
    assert_eq!(payload["count"], "5");
    assert_eq!(payload["dominated"], 4);
    assert_eq!(payload["partials"][3]["sequence"], serde_json::json!([1, 1]));
    assert_eq!(payload["partials"][3]["count"], "3");
}

#[test]
fn fixed_column_rejects_increasing_sequence() {
    let output = run_dfo(["fixed-column", "-n", "2", "--sequence", "1,2"]);
    assert_failure(&output);
    assert!(stderr_text(&output).contains("nonincreasing"));
}

#[test]
fn config_file_supplies_defaults() {
    let dir = TempDirGuard::new("config");
    fs::write(
        dir.path().join("dfo.toml"),
        "[budget]\nmax_nodes = 100\n\n[output]\njson = true\n",
    )
    .expect("config should be written");

    let budgeted = run_dfo_in(dir.path(), ["enumerate", "aggregation", "-n", "3"]);
    assert_failure(&budgeted);

    let json = run_dfo_in(dir.path(), ["count", "conjunction", "-n", "2"]);
    assert_success(&json);
    assert_eq!(parse_json_stdout(&json)["counts"][0]["count"], "14");

    let overridden = run_dfo_in(
        dir.path(),
        ["enumerate", "conjunction", "-n", "2", "--max-nodes", "100000"],
    );
    assert_success(&overridden);

    let text = run_dfo_in(dir.path(), ["classes", "--no-json"]);
    assert_success(&text);
    let stdout = stdout_text(&text);
    assert!(serde_json::from_str::<Value>(&stdout).is_err());
    assert!(stdout.contains("cp_implication"));

    let explicit = run_dfo_in(dir.path(), ["count", "conjunction", "-n", "2", "--no-json"]);
    assert_success(&explicit);
    assert!(stdout_text(&explicit).contains("L_2: 14"));
}

#[test]
fn malformed_config_is_reported() {
    let dir = TempDirGuard::new("bad-config");
    let path = dir.path().join("broken.toml");
    fs::write(&path, "[budget\n").expect("config should be written");
    let output = run_dfo_in(
        dir.path(),
        ["classes", "--config", path.to_str().expect("utf-8 path")],
    );
    assert_failure(&output);
    assert!(stderr_text(&output).contains("invalid toml"));
}
