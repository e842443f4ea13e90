//! Integration tests: golden enumeration, validation and counting vectors.
//!
//! Each fixture in tests/fixtures/ has:
//! - case.json: the operation and its input
//! - expect.json: the expected output
//!
//! Enumeration fixtures list every operator in search order, so they pin
//! both the set and the order the search yields it in.

use dfo_kernel::{
    DecreasingSequence, FiniteChain, OperatorClass, SearchBudget, build_operator,
    enumerate_operators, fixed_column_count,
};
use serde_json::{Value, json};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn read_json(path: &PathBuf) -> Value {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text)
        .unwrap_or_else(|e| panic!("failed to parse {}: {e}", path.display()))
}

fn run_case(case: &Value) -> Value {
    let n = case["n"].as_u64().expect("missing n") as u32;
    match case["operation"].as_str().expect("missing operation") {
        "enumerate" => {
            let class: OperatorClass = case["class"].as_str().unwrap().parse().unwrap();
            let operators: Vec<Value> = enumerate_operators(n, class, SearchBudget::UNLIMITED)
                .unwrap()
                .map(|operator| serde_json::to_value(operator.unwrap()).unwrap())
                .collect();
            json!({ "count": operators.len(), "operators": operators })
        }
        "check" => {
            let class: OperatorClass = case["class"].as_str().unwrap().parse().unwrap();
            let rows: Vec<Vec<i64>> = serde_json::from_value(case["rows"].clone()).unwrap();
            let built = build_operator(n, &class.spec(), rows).unwrap();
            json!({
                "conforming": built.is_conforming(),
                "violations": built.violations,
            })
        }
        "fixed_column" => {
            let values: Vec<u32> = serde_json::from_value(case["sequence"].clone()).unwrap();
            let chain = FiniteChain::new(n).unwrap();
            let sequence = DecreasingSequence::new(chain, values).unwrap();
            let result = fixed_column_count(n, &sequence, SearchBudget::UNLIMITED).unwrap();
            let partials: Vec<Value> = result
                .partials
                .iter()
                .map(|(sequence, count)| {
                    json!({ "sequence": sequence, "count": count.to_string() })
                })
                .collect();
            json!({ "count": result.count.to_string(), "partials": partials })
        }
        other => panic!("unknown operation: {other}"),
    }
}

fn run_fixture(name: &str) {
    let dir = fixtures_dir().join(name);
    let case = read_json(&dir.join("case.json"));
    let expected = read_json(&dir.join("expect.json"));

    let actual = run_case(&case);

    assert_eq!(
        actual,
        expected,
        "\n\nFixture: {name}\n\nGot:\n{}\n\nExpected:\n{}\n",
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap(),
    );
}

#[test]
fn golden_conjunctions_n2() {
    run_fixture("enumerate_conjunctions_n2");
}

#[test]
fn golden_np_conjunctions_n2() {
    run_fixture("enumerate_np_conjunctions_n2");
}

#[test]
fn golden_cp_implications_n2() {
    run_fixture("enumerate_cp_implications_n2");
}

#[test]
fn golden_minimum_is_cb_conjunction() {
    run_fixture("check_minimum_conjunction");
}

#[test]
fn adversarial_asymmetric_conjunction() {
    run_fixture("check_asymmetric_conjunction");
}

#[test]
fn adversarial_np_upper_corner() {
    run_fixture("check_np_upper_corner");
}

#[test]
fn golden_fixed_column_staircase_n3() {
    run_fixture("fixed_column_staircase_n3");
}
