use crate::support::{or_exit, parse_class_or_exit, parse_matrix, print_json};
use dfo_kernel::build_operator;
use serde_json::json;

pub fn run(class: String, n: u32, matrix: String, json_output: bool) {
    let class = parse_class_or_exit(&class);
    let rows = or_exit(parse_matrix(&matrix));
    let built = or_exit(build_operator(n, &class.spec(), rows));

    if json_output {
        print_json(&json!({
            "class": class.name(),
            "conforming": built.is_conforming(),
            "operator": built.operator,
            "content_hash": built.operator.content_hash(),
            "violations": built.violations,
        }));
    } else {
        println!("dfo check {class} -n {n}");
        for line in built.operator.to_string().lines() {
            println!("    {line}");
        }
        println!(
            "  Conforming: {}",
            if built.is_conforming() { "yes" } else { "no" }
        );
        for violation in &built.violations {
            println!("  - {violation}");
        }
    }
}
