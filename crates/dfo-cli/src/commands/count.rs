use crate::support::{exit_with, or_exit, parse_class_or_exit, print_json};
use dfo_kernel::{SearchBudget, count_exhaustive, count_operators_within};
use serde_json::json;

pub struct Args {
    pub class: String,
    pub n: u32,
    pub to: Option<u32>,
    pub exhaustive: bool,
    pub budget: SearchBudget,
    pub json: bool,
}

pub fn run(args: Args) {
    let class = parse_class_or_exit(&args.class);
    let last = args.to.unwrap_or(args.n);
    if last < args.n {
        exit_with(format!("--to {last} is smaller than -n {}", args.n));
    }

    let method = if args.exhaustive {
        "exhaustive"
    } else if class.has_closed_form() {
        "closed_form"
    } else {
        "extension"
    };
    let counts: Vec<(u32, String)> = (args.n..=last)
        .map(|n| {
            let count = if args.exhaustive {
                count_exhaustive(n, class, args.budget)
            } else {
                count_operators_within(n, class, args.budget)
            };
            (n, or_exit(count).to_string())
        })
        .collect();

    if args.json {
        let rows: Vec<_> = counts
            .iter()
            .map(|(n, count)| json!({ "n": n, "count": count }))
            .collect();
        print_json(&json!({
            "class": class.name(),
            "method": method,
            "counts": rows,
        }));
    } else {
        println!("dfo count {class} ({method})");
        for (n, count) in &counts {
            println!("  L_{n}: {count}");
        }
    }
}
