use crate::support::{or_exit, parse_class_or_exit, print_json};
use dfo_kernel::{OperatorMatrix, OperatorSetDigest, SearchBudget, enumerate_operators};
use serde_json::json;

pub struct Args {
    pub class: String,
    pub n: u32,
    pub limit: Option<usize>,
    pub budget: SearchBudget,
    pub json: bool,
}

pub fn run(args: Args) {
    let class = parse_class_or_exit(&args.class);
    let search = or_exit(enumerate_operators(args.n, class, args.budget));

    // Nothing is printed until the search completes, so a tripped budget
    // never leaves a partial listing behind.
    let mut digest = OperatorSetDigest::new();
    let mut shown: Vec<OperatorMatrix> = Vec::new();
    for operator in search {
        let operator = or_exit(operator);
        digest.push(&operator);
        if args.limit.is_none_or(|limit| shown.len() < limit) {
            shown.push(operator);
        }
    }
    let total = digest.count();
    let truncated = total - shown.len() as u64;
    let digest = digest.finish();

    if args.json {
        print_json(&json!({
            "class": class.name(),
            "n": args.n,
            "count": total,
            "digest": digest,
            "operators": shown,
            "truncated": truncated,
        }));
    } else {
        println!("dfo enumerate {class} -n {}", args.n);
        for (index, operator) in shown.iter().enumerate() {
            println!("  #{}", index + 1);
            for line in operator.to_string().lines() {
                println!("    {line}");
            }
        }
        if truncated > 0 {
            println!("  ... {truncated} more");
        }
        println!("  Total: {total}");
        println!("  Digest: {digest}");
    }
}
