use crate::support::{chain_or_exit, or_exit, parse_sequence, print_json};
use dfo_kernel::{DecreasingSequence, SearchBudget, fixed_column_count};
use serde_json::json;

pub struct Args {
    pub n: u32,
    pub sequence: String,
    pub partials: bool,
    pub budget: SearchBudget,
    pub json: bool,
}

pub fn run(args: Args) {
    let chain = chain_or_exit(args.n);
    let values = or_exit(parse_sequence(&args.sequence));
    let sequence = or_exit(DecreasingSequence::new(chain, values));
    let result = or_exit(fixed_column_count(args.n, &sequence, args.budget));

    if args.json {
        let partials: Option<Vec<_>> = args.partials.then(|| {
            result
                .partials
                .iter()
                .map(|(sequence, count)| {
                    json!({ "sequence": sequence, "count": count.to_string() })
                })
                .collect()
        });
        print_json(&json!({
            "n": args.n,
            "sequence": sequence,
            "count": result.count.to_string(),
            "dominated": result.partials.len(),
            "partials": partials,
        }));
    } else {
        println!("dfo fixed-column -n {} --sequence {sequence}", args.n);
        println!("  Count: {}", result.count);
        println!("  Dominated sequences: {}", result.partials.len());
        if args.partials {
            for (sequence, count) in result.partials.iter() {
                println!("    {sequence}: {count}");
            }
        }
    }
}
