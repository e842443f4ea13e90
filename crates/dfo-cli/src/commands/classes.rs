use crate::support::print_json;
use dfo_kernel::OperatorClass;
use serde_json::json;

pub fn run(json_output: bool) {
    if json_output {
        let classes: Vec<_> = OperatorClass::ALL
            .into_iter()
            .map(|class| {
                json!({
                    "name": class.name(),
                    "description": class.description(),
                    "binary": class.is_binary(),
                    "conjunction_dual": class.conjunction_dual().map(OperatorClass::name),
                })
            })
            .collect();
        print_json(&json!({ "classes": classes }));
    } else {
        println!("dfo classes");
        for class in OperatorClass::ALL {
            println!("  {:<24} {}", class.name(), class.description());
        }
    }
}
