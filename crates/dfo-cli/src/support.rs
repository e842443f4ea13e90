use crate::config::DfoConfig;
use dfo_kernel::{FiniteChain, OperatorClass};
use serde_json::Value;
use std::fmt::Display;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "DFO_LOG";

/// Install the stderr log subscriber. `--verbose` forces `debug`; otherwise
/// `DFO_LOG` is honoured with `warn` as the fallback.
pub fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

pub fn exit_with(message: impl Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}

pub fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| exit_with(e))
}

pub fn load_config_or_exit(path: Option<&str>) -> DfoConfig {
    or_exit(DfoConfig::load(path))
}

pub fn parse_class_or_exit(class: &str) -> OperatorClass {
    or_exit(class.parse())
}

pub fn chain_or_exit(n: u32) -> FiniteChain {
    or_exit(FiniteChain::new(n))
}

pub fn print_json(payload: &Value) {
    println!("{}", or_exit(serde_json::to_string_pretty(payload)));
}

/// Parse `"0 0 0; 0 1 1; 0 1 2"` (or comma separated entries) into rows.
pub fn parse_matrix(text: &str) -> Result<Vec<Vec<i64>>, String> {
    text.split(';')
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .map(|row| {
            row.split(|c: char| c == ',' || c.is_whitespace())
                .filter(|entry| !entry.is_empty())
                .map(|entry| {
                    entry
                        .parse::<i64>()
                        .map_err(|_| format!("invalid matrix entry `{entry}`"))
                })
                .collect()
        })
        .collect()
}

/// Parse `"3,2,1"` into entries.
pub fn parse_sequence(text: &str) -> Result<Vec<u32>, String> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<u32>()
                .map_err(|_| format!("invalid sequence entry `{entry}`"))
        })
        .collect()
}
