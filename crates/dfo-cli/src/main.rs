//! DFO CLI: the `dfo` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    support::init_tracing(cli.verbose);

    let config = support::load_config_or_exit(cli.config.as_deref());
    let budget = config.budget(cli.max_nodes);
    let json_default = config.output.json && !cli.no_json;

    match cli.command {
        Commands::Classes { json } => commands::classes::run(json || json_default),

        Commands::Count {
            class,
            n,
            to,
            exhaustive,
            json,
        } => commands::count::run(commands::count::Args {
            class,
            n,
            to,
            exhaustive,
            budget,
            json: json || json_default,
        }),

        Commands::Enumerate {
            class,
            n,
            limit,
            json,
        } => commands::enumerate::run(commands::enumerate::Args {
            class,
            n,
            limit: limit.or(config.output.limit),
            budget,
            json: json || json_default,
        }),

        Commands::Check {
            class,
            n,
            matrix,
            json,
        } => commands::check::run(class, n, matrix, json || json_default),

        Commands::FixedColumn {
            n,
            sequence,
            partials,
            json,
        } => commands::fixed_column::run(commands::fixed_column::Args {
            n,
            sequence,
            partials,
            budget,
            json: json || json_default,
        }),
    }
}
