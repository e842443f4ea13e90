use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dfo",
    about = "dfo: enumerate and exactly count discrete fuzzy operators on finite chains",
    version
)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./dfo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Abort a search after visiting this many nodes
    #[arg(long, global = true)]
    pub max_nodes: Option<u64>,

    /// Print text even when the config file turns JSON output on
    #[arg(long, global = true)]
    pub no_json: bool,

    /// Emit debug logs on stderr (otherwise filtered by DFO_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the operator classes
    Classes {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count the operators of a class exactly
    Count {
        /// Operator class, e.g. `conjunction` or `np-implication`
        class: String,

        /// Chain size n of L_n = {0, …, n}
        #[arg(short = 'n', long = "size")]
        n: u32,

        /// Count every size from n up to this one
        #[arg(long)]
        to: Option<u32>,

        /// Count by running the search instead of the closed form
        #[arg(long)]
        exhaustive: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Enumerate every operator of a class
    Enumerate {
        /// Operator class
        class: String,

        /// Chain size n
        #[arg(short = 'n', long = "size")]
        n: u32,

        /// Print at most this many operators (all are still counted)
        #[arg(long)]
        limit: Option<usize>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a value table against a class
    Check {
        /// Operator class
        class: String,

        /// Chain size n
        #[arg(short = 'n', long = "size")]
        n: u32,

        /// Rows F(x,·) separated by `;`, entries by spaces or commas
        #[arg(long)]
        matrix: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count plane partitions whose first column equals a decreasing sequence
    FixedColumn {
        /// Chain size n (the sequence length)
        #[arg(short = 'n', long = "size")]
        n: u32,

        /// Nonincreasing entries, comma separated, e.g. `3,2,1`
        #[arg(long)]
        sequence: String,

        /// Also print the partial count of every dominated sequence
        #[arg(long)]
        partials: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
