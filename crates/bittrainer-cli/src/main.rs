//! bittrainer CLI: bitwise arithmetic drills in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "bittrainer", version, about = "Bitwise arithmetic trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer randomly generated questions, one per line of input
    Practice {
        /// Bit width of questions: 4, 8 or 16
        #[arg(long)]
        width: Option<u32>,

        /// Answer base: binary, decimal, hex
        #[arg(long)]
        base: Option<String>,

        /// Operations to practice (comma-separated, e.g. "and,xor,set-bit")
        #[arg(long)]
        ops: Option<String>,

        /// Number of questions (default: until "q" or end of input)
        #[arg(long)]
        rounds: Option<u32>,

        /// Seed for a reproducible question sequence
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the answer and explanation for one question
    Explain {
        /// Operation (e.g. "toggle-bit")
        #[arg(long)]
        op: String,

        /// First operand (decimal, or 0b/0x prefixed)
        #[arg(long)]
        a: String,

        /// Second operand, for binary operations
        #[arg(long)]
        b: Option<String>,

        /// Bit width: 4, 8 or 16
        #[arg(long, default_value = "8")]
        width: u32,

        /// Base to show values in: binary, decimal, hex
        #[arg(long, default_value = "binary")]
        base: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List supported operations
    ListOps,

    /// Validate a config file
    Validate {
        /// Config file path (default: search the usual locations)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("bittrainer=warn")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            width,
            base,
            ops,
            rounds,
            seed,
            config,
        } => commands::practice::execute(width, base, ops, rounds, seed, config),
        Commands::Explain {
            op,
            a,
            b,
            width,
            base,
            json,
        } => commands::explain::execute(op, a, b, width, base, json),
        Commands::ListOps => commands::list_ops::execute(),
        Commands::Validate { config } => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
