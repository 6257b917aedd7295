#![forbid(unsafe_code)]

mod cmd;
mod config;
mod output;
mod table;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "revq: deadline-aware review queue for tracker homework tickets",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Output format; defaults to pretty on a TTY, text when piped.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Render the sorted review table",
        long_about = "Render the review table from an already-fetched tracker snapshot, \
                      sorted by status and deadline.",
        after_help = "EXAMPLES:\n    # Open and in-review tickets from a snapshot file\n    rq list --file homeworks.json\n\n    # Everything, resolved included, as JSON\n    rq list --file homeworks.json --all --json\n\n    # Pipe the snapshot in\n    fetch-tickets | rq list"
    )]
    List(cmd::list::ListArgs),

    #[command(
        about = "Show one ticket in detail",
        after_help = "EXAMPLES:\n    # By full key\n    rq show PCR-69105 --file homeworks.json\n\n    # By numeric suffix\n    rq show 69105 --file homeworks.json"
    )]
    Show(cmd::show::ShowArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("REVQ_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "revq=debug,info"
        } else {
            "revq=info,warn"
        })
    });

    let format = env::var("REVQ_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = output::resolve_output_mode(cli.format, cli.json);

    match cli.command {
        Commands::List(ref args) => cmd::list::run_list(args, output),
        Commands::Show(ref args) => cmd::show::run_show(args, output),
    }
}
