//! CLI frontend for the Quizdraw party quiz.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::GameArgs;

#[derive(Parser)]
#[command(
    name = "quizdraw",
    about = "Quizdraw — draw a player, ask a question, keep score",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive game
    Play {
        #[command(flatten)]
        game: GameArgs,
    },

    /// List the question catalog
    Questions {
        /// JSON file with an array of questions (default: built-in catalog)
        #[arg(short, long)]
        questions: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Play { game } => commands::play::run(&game).await,
        Commands::Questions { questions } => commands::questions::run(questions.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` takes precedence over the verbosity flags.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
