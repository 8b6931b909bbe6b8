use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "flowmodoro", version, about = "Proportional work/break interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session
    Run {
        /// Disable all break-completion notifications
        #[arg(long)]
        quiet: bool,
        /// Ring the terminal bell only, ignoring configured sinks
        #[arg(long, conflicts_with = "quiet")]
        bell_only: bool,
    },
    /// Show the break a work duration would earn
    Preview {
        /// Hypothetical work duration in seconds
        #[arg(long)]
        work: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run { quiet, bell_only } => commands::run::run(quiet, bell_only),
        Commands::Preview { work } => commands::preview::run(work),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
