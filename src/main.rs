use clap::{Parser, Subcommand};
use instant_runoff::commands;
use std::path::PathBuf;

#[derive(Parser)]
struct Opts {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tabulate a ranked-choice election from a votes file.
    Tabulate {
        /// Votes file: one ballot per line, whitespace-separated candidate
        /// names ranked best-first.
        votes_file: PathBuf,
        /// Candidate name (repeat for each candidate, e.g. -c A -c B -c C).
        #[clap(short = 'c', long = "candidate", required = true)]
        candidates: Vec<String>,
        /// Print the outcome as JSON instead of a formatted report.
        #[clap(long)]
        json: bool,
    },
}

fn main() {
    let opts = Opts::parse();

    match opts.command {
        Command::Tabulate {
            votes_file,
            candidates,
            json,
        } => {
            if let Err(e) = commands::tabulate(&votes_file, &candidates, json) {
                eprintln!("❌ Tabulation failed: {}", e);
                std::process::exit(1);
            }
        }
    }
}
