//! # ClickBench CLI
//!
//! Usage:
//!   clickbench build [--out samples.jsonl]
//!   clickbench score --responses responses.jsonl [--out scores.jsonl]
//!   clickbench mmlu --input dev.jsonl [--out mmlu_samples.jsonl]

use std::path::PathBuf;

use clap::Parser;
use clickbench_lib::Command;

#[derive(Parser)]
#[command(name = "clickbench")]
#[command(author, version, about = "ClickBench - UI element locating benchmark tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to config.toml (default: next to the executable, then the working directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = clickbench_lib::run(cli.config.as_deref(), cli.command).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
