pub mod annotation;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod llm;
pub mod output;
pub mod runner;
pub mod scoring;

use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::errors::ClickBenchResult;
use crate::runner::ResponseRecord;

#[derive(Debug, Clone, clap::Subcommand)]
pub enum Command {
    /// Build click-task samples from the annotations directory
    Build {
        /// Output JSONL path (defaults to output.samples_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Score model completions against their targets
    Score {
        /// JSONL file of {id, completion, target} records
        #[arg(short, long)]
        responses: PathBuf,

        /// Output JSONL path (defaults to output.scores_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Convert MMLU records into multiple-choice samples
    Mmlu {
        /// JSONL file of {question, choices, answer, subject} records
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL path (defaults to output.mmlu_path)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

fn resolve_config(explicit: Option<&Path>) -> ClickBenchResult<AppConfig> {
    match config::load_config(explicit) {
        Ok(cfg) => Ok(cfg),
        // An explicitly named config must load.
        Err(e) if explicit.is_some() => Err(e),
        Err(e) => {
            tracing::warn!(error = %e, "no usable config; using defaults");
            Ok(AppConfig::default())
        }
    }
}

pub async fn run(config_path: Option<&Path>, command: Command) -> ClickBenchResult<()> {
    init_tracing();

    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let cfg = resolve_config(config_path)?;

    match command {
        Command::Build { out } => {
            let built = runner::build_click_dataset(&cfg.dataset).await?;
            let path = out.unwrap_or(cfg.output.samples_path);
            output::write_jsonl(&path, &built.samples)?;
            tracing::info!(
                path = %path.display(),
                samples = built.samples.len(),
                skipped = built.warnings.len(),
                "samples written"
            );
        }
        Command::Score { responses, out } => {
            let records: Vec<ResponseRecord> = output::read_jsonl(&responses)?;
            let scored = runner::score_responses(records, &cfg.scoring).await?;
            let path = out.unwrap_or(cfg.output.scores_path);
            output::write_jsonl(&path, &scored)?;
            tracing::info!(path = %path.display(), count = scored.len(), "scores written");
        }
        Command::Mmlu { input, out } => {
            let samples = runner::convert_mmlu(input, &cfg.mmlu).await?;
            let path = out.unwrap_or(cfg.output.mmlu_path);
            output::write_jsonl(&path, &samples)?;
            tracing::info!(path = %path.display(), count = samples.len(), "MMLU samples written");
        }
    }
    Ok(())
}
