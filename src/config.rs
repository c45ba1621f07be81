use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{ClickBenchError, ClickBenchResult};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub mmlu: MmluConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    #[serde(default = "default_annotations_dir")]
    pub annotations_dir: PathBuf,
    /// Number of reference elements shown with coordinates before the target.
    #[serde(default = "default_few_shot_num")]
    pub few_shot_num: usize,
    #[serde(default = "default_max_elements_per_file")]
    pub max_elements_per_file: usize,
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Base directory for relative `screenshot_path` values. Paths are used as
    /// written when absent.
    #[serde(default)]
    pub screenshot_root: Option<PathBuf>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            annotations_dir: default_annotations_dir(),
            few_shot_num: default_few_shot_num(),
            max_elements_per_file: default_max_elements_per_file(),
            seed: default_seed(),
            screenshot_root: None,
        }
    }
}

fn default_annotations_dir() -> PathBuf {
    PathBuf::from("dataset/annotations")
}

fn default_few_shot_num() -> usize {
    2
}

fn default_max_elements_per_file() -> usize {
    1
}

fn default_seed() -> u64 {
    42
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Pixel margin around the target box that still counts as a hit.
    #[serde(default = "default_tolerance")]
    pub tolerance: i64,
    /// Responses per blocking scoring task.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tolerance: default_tolerance(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_tolerance() -> i64 {
    crate::scoring::DEFAULT_TOLERANCE
}

fn default_batch_size() -> usize {
    256
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MmluConfig {
    #[serde(default = "default_true")]
    pub shuffle: bool,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for MmluConfig {
    fn default() -> Self {
        Self {
            shuffle: true,
            seed: default_seed(),
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_samples_path")]
    pub samples_path: PathBuf,
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
    #[serde(default = "default_mmlu_path")]
    pub mmlu_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            samples_path: default_samples_path(),
            scores_path: default_scores_path(),
            mmlu_path: default_mmlu_path(),
        }
    }
}

fn default_samples_path() -> PathBuf {
    PathBuf::from("samples.jsonl")
}

fn default_scores_path() -> PathBuf {
    PathBuf::from("scores.jsonl")
}

fn default_mmlu_path() -> PathBuf {
    PathBuf::from("mmlu_samples.jsonl")
}

impl AppConfig {
    pub fn validate(&self) -> ClickBenchResult<()> {
        if self.dataset.max_elements_per_file == 0 {
            return Err(ClickBenchError::Config(
                "dataset.max_elements_per_file must be at least 1".into(),
            ));
        }
        if self.scoring.batch_size == 0 {
            return Err(ClickBenchError::Config(
                "scoring.batch_size must be at least 1".into(),
            ));
        }
        if self.scoring.tolerance < 0 {
            return Err(ClickBenchError::Config(
                "scoring.tolerance must not be negative".into(),
            ));
        }
        Ok(())
    }
}

fn resolve_config_path() -> ClickBenchResult<PathBuf> {
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join("config.toml");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join("config.toml");
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    Err(ClickBenchError::Config(
        "config.toml not found next to executable or in working directory".into(),
    ))
}

pub fn parse_config(content: &str) -> ClickBenchResult<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load `explicit` if given, otherwise search the default locations.
pub fn load_config(explicit: Option<&Path>) -> ClickBenchResult<AppConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => resolve_config_path()?,
    };
    let content = std::fs::read_to_string(&path)?;
    let config = parse_config(&content)?;
    tracing::info!(
        path = %path.display(),
        annotations = %config.dataset.annotations_dir.display(),
        "config loaded"
    );
    Ok(config)
}
