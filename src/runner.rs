/// Batch operations behind the CLI: build click samples, score responses,
/// convert MMLU records. Blocking work (directory walks, scoring batches)
/// runs on `spawn_blocking` so the runtime stays responsive.
use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::annotation::types::BoundingBox;
use crate::config::{DatasetConfig, MmluConfig, ScoringConfig};
use crate::dataset::builder::build_samples;
use crate::dataset::mmlu::{build_choice_samples, load_records, ChoiceSample};
use crate::dataset::types::{BuildOutput, BuildParams};
use crate::errors::{ClickBenchError, ClickBenchResult};
use crate::scoring::ClickScorer;

/// One model completion to score, as produced by an external harness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub completion: String,
    /// Serialized bounding box, as found in `Sample::target`.
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<usize>,
    pub hit: u8,
    pub distance: f64,
    pub hit_area_weighted: f64,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

pub async fn build_click_dataset(cfg: &DatasetConfig) -> ClickBenchResult<BuildOutput> {
    let dir = cfg.annotations_dir.clone();
    let seed = cfg.seed;
    let params = BuildParams {
        few_shot_num: cfg.few_shot_num,
        max_elements_per_file: cfg.max_elements_per_file,
        screenshot_root: cfg.screenshot_root.clone(),
    };

    tracing::info!(
        dir = %dir.display(),
        few_shot = params.few_shot_num,
        max_per_file = params.max_elements_per_file,
        seed,
        "building click samples"
    );

    tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::seed_from_u64(seed);
        build_samples(&dir, &params, &mut rng)
    })
    .await?
}

fn score_batch(
    scorer: ClickScorer,
    offset: usize,
    batch: Vec<ResponseRecord>,
) -> ClickBenchResult<Vec<ScoredResponse>> {
    batch
        .into_iter()
        .enumerate()
        .map(|(i, rec)| -> ClickBenchResult<ScoredResponse> {
            let target = BoundingBox::from_target(&rec.target).map_err(|e| {
                ClickBenchError::Target(format!("response {}: {e}", offset + i + 1))
            })?;
            let score = scorer.score(&rec.completion, &target);
            Ok(ScoredResponse {
                id: rec.id,
                hit: score.hit,
                distance: score.distance,
                hit_area_weighted: score.hit_area_weighted,
                answer: score.answer,
                parse_error: score.click.failure().map(|f| f.to_string()),
            })
        })
        .collect()
}

/// Score every response; batches run concurrently, output keeps input order.
pub async fn score_responses(
    responses: Vec<ResponseRecord>,
    cfg: &ScoringConfig,
) -> ClickBenchResult<Vec<ScoredResponse>> {
    let scorer = ClickScorer::new(cfg.tolerance);
    let batch_size = cfg.batch_size.max(1);
    let total = responses.len();

    let mut handles = Vec::new();
    let mut rest = responses;
    let mut offset = 0;
    while !rest.is_empty() {
        let tail = rest.split_off(batch_size.min(rest.len()));
        let batch = std::mem::replace(&mut rest, tail);
        let len = batch.len();
        handles.push(tokio::task::spawn_blocking(move || {
            score_batch(scorer, offset, batch)
        }));
        offset += len;
    }

    let mut scored = Vec::with_capacity(total);
    for handle in handles {
        scored.extend(handle.await??);
    }

    let failures = scored.iter().filter(|s| s.parse_error.is_some()).count();
    tracing::info!(
        total,
        batches = total.div_ceil(batch_size),
        unparsed = failures,
        "responses scored"
    );
    Ok(scored)
}

pub async fn convert_mmlu(input: PathBuf, cfg: &MmluConfig) -> ClickBenchResult<Vec<ChoiceSample>> {
    let shuffle = cfg.shuffle;
    let seed = cfg.seed;
    tokio::task::spawn_blocking(move || -> ClickBenchResult<Vec<ChoiceSample>> {
        let records = load_records(&input)?;
        let samples = if shuffle {
            let mut rng = StdRng::seed_from_u64(seed);
            build_choice_samples(records, Some(&mut rng))?
        } else {
            build_choice_samples::<StdRng>(records, None)?
        };
        tracing::info!(
            path = %input.display(),
            count = samples.len(),
            shuffle,
            "MMLU samples converted"
        );
        Ok(samples)
    })
    .await?
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(id: usize, completion: &str) -> ResponseRecord {
        ResponseRecord {
            id: Some(id),
            completion: completion.to_string(),
            target: r#"{"x":100,"y":100,"width":50,"height":50}"#.to_string(),
        }
    }

    #[tokio::test]
    async fn scores_keep_input_order_across_batches() {
        let responses: Vec<_> = (0..10)
            .map(|i| {
                if i % 2 == 0 {
                    response(i, "<125,125>")
                } else {
                    response(i, "no idea")
                }
            })
            .collect();
        let cfg = ScoringConfig {
            tolerance: 10,
            batch_size: 3,
        };
        let scored = score_responses(responses, &cfg).await.unwrap();

        assert_eq!(scored.len(), 10);
        for (i, s) in scored.iter().enumerate() {
            assert_eq!(s.id, Some(i));
            assert_eq!(s.hit, u8::from(i % 2 == 0));
            assert_eq!(s.parse_error.is_some(), i % 2 == 1);
        }
    }

    #[tokio::test]
    async fn malformed_target_names_the_response() {
        let mut bad = response(0, "<1,1>");
        bad.target = "not json".into();
        let cfg = ScoringConfig::default();
        let err = score_responses(vec![response(1, "<1,1>"), bad], &cfg)
            .await
            .unwrap_err();
        assert!(matches!(err, ClickBenchError::Target(ref m) if m.contains("response 2")));
    }

    #[tokio::test]
    async fn empty_input_scores_nothing() {
        let scored = score_responses(Vec::new(), &ScoringConfig::default()).await.unwrap();
        assert!(scored.is_empty());
    }

    #[tokio::test]
    async fn builds_dataset_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let elements: Vec<_> = (1..=6)
            .map(|i| {
                json!({
                    "id": format!("el-{i}"),
                    "description": format!("thing {i}"),
                    "bounding_box": {"x": i, "y": i, "width": 10, "height": 10}
                })
            })
            .collect();
        std::fs::write(
            dir.path().join("annotation_0001.json"),
            serde_json::to_vec(&json!({"url": "https://x.example", "elements": elements})).unwrap(),
        )
        .unwrap();

        let cfg = DatasetConfig {
            annotations_dir: dir.path().to_path_buf(),
            few_shot_num: 2,
            max_elements_per_file: 3,
            ..DatasetConfig::default()
        };
        let a = build_click_dataset(&cfg).await.unwrap();
        let b = build_click_dataset(&cfg).await.unwrap();
        assert_eq!(a.samples.len(), 3);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn converts_mmlu_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dev.jsonl");
        let lines: Vec<String> = (0..5)
            .map(|i| {
                json!({"question": format!("q{i}"), "choices": ["a", "b", "c", "d"], "answer": i % 4, "subject": "physics"})
                    .to_string()
            })
            .collect();
        std::fs::write(&path, lines.join("\n")).unwrap();

        let cfg = MmluConfig {
            shuffle: false,
            seed: 42,
        };
        let samples = convert_mmlu(path, &cfg).await.unwrap();
        let targets: Vec<_> = samples.iter().map(|s| s.target.as_str()).collect();
        assert_eq!(targets, vec!["A", "B", "C", "D", "A"]);
    }
}
