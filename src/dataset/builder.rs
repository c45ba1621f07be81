/// Click-task sample builder.
///
/// Walks annotation files in name order. For each record with more than
/// `few_shot_num` elements it shuffles the elements with the caller's RNG,
/// shows the first `few_shot_num` as reference examples and turns up to
/// `max_elements_per_file` of the rest into samples. The RNG is shared across
/// the whole pass, so one seed gives one reproducible dataset while the
/// partition still differs from file to file.
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::annotation::loader::{annotation_files, read_record};
use crate::annotation::types::{AnnotationRecord, Element};
use crate::dataset::prompt::{reference_text, system_message, target_prompt};
use crate::dataset::screenshot::{load_screenshot, resolve_path};
use crate::dataset::types::{BuildOutput, BuildParams, BuildWarning, Sample, SampleMetadata};
use crate::errors::ClickBenchResult;
use crate::llm::types::{ChatMessage, ImageUrl};

/// Reference/evaluation split of one record's shuffled elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub references: Vec<Element>,
    pub targets: Vec<Element>,
}

/// Shuffle `elements` and split them, or `None` when there are not more
/// elements than references.
pub fn partition_elements<R: Rng + ?Sized>(
    mut elements: Vec<Element>,
    few_shot_num: usize,
    max_elements_per_file: usize,
    rng: &mut R,
) -> Option<Partition> {
    if elements.is_empty() || elements.len() <= few_shot_num {
        return None;
    }

    elements.shuffle(rng);

    let eval_count = max_elements_per_file.min(elements.len() - few_shot_num);
    elements.truncate(few_shot_num + eval_count);
    let targets = elements.split_off(few_shot_num);
    Some(Partition {
        references: elements,
        targets,
    })
}

pub fn build_samples<R: Rng + ?Sized>(
    annotations_dir: &Path,
    params: &BuildParams,
    rng: &mut R,
) -> ClickBenchResult<BuildOutput> {
    let mut out = BuildOutput::default();

    for path in annotation_files(annotations_dir)? {
        let record = read_record(&path)?;
        append_record_samples(&path, record, params, rng, &mut out);
    }

    tracing::info!(
        dir = %annotations_dir.display(),
        samples = out.samples.len(),
        warnings = out.warnings.len(),
        "click samples built"
    );
    Ok(out)
}

fn append_record_samples<R: Rng + ?Sized>(
    file: &Path,
    record: AnnotationRecord,
    params: &BuildParams,
    rng: &mut R,
    out: &mut BuildOutput,
) {
    let screenshot = record.screenshot().map(str::to_owned);
    let AnnotationRecord { url, elements, .. } = record;

    let element_count = elements.len();
    let Some(Partition {
        references,
        targets,
    }) = partition_elements(elements, params.few_shot_num, params.max_elements_per_file, rng)
    else {
        tracing::debug!(
            file = %file.display(),
            elements = element_count,
            few_shot = params.few_shot_num,
            "record skipped: not enough elements"
        );
        return;
    };

    let refs = reference_text(&references);

    // Loaded lazily: records whose targets all lack descriptions never touch the image.
    let mut image: Option<Result<ImageUrl, String>> = None;

    for elem in targets {
        let desc = elem.description.trim();
        if desc.is_empty() {
            continue;
        }

        let text = target_prompt(&refs, desc);
        let message = match screenshot.as_deref() {
            None => ChatMessage::user(text),
            Some(raw) => {
                let loaded = image.get_or_insert_with(|| {
                    load_screenshot(&resolve_path(raw, params.screenshot_root.as_deref()))
                        .map_err(|e| e.to_string())
                });
                match loaded {
                    Ok(url) => ChatMessage::user_with_image(text, url.clone()),
                    Err(e) => {
                        tracing::warn!(
                            file = %file.display(),
                            element = %elem.id,
                            error = %e,
                            "could not process screenshot; skipping element"
                        );
                        out.warnings.push(BuildWarning {
                            file: file.to_path_buf(),
                            annotation_id: elem.id.clone(),
                            message: format!("could not process image {raw}: {e}"),
                        });
                        continue;
                    }
                }
            }
        };

        let target = match elem.bounding_box.to_target() {
            Ok(t) => t,
            Err(e) => {
                out.warnings.push(BuildWarning {
                    file: file.to_path_buf(),
                    annotation_id: elem.id.clone(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        out.samples.push(Sample {
            id: out.samples.len() + 1,
            input: vec![system_message(), message],
            target,
            metadata: SampleMetadata {
                url: url.clone(),
                screenshot: screenshot.clone().unwrap_or_default(),
                annotation_id: elem.id,
            },
        });
    }
}
