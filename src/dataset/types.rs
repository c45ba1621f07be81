use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::annotation::types::ElementId;
use crate::llm::types::ChatMessage;

/// One evaluation item for the click task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// 1-based position in the built dataset.
    pub id: usize,
    pub input: Vec<ChatMessage>,
    /// Serialized target bounding box, see `BoundingBox::to_target`.
    pub target: String,
    pub metadata: SampleMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    pub url: String,
    /// Screenshot path as written in the annotation, empty if none.
    pub screenshot: String,
    pub annotation_id: ElementId,
}

/// An element that was dropped from the build without failing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildWarning {
    pub file: PathBuf,
    pub annotation_id: ElementId,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub samples: Vec<Sample>,
    pub warnings: Vec<BuildWarning>,
}

/// Knobs for one build pass.
#[derive(Debug, Clone)]
pub struct BuildParams {
    pub few_shot_num: usize,
    pub max_elements_per_file: usize,
    pub screenshot_root: Option<PathBuf>,
}
