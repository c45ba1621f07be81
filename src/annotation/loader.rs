/// Annotation directory discovery and record loading.
///
/// Only files named `annotation_*.json` are picked up; they are returned in
/// lexicographic filename order so every build walks records identically.
use std::path::{Path, PathBuf};

use crate::annotation::types::AnnotationRecord;
use crate::errors::{ClickBenchError, ClickBenchResult};

const FILE_PREFIX: &str = "annotation_";
const FILE_SUFFIX: &str = ".json";

fn is_annotation_file(name: &str) -> bool {
    name.starts_with(FILE_PREFIX) && name.ends_with(FILE_SUFFIX)
}

/// List annotation files in `dir`, sorted by file name.
pub fn annotation_files(dir: &Path) -> ClickBenchResult<Vec<PathBuf>> {
    let dir_err = |source| ClickBenchError::AnnotationDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(dir_err)? {
        let entry = entry.map_err(dir_err)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if is_annotation_file(name) {
            files.push(entry.path());
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    tracing::debug!(dir = %dir.display(), count = files.len(), "annotation files found");
    Ok(files)
}

pub fn read_record(path: &Path) -> ClickBenchResult<AnnotationRecord> {
    let content = std::fs::read_to_string(path).map_err(|source| ClickBenchError::AnnotationRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ClickBenchError::AnnotationParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_annotation_json_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["annotation_b.json", "annotation_a.json", "notes.json", "annotation_c.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }
        let files = annotation_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["annotation_a.json", "annotation_b.json"]);
    }

    #[test]
    fn missing_directory_is_a_dir_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = annotation_files(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ClickBenchError::AnnotationDir { .. }));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("annotation_1.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = read_record(&path).unwrap_err();
        assert!(matches!(err, ClickBenchError::AnnotationParse { .. }));
    }
}
