use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{ClickBenchError, ClickBenchResult};

/// Write `items` as JSON Lines, replacing any existing file.
pub fn write_jsonl<T: Serialize>(path: &Path, items: &[T]) -> ClickBenchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    for item in items {
        let line = serde_json::to_string(item)?;
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    tracing::debug!(path = %path.display(), count = items.len(), "jsonl written");
    Ok(())
}

/// Read JSON Lines, skipping blank lines. Errors name the offending line.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> ClickBenchResult<Vec<T>> {
    let content = std::fs::read_to_string(path)?;
    let mut items = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let item = serde_json::from_str(line).map_err(|e| {
            ClickBenchError::Dataset(format!("{}:{}: {e}", path.display(), idx + 1))
        })?;
        items.push(item);
    }
    Ok(items)
}
