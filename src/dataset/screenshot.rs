/// Screenshot attachment: read the image from disk, make sure it decodes,
/// and embed it as a base64 data URL image part.
use std::path::{Path, PathBuf};

use base64::Engine as _;

use crate::errors::{ClickBenchError, ClickBenchResult};
use crate::llm::types::ImageUrl;

/// Resolve a screenshot path from an annotation against an optional root.
pub fn resolve_path(raw: &str, root: Option<&Path>) -> PathBuf {
    let path = Path::new(raw);
    match root {
        Some(root) if path.is_relative() => root.join(path),
        _ => path.to_path_buf(),
    }
}

pub fn load_screenshot(path: &Path) -> ClickBenchResult<ImageUrl> {
    let bytes = std::fs::read(path)
        .map_err(|e| ClickBenchError::Screenshot(format!("read {}: {e}", path.display())))?;

    let format = image::guess_format(&bytes)
        .map_err(|e| ClickBenchError::Screenshot(format!("format {}: {e}", path.display())))?;

    let img = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| ClickBenchError::Screenshot(format!("decode {}: {e}", path.display())))?;

    tracing::debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        bytes = bytes.len(),
        "screenshot loaded"
    );

    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    Ok(ImageUrl {
        url: format!("data:{};base64,{}", format.to_mime_type(), b64),
    })
}

#[cfg(test)]
pub(crate) fn write_test_png(path: &Path, w: u32, h: u32) {
    image::RgbaImage::from_pixel(w, h, image::Rgba([30, 60, 90, 255]))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_becomes_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        write_test_png(&path, 4, 3);

        let url = load_screenshot(&path).unwrap().url;
        let b64 = url.strip_prefix("data:image/png;base64,").unwrap();
        let decoded = base64::engine::general_purpose::STANDARD.decode(b64).unwrap();
        assert_eq!(decoded, std::fs::read(&path).unwrap());
    }

    #[test]
    fn missing_or_garbage_files_fail() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.png");
        assert!(matches!(load_screenshot(&missing), Err(ClickBenchError::Screenshot(_))));

        let garbage = dir.path().join("garbage.png");
        std::fs::write(&garbage, b"definitely not an image").unwrap();
        assert!(matches!(load_screenshot(&garbage), Err(ClickBenchError::Screenshot(_))));
    }

    #[test]
    fn relative_paths_join_the_root() {
        let root = Path::new("/data");
        assert_eq!(resolve_path("shots/a.png", Some(root)), PathBuf::from("/data/shots/a.png"));
        assert_eq!(resolve_path("/abs/a.png", Some(root)), PathBuf::from("/abs/a.png"));
        assert_eq!(resolve_path("shots/a.png", None), PathBuf::from("shots/a.png"));
    }
}
