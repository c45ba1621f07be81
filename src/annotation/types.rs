use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ClickBenchError, ClickBenchResult};

/// Axis-aligned box in pixels, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl BoundingBox {
    pub fn new(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self { x, y, width, height }
    }

    /// Pixel centre, rounded down on both axes.
    pub fn center(&self) -> (i64, i64) {
        (
            self.x.saturating_add(self.width.div_euclid(2)),
            self.y.saturating_add(self.height.div_euclid(2)),
        )
    }

    /// Area in square pixels; widened so extreme boxes cannot overflow.
    pub fn area(&self) -> i128 {
        i128::from(self.width) * i128::from(self.height)
    }

    /// Compact JSON form used as a sample target.
    pub fn to_target(&self) -> ClickBenchResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_target(text: &str) -> ClickBenchResult<Self> {
        serde_json::from_str(text).map_err(|e| ClickBenchError::Target(format!("{e}: {text}")))
    }
}

/// Element identifier as written in the annotation file: either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElementId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementId::Number(n) => write!(f, "{n}"),
            ElementId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    #[serde(default)]
    pub description: String,
    pub bounding_box: BoundingBox,
}

/// One annotated screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot_path: Option<String>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl AnnotationRecord {
    /// Screenshot path, treating an empty string as absent.
    pub fn screenshot(&self) -> Option<&str> {
        self.screenshot_path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uses_floor_division() {
        let b = BoundingBox::new(10, 20, 5, 7);
        assert_eq!(b.center(), (12, 23));
        assert_eq!(b.area(), 35);
    }

    #[test]
    fn target_is_compact_json() {
        let b = BoundingBox::new(100, 100, 50, 50);
        assert_eq!(
            b.to_target().unwrap(),
            r#"{"x":100,"y":100,"width":50,"height":50}"#
        );
        assert_eq!(BoundingBox::from_target(r#"{"x": 100, "y": 100, "width": 50, "height": 50}"#).unwrap(), b);
    }

    #[test]
    fn malformed_target_is_an_error() {
        let err = BoundingBox::from_target(r#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, ClickBenchError::Target(_)));
    }

    #[test]
    fn record_defaults_missing_fields() {
        let rec: AnnotationRecord = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert!(rec.elements.is_empty());
        assert_eq!(rec.screenshot(), None);

        let rec: AnnotationRecord =
            serde_json::from_str(r#"{"url": "u", "screenshot_path": "", "elements": []}"#).unwrap();
        assert_eq!(rec.screenshot(), None);
    }

    #[test]
    fn element_ids_accept_numbers_and_strings() {
        let elems: Vec<Element> = serde_json::from_str(
            r#"[
                {"id": 7, "description": "OK", "bounding_box": {"x": 0, "y": 0, "width": 1, "height": 1}},
                {"id": "btn-2", "description": "Cancel", "bounding_box": {"x": 0, "y": 0, "width": 1, "height": 1}}
            ]"#,
        )
        .unwrap();
        assert_eq!(elems[0].id, ElementId::Number(7));
        assert_eq!(elems[1].id.to_string(), "btn-2");
        assert_eq!(serde_json::to_string(&elems[0].id).unwrap(), "7");
    }
}
