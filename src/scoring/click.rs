/// Click scoring against a target bounding box.
///
/// Three independent values per response:
///   - `hit`: 1 if the click lands inside the box grown by `tolerance` pixels
///     on every side (inclusive), else 0.
///   - `distance`: `ln(d + 1)` where `d` is the Euclidean distance from the
///     click to the nearest point of the (ungrown) box; 0 inside it.
///   - `hit_area_weighted`: `hit * 1000 / ln(area + 1)`, so small targets
///     pay more per hit.
use serde::{Deserialize, Serialize};

use crate::annotation::types::BoundingBox;
use crate::scoring::parse::{parse_click, ParsedClick};

pub const DEFAULT_TOLERANCE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickScore {
    pub hit: u8,
    pub distance: f64,
    pub hit_area_weighted: f64,
    /// Human-readable click, e.g. `x=125, y=125`.
    pub answer: String,
    pub click: ParsedClick,
}

#[derive(Debug, Clone, Copy)]
pub struct ClickScorer {
    tolerance: i64,
}

impl Default for ClickScorer {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}

impl ClickScorer {
    pub fn new(tolerance: i64) -> Self {
        Self { tolerance }
    }

    pub fn score(&self, completion: &str, target: &BoundingBox) -> ClickScore {
        let click = parse_click(completion);
        let (cx, cy) = click.point();

        let hit = self.is_hit(cx, cy, target);
        ClickScore {
            hit: u8::from(hit),
            distance: log_distance(cx, cy, target),
            hit_area_weighted: area_weighted(hit, target),
            answer: format!("x={cx}, y={cy}"),
            click,
        }
    }

    pub fn is_hit(&self, cx: i64, cy: i64, target: &BoundingBox) -> bool {
        let t = i128::from(self.tolerance);
        let (x, y) = (i128::from(target.x), i128::from(target.y));
        let (w, h) = (i128::from(target.width), i128::from(target.height));
        (x - t..=x + w + t).contains(&i128::from(cx))
            && (y - t..=y + h + t).contains(&i128::from(cy))
    }
}

/// Per-axis distance outside `[lo, lo + len]`, 0 when inside.
/// All arithmetic is in i128 so any i64 click or box is safe.
fn axis_excess(v: i64, lo: i64, len: i64) -> i128 {
    let (v, lo) = (i128::from(v), i128::from(lo));
    let hi = lo + i128::from(len);
    (lo - v).max(0).max(v - hi)
}

pub fn excess_distance(cx: i64, cy: i64, target: &BoundingBox) -> f64 {
    let dx = axis_excess(cx, target.x, target.width) as f64;
    let dy = axis_excess(cy, target.y, target.height) as f64;
    dx.hypot(dy)
}

pub fn log_distance(cx: i64, cy: i64, target: &BoundingBox) -> f64 {
    excess_distance(cx, cy, target).ln_1p()
}

fn area_weighted(hit: bool, target: &BoundingBox) -> f64 {
    let area = target.area();
    // ln(1) = 0 would divide by zero on a degenerate box
    if !hit || area <= 0 {
        return 0.0;
    }
    1000.0 / (area as f64).ln_1p()
}
