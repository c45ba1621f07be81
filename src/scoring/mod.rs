pub mod click;
pub mod parse;

pub use click::{ClickScore, ClickScorer, DEFAULT_TOLERANCE};
pub use parse::{parse_click, ParseFailure, ParsedClick};
