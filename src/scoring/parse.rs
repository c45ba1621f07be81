/// Click coordinate extraction from free-form model output.
///
/// The model is asked to end its answer with `<x,y>`. Extraction never fails
/// outward: anything unparseable becomes `ParsedClick::Defaulted`, which
/// scores as a click at the origin but keeps the reason visible.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseFailure {
    MissingOpen,
    MissingClose,
    TokenCount { found: usize },
    NotAnInteger { token: String },
}

impl fmt::Display for ParseFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseFailure::MissingOpen => f.write_str("no '<' in completion"),
            ParseFailure::MissingClose => f.write_str("no '>' after '<'"),
            ParseFailure::TokenCount { found } => {
                write!(f, "expected 2 comma-separated values, found {found}")
            }
            ParseFailure::NotAnInteger { token } => write!(f, "not an integer: {token:?}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ParsedClick {
    Parsed { x: i64, y: i64 },
    Defaulted { reason: ParseFailure },
}

impl ParsedClick {
    /// Point used for scoring; `(0, 0)` when parsing failed.
    pub fn point(&self) -> (i64, i64) {
        match self {
            ParsedClick::Parsed { x, y } => (*x, *y),
            ParsedClick::Defaulted { .. } => (0, 0),
        }
    }

    pub fn failure(&self) -> Option<&ParseFailure> {
        match self {
            ParsedClick::Parsed { .. } => None,
            ParsedClick::Defaulted { reason } => Some(reason),
        }
    }
}

fn extract(completion: &str) -> Result<(i64, i64), ParseFailure> {
    let (_, rest) = completion.split_once('<').ok_or(ParseFailure::MissingOpen)?;
    let (inner, _) = rest.split_once('>').ok_or(ParseFailure::MissingClose)?;

    let tokens: Vec<&str> = inner.split(',').collect();
    let [x, y] = tokens.as_slice() else {
        return Err(ParseFailure::TokenCount {
            found: tokens.len(),
        });
    };

    let parse = |t: &str| {
        let t = t.trim();
        t.parse::<i64>().map_err(|_| ParseFailure::NotAnInteger {
            token: t.to_string(),
        })
    };
    Ok((parse(*x)?, parse(*y)?))
}

pub fn parse_click(completion: &str) -> ParsedClick {
    match extract(completion) {
        Ok((x, y)) => ParsedClick::Parsed { x, y },
        Err(reason) => ParsedClick::Defaulted { reason },
    }
}
