use serde_json::Value;

use crate::error::BenchError;
use crate::score::{Dimension, ScoreSet};

use super::extract_json_object;

/// Coerces raw judge JSON into a [`ScoreSet`].
///
/// Numbers are taken as-is and numeric strings are parsed; missing keys and
/// anything else count as zero. Any `total` the judge supplies is ignored.
pub fn normalize(raw: &Value) -> ScoreSet {
    let read = |dimension: Dimension| raw.get(dimension.key()).map(numeric).unwrap_or(0.0);
    ScoreSet::from_raw(
        read(Dimension::CharacterClarity),
        read(Dimension::Originality),
        read(Dimension::SensoryDetail),
        read(Dimension::ToneConsistency),
    )
}

/// Extracts the JSON object from judge text and normalizes it.
pub fn normalize_text(text: &str) -> Result<ScoreSet, BenchError> {
    extract_json_object(text).map(|value| normalize(&value))
}

fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}
