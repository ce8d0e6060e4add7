//! Rubric dimensions and the canonical score record produced by the judge.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Highest value a single dimension can score.
pub const MAX_DIMENSION_SCORE: u8 = 10;
/// Highest possible total across all dimensions.
pub const MAX_TOTAL_SCORE: u8 = MAX_DIMENSION_SCORE * Dimension::ALL.len() as u8;

/// One axis of the creative-writing rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    CharacterClarity,
    Originality,
    SensoryDetail,
    ToneConsistency,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::CharacterClarity,
        Dimension::Originality,
        Dimension::SensoryDetail,
        Dimension::ToneConsistency,
    ];

    /// JSON key used in judge output and stored scores.
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::CharacterClarity => "character_clarity",
            Dimension::Originality => "originality",
            Dimension::SensoryDetail => "sensory_detail",
            Dimension::ToneConsistency => "tone_consistency",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Four rubric scores in `[0, 10]` and their sum.
///
/// `total` is always derived from the four dimensions; there is no way to set
/// it independently, including when deserializing stored runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "StoredScores")]
pub struct ScoreSet {
    character_clarity: u8,
    originality: u8,
    sensory_detail: u8,
    tone_consistency: u8,
    total: u8,
}

impl ScoreSet {
    /// A score of zero on every dimension.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a score set from raw judge values.
    ///
    /// Each value is rounded to the nearest integer and clamped to `[0, 10]`;
    /// NaN and infinities count as zero.
    pub fn from_raw(
        character_clarity: f64,
        originality: f64,
        sensory_detail: f64,
        tone_consistency: f64,
    ) -> Self {
        Self::new(
            clamp_dimension(character_clarity),
            clamp_dimension(originality),
            clamp_dimension(sensory_detail),
            clamp_dimension(tone_consistency),
        )
    }

    /// Builds a score set from integer scores, clamping each to `[0, 10]`.
    pub fn new(
        character_clarity: u8,
        originality: u8,
        sensory_detail: u8,
        tone_consistency: u8,
    ) -> Self {
        let character_clarity = character_clarity.min(MAX_DIMENSION_SCORE);
        let originality = originality.min(MAX_DIMENSION_SCORE);
        let sensory_detail = sensory_detail.min(MAX_DIMENSION_SCORE);
        let tone_consistency = tone_consistency.min(MAX_DIMENSION_SCORE);
        Self {
            character_clarity,
            originality,
            sensory_detail,
            tone_consistency,
            total: character_clarity + originality + sensory_detail + tone_consistency,
        }
    }

    pub fn get(&self, dimension: Dimension) -> u8 {
        match dimension {
            Dimension::CharacterClarity => self.character_clarity,
            Dimension::Originality => self.originality,
            Dimension::SensoryDetail => self.sensory_detail,
            Dimension::ToneConsistency => self.tone_consistency,
        }
    }

    pub fn character_clarity(&self) -> u8 {
        self.character_clarity
    }

    pub fn originality(&self) -> u8 {
        self.originality
    }

    pub fn sensory_detail(&self) -> u8 {
        self.sensory_detail
    }

    pub fn tone_consistency(&self) -> u8 {
        self.tone_consistency
    }

    /// Sum of the four dimensions, in `[0, 40]`.
    pub fn total(&self) -> u8 {
        self.total
    }
}

fn clamp_dimension(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, f64::from(MAX_DIMENSION_SCORE)) as u8
}

/// Stored representation; any `total` present in the input is ignored.
#[derive(Deserialize)]
struct StoredScores {
    #[serde(default)]
    character_clarity: u8,
    #[serde(default)]
    originality: u8,
    #[serde(default)]
    sensory_detail: u8,
    #[serde(default)]
    tone_consistency: u8,
}

impl From<StoredScores> for ScoreSet {
    fn from(raw: StoredScores) -> Self {
        ScoreSet::new(
            raw.character_clarity,
            raw.originality,
            raw.sensory_detail,
            raw.tone_consistency,
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(12.0, 10)]
    #[case(-3.0, 0)]
    #[case(7.6, 8)]
    #[case(7.5, 8)]
    #[case(7.4, 7)]
    #[case(f64::NAN, 0)]
    #[case(f64::INFINITY, 0)]
    #[case(f64::NEG_INFINITY, 0)]
    fn clamps_and_rounds(#[case] raw: f64, #[case] expected: u8) {
        assert_eq!(clamp_dimension(raw), expected);
    }

    #[test]
    fn total_is_sum_of_dimensions() {
        let scores = ScoreSet::new(8, 7, 9, 8);
        assert_eq!(scores.total(), 32);
        let clamped = ScoreSet::new(200, 11, 0, 3);
        assert_eq!(clamped.character_clarity(), 10);
        assert_eq!(clamped.originality(), 10);
        assert_eq!(clamped.total(), 23);
    }

    #[test]
    fn serializes_with_total() {
        let json = serde_json::to_value(ScoreSet::new(1, 2, 3, 4)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "character_clarity": 1,
                "originality": 2,
                "sensory_detail": 3,
                "tone_consistency": 4,
                "total": 10
            })
        );
    }

    #[test]
    fn stored_total_is_recomputed() {
        let scores: ScoreSet = serde_json::from_str(
            r#"{"character_clarity":5,"originality":5,"sensory_detail":5,"tone_consistency":5,"total":39}"#,
        )
        .unwrap();
        assert_eq!(scores.total(), 20);
    }

    #[test]
    fn max_total_is_forty() {
        assert_eq!(MAX_TOTAL_SCORE, 40);
        assert_eq!(ScoreSet::new(10, 10, 10, 10).total(), MAX_TOTAL_SCORE);
    }
}
