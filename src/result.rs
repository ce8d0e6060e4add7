use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::score::ScoreSet;

/// Output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Identifier of the model that produced the output.
    pub model: String,
    /// The generated text.
    pub output: String,
    /// Wall-clock time of the generation call in milliseconds.
    pub latency_ms: u64,
}

/// Where a result's scores came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    /// Scored by the judge model.
    #[default]
    Judged,
    /// Generation succeeded but judging failed; scores come from the
    /// fallback scorer and are not a real judgement.
    Fallback,
    /// Generation failed; the output explains why and scores are zero.
    Failed,
}

/// A generation result together with its scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    pub model: String,
    pub output: String,
    pub latency_ms: u64,
    pub scores: ScoreSet,
    #[serde(default)]
    pub score_source: ScoreSource,
}

impl BenchmarkResult {
    /// A result scored by the judge.
    pub fn judged(generation: GenerationResult, scores: ScoreSet) -> Self {
        Self::from_generation(generation, scores, ScoreSource::Judged)
    }

    /// A result whose scores come from the fallback scorer.
    pub fn fallback(generation: GenerationResult, scores: ScoreSet) -> Self {
        Self::from_generation(generation, scores, ScoreSource::Fallback)
    }

    /// A degraded entry for a model whose generation failed.
    pub fn failed(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            output: message.into(),
            latency_ms: 0,
            scores: ScoreSet::zero(),
            score_source: ScoreSource::Failed,
        }
    }

    fn from_generation(generation: GenerationResult, scores: ScoreSet, source: ScoreSource) -> Self {
        Self {
            model: generation.model,
            output: generation.output,
            latency_ms: generation.latency_ms,
            scores,
            score_source: source,
        }
    }

    pub fn total(&self) -> u8 {
        self.scores.total()
    }

    /// True when the result came from a failure-recovery path.
    pub fn is_degraded(&self) -> bool {
        self.score_source != ScoreSource::Judged
    }
}

/// One completed benchmark, as kept in run history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkRun {
    /// Creation time in milliseconds since the Unix epoch.
    pub ts: i64,
    pub prompt: String,
    pub judge_model: String,
    /// Candidate models in the order they were requested.
    pub models: Vec<String>,
    /// Results ordered best first.
    pub results: Vec<BenchmarkResult>,
}

impl BenchmarkRun {
    /// Records a run stamped with the current time.
    pub fn new(
        prompt: impl Into<String>,
        judge_model: impl Into<String>,
        models: Vec<String>,
        results: Vec<BenchmarkResult>,
    ) -> Self {
        Self {
            ts: Utc::now().timestamp_millis(),
            prompt: prompt.into(),
            judge_model: judge_model.into(),
            models,
            results,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.ts).single()
    }

    /// The highest-scoring result, if any.
    pub fn winner(&self) -> Option<&BenchmarkResult> {
        self.results
            .iter()
            .reduce(|best, r| if r.total() > best.total() { r } else { best })
    }
}
