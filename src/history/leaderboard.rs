use std::collections::HashMap;

use serde::Serialize;

use crate::result::BenchmarkRun;

/// Aggregate standing of one model across saved runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelStats {
    pub model: String,
    /// Mean total score over every run the model took part in.
    pub avg_total: f64,
    /// Runs in which the model had the highest total.
    pub wins: usize,
    /// Mean generation latency in seconds.
    pub avg_latency_s: f64,
    /// Number of runs the model took part in.
    pub runs: usize,
}

#[derive(Default)]
struct Tally {
    total_sum: u64,
    latency_sum_ms: u64,
    runs: usize,
    wins: usize,
}

/// Aggregates per-model leaderboard figures, best average first.
///
/// The winner of a run is its highest total; on a tie the earliest result in
/// the run wins. Ties in average are broken by wins, then by model name.
pub fn compute_model_stats(runs: &[BenchmarkRun]) -> Vec<ModelStats> {
    let mut tallies: HashMap<&str, Tally> = HashMap::new();

    for run in runs {
        for result in &run.results {
            let tally = tallies.entry(result.model.as_str()).or_default();
            tally.total_sum += u64::from(result.total());
            tally.latency_sum_ms += result.latency_ms;
            tally.runs += 1;
        }
        if let Some(winner) = run.winner() {
            if let Some(tally) = tallies.get_mut(winner.model.as_str()) {
                tally.wins += 1;
            }
        }
    }

    let mut stats: Vec<ModelStats> = tallies
        .into_iter()
        .map(|(model, t)| {
            let n = t.runs.max(1) as f64;
            ModelStats {
                model: model.to_string(),
                avg_total: t.total_sum as f64 / n,
                wins: t.wins,
                avg_latency_s: t.latency_sum_ms as f64 / n / 1000.0,
                runs: t.runs,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.avg_total
            .total_cmp(&a.avg_total)
            .then(b.wins.cmp(&a.wins))
            .then_with(|| a.model.cmp(&b.model))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::{BenchmarkResult, GenerationResult};
    use crate::score::ScoreSet;

    fn result(model: &str, score: u8, latency_ms: u64) -> BenchmarkResult {
        BenchmarkResult::judged(
            GenerationResult {
                model: model.into(),
                output: String::new(),
                latency_ms,
            },
            ScoreSet::new(score, score, score, score),
        )
    }

    fn run(results: Vec<BenchmarkResult>) -> BenchmarkRun {
        let models = results.iter().map(|r| r.model.clone()).collect();
        BenchmarkRun::new("p", "judge", models, results)
    }

    #[test]
    fn averages_wins_and_latency() {
        let runs = vec![
            run(vec![result("a", 8, 1000), result("b", 5, 3000)]),
            run(vec![result("b", 9, 1000), result("a", 6, 2000)]),
            run(vec![result("a", 10, 1500)]),
        ];
        let stats = compute_model_stats(&runs);

        assert_eq!(stats[0].model, "a");
        assert_eq!(stats[0].runs, 3);
        assert_eq!(stats[0].wins, 2);
        assert_eq!(stats[0].avg_total, 32.0);
        assert_eq!(stats[0].avg_latency_s, 1.5);

        assert_eq!(stats[1].model, "b");
        assert_eq!(stats[1].wins, 1);
        assert_eq!(stats[1].avg_total, 28.0);
        assert_eq!(stats[1].avg_latency_s, 2.0);
    }

    #[test]
    fn tie_goes_to_first_result() {
        let stats = compute_model_stats(&[run(vec![result("x", 5, 0), result("y", 5, 0)])]);
        let wins: HashMap<_, _> = stats.iter().map(|s| (s.model.as_str(), s.wins)).collect();
        assert_eq!(wins["x"], 1);
        assert_eq!(wins["y"], 0);
    }

    #[test]
    fn empty_history_has_no_stats() {
        assert!(compute_model_stats(&[]).is_empty());
    }
}
