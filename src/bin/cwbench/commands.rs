use std::path::PathBuf;

use anyhow::Context;
use cwbench::catalog::ModelCatalog;
use cwbench::config::LoadedConfig;
use cwbench::history::{compute_model_stats, HistoryStore, JsonHistoryStore};
use cwbench::{BenchmarkOrchestrator, BenchmarkResult, BenchmarkRun, ScoreSource};

use crate::args::{Command, RunArgs};

const DEFAULT_MODEL_COUNT: usize = 3;
const PREVIEW_CHARS: usize = 160;

pub async fn dispatch(command: Command, loaded: LoadedConfig) -> anyhow::Result<()> {
    match command {
        Command::Run(args) => run(args, &loaded).await,
        Command::History { limit } => history(&loaded, limit),
        Command::Leaderboard => leaderboard(&loaded),
        Command::Clear => clear(&loaded),
        Command::Models => models(&loaded),
    }
}

fn history_store(loaded: &LoadedConfig) -> JsonHistoryStore {
    let dir = loaded
        .config
        .storage
        .history_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| loaded.paths.history_dir());
    JsonHistoryStore::new(dir).max_runs(loaded.config.storage.max_runs)
}

async fn run(args: RunArgs, loaded: &LoadedConfig) -> anyhow::Result<()> {
    let config = &loaded.config;
    let models = if args.models.is_empty() {
        ModelCatalog::load(&config.catalog.path)
            .ids()
            .take(DEFAULT_MODEL_COUNT)
            .map(str::to_string)
            .collect()
    } else {
        args.models
    };

    let orchestrator = BenchmarkOrchestrator::from_config(config)?;
    let judge = args
        .judge
        .unwrap_or_else(|| orchestrator.default_judge().to_string());
    let results = orchestrator
        .run(&args.prompt, &models, Some(judge.as_str()))
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_results(&results);
    }

    if !args.no_save {
        let run = BenchmarkRun::new(args.prompt, judge, models, results);
        let stored = history_store(loaded)
            .append(&config.storage.history_key, run)
            .context("failed to save benchmark run")?;
        log::info!("saved run, {stored} run(s) in history");
    }
    Ok(())
}

fn print_results(results: &[BenchmarkResult]) {
    for (rank, result) in results.iter().enumerate() {
        let source = match result.score_source {
            ScoreSource::Judged => "",
            ScoreSource::Fallback => " (fallback score)",
            ScoreSource::Failed => " (failed)",
        };
        println!(
            "{}. {:<36} {:>2}/40  {:>6} ms{}",
            rank + 1,
            result.model,
            result.total(),
            result.latency_ms,
            source
        );
        println!(
            "   clarity {}  originality {}  sensory {}  tone {}",
            result.scores.character_clarity(),
            result.scores.originality(),
            result.scores.sensory_detail(),
            result.scores.tone_consistency()
        );
        println!("   {}", preview(&result.output));
    }
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > PREVIEW_CHARS {
        let cut: String = flat.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn history(loaded: &LoadedConfig, limit: usize) -> anyhow::Result<()> {
    let runs = history_store(loaded).load(&loaded.config.storage.history_key);
    if runs.is_empty() {
        println!("No saved runs.");
        return Ok(());
    }
    for run in runs.iter().take(limit) {
        let when = run
            .created_at()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| run.ts.to_string());
        let winner = run
            .winner()
            .map(|r| format!("{} ({}/40)", r.model, r.total()))
            .unwrap_or_else(|| "-".to_string());
        println!("{when}  judge {}  winner {winner}", run.judge_model);
        println!("   {}", preview(&run.prompt));
    }
    Ok(())
}

fn leaderboard(loaded: &LoadedConfig) -> anyhow::Result<()> {
    let runs = history_store(loaded).load(&loaded.config.storage.history_key);
    let stats = compute_model_stats(&runs);
    if stats.is_empty() {
        println!("No saved runs.");
        return Ok(());
    }
    println!(
        "{:<36} {:>8} {:>5} {:>10} {:>5}",
        "model", "avg", "wins", "latency", "runs"
    );
    for row in stats {
        println!(
            "{:<36} {:>8.1} {:>5} {:>9.2}s {:>5}",
            row.model, row.avg_total, row.wins, row.avg_latency_s, row.runs
        );
    }
    Ok(())
}

fn clear(loaded: &LoadedConfig) -> anyhow::Result<()> {
    history_store(loaded)
        .clear(&loaded.config.storage.history_key)
        .context("failed to clear history")?;
    println!("History cleared.");
    Ok(())
}

fn models(loaded: &LoadedConfig) -> anyhow::Result<()> {
    let catalog = ModelCatalog::load(&loaded.config.catalog.path);
    if catalog.is_empty() {
        println!("No models found in {}", loaded.config.catalog.path);
        return Ok(());
    }
    for entry in catalog.list() {
        let context = entry.context.as_deref().unwrap_or("-");
        let cost = match (entry.input_cost_per_1m, entry.output_cost_per_1m) {
            (Some(input), Some(output)) => format!("${input:.2}/${output:.2} per 1M"),
            _ => "-".to_string(),
        };
        println!("{:<36} ctx {:>6}  {}", entry.id, context, cost);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_flattens_and_truncates() {
        assert_eq!(preview("a\n\n b"), "a b");
        let long = "x".repeat(PREVIEW_CHARS + 5);
        let out = preview(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), PREVIEW_CHARS + 3);
    }
}
