use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "cwbench",
    about = "Benchmark creative writing across LLMs with a judge model"
)]
pub struct CliArgs {
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate with every model, judge the outputs and rank them
    Run(RunArgs),
    /// List saved runs, newest first
    History {
        #[arg(long, short = 'n', default_value_t = 10)]
        limit: usize,
    },
    /// Per-model averages and wins across saved runs
    Leaderboard,
    /// Delete all saved runs
    Clear,
    /// List models from the LiteLLM config
    Models,
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(long, short = 'p')]
    pub prompt: String,
    /// Candidate model; repeat for several. Defaults to the first three catalog models.
    #[arg(long = "model", short = 'm')]
    pub models: Vec<String>,
    /// Judge model; defaults to the configured judge
    #[arg(long, short = 'j')]
    pub judge: Option<String>,
    /// Do not append the run to history
    #[arg(long)]
    pub no_save: bool,
    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_models() {
        let args = CliArgs::parse_from([
            "cwbench", "run", "-p", "Write about rain.", "-m", "m1", "--model", "m2", "--no-save",
        ]);
        match args.command {
            Command::Run(run) => {
                assert_eq!(run.models, ["m1", "m2"]);
                assert_eq!(run.prompt, "Write about rain.");
                assert!(run.no_save);
                assert!(run.judge.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let args = CliArgs::parse_from(["cwbench", "history", "--config", "/tmp/c.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/c.toml")));
    }
}
