#[path = "cwbench/args.rs"]
mod args;
#[path = "cwbench/commands.rs"]
mod commands;
#[path = "cwbench/logging.rs"]
mod logging;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = args::CliArgs::parse();
    let loaded = cwbench::config::load_config(args.config.clone())?;
    let _logger = logging::init_logging(&loaded.config.logging, &loaded.paths)?;
    commands::dispatch(args.command, loaded).await
}
