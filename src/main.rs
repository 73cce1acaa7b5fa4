use clap::Parser;
use navrouter::cli::{run_cli, Cli};
use navrouter::logging::{init_logging, LogConfig};

fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::from_env())?;
    run_cli(Cli::parse())
}
