use std::process::ExitCode;

use clap::Parser;
use lambda_cost_calculator::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Calculate(args) => cli::calculate::run(args).await,
        Command::Regions => cli::regions::run().await,
        Command::Serve => cli::serve::run().await.map(|()| ExitCode::SUCCESS),
    }
}
