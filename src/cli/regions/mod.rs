//! Regions command - prints the region codes with pricing

use std::io::Write;
use std::process::ExitCode;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::pricing::CalculatorServiceTrait;

pub async fn run() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let calculator = crate::create_calculator(&config)?;
    let regions = fetch_regions(calculator.as_ref()).await?;
    print_regions(&regions, &mut std::io::stdout().lock())?;

    Ok(ExitCode::SUCCESS)
}

async fn fetch_regions(calculator: &dyn CalculatorServiceTrait) -> anyhow::Result<Vec<String>> {
    Ok(calculator.list_regions().await?)
}

fn print_regions(regions: &[String], out: &mut impl Write) -> std::io::Result<()> {
    for region in regions {
        writeln!(out, "{}", region)?;
    }

    Ok(())
}
