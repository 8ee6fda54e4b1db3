//! Calculate command - prints a monthly cost estimate

use std::io::Write;
use std::process::ExitCode;

use clap::Args;
use tracing::debug;

use crate::config::{AppConfig, LoggingConfig};
use crate::domain::pricing::{
    Architecture, CalculationRequest, CalculationResult, RequestUnit, SizeUnit,
};
use crate::domain::DomainError;
use crate::infrastructure::logging;
use crate::infrastructure::pricing::CalculatorServiceTrait;

/// Exit status for invalid input (bad unit, architecture, region or limits)
pub const EXIT_INPUT_ERROR: u8 = 2;

/// Exit status for any other failure
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Clone, Args)]
pub struct CalculateArgs {
    /// Region code [default: pricing.default_region]
    #[arg(long)]
    pub region: Option<String>,

    /// CPU architecture (x86, arm64)
    #[arg(long, default_value = "x86")]
    pub architecture: Architecture,

    #[arg(long, default_value_t = 1_000_000)]
    pub number_of_requests: u64,

    /// per second, per minute, per hour, per day, per month, million per month
    #[arg(long, default_value = "per day")]
    pub request_unit: RequestUnit,

    #[arg(long, default_value_t = 1500.0)]
    pub duration_of_each_request_in_ms: f64,

    #[arg(long, default_value_t = 128.0)]
    pub memory: f64,

    /// MB or GB
    #[arg(long, default_value = "MB", value_parser = SizeUnit::parse_memory)]
    pub memory_unit: SizeUnit,

    #[arg(long, default_value_t = 512.0)]
    pub ephemeral_storage: f64,

    /// MB or GB
    #[arg(long, default_value = "MB", value_parser = SizeUnit::parse_storage)]
    pub storage_unit: SizeUnit,

    /// Ignore the monthly free tier
    #[arg(long)]
    pub no_free_tier: bool,

    /// Print every calculation step and log at debug level
    #[arg(long, short)]
    pub verbose: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

impl CalculateArgs {
    pub fn to_request(&self, default_region: &str) -> CalculationRequest {
        CalculationRequest {
            region: self
                .region
                .clone()
                .unwrap_or_else(|| default_region.to_string()),
            architecture: self.architecture,
            number_of_requests: self.number_of_requests,
            request_unit: self.request_unit,
            duration_of_each_request_in_ms: self.duration_of_each_request_in_ms,
            memory: self.memory,
            memory_unit: self.memory_unit,
            ephemeral_storage: self.ephemeral_storage,
            storage_unit: self.storage_unit,
            include_free_tier: !self.no_free_tier,
        }
    }
}

pub async fn run(args: CalculateArgs) -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging_config(&config, args.verbose));

    let calculator = crate::create_calculator(&config)?;
    let request = args.to_request(&config.pricing.default_region);

    let code = match calculator.calculate(&request).await {
        Ok(result) => {
            print_result(&result, &args, &mut std::io::stdout().lock())?;
            0
        }
        Err(e) => report_failure(&e),
    };

    Ok(ExitCode::from(code))
}

fn logging_config(config: &AppConfig, verbose: bool) -> LoggingConfig {
    if verbose {
        LoggingConfig {
            level: "debug".to_string(),
            ..config.logging.clone()
        }
    } else {
        config.logging.clone()
    }
}

fn print_result(
    result: &CalculationResult,
    args: &CalculateArgs,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    if args.json {
        writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
        return Ok(());
    }

    if args.verbose {
        for step in result.trace.steps() {
            writeln!(out, "{}", step)?;
        }
    }

    writeln!(out, "Total cost: {:.6} USD", result.total_cost)?;
    Ok(())
}

fn report_failure(err: &DomainError) -> u8 {
    debug!(error = ?err, "Calculation failed");
    eprintln!("Error: {}", err);

    exit_code_for(err)
}

fn exit_code_for(err: &DomainError) -> u8 {
    if err.is_input_error() {
        EXIT_INPUT_ERROR
    } else {
        EXIT_FAILURE
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};
    use crate::domain::pricing::CalculationTrace;

    fn parse(args: &[&str]) -> CalculateArgs {
        let mut argv = vec!["lambda-cost-calculator", "calculate"];
        argv.extend_from_slice(args);

        match Cli::try_parse_from(argv).unwrap().command {
            Command::Calculate(args) => args,
            _ => panic!("expected calculate"),
        }
    }

    fn result() -> CalculationResult {
        let mut trace = CalculationTrace::new();
        trace.push("0 USD + 0 USD + 0 USD = 0 USD");
        trace.push("Lambda cost (monthly): 0 USD");
        CalculationResult {
            total_cost: 0.0,
            trace,
        }
    }

    #[test]
    fn test_defaults_match_request_defaults() {
        let request = parse(&[]).to_request("us-east-1");
        assert_eq!(request, CalculationRequest::default());
    }

    #[test]
    fn test_flags() {
        let args = parse(&[
            "--region",
            "eu-west-1",
            "--architecture",
            "arm64",
            "--request-unit",
            "million per month",
            "--memory",
            "2",
            "--memory-unit",
            "GB",
            "--no-free-tier",
        ]);
        let request = args.to_request("us-east-1");

        assert_eq!(request.region, "eu-west-1");
        assert_eq!(request.architecture, Architecture::Arm64);
        assert_eq!(request.request_unit, RequestUnit::MillionPerMonth);
        assert_eq!(request.memory_unit, SizeUnit::Gb);
        assert!(!request.include_free_tier);
    }

    #[test]
    fn test_region_falls_back_to_configured_default() {
        assert_eq!(parse(&[]).to_request("eu-west-1").region, "eu-west-1");
    }

    #[test]
    fn test_unknown_units_rejected_by_parser() {
        let argv = ["lambda-cost-calculator", "calculate", "--request-unit", "per week"];
        assert!(Cli::try_parse_from(argv).is_err());

        let argv = ["lambda-cost-calculator", "calculate", "--storage-unit", "TB"];
        let err = Cli::try_parse_from(argv).unwrap_err();
        assert!(err.to_string().contains("Unknown storage unit"));
    }

    #[test]
    fn test_print_total() {
        let mut out = Vec::new();
        print_result(&result(), &parse(&[]), &mut out).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "Total cost: 0.000000 USD\n");
    }

    #[test]
    fn test_print_verbose_steps() {
        let mut out = Vec::new();
        print_result(&result(), &parse(&["--verbose"]), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("0 USD + 0 USD + 0 USD = 0 USD\n"));
        assert!(text.ends_with("Total cost: 0.000000 USD\n"));
    }

    #[test]
    fn test_print_json() {
        let mut out = Vec::new();
        print_result(&result(), &parse(&["--json"]), &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["total_cost"], 0.0);
        assert_eq!(value["calculation_steps"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(&DomainError::invalid_unit("x")), EXIT_INPUT_ERROR);
        assert_eq!(exit_code_for(&DomainError::unknown_region("x")), EXIT_INPUT_ERROR);
        assert_eq!(exit_code_for(&DomainError::validation("x")), EXIT_INPUT_ERROR);
        assert_eq!(exit_code_for(&DomainError::malformed_pricing("x")), EXIT_FAILURE);
        assert_eq!(exit_code_for(&DomainError::storage("x")), EXIT_FAILURE);
    }

    #[test]
    fn test_verbose_raises_log_level() {
        let config = AppConfig::default();

        assert_eq!(logging_config(&config, true).level, "debug");
        assert_eq!(logging_config(&config, false).level, "info");
    }
}
