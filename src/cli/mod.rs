//! CLI module for the Lambda cost calculator
//!
//! Subcommands:
//! - `calculate`: print a monthly cost estimate
//! - `regions`: list region codes with pricing
//! - `serve`: run the HTTP API

pub mod calculate;
pub mod regions;
pub mod serve;

use clap::{Parser, Subcommand};

/// Lambda Cost Calculator - monthly cost estimates for serverless functions
#[derive(Debug, Parser)]
#[command(name = "lambda-cost-calculator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate the monthly cost of a function
    Calculate(calculate::CalculateArgs),

    /// List regions with pricing
    Regions,

    /// Run the HTTP API server
    Serve,
}
