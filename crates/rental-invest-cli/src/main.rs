mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::rental::{AmortizeArgs, AnalyzeArgs, ReportArgs};

/// Buy-to-let investment calculations
#[derive(Parser)]
#[command(
    name = "rentcalc",
    version,
    about = "Buy-to-let investment calculations",
    long_about = "A CLI for estimating the performance of a rental property investment \
                  with decimal precision. Computes loan amortization, cash flow, gross and \
                  net yield, and a 20-year projection of income and property value."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Full investment analysis (results, ratings, projections)
    Analyze(AnalyzeArgs),
    /// Loan amortization schedule
    Amortize(AmortizeArgs),
    /// Key figures as French-formatted display strings
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::rental::run_analyze(args),
        Commands::Amortize(args) => commands::rental::run_amortize(args),
        Commands::Report(args) => commands::rental::run_report(args),
        Commands::Version => {
            println!("rentcalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            log::debug!("command failed: {e:?}");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
