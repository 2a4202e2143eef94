mod commands;
mod config;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::catalog::LoanTypesArgs;
use commands::loan::{QuoteArgs, ScheduleArgs};

/// EMI quotes and loan amortization schedules
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "EMI quotes and loan amortization schedules",
    long_about = "Computes the Equated Monthly Installment for home, car, personal and \
                  education loans with decimal precision, validates requests against \
                  each loan type's limits, and prints month-by-month amortization schedules."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Replace the builtin loan types with a JSON or YAML catalog file
    #[arg(long, global = true)]
    catalog: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the monthly installment and full-term totals
    Quote(QuoteArgs),
    /// Quote plus the month-by-month amortization schedule
    Schedule(ScheduleArgs),
    /// List supported loan types and their limits
    LoanTypes(LoanTypesArgs),
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
    let cli = Cli::parse();
    logging::init();

    let catalog = match config::load_catalog(cli.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Quote(args) => commands::loan::run_quote(args, &catalog),
        Commands::Schedule(args) => commands::loan::run_schedule(args, &catalog),
        Commands::LoanTypes(args) => commands::catalog::run_loan_types(args, &catalog),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
