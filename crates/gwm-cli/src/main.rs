//! # gwm CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Gateway model validation toolchain.
///
/// Checks gateway registration documents: challenge keys, device
/// descriptors, gateway and network configuration.
#[derive(Parser, Debug)]
#[command(name = "gwm", version, about)]
struct Cli {
    /// Log output format.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate documents against a gateway model.
    Validate(gwm_cli::validate::ValidateArgs),
    /// List the available schemas.
    Schemas(gwm_cli::schemas::SchemasArgs),
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Commands::Validate(args) => {
            let report = gwm_cli::validate::run(&args)?;
            for outcome in &report.outcomes {
                match &outcome.result {
                    Ok(()) => println!("OK   {}", outcome.path.display()),
                    Err(reason) => println!("FAIL {}: {reason}", outcome.path.display()),
                }
            }
            if report.all_passed() {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Commands::Schemas(args) => {
            for name in gwm_cli::schemas::run(&args)? {
                println!("{name}");
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
