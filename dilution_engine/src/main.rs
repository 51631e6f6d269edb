//! Entry point for the Dilution Engine binary.
//!
//! `serve` starts the HTTP API; `ratio` and `calc` evaluate a single
//! input and print the JSON result.  The bind address and log filter
//! come from `DILUTION_BIND_ADDR` / `DILUTION_LOG` (see
//! [`dilution_engine::config`]); `RUST_LOG` takes precedence for logging.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dilution_engine::config::ServerConfig;
use dilution_engine::{api, compute, parse_dilution, validate};
use dilution_engine::{CalculationInput, CalculationReport, VolumeUnit};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dilution_engine")]
#[command(about = "Dilution ratio parser and cost/yield calculator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind, overriding DILUTION_BIND_ADDR
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Parse a dilution expression (e.g. "1:16", "1 to 16", "16x")
    Ratio {
        text: String,
    },

    /// Compute costs and yields for one set of inputs
    Calc(CalcArgs),
}

/// Form fields, kept as text so they go through the same coercion as
/// the front ends.
#[derive(Args)]
struct CalcArgs {
    #[arg(long, default_value = "")]
    bottle_size: String,
    #[arg(long, default_value = "ml")]
    bottle_unit: VolumeUnit,
    #[arg(long, default_value = "")]
    bottle_cost: String,
    #[arg(short, long, default_value = "")]
    dilution: String,
    #[arg(long, default_value = "")]
    mix_size: String,
    #[arg(long, default_value = "ml")]
    mix_unit: VolumeUnit,
    /// Pump volume in mL
    #[arg(long, default_value = "")]
    pump: String,
    #[arg(long, default_value = "")]
    cond_size: String,
    #[arg(long, default_value = "ml")]
    cond_unit: VolumeUnit,
    #[arg(long, default_value = "")]
    cond_cost: String,
    /// Conditioner used per bath in mL
    #[arg(long, default_value = "")]
    cond_use: String,
}

impl From<CalcArgs> for CalculationInput {
    fn from(args: CalcArgs) -> Self {
        CalculationInput {
            bottle_size: args.bottle_size,
            bottle_unit: args.bottle_unit,
            bottle_cost: args.bottle_cost,
            dilution: args.dilution,
            mix_size: args.mix_size,
            mix_unit: args.mix_unit,
            pump_ml: args.pump,
            cond_bottle_size: args.cond_size,
            cond_bottle_unit: args.cond_unit,
            cond_bottle_cost: args.cond_cost,
            cond_use_per_bath_ml: args.cond_use,
        }
    }
}

fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn run(cli: Cli, config: ServerConfig) -> Result<()> {
    match cli.command {
        Commands::Serve { bind } => {
            let config = match bind {
                Some(addr) => config.with_bind_addr(&addr)?,
                None => config,
            };
            api::serve(&config).await?;
        }

        Commands::Ratio { text } => {
            let ratio = parse_dilution(&text);
            println!("{}", serde_json::to_string_pretty(&ratio)?);
        }

        Commands::Calc(args) => {
            let input = CalculationInput::from(args);
            let report = CalculationReport {
                result: compute(&input),
                issues: validate(&input),
            };
            for issue in &report.issues {
                tracing::warn!(field = %issue.field, "{}", issue.message);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(2);
        }
    };
    if let Err(err) = init_tracing(&config.log_filter) {
        eprintln!("Error: {err:#}");
        std::process::exit(2);
    }

    if let Err(err) = run(cli, config).await {
        tracing::error!("{err:#}");
        std::process::exit(1);
    }
}
