//! `localpay` command line interface.
//!
//! Looks up Gyeonggi local-currency merchants from the terminal. Configuration
//! comes from `LOCALPAY_*` environment variables (a `.env` file is loaded first).

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use localpay_client::QueryPipeline;
use localpay_core::{AppConfig, CategoryFilter, Jurisdiction};
use tracing_subscriber::EnvFilter;

use crate::render::{OutputFormat, render, render_diagnostic};

#[derive(Debug, Parser)]
#[command(name = "localpay")]
#[command(about = "Gyeonggi local-currency merchant lookup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List merchants in a city or county
    Query {
        /// Korean name (e.g. 수원시) or romanized slug (e.g. suwon)
        jurisdiction: String,
        /// Only show merchants in this category ("전체" for all)
        #[arg(long)]
        category: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List the categories present in a city or county
    Categories {
        /// Korean name (e.g. 수원시) or romanized slug (e.g. suwon)
        jurisdiction: String,
    },
    /// List supported cities and counties
    Jurisdictions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Jurisdictions => {
            for jurisdiction in Jurisdiction::ALL {
                println!("{:<10}{}", jurisdiction.name(), jurisdiction.slug());
            }
        }
        Commands::Query { jurisdiction, category, format } => {
            let pipeline = pipeline()?;
            let jurisdiction: Jurisdiction = jurisdiction.parse()?;
            let filter = CategoryFilter::from_option(category.as_deref());

            let outcome = pipeline.query(jurisdiction).await;
            if let Some(diagnostic) = &outcome.diagnostic {
                eprintln!("{}", render_diagnostic(diagnostic));
            }
            if outcome.is_error() {
                anyhow::bail!("merchant query for {jurisdiction} failed");
            }

            let selection = outcome.result.select(&filter);
            if let Some(advisory) = &selection.advisory {
                eprintln!("{}", render_diagnostic(advisory));
            }
            println!("{}", render(format, &outcome, &selection)?);
        }
        Commands::Categories { jurisdiction } => {
            let pipeline = pipeline()?;
            let jurisdiction: Jurisdiction = jurisdiction.parse()?;

            let outcome = pipeline.query(jurisdiction).await;
            if let Some(diagnostic) = &outcome.diagnostic {
                eprintln!("{}", render_diagnostic(diagnostic));
            }
            if outcome.is_error() {
                anyhow::bail!("merchant query for {jurisdiction} failed");
            }

            println!("{}", CategoryFilter::ALL_LABEL);
            for category in outcome.result.categories() {
                println!("{category}");
            }
        }
    }

    Ok(())
}

fn pipeline() -> anyhow::Result<QueryPipeline> {
    let config = AppConfig::load().context("failed to load configuration")?;
    tracing::debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "loaded configuration");
    QueryPipeline::from_config(&config).context("failed to build HTTP client")
}
