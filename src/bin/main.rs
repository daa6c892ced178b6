//! Market Research CLI - serves the research UI or runs one research pass
//!
//! Settings are read from flags, the environment and a `.env` file in the
//! working directory. `TAVILY_API_KEY` must be set.

use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use market_research::{
    config::Settings,
    heuristics::format_thousands,
    web::{self, AppState},
    MarketReport,
};

#[derive(Parser)]
#[command(name = "market-research")]
#[command(about = "Smartwatch competitor research over the Tavily search API")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Address the web UI binds to
    #[arg(long, env = "HOST", default_value = "127.0.0.1", global = true)]
    host: String,

    /// Port the web UI listens on
    #[arg(short, long, env = "PORT", default_value_t = 8501, global = true)]
    port: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the research page (default)
    Serve,
    /// Research one product and print the report
    Research {
        /// Product to find competitors for
        product: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutputFormat {
    Table,
    Json,
    Text,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {e:#}", "❌".red());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let researcher = cli.settings.build_researcher()?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let state = Arc::new(AppState::new(researcher));
            web::serve(&format!("{}:{}", cli.host, cli.port), state).await?;
        }
        Commands::Research { product, format } => {
            let product = product.trim();
            if product.is_empty() {
                anyhow::bail!("product name must not be empty");
            }
            let report = researcher.research(product).await;
            display_report(&report, &format)?;
        }
    }

    Ok(())
}

fn display_report(report: &MarketReport, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", report.to_json()?),
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Table => {
            println!(
                "{} {}",
                "Market Research Completed for".bold(),
                report.product.bold().blue()
            );
            println!("{}", "─".repeat(80).dimmed());

            for (i, competitor) in report.competitors.iter().enumerate() {
                println!("{}. {}", (i + 1).to_string().bold(), competitor.name.bold());
                if let Some(avg) = competitor.avg_price {
                    println!(
                        "   💰 Estimated Avg Price: {}",
                        format!("{} {}", report.currency, format_thousands(avg)).green()
                    );
                }

                for (heading, items) in [
                    ("Key Features", &competitor.features),
                    ("Price", &competitor.price),
                    ("Customer Sentiment", &competitor.reviews),
                ] {
                    println!("   {}", heading.cyan());
                    for item in items {
                        println!("     - {}", item.italic());
                    }
                }
                println!();
            }

            println!(
                "{} {}",
                "Total competitors:".bold(),
                report.competitors.len().to_string().bold()
            );
        }
    }

    Ok(())
}
