mod config;
mod fetch;
mod listing;
mod output;
mod parser;
mod pipeline;
mod record;

use std::time::{Duration, Instant};

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing::info;

use config::Settings;
use fetch::Fetcher;
use output::CsvOutput;

#[derive(Parser)]
#[command(name = "ipo_scraper", about = "Upcoming IPO lottery schedules from ipokiso.com as CSV")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape every listed IPO and print one CSV row each (default)
    Run {
        /// Max detail pages to visit (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Print the detail-page URLs found on the listing page
    Links,
    /// Extract a single detail page
    Show {
        /// Detail page URL, e.g. https://www.ipokiso.com/company/2024/xxxx.html
        url: String,
        /// Print the record as JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries CSV only; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();
    let settings = Settings::load()?;
    let fetcher = Fetcher::new(&settings)?;
    let stdout = std::io::stdout();

    let result = match cli.command.unwrap_or(Commands::Run { limit: None }) {
        Commands::Run { limit } => pipeline::run(&fetcher, &settings, stdout.lock(), limit)
            .await
            .map(|_| ()),
        Commands::Links => {
            let urls = pipeline::discover(&fetcher, &settings).await?;
            for url in &urls {
                println!("{}", url);
            }
            Ok(())
        }
        Commands::Show { url, json } => {
            let Some(record) = pipeline::fetch_record(&fetcher, &url).await? else {
                bail!("No company name or stock code found on {}", url);
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                let mut out = CsvOutput::new(stdout.lock());
                out.write_header()?;
                out.write_record(&record)?;
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    result
}

/// `1.5s`, `1m 15s`, `1h 2m 5s`.
fn format_duration(d: Duration) -> String {
    let total = d.as_secs();
    let (h, m, s) = (total / 3600, total % 3600 / 60, total % 60);
    match (h, m) {
        (0, 0) => format!("{:.1}s", d.as_secs_f64()),
        (0, _) => format!("{}m {}s", m, s),
        _ => format!("{}h {}m {}s", h, m, s),
    }
}

// ── Tests ──
