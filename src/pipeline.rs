use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use scraper::Html;
use tracing::{debug, info};

use crate::config::Settings;
use crate::fetch::PageSource;
use crate::listing;
use crate::output::CsvOutput;
use crate::parser;
use crate::record::IpoRecord;

/// Run stats returned after completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub written: usize,
    pub skipped: usize,
}

/// Fetch the listing page and return the detail-page URLs it links to.
pub async fn discover<S: PageSource + ?Sized>(source: &S, settings: &Settings) -> Result<Vec<String>> {
    info!("Fetching listing page: {}", settings.source_url);
    let html = source.fetch_html(&settings.source_url).await?;
    let urls = listing::extract_detail_urls(&Html::parse_document(&html), &settings.base_url);
    info!("Detail pages found: {}", urls.len());
    Ok(urls)
}

/// Fetch one detail page. `None` when the page has no complete title.
pub async fn fetch_record<S: PageSource + ?Sized>(source: &S, url: &str) -> Result<Option<IpoRecord>> {
    let html = source.fetch_html(url).await?;
    let doc = Html::parse_document(&html);
    Ok(parser::extract_record(&doc, url))
}

/// Header → listing → one detail page at a time, pausing `delay_ms` after each.
/// A fetch error aborts the run; rows already written stay written.
pub async fn run<S, W>(
    source: &S,
    settings: &Settings,
    out: W,
    limit: Option<usize>,
) -> Result<RunStats>
where
    S: PageSource + ?Sized,
    W: Write,
{
    let mut csv = CsvOutput::new(out);
    csv.write_header()?;

    let mut urls = discover(source, settings).await?;
    if let Some(n) = limit {
        urls.truncate(n);
    }

    let delay = Duration::from_millis(settings.delay_ms);
    let mut stats = RunStats {
        total: urls.len(),
        ..Default::default()
    };

    let pb = ProgressBar::new(urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    for url in &urls {
        match fetch_record(source, url).await? {
            Some(record) => {
                if record.schedule.is_unset() {
                    debug!(url = %url, "No schedule yet, writing unset dates");
                }
                csv.write_record(&record)?;
                stats.written += 1;
            }
            None => stats.skipped += 1,
        }
        pb.inc(1);
        tokio::time::sleep(delay).await;
    }

    pb.finish_and_clear();
    info!(
        "Processed {} pages ({} written, {} skipped)",
        stats.total, stats.written, stats.skipped
    );
    Ok(stats)
}

// ── Tests ──
