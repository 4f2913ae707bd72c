//! One run: resolve the URL, fetch the page once, check availability,
//! extract, normalize and write. Each stage hands its output to the next.

use crate::client::Client;
use crate::config::Config;
use crate::error::Result;
use crate::normalize::normalize_cards;
use crate::scraper::{Availability, ExtractionReport, Scraper, Selectors};
use crate::writer::{output_path, save_cards, OutputFormat};
use crate::{log_info, log_warn};
use std::path::PathBuf;
use std::time::Duration;

/// Per-run choices that do not come from the configuration file.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub format: OutputFormat,
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub enum RunOutcome {
    Saved {
        path: PathBuf,
        records: usize,
        report: ExtractionReport,
    },
    NotFound {
        url: String,
    },
}

pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .header("user-agent", &config.user_agent)?
        .header("accept-language", "en-US,en;q=0.7")?
        .timeout(Duration::from_secs(config.request_timeout))
        .build()
}

/// Fetches the set identified by `category` and writes its cards.
pub async fn run(config: &Config, category: &str, options: &RunOptions) -> Result<RunOutcome> {
    let selectors = Selectors::compile(&config.selectors)?;
    let url = config.resolve_url(category)?;
    let client = build_client(config)?;

    log_info!("[pipeline] Fetching {}", url);
    let response = client.get(&url).await?;
    log_info!(
        "[pipeline] Received response: Status: {}, Content Length: {} bytes",
        response.status,
        response.content.len()
    );

    process_page(&response.content, &url, config, &selectors, options)
}

/// Everything after the fetch, for a page that is already in memory.
pub fn process_page(
    html: &str,
    url: &str,
    config: &Config,
    selectors: &Selectors,
    options: &RunOptions,
) -> Result<RunOutcome> {
    let scraper = Scraper::new(html);
    let page = scraper.page(selectors);

    if page.availability() == Availability::NotFound {
        log_warn!("[pipeline] No cards found at {}", url);
        return Ok(RunOutcome::NotFound {
            url: url.to_string(),
        });
    }

    let title = page.set_title();
    match &title {
        Some(title) => {
            log_info!("[pipeline] Set title: {}", title);
        }
        None => {
            log_info!("[pipeline] No set title on page, using default file name");
        }
    }

    let extraction = scraper.cards(selectors).extract();
    let cards = normalize_cards(&extraction.cards);

    let dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.output_dir));
    let path = output_path(
        dir,
        title.as_deref(),
        &config.default_file_name,
        options.format,
    );
    save_cards(&cards, &path, options.format)?;

    Ok(RunOutcome::Saved {
        path,
        records: cards.len(),
        report: extraction.report,
    })
}
