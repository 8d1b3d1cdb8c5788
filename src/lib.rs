use scraper::Html;
use tokio::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

pub mod browser;
pub mod capterra;
pub mod config;
pub mod writer;

mod data;
mod error;

pub use config::ScraperConfig;
pub use data::{LinkRecord, OutputRow, RunOutcome};
pub use error::ScraperError;

/// A browser tab that can be pointed at a page and read back.
#[async_trait::async_trait]
pub trait Navigator {
    /// Loads `url` and returns once the network has gone quiet, or fails
    /// with [`ScraperError::NavigationTimeout`] after `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError>;
    /// URL of the document currently loaded, after any redirects.
    async fn current_url(&mut self) -> Result<Option<String>, ScraperError>;
    /// Serialized DOM of the page currently loaded.
    async fn content(&mut self) -> Result<String, ScraperError>;
    async fn close(&mut self) -> Result<(), ScraperError>;
}

pub trait Directory {
    fn extract_categories(&self, doc: &Html, page_url: &Url, limit: usize) -> Vec<LinkRecord>;
    fn extract_numeric_labels(&self, doc: &Html) -> Vec<Option<String>>;
}

/// Visits the directory and every category link it yields. Returns `None`
/// when the directory page has no categories.
pub async fn collect_rows<N, D>(
    navigator: &mut N,
    directory: &D,
    config: &ScraperConfig,
) -> Result<Option<Vec<OutputRow>>, ScraperError>
where
    N: Navigator + Send,
    D: Directory + Sync,
{
    let start_url = Url::parse(&config.start_url)?;
    info!("Navigating to: {}", start_url);
    navigator
        .navigate(start_url.as_str(), config.navigation_timeout)
        .await?;

    let page_url = navigator
        .current_url()
        .await?
        .and_then(|url| Url::parse(&url).ok())
        .unwrap_or(start_url);

    let links = {
        let html = navigator.content().await?;
        let doc = Html::parse_document(&html);
        directory.extract_categories(&doc, &page_url, config.max_categories)
    };

    if links.is_empty() {
        info!("No links found under #categories_list");
        return Ok(None);
    }

    info!("Found {} links. Starting to scrape...", links.len());
    let mut rows = vec![];
    for link in &links {
        debug!("Processing category {}", link);
        match scrape_link(navigator, directory, link, config).await {
            Ok(link_rows) => rows.extend(link_rows),
            Err(e) => error!("Error processing link {}: {}", link.href, e),
        }
    }

    Ok(Some(rows))
}

async fn scrape_link<N, D>(
    navigator: &mut N,
    directory: &D,
    link: &LinkRecord,
    config: &ScraperConfig,
) -> Result<Vec<OutputRow>, ScraperError>
where
    N: Navigator + Send,
    D: Directory + Sync,
{
    let url = Url::parse(&link.href)?;
    info!("Navigating to: {}", url);
    navigator
        .navigate(url.as_str(), config.navigation_timeout)
        .await?;

    let labels = {
        let html = navigator.content().await?;
        let doc = Html::parse_document(&html);
        directory.extract_numeric_labels(&doc)
    };

    Ok(labels
        .into_iter()
        .map(|h5_text| OutputRow {
            url: url.to_string(),
            category_name: link.category_name.clone(),
            h5_text,
        })
        .collect())
}

pub async fn run<N, D>(
    navigator: &mut N,
    directory: &D,
    config: &ScraperConfig,
) -> Result<RunOutcome, ScraperError>
where
    N: Navigator + Send,
    D: Directory + Sync,
{
    let Some(rows) = collect_rows(navigator, directory, config).await? else {
        return Ok(RunOutcome::NoCategories);
    };

    writer::write_csv(&config.output, &rows)?;
    info!(
        "CSV file has been created successfully ({} rows): {}",
        rows.len(),
        config.output.display()
    );

    Ok(RunOutcome::Written {
        path: config.output.clone(),
        rows: rows.len(),
    })
}

/// Runs once and closes the navigator on every exit path.
pub async fn run_session<N, D>(
    mut navigator: N,
    directory: &D,
    config: &ScraperConfig,
) -> Result<RunOutcome, ScraperError>
where
    N: Navigator + Send,
    D: Directory + Sync,
{
    let result = run(&mut navigator, directory, config).await;
    if let Err(e) = &result {
        error!("Error occurred: {}", e);
    }

    if let Err(e) = navigator.close().await {
        warn!("Failed to close browser: {}", e);
    }

    result
}
