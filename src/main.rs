use capterra_scraper::browser::ChromeNavigator;
use capterra_scraper::capterra::CapterraDirectory;
use capterra_scraper::config::{
    BrowserOptions, DIRECTORY_URL, MAX_CATEGORIES, NAVIGATION_TIMEOUT_MS, OUTPUT_FILE,
};
use capterra_scraper::{run_session, ScraperConfig};
use clap::Parser;
use std::path::PathBuf;
use tokio::time::Duration;
use tracing::error;
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// Scrape listing counts of the first Capterra directory categories into a CSV file.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Directory page holding the categories list
    #[arg(long, default_value = DIRECTORY_URL)]
    start_url: String,

    /// CSV file to (over)write
    #[arg(short, long, default_value = OUTPUT_FILE)]
    output: PathBuf,

    /// Per-navigation timeout in milliseconds
    #[arg(long, default_value_t = NAVIGATION_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Number of category links to visit
    #[arg(long, default_value_t = MAX_CATEGORIES)]
    max_categories: usize,

    /// Chrome or Chromium binary, detected when omitted
    #[arg(long)]
    chrome_executable: Option<PathBuf>,

    /// Show the browser window
    #[arg(long)]
    headful: bool,
}

impl From<Args> for ScraperConfig {
    fn from(args: Args) -> Self {
        Self {
            start_url: args.start_url,
            output: args.output,
            navigation_timeout: Duration::from_millis(args.timeout_ms),
            max_categories: args.max_categories,
            browser: BrowserOptions {
                headless: !args.headful,
                chrome_executable: args.chrome_executable,
            },
            ..Self::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,chromiumoxide=warn,tungstenite=warn".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = ScraperConfig::from(Args::parse());

    let navigator = ChromeNavigator::launch(&config.browser, config.network_idle_window)
        .await
        .map_err(|e| {
            error!("Failed to launch browser: {}", e);
            e
        })?;

    if run_session(navigator, &CapterraDirectory, &config)
        .await
        .is_err()
    {
        std::process::exit(1);
    }

    Ok(())
}
