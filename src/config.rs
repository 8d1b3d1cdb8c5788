use std::path::PathBuf;
use tokio::time::Duration;

pub const DIRECTORY_URL: &str = "https://www.capterra.in/directory";
pub const OUTPUT_FILE: &str = "capterra_data.csv";
pub const MAX_CATEGORIES: usize = 5;
pub const NAVIGATION_TIMEOUT_MS: u64 = 30_000;
/// Trailing window with no network activity before a page counts as loaded.
pub const NETWORK_IDLE_WINDOW_MS: u64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScraperConfig {
    pub start_url: String,
    pub output: PathBuf,
    pub navigation_timeout: Duration,
    pub network_idle_window: Duration,
    pub max_categories: usize,
    pub browser: BrowserOptions,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: DIRECTORY_URL.to_string(),
            output: PathBuf::from(OUTPUT_FILE),
            navigation_timeout: Duration::from_millis(NAVIGATION_TIMEOUT_MS),
            network_idle_window: Duration::from_millis(NETWORK_IDLE_WINDOW_MS),
            max_categories: MAX_CATEGORIES,
            browser: BrowserOptions {
                headless: true,
                chrome_executable: None,
            },
        }
    }
}
