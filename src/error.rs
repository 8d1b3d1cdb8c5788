#[derive(Debug, thiserror::Error)]
pub enum ScraperError {
    #[error("Browser error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("Invalid browser config: {0}")]
    BrowserConfig(String),

    #[error("Navigation timeout of {timeout_ms} ms exceeded: {url}")]
    NavigationTimeout { url: String, timeout_ms: u128 },

    #[error("Invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Malformed network idle probe: {0}")]
    Probe(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
