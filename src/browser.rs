use crate::{config::BrowserOptions, Navigator, ScraperError};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tracing::{debug, warn};

const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// Finished resource fetches only grow while the page is still loading, so a
/// count that holds still on a complete document is treated as network idle.
/// The timing buffer caps at 250 entries by default, which would freeze the
/// count on busy pages, so it is raised on every probe.
const IDLE_PROBE: &str = r#"(() => {
    performance.setResourceTimingBufferSize(100000);
    return {
        readyState: document.readyState,
        resourceCount: performance.getEntriesByType('resource').length
    };
})()"#;

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct IdleProbe {
    ready_state: String,
    resource_count: u64,
}

impl IdleProbe {
    fn is_settled_after(&self, previous: &IdleProbe) -> bool {
        self.ready_state == "complete" && self.resource_count == previous.resource_count
    }
}

/// Tracks how long consecutive probes have agreed. A missing probe (the
/// execution context went away mid-navigation) restarts the window.
struct IdleTracker {
    window: Duration,
    last: Option<IdleProbe>,
    idle_since: Instant,
}

impl IdleTracker {
    fn new(window: Duration, now: Instant) -> Self {
        Self {
            window,
            last: None,
            idle_since: now,
        }
    }

    fn observe(&mut self, probe: Option<IdleProbe>, now: Instant) -> bool {
        let settled = match (&probe, &self.last) {
            (Some(current), Some(last)) => current.is_settled_after(last),
            _ => false,
        };
        self.last = probe;

        if !settled {
            self.idle_since = now;
            return false;
        }
        now.duration_since(self.idle_since) >= self.window
    }
}

/// A single headless Chromium tab driven over CDP.
pub struct ChromeNavigator {
    browser: Option<Browser>,
    page: Page,
    handler_task: JoinHandle<()>,
    idle_window: Duration,
}

impl ChromeNavigator {
    pub async fn launch(
        options: &BrowserOptions,
        idle_window: Duration,
    ) -> Result<Self, ScraperError> {
        let mut builder = BrowserConfig::builder();
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder.build().map_err(ScraperError::BrowserConfig)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        debug!("Browser launched (headless: {})", options.headless);

        Ok(Self {
            browser: Some(browser),
            page,
            handler_task,
            idle_window,
        })
    }
}

async fn probe(page: &Page) -> Result<IdleProbe, ScraperError> {
    Ok(page.evaluate(IDLE_PROBE).await?.into_value()?)
}

async fn wait_for_network_idle(page: &Page, idle_window: Duration) {
    let mut tracker = IdleTracker::new(idle_window, Instant::now());

    loop {
        let probe = match probe(page).await {
            Ok(probe) => Some(probe),
            Err(e) => {
                debug!("Network idle probe failed: {}", e);
                None
            }
        };
        let resources = probe.as_ref().map(|p| p.resource_count);
        if tracker.observe(probe, Instant::now()) {
            debug!("Network idle ({} resources)", resources.unwrap_or_default());
            return;
        }
        tokio::time::sleep(PROBE_INTERVAL).await;
    }
}

#[async_trait::async_trait]
impl Navigator for ChromeNavigator {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), ScraperError> {
        let page = &self.page;
        let idle_window = self.idle_window;
        let navigation = async move {
            page.goto(url).await?;
            wait_for_network_idle(page, idle_window).await;
            Ok::<(), ScraperError>(())
        };

        match tokio::time::timeout(timeout, navigation).await {
            Ok(result) => result,
            Err(_) => Err(ScraperError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis(),
            }),
        }
    }

    async fn current_url(&mut self) -> Result<Option<String>, ScraperError> {
        Ok(self.page.url().await?)
    }

    async fn content(&mut self) -> Result<String, ScraperError> {
        Ok(self.page.content().await?)
    }

    async fn close(&mut self) -> Result<(), ScraperError> {
        let Some(mut browser) = self.browser.take() else {
            return Ok(());
        };

        browser.close().await?;
        browser.wait().await?;
        self.handler_task.abort();
        debug!("Browser closed");
        Ok(())
    }
}

impl Drop for ChromeNavigator {
    fn drop(&mut self) {
        if self.browser.is_some() {
            warn!("Browser dropped without being closed");
        }
        self.handler_task.abort();
    }
}
