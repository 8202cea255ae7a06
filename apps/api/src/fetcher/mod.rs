//! Page Fetcher: returns the fully rendered HTML of a URL.
//!
//! Pipeline stages depend on `PageFetcher` only. `WebDriverFetcher` drives a real
//! browser through a WebDriver endpoint (chromedriver, geckodriver, selenium).

pub mod html;

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::{CmdError, NewSessionError};
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Tried in order when the configured endpoint refuses a session.
const FALLBACK_WEBDRIVER_URLS: &[&str] = &[
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444",
];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not start a browser session: {0}")]
    Session(#[from] NewSessionError),

    #[error("browser command failed: {0}")]
    Command(#[from] CmdError),
}

/// The `fetch(url) -> rendered page` capability.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages through a WebDriver server, one browser session per fetch.
#[derive(Debug, Clone)]
pub struct WebDriverFetcher {
    webdriver_url: String,
    render_wait: Duration,
}

impl WebDriverFetcher {
    pub fn new(webdriver_url: impl Into<String>, render_wait: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            render_wait,
        }
    }

    async fn connect(&self) -> Result<Client, FetchError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(browser_capabilities());

        let first_error = match builder.connect(&self.webdriver_url).await {
            Ok(client) => {
                debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Ok(client);
            }
            Err(e) => e,
        };

        warn!(
            "WebDriver at {} refused a session: {first_error}",
            self.webdriver_url
        );

        for url in FALLBACK_WEBDRIVER_URLS
            .iter()
            .filter(|u| **u != self.webdriver_url)
        {
            info!("Trying fallback WebDriver URL: {url}");
            if let Ok(client) = builder.connect(url).await {
                debug!("Connected to fallback WebDriver at {url}");
                return Ok(client);
            }
        }

        Err(FetchError::Session(first_error))
    }
}

#[async_trait]
impl PageFetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!("Fetching page: {url}");
        let client = self.connect().await?;

        let result = read_rendered_source(&client, url, self.render_wait).await;

        // The session is closed whether or not the page loaded.
        if let Err(e) = client.close().await {
            warn!("Failed to close WebDriver session: {e}");
        }

        result
    }
}

async fn read_rendered_source(
    client: &Client,
    url: &str,
    render_wait: Duration,
) -> Result<String, FetchError> {
    client.goto(url).await?;
    // Job boards fill their markup in after load.
    tokio::time::sleep(render_wait).await;
    let source = client.source().await?;
    debug!("Fetched {} bytes from {url}", source.len());
    Ok(source)
}

fn browser_capabilities() -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({ "args": ["--headless=new", format!("user-agent={USER_AGENT}")] }),
    );
    caps.insert(
        "moz:firefoxOptions".to_string(),
        json!({
            "args": ["-headless"],
            "prefs": { "general.useragent.override": USER_AGENT }
        }),
    );
    caps
}
