use std::time::Duration;

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;

use super::{classify_text, LoadedDocument};

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("awesome-index/", env!("CARGO_PKG_VERSION"));

/// Fetch `url` and classify its body.
pub async fn load_url(url: &str, show_progress: bool) -> Result<LoadedDocument> {
    let client = Client::builder().timeout(FETCH_TIMEOUT).build()?;

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Fetching {}", url));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    } else {
        None
    };

    let result = fetch_text(&client, url).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let text = result?;
    match classify_text(&text) {
        Some(document) => Ok(LoadedDocument {
            document,
            origin: url.to_string(),
        }),
        None => bail!("{} returned neither a JSON catalog nor a Markdown list", url),
    }
}

async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/json, text/markdown, text/plain")
        .send()
        .await
        .with_context(|| format!("cannot fetch {}", url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("{} returned HTTP {}", url, status);
    }

    let text = response
        .text()
        .await
        .with_context(|| format!("cannot read response body from {}", url))?;
    tracing::debug!(url, bytes = text.len(), "fetched remote source");
    Ok(text)
}
