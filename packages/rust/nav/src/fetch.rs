//! Fragment fetching.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use blockport_shared::{BlockportError, Result};

/// Maximum number of redirects to follow when fetching fragments.
const MAX_REDIRECTS: usize = 3;

/// User-Agent string for fragment requests.
const USER_AGENT: &str = concat!("blockport/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for fragment and icon fetches.
pub(crate) fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BlockportError::Network(format!("failed to build HTTP client: {e}")))
}

/// Fetch `{nav_path}.plain.html` from the origin.
///
/// Failures propagate: there is no retry and no fallback at this layer.
pub(crate) async fn fetch_fragment(client: &Client, origin: &Url, nav_path: &str) -> Result<String> {
    let url = origin
        .join(&format!("{nav_path}.plain.html"))
        .map_err(|e| BlockportError::Network(format!("invalid nav path '{nav_path}': {e}")))?;

    debug!(%url, "fetching nav fragment");

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| BlockportError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BlockportError::Network(format!("{url}: HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| BlockportError::Network(format!("{url}: body read failed: {e}")))
}
