//! Navigation rendering glue over `blockport-nav`.

use tracing::instrument;
use url::Url;

use blockport_nav::NavDecorator;
use blockport_shared::{AppConfig, BlockportError, Result};

/// Render the decorated navigation header for a site.
///
/// The origin and fragment path come from `[nav]` config; a header block's
/// config rows may override the fragment path. Fetch failure renders an
/// empty container rather than a partial decoration.
#[instrument(skip_all)]
pub async fn render_nav(config: &AppConfig, block_html: Option<&str>) -> Result<String> {
    let origin = Url::parse(&config.nav.origin)
        .map_err(|e| BlockportError::config(format!("invalid nav origin: {e}")))?;

    let decorator = NavDecorator::new(origin, config.import.timeout_secs)?;

    match block_html {
        Some(block) => Ok(decorator.decorate_or_empty(block).await),
        None => match decorator.decorate(&config.nav.nav_path).await {
            Ok(nav) => Ok(nav.html),
            Err(e) => {
                tracing::warn!(error = %e, "nav decoration failed, rendering empty container");
                Ok(String::new())
            }
        },
    }
}
