//! Navigation header decoration.
//!
//! Fetches a navigation fragment (`{nav_path}.plain.html`), inlines icon
//! vectors, rewrites root-relative links, classifies the fragment's three
//! top-level children positionally as brand/sections/tools, marks dropdown
//! entries, and prepends the mobile toggle. Interaction semantics live in
//! [`NavState`], a pure state machine re-serialized via
//! [`DecoratedNav::render`].
//!
//! Fetch failure aborts decoration with an error from [`NavDecorator::decorate`];
//! [`NavDecorator::decorate_or_empty`] instead renders nothing, so a broken
//! fragment endpoint never leaves a container partially decorated.

mod decorate;
mod fetch;
mod icons;
mod state;

use scraper::Html;
use tracing::{instrument, warn};
use url::Url;

use blockport_blocks::read_block_config;
use blockport_shared::links::absolutize_hrefs;
use blockport_shared::{BlockportError, Result};

pub use decorate::{DecoratedNav, build_nav};
pub use state::NavState;

/// Default fragment path when the header block carries no `nav` override.
const DEFAULT_NAV_PATH: &str = "/nav";

/// Decorates header blocks against one site origin.
pub struct NavDecorator {
    client: reqwest::Client,
    origin: Url,
}

impl NavDecorator {
    /// Create a decorator for the given origin.
    pub fn new(origin: Url, timeout_secs: u64) -> Result<Self> {
        Ok(Self {
            client: fetch::build_client(timeout_secs)?,
            origin,
        })
    }

    /// Decorate a header block: read the `nav` override from its config
    /// rows, fetch the fragment, and build the decorated tree.
    #[instrument(skip_all, fields(origin = %self.origin))]
    pub async fn decorate_block(&self, block_html: &str) -> Result<DecoratedNav> {
        let config = read_block_config(block_html);
        let nav_path = config
            .get("nav")
            .map(String::as_str)
            .unwrap_or(DEFAULT_NAV_PATH);
        self.decorate(nav_path).await
    }

    /// Decorate the navigation fragment at `nav_path`.
    pub async fn decorate(&self, nav_path: &str) -> Result<DecoratedNav> {
        let raw = fetch::fetch_fragment(&self.client, &self.origin, nav_path).await?;
        let fragment = normalize_fragment(&raw)
            .ok_or_else(|| BlockportError::parse("nav fragment has no content"))?;

        let fragment = icons::inline_icons(&self.client, &self.origin, &fragment).await;
        let fragment = absolutize_hrefs(&fragment, &self.origin, false);

        Ok(build_nav(&fragment))
    }

    /// Decorate a header block, rendering nothing on failure.
    pub async fn decorate_or_empty(&self, block_html: &str) -> String {
        match self.decorate_block(block_html).await {
            Ok(nav) => nav.html,
            Err(e) => {
                warn!(error = %e, "nav decoration failed, rendering empty container");
                String::new()
            }
        }
    }
}

/// Normalize a raw fragment through the serializer so later outer-HTML
/// lookups match exactly. `None` for an effectively empty fragment.
fn normalize_fragment(raw: &str) -> Option<String> {
    let doc = Html::parse_fragment(raw);
    let html = doc.root_element().inner_html();
    if html.trim().is_empty() { None } else { Some(html) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
    }

    async fn mount_fragment(server: &MockServer, nav_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{nav_path}.plain.html")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    fn decorator(server: &MockServer) -> NavDecorator {
        NavDecorator::new(Url::parse(&server.uri()).unwrap(), 5).unwrap()
    }

    #[tokio::test]
    async fn decorates_fixture_fragment() {
        let server = MockServer::start().await;
        mount_fragment(&server, "/nav", &load_fixture("html/nav.plain.html")).await;

        let svg = "<svg viewBox=\"0 0 16 16\"><path d=\"M0 0h16v16H0z\"/></svg>";
        for icon in ["brand", "search"] {
            Mock::given(method("GET"))
                .and(path(format!("/icons/{icon}.svg")))
                .respond_with(ResponseTemplate::new(200).set_body_string(svg))
                .mount(&server)
                .await;
        }

        let nav = decorator(&server).decorate(DEFAULT_NAV_PATH).await.unwrap();

        assert!(nav.html.contains("nav-brand"));
        assert!(nav.html.contains("nav-sections"));
        assert!(nav.html.contains("nav-tools"));
        assert_eq!(nav.section_count(), 3);
        // icons inlined
        assert!(nav.html.contains("<svg viewBox="));
        assert!(!nav.html.contains("<img"));
        // root-relative links absolutized against the origin
        assert!(nav.html.contains(&format!("{}/what-we-do", server.uri())));
    }

    #[tokio::test]
    async fn nav_override_from_block_config() {
        let server = MockServer::start().await;
        mount_fragment(&server, "/custom-nav", "<div><p>B</p></div><div><ul><li>S</li></ul></div><div><p>T</p></div>").await;

        let block = r#"<div class="header">
            <div><div>Nav</div><div>/custom-nav</div></div>
        </div>"#;

        let nav = decorator(&server).decorate_block(block).await.unwrap();
        assert!(nav.html.contains("nav-sections"));
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/nav.plain.html"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = decorator(&server).decorate(DEFAULT_NAV_PATH).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn decorate_or_empty_renders_nothing_on_failure() {
        let server = MockServer::start().await;
        // no mock mounted: every request 404s

        let html = decorator(&server).decorate_or_empty("<div></div>").await;
        assert_eq!(html, "");
    }

    #[tokio::test]
    async fn failed_icon_fetch_keeps_image_reference() {
        let server = MockServer::start().await;
        mount_fragment(
            &server,
            "/nav",
            r#"<div><img class="icon icon-brand" src="/icons/missing.svg"></div><div><ul></ul></div><div><p>T</p></div>"#,
        )
        .await;
        // /icons/missing.svg is not mounted → 404

        let nav = decorator(&server).decorate(DEFAULT_NAV_PATH).await.unwrap();
        assert!(nav.html.contains(r#"<img class="icon icon-brand" src="/icons/missing.svg""#));
    }
}
