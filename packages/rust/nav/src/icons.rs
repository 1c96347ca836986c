//! Icon inlining: `img.icon` references replaced with fetched vector markup.

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::warn;
use url::Url;

/// One icon image slated for replacement.
struct IconTarget {
    outer_html: String,
    class_attr: String,
    src: String,
}

/// Replace each `img.icon` with a `<span>` holding the fetched vector
/// content. Fetches run concurrently; a failed fetch leaves that image in
/// place, so degraded output simply keeps the original references.
pub(crate) async fn inline_icons(client: &Client, origin: &Url, html: &str) -> String {
    let targets: Vec<IconTarget> = {
        let doc = Html::parse_fragment(html);
        let icon_sel = Selector::parse("img.icon").expect("valid selector");
        doc.select(&icon_sel)
            .filter_map(|img| {
                let src = img.value().attr("src")?.to_string();
                Some(IconTarget {
                    outer_html: img.html(),
                    class_attr: img.value().attr("class").unwrap_or_default().to_string(),
                    src,
                })
            })
            .collect()
    };

    if targets.is_empty() {
        return html.to_string();
    }

    let mut handles = Vec::new();
    for target in targets {
        let client = client.clone();
        let origin = origin.clone();
        handles.push(tokio::spawn(async move {
            let svg = fetch_icon(&client, &origin, &target.src).await;
            (target, svg)
        }));
    }

    let mut out = html.to_string();
    for handle in handles {
        let Ok((target, svg)) = handle.await else {
            continue;
        };
        match svg {
            Some(svg) => {
                let span = format!(r#"<span class="{}">{svg}</span>"#, target.class_attr);
                out = out.replacen(&target.outer_html, &span, 1);
            }
            None => warn!(src = %target.src, "icon fetch failed, keeping image reference"),
        }
    }

    out
}

/// Fetch one icon's markup; any failure maps to `None`.
async fn fetch_icon(client: &Client, origin: &Url, src: &str) -> Option<String> {
    let url = origin.join(src).ok()?;
    let response = client.get(url.as_str()).send().await.ok()?;
    if !response.status().is_success() {
        return None;
    }
    response.text().await.ok()
}
