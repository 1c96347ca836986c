//! Quote and embed rewrites.

use blockport_blocks::create_table;

use crate::document::PageDocument;
use crate::dom::{background_image_url, select_all_in};
use crate::passes::PassContext;

/// Rebuild every blockquote into a one-row Quote table, prepending its
/// background image when one can be extracted.
pub(crate) fn quote(doc: &mut PageDocument, ctx: &PassContext) {
    let media_origin = ctx.profile.media_origin_url().ok();

    let edits: Vec<(String, String)> = {
        let parsed = doc.parse();
        select_all_in(&parsed.root_element(), &ctx.profile.quote_selector)
            .iter()
            .map(|bq| {
                let image = media_origin
                    .as_ref()
                    .and_then(|base| background_image_url(bq, base))
                    .map(|src| format!(r#"<img src="{src}">"#))
                    .unwrap_or_default();

                let cell = format!("{image}{}", bq.inner_html());
                let table = create_table(&[vec!["Quote".to_string()], vec![cell]]);

                (bq.html(), table)
            })
            .collect()
    };

    for (needle, replacement) in edits {
        doc.replace_once(&needle, &replacement);
    }
}

/// Replace each video link with an Embed table. The embed identifier comes
/// from a URL fragment parameter; a directly preceding poster image is
/// consumed into the table when present.
pub(crate) fn embed(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let mut edits: Vec<(String, String)> = Vec::new();
    let mut removals: Vec<String> = Vec::new();
    {
        let parsed = doc.parse();
        for link in select_all_in(&parsed.root_element(), &profile.video_link_selector) {
            let Some(id) = link
                .value()
                .attr("href")
                .and_then(|href| fragment_param(href, &profile.embed_fragment_param))
            else {
                continue;
            };

            let embed_url = profile.embed_url_template.replace("{id}", &id);

            let mut rows = vec![vec!["Embed".to_string()]];
            if let Some(poster) = preceding_image(&link) {
                rows.push(vec![poster.clone()]);
                removals.push(poster);
            }
            rows.push(vec![format!(r#"<a href="{embed_url}">{embed_url}</a>"#)]);

            edits.push((link.html(), create_table(&rows)));
        }
    }

    for (needle, replacement) in edits {
        doc.replace_once(&needle, &replacement);
    }
    for needle in removals {
        doc.remove(&needle);
    }
}

/// Value of a `key=value` pair inside a URL fragment (`#a=1&b=2`).
fn fragment_param(href: &str, param: &str) -> Option<String> {
    let (_, fragment) = href.split_once('#')?;
    fragment.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == param && !value.is_empty()).then(|| value.to_string())
    })
}

/// Outer HTML of a directly preceding `<img>` sibling, if any.
fn preceding_image(link: &scraper::ElementRef) -> Option<String> {
    let prev = link
        .prev_siblings()
        .find_map(scraper::ElementRef::wrap)?;
    (prev.value().name() == "img").then(|| prev.html())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;
    use url::Url;

    fn run(html: &str, pass: fn(&mut PageDocument, &PassContext)) -> PageDocument {
        let mut doc = PageDocument::new(html);
        let profile = SiteProfile::corporate();
        let url = Url::parse("https://www.example.com/stories/a.html").unwrap();
        pass(&mut doc, &PassContext { url: &url, profile: &profile });
        doc
    }

    #[test]
    fn blockquote_becomes_quote_table() {
        let html = r#"<html><body>
            <blockquote><p>We follow the science.</p><footer>A Scientist</footer></blockquote>
        </body></html>"#;
        let doc = run(html, quote);

        assert!(doc.html().contains("<th>Quote</th>"));
        assert!(doc.html().contains("We follow the science."));
        assert!(doc.html().contains("<footer>A Scientist</footer>"));
        assert!(!doc.html().contains("<blockquote>"));
    }

    #[test]
    fn quote_background_image_prepended() {
        let html = r#"<html><body>
            <blockquote style="background-image: url(/media/q.jpg)"><p>Said.</p></blockquote>
        </body></html>"#;
        let doc = run(html, quote);
        assert!(doc.html().contains(r#"<img src="http://localhost:3000/media/q.jpg"><p>Said.</p>"#));
    }

    #[test]
    fn document_without_blockquote_gets_no_quote_table() {
        let html = "<html><body><p>prose only</p></body></html>";
        let doc = run(html, quote);
        assert!(!doc.html().contains("Quote"));
        assert!(doc.html().contains("<p>prose only</p>"));
    }

    #[test]
    fn video_link_becomes_embed_table() {
        let html = r##"<html><body>
            <a class="video-link" href="/video-player.html#videoId=abc123">Watch</a>
        </body></html>"##;
        let doc = run(html, embed);

        assert!(doc.html().contains("<th>Embed</th>"));
        assert!(doc.html().contains("https://players.example.com/embed/abc123"));
        assert!(!doc.html().contains("video-link"));
    }

    #[test]
    fn poster_image_consumed_into_embed() {
        let html = r##"<html><body><div>
            <img src="/media/poster.jpg"><a class="video-link" href="/v#videoId=xyz">Watch</a>
        </div></body></html>"##;
        let doc = run(html, embed);

        assert!(doc.html().contains(r#"<td><img src="/media/poster.jpg"></td>"#));
        // consumed: the poster only lives inside the table now
        assert_eq!(doc.html().matches("poster.jpg").count(), 1);
    }

    #[test]
    fn video_link_without_id_left_alone() {
        let html = r#"<html><body>
            <a class="video-link" href="/video-player.html">Watch</a>
        </body></html>"#;
        let doc = run(html, embed);
        assert!(doc.html().contains("video-link"));
        assert!(!doc.html().contains("Embed"));
    }
}
