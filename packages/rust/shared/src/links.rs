//! Root-relative link rewriting.
//!
//! Both the importer and the navigation decorator rewrite root-relative
//! `href`s against a fixed origin. The rewrite is idempotent: absolute,
//! anchor, `mailto:` and `javascript:` targets pass through untouched.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Decide the replacement for a single `href` value.
///
/// Returns `None` when the href should be left alone.
pub fn rewrite_href(href: &str, origin: &Url, strip_html_ext: bool) -> Option<String> {
    if !href.starts_with('/') || href.starts_with("//") {
        return None;
    }

    let target = if strip_html_ext {
        href.strip_suffix(".html").unwrap_or(href)
    } else {
        href
    };

    origin.join(target).ok().map(|u| u.to_string())
}

/// Rewrite every root-relative `href` in `html` to an absolute URL.
///
/// Operates on serializer output, which always double-quotes attributes.
pub fn absolutize_hrefs(html: &str, origin: &Url, strip_html_ext: bool) -> String {
    static HREF_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"href="([^"]*)""#).expect("valid regex"));

    HREF_RE
        .replace_all(html, |caps: &regex::Captures| {
            match rewrite_href(&caps[1], origin, strip_html_ext) {
                Some(resolved) => format!(r#"href="{resolved}""#),
                None => caps[0].to_string(),
            }
        })
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://pages.example.com/").unwrap()
    }

    #[test]
    fn root_relative_rewritten() {
        let html = r#"<a href="/stories/a">A</a>"#;
        let out = absolutize_hrefs(html, &origin(), false);
        assert_eq!(out, r#"<a href="https://pages.example.com/stories/a">A</a>"#);
    }

    #[test]
    fn absolute_untouched() {
        let html = r#"<a href="https://other.com/page">X</a>"#;
        assert_eq!(absolutize_hrefs(html, &origin(), false), html);
    }

    #[test]
    fn anchors_and_mailto_untouched() {
        let html = r##"<a href="#section">S</a><a href="mailto:a@b.c">M</a>"##;
        assert_eq!(absolutize_hrefs(html, &origin(), false), html);
    }

    #[test]
    fn protocol_relative_untouched() {
        let html = r#"<a href="//cdn.example.com/x">C</a>"#;
        assert_eq!(absolutize_hrefs(html, &origin(), false), html);
    }

    #[test]
    fn html_extension_stripped_when_asked() {
        let html = r#"<a href="/stories/a.html">A</a>"#;
        let out = absolutize_hrefs(html, &origin(), true);
        assert_eq!(out, r#"<a href="https://pages.example.com/stories/a">A</a>"#);
    }

    #[test]
    fn rewrite_is_idempotent() {
        let html = r#"<a href="/a">A</a><a href="/b.html">B</a>"#;
        let once = absolutize_hrefs(html, &origin(), true);
        let twice = absolutize_hrefs(&once, &origin(), true);
        assert_eq!(once, twice);
    }
}
