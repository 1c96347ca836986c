//! Read-side DOM helpers shared by the transform passes.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// First element matching a selector string.
pub(crate) fn select_first<'a>(doc: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    doc.select(&sel).next()
}

/// First descendant of `el` matching a selector string.
pub(crate) fn select_first_in<'a>(el: &ElementRef<'a>, selector: &str) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(selector).ok()?;
    el.select(&sel).next()
}

/// All descendants of `el` matching a selector string.
pub(crate) fn select_all_in<'a>(el: &ElementRef<'a>, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(sel) => el.select(&sel).collect(),
        Err(_) => Vec::new(),
    }
}

/// Trimmed text content of an element.
pub(crate) fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Theme token from a BEM-style class list: the segment after the `--` of
/// the last double-dashed class, or the empty string. Absence is not an
/// error condition.
pub(crate) fn theme_token(el: &ElementRef) -> String {
    el.value()
        .classes()
        .filter(|c| c.contains("--"))
        .last()
        .and_then(|c| c.split("--").nth(1))
        .unwrap_or_default()
        .to_string()
}

/// Extract a CSS `background-image` URL from an inline style attribute,
/// resolved against `base`. Malformed styles yield `None`.
pub(crate) fn background_image_url(el: &ElementRef, base: &Url) -> Option<String> {
    static URL_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"url\(["']?([^"')]+)["']?\)"#).expect("valid regex"));

    let style = el.value().attr("style")?;
    if !style.contains("background-image") {
        return None;
    }
    let raw = URL_RE.captures(style)?.get(1)?.as_str();
    base.join(raw).ok().map(|u| u.to_string())
}

/// Next sibling that is an element.
pub(crate) fn next_sibling_element<'a>(el: &ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// Nearest ancestor (or self) carrying the given class.
pub(crate) fn closest_with_class<'a>(el: &ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    std::iter::once(*el)
        .chain(el.ancestors().filter_map(ElementRef::wrap))
        .find(|anc| anc.value().classes().any(|c| c == class))
}

/// First heading (scanning `tag` elements in document order) whose trimmed
/// text case-insensitively equals one of `labels`.
pub(crate) fn find_heading<'a>(
    doc: &'a Html,
    tag: &str,
    labels: &[String],
) -> Option<ElementRef<'a>> {
    let sel = Selector::parse(tag).ok()?;
    doc.select(&sel).find(|h| {
        let text = element_text(h).to_lowercase();
        labels.iter().any(|l| l.eq_ignore_ascii_case(&text))
    })
}

/// Walk forward from `start`, sibling by sibling, while the sibling's tag
/// matches `tag_filter`, collecting the outer HTML of descendants matching
/// `selector`. Returns the matches and the visited siblings' outer HTML.
pub(crate) fn collect_following(
    start: &ElementRef,
    tag_filter: &str,
    selector: &str,
) -> (Vec<String>, Vec<String>) {
    let mut matches = Vec::new();
    let mut visited = Vec::new();
    let mut cursor = *start;

    while let Some(next) = next_sibling_element(&cursor) {
        if !next.value().name().eq_ignore_ascii_case(tag_filter) {
            break;
        }
        for found in select_all_in(&next, selector) {
            matches.push(found.html());
        }
        visited.push(next.html());
        cursor = next;
    }

    (matches, visited)
}

/// Rebuild an element's markup with extra content appended inside it.
pub(crate) fn with_appended_child(el: &ElementRef, extra: &str) -> String {
    format!(
        "{}{}{}</{}>",
        start_tag(el),
        el.inner_html(),
        extra,
        el.value().name()
    )
}

/// Rebuild an element's markup with its content replaced.
pub(crate) fn with_inner(el: &ElementRef, inner: &str) -> String {
    format!("{}{inner}</{}>", start_tag(el), el.value().name())
}

/// Serialize an element's start tag, preserving attribute order and the
/// serializer's attribute escaping so rebuilt markup matches canonical form.
fn start_tag(el: &ElementRef) -> String {
    let mut tag = format!("<{}", el.value().name());
    for (name, value) in el.value().attrs() {
        tag.push_str(&format!(r#" {name}="{}""#, escape_attr(value)));
    }
    tag.push('>');
    tag
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

/// Escape plain text for splicing into markup.
pub(crate) fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
